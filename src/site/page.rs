//! Generic board page.
//!
//! Widget rendering for individual pages lives elsewhere; this page renders
//! the resolved action and its arguments so every URI produces a document.

use crate::assembly::{MenuItemKind, MethodFn, Page, PageAssembly};
use crate::html::escape;
use crate::uri::{Param, ParamValue, UriContext, SESSION_KEY};

/// Slots queued for every board page, in document order.
pub const STANDARD_SLOTS: [&str; 4] = ["header", "menu", "content", "footer"];

/// Page object backing the standard slots.
#[derive(Debug)]
pub struct BoardPage {
    pub title: String,
    pub uri: UriContext,
}

impl BoardPage {
    pub fn new(title: impl Into<String>, uri: UriContext) -> Self {
        Self {
            title: title.into(),
            uri,
        }
    }

    fn header(&self, _: &PageAssembly<Self>) -> Option<String> {
        Some(format!(
            "<html><head><title>{} - {}</title></head><body><h1><a href=\"{}\">{}</a></h1>",
            escape(&self.title),
            escape(self.uri.current_page()),
            self.uri.page(Some("home"), 0, "id"),
            escape(&self.title),
        ))
    }

    fn menu(&self, assembly: &PageAssembly<Self>) -> Option<String> {
        let mut html = String::from("<ul class=\"menu\">");
        for item in assembly.menu_items() {
            let onclick = item
                .onclick
                .as_deref()
                .map(|js| format!(" onclick=\"{}\"", escape(js)))
                .unwrap_or_default();
            let entry = match item.kind {
                MenuItemKind::Link => format!(
                    "<a href=\"{}\"{}>{}</a>",
                    item.url,
                    onclick,
                    escape(&item.name)
                ),
                MenuItemKind::Img => format!(
                    "<img src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\"{}/>",
                    item.url,
                    escape(&item.name),
                    item.width,
                    item.height,
                    onclick
                ),
                MenuItemKind::Caption => {
                    format!("<strong>{}</strong>", escape(&item.name))
                }
                MenuItemKind::Points => {
                    format!("<span class=\"points\">{}</span>", escape(&item.name))
                }
            };
            html.push_str("<li>");
            html.push_str(&entry);
            html.push_str("</li>");
        }
        html.push_str("</ul>");
        Some(html)
    }

    fn content(&self, assembly: &PageAssembly<Self>) -> Option<String> {
        let mut html = format!(
            "<div class=\"content\"><h2>{}</h2><dl>",
            escape(self.uri.current_page())
        );
        for param in self.uri.args().iter().skip(1) {
            if param.name == SESSION_KEY {
                continue;
            }
            html.push_str(&render_param(param));
        }
        html.push_str("</dl>");
        html.push_str(&assembly.render_view());
        html.push_str("</div>");
        Some(html)
    }

    fn footer(&self, _: &PageAssembly<Self>) -> Option<String> {
        Some("</body></html>".to_string())
    }
}

fn render_param(param: &Param) -> String {
    let value = match &param.value {
        ParamValue::Flag => String::new(),
        ParamValue::Text(v) => escape(v).into_owned(),
    };
    let class = if param.positional { "path" } else { "query" };
    format!(
        "<dt class=\"{}\">{}</dt><dd>{}</dd>",
        class,
        escape(&param.name),
        value
    )
}

impl Page for BoardPage {
    fn component(id: &str) -> Option<MethodFn<Self>> {
        match id {
            "header" => Some(BoardPage::header),
            "menu" => Some(BoardPage::menu),
            "content" => Some(BoardPage::content),
            "footer" => Some(BoardPage::footer),
            _ => None,
        }
    }
}

/// An assembly with the standard slots queued and the view selected from
/// the `view` argument.
pub fn assembly_for(page: BoardPage) -> PageAssembly<BoardPage> {
    let view = page
        .uri
        .get_arg("view", None)
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let mut assembly = PageAssembly::new(page);
    for slot in STANDARD_SLOTS {
        assembly.queue(slot);
    }
    assembly.set_view(view);
    assembly
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::{AssemblyHooks, Callback};
    use crate::uri::{Origin, StaticKey, UriSettings};
    use std::sync::Arc;

    fn board(query: &str) -> BoardPage {
        let settings = UriSettings {
            path_style: false,
            script: "index.php".into(),
            hosts: Arc::new(Some("http://kb.test".to_string())),
            keys: Arc::new(StaticKey::new("K")),
        };
        let uri = UriContext::from_request(&settings, Origin::new("http", "kb.test", "/index.php"), None, query)
            .unwrap();
        BoardPage::new("Test <Board>", uri)
    }

    #[test]
    fn test_standard_page_renders_in_slot_order() {
        let html = assembly_for(board("a=kill_detail&id=45&unlimited")).assemble(&AssemblyHooks::new());

        let header = html.find("<title>Test &lt;Board&gt; - kill_detail</title>").unwrap();
        let menu = html.find("<ul class=\"menu\">").unwrap();
        let content = html.find("<h2>kill_detail</h2>").unwrap();
        assert!(header < menu && menu < content);
        assert!(html.contains("<dt class=\"query\">id</dt><dd>45</dd>"));
        assert!(html.contains("<dt class=\"query\">unlimited</dt><dd></dd>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[test]
    fn test_selected_view_is_rendered_in_content() {
        let mut assembly = assembly_for(board("a=corp_detail&view=losses"));
        assembly.add_view("losses", Callback::text("<p>losses</p>"));
        let html = assembly.assemble(&AssemblyHooks::new());
        assert!(html.contains("</dl><p>losses</p></div>"));
    }
}
