//! Built-in plugins registered on every board.

use crate::assembly::{AssemblyHooks, Callback, MenuItem, PageAssembly, ASSEMBLE_EVENT};
use crate::site::page::BoardPage;

/// Pages linked from the navigation menu.
const NAVIGATION: [(&str, &str); 4] = [
    ("Home", "home"),
    ("Kills", "kills"),
    ("Losses", "losses"),
    ("Awards", "awards"),
];

/// Hooks every board page is assembled with.
pub fn default_hooks() -> AssemblyHooks<BoardPage> {
    let mut hooks = AssemblyHooks::new();
    hooks.register(ASSEMBLE_EVENT, navigation_menu);
    hooks.register(ASSEMBLE_EVENT, |assembly: &mut PageAssembly<BoardPage>| {
        assembly.add_before(
            "footer",
            Callback::text(format!(
                "<p class=\"generated\">killboard-core {}</p>",
                env!("CARGO_PKG_VERSION")
            )),
            9,
        )
    });
    hooks
}

fn navigation_menu(assembly: &mut PageAssembly<BoardPage>) -> crate::assembly::AssemblyResult<()> {
    let links: Vec<_> = NAVIGATION
        .iter()
        .map(|&(label, page)| MenuItem::link(label, assembly.page().uri.page(Some(page), 0, "id")))
        .collect();

    assembly.add_menu_item(MenuItem::caption("Navigation"));
    for link in links {
        assembly.add_menu_item(link);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::page::assembly_for;
    use crate::uri::{Origin, StaticKey, UriContext, UriSettings};
    use std::sync::Arc;

    #[test]
    fn test_default_hooks_add_navigation_and_footer() {
        let settings = UriSettings {
            path_style: true,
            script: "index.php".into(),
            hosts: Arc::new(Some("http://kb.test".to_string())),
            keys: Arc::new(StaticKey::new("K")),
        };
        let uri = UriContext::from_request(&settings, Origin::new("http", "kb.test", "/index.php"), Some("/awards/"), "")
            .unwrap();
        let html = assembly_for(BoardPage::new("KB", uri)).assemble(&default_hooks());

        assert!(html.contains("<li><strong>Navigation</strong></li>"));
        assert!(html.contains("<a href=\"http://kb.test/index.php/losses/?akey=K\">Losses</a>"));
        let generated = html.find("class=\"generated\"").unwrap();
        assert!(generated < html.find("</body></html>").unwrap());
    }
}
