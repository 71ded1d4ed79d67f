//! Per-request URI state: parsed arguments, resolved host root and the
//! outbound URI builder.

use std::fmt;
use std::sync::Arc;

use crate::html;
use crate::uri::param::{ArgValue, IntoParams, Param, ACTION};
use crate::uri::parser::{parse_args, DEFAULT_PAGE};
use crate::uri::providers::{HostProvider, KeyProvider};
use crate::uri::{UriError, UriResult};

/// Name of the session key parameter appended to generated URIs.
pub const SESSION_KEY: &str = "akey";

/// Request data the host fallback is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
    pub script_name: String,
}

impl Origin {
    pub fn new(
        scheme: impl Into<String>,
        host: impl Into<String>,
        script_name: impl Into<String>,
    ) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            script_name: script_name.into(),
        }
    }

    fn site_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Settings shared by every request's [`UriContext`].
#[derive(Clone)]
pub struct UriSettings {
    /// Generate path-info URIs instead of query-string URIs.
    pub path_style: bool,
    /// Front controller segment inserted after a configured host.
    pub script: String,
    pub hosts: Arc<dyn HostProvider>,
    pub keys: Arc<dyn KeyProvider>,
}

impl fmt::Debug for UriSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UriSettings")
            .field("path_style", &self.path_style)
            .field("script", &self.script)
            .finish_non_exhaustive()
    }
}

/// URI state for a single request.
///
/// Arguments are parsed once when the context is created and the host root
/// is resolved at the same time. Nothing here outlives the request.
pub struct UriContext {
    args: Vec<Param>,
    root: String,
    root_overridden: bool,
    configured_host: Option<String>,
    origin: Origin,
    script: String,
    path_style: bool,
    keys: Arc<dyn KeyProvider>,
}

impl UriContext {
    /// Parse the request target and resolve the host root.
    ///
    /// Returns [`UriError::RedirectRequired`] for old links that carry both
    /// path-info and a query `a` parameter.
    pub fn from_request(
        settings: &UriSettings,
        origin: Origin,
        path_info: Option<&str>,
        query: &str,
    ) -> UriResult<Self> {
        let configured_host = settings
            .hosts
            .kb_host()
            .map(|h| h.trim_end_matches('/').to_string());

        let args = parse_args(path_info, query).map_err(|stale| {
            let base = configured_host
                .clone()
                .unwrap_or_else(|| origin.site_url());
            let location = format!("{}/?{}", base, stale.query);
            tracing::info!(location = %location, "Stale link, redirecting");
            UriError::RedirectRequired { location }
        })?;

        let mut ctx = Self {
            args,
            root: String::new(),
            root_overridden: false,
            configured_host,
            origin,
            script: settings.script.trim_matches('/').to_string(),
            path_style: settings.path_style,
            keys: settings.keys.clone(),
        };
        ctx.root = ctx.resolve_root();

        tracing::debug!(
            page = %ctx.current_page(),
            args = ctx.args.len(),
            root = %ctx.root,
            "Parsed request URI"
        );
        Ok(ctx)
    }

    fn resolve_root(&self) -> String {
        match &self.configured_host {
            Some(host) => {
                let mut root = format!("{}/", host);
                if self.path_style && !self.script.is_empty() {
                    root.push_str(&self.script);
                    root.push('/');
                }
                root
            }
            None => {
                let mut root = format!("{}{}", self.origin.site_url(), self.origin.script_name);
                if self.path_style {
                    root.push('/');
                }
                root
            }
        }
    }

    /// Parsed arguments in URI order; the first is always `a`.
    pub fn args(&self) -> &[Param] {
        &self.args
    }

    /// The resolved host root used as prefix for generated URIs.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn path_style(&self) -> bool {
        self.path_style
    }

    /// Replace the host root for the rest of this request.
    pub fn set_root(&mut self, host: impl Into<String>) {
        self.root = host.into();
        self.root_overridden = true;
    }

    /// Switch between path-info and query-string URIs.
    pub fn use_path(&mut self, path_style: bool) {
        self.path_style = path_style;
        if !self.root_overridden {
            self.root = self.resolve_root();
        }
    }

    /// Look up an argument by name, falling back to a flag at `position`.
    ///
    /// The positional fallback returns the flag's *name*, so that
    /// `/kill_detail/45/` answers `get_arg("id", Some(1))` with `"45"` just
    /// like `?a=kill_detail&id=45` does.
    pub fn get_arg(&self, name: &str, position: Option<usize>) -> Option<ArgValue<'_>> {
        if let Some(param) = self.args.iter().find(|p| p.name == name) {
            return Some(ArgValue::from(&param.value));
        }
        position
            .and_then(|i| self.args.get(i))
            .filter(|p| p.value.is_flag())
            .map(|p| ArgValue::Text(&p.name))
    }

    /// The page this request resolved to.
    pub fn current_page(&self) -> &str {
        self.get_arg(ACTION, Some(0))
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_PAGE)
    }

    /// Build a board URI.
    ///
    /// ```text
    /// [(a, kill_detail, pos), (45, flag, pos), (unlimited, flag, pos)]
    ///   path style:  root/index.php/kill_detail/45/unlimited/?akey=K
    ///   query style: root/?a=kill_detail&amp;45&amp;unlimited&amp;akey=K
    /// ```
    ///
    /// Without a leading `a` parameter the current page is used.
    pub fn build(&self, params: impl IntoParams) -> String {
        let mut params = params.into_params();
        params.push(Param::new(SESSION_KEY, self.keys.make_key(), false));
        let leads_with_action = params.first().is_some_and(Param::is_action);

        let mut path = Vec::new();
        let mut query = Vec::new();
        for param in &params {
            if param.positional && self.path_style {
                path.push(param.path_segment().to_string());
            } else {
                query.push(param.to_string());
            }
        }

        let mut url = self.root.clone();
        let current = self.current_page();
        if self.path_style {
            if !leads_with_action {
                url.push_str(current);
                url.push('/');
            }
            if !path.is_empty() {
                url.push_str(&path.join("/"));
                url.push('/');
            }
            if !query.is_empty() {
                url.push('?');
            }
        } else if query.is_empty() {
            url.push_str("?a=");
            url.push_str(current);
        } else if !leads_with_action {
            url.push_str("?a=");
            url.push_str(current);
            url.push('&');
        } else {
            url.push('?');
        }
        url.push_str(&query.join("&amp;"));
        url
    }

    /// Link to a page, optionally with an id parameter.
    ///
    /// An id of `0` or `""` means no id. Without a page the bare root is
    /// returned.
    pub fn page(&self, page: Option<&str>, id: impl fmt::Display, id_name: &str) -> String {
        let Some(page) = page else {
            return self.root.clone();
        };
        let id = id.to_string();
        let id = html::escape(&id);
        if id.is_empty() || id == "0" {
            self.build(Param::action(page, true))
        } else {
            self.build([
                Param::action(page, true),
                Param::new(id_name, id.into_owned(), true),
            ])
        }
    }
}

impl fmt::Debug for UriContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UriContext")
            .field("args", &self.args)
            .field("root", &self.root)
            .field("path_style", &self.path_style)
            .finish_non_exhaustive()
    }
}
