//! Request inspection.
//!
//! # Responsibilities
//! - Split the request path into script name and path-info
//! - Extract the raw query string, host and scheme
//! - Recover the session key carried by links the board generated
//!
//! # Design Decisions
//! - The query string is handed over raw, exactly as the client sent it
//! - `X-Forwarded-Proto` decides the scheme when a proxy sits in front

use axum::http::{header, HeaderMap, Uri};

use crate::uri::{Origin, SESSION_KEY};

pub const X_REQUEST_ID: &str = "x-request-id";
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The parts of a request the URI subsystem needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub path_info: Option<String>,
    pub query: String,
    pub origin: Origin,
    pub session_key: Option<String>,
}

impl RequestTarget {
    pub fn from_parts(uri: &Uri, headers: &HeaderMap, script_name: &str) -> Self {
        let path = uri.path();
        // "/index.php/…" and the rewritten "/index/…" both name the front controller
        let stem = script_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .filter(|stem| !stem.is_empty() && !stem.ends_with('/'));
        let path_info = [Some(script_name), stem]
            .into_iter()
            .flatten()
            .find_map(|prefix| {
                path.strip_prefix(prefix)
                    .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            })
            .unwrap_or(path);
        let path_info = Some(path_info.to_string()).filter(|p| !p.trim_matches('/').is_empty());

        let query = uri.query().unwrap_or_default().to_string();

        let host = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .unwrap_or_else(|| "localhost".to_string());
        let scheme = headers
            .get(X_FORWARDED_PROTO)
            .and_then(|h| h.to_str().ok())
            .or_else(|| uri.scheme_str())
            .unwrap_or("http")
            .to_string();

        let session_key = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, v)| *k == SESSION_KEY && !v.is_empty())
            .map(|(_, v)| v.to_string());

        Self {
            path_info,
            query,
            origin: Origin::new(scheme, host, script_name),
            session_key,
        }
    }
}

/// The request id set by the request-id layer, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(host: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::HOST, HeaderValue::from_str(host).unwrap());
        h
    }

    #[test]
    fn test_script_prefix_is_stripped() {
        let uri: Uri = "/index.php/kill_detail/45/?akey=abc".parse().unwrap();
        let target = RequestTarget::from_parts(&uri, &headers("kb.test"), "/index.php");

        assert_eq!(target.path_info.as_deref(), Some("/kill_detail/45/"));
        assert_eq!(target.query, "akey=abc");
        assert_eq!(target.session_key.as_deref(), Some("abc"));
        assert_eq!(target.origin, Origin::new("http", "kb.test", "/index.php"));
    }

    #[test]
    fn test_rewritten_paths_are_path_info() {
        let uri: Uri = "/kill_detail/45/".parse().unwrap();
        let target = RequestTarget::from_parts(&uri, &headers("kb.test"), "/index.php");
        assert_eq!(target.path_info.as_deref(), Some("/kill_detail/45/"));

        // not a prefix match on a segment boundary
        let uri: Uri = "/index.phpx/".parse().unwrap();
        let target = RequestTarget::from_parts(&uri, &headers("kb.test"), "/index.php");
        assert_eq!(target.path_info.as_deref(), Some("/index.phpx/"));
    }

    #[test]
    fn test_rewritten_front_controller_is_stripped() {
        let uri: Uri = "/index/kill_detail/45/unlimited".parse().unwrap();
        let target = RequestTarget::from_parts(&uri, &headers("kb.test"), "/index.php");
        assert_eq!(target.path_info.as_deref(), Some("/kill_detail/45/unlimited"));
    }

    #[test]
    fn test_root_has_no_path_info() {
        for path in ["/", "/index.php", "/index.php/", "/index/", "/?a=awards"] {
            let uri: Uri = path.parse().unwrap();
            let target = RequestTarget::from_parts(&uri, &headers("kb.test"), "/index.php");
            assert_eq!(target.path_info, None, "{path}");
        }
    }

    #[test]
    fn test_forwarded_scheme() {
        let uri: Uri = "/".parse().unwrap();
        let mut h = headers("kb.test");
        h.insert(X_FORWARDED_PROTO, HeaderValue::from_static("https"));
        let target = RequestTarget::from_parts(&uri, &h, "/index.php");
        assert_eq!(target.origin.scheme, "https");
        assert_eq!(request_id(&h), "unknown");
    }
}
