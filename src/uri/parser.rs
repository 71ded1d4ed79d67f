//! Incoming URI parsing.
//!
//! # Responsibilities
//! - Turn path-info segments into positional parameters
//! - Turn the raw query string into named parameters
//! - Guarantee exactly one `a` parameter, always first
//! - Detect old links that mix path-info with `?a=`
//!
//! # Design Decisions
//! - Values are kept raw; decoding belongs to whoever renders them
//! - A query `a` only counts when it has a non-empty value
//! - Pure function, no I/O; the redirect is reported, not performed

use crate::uri::param::{Param, ParamValue, ACTION};

/// Page used when the URI does not name one.
pub const DEFAULT_PAGE: &str = "home";

/// Page name normalised to [`DEFAULT_PAGE`].
const INDEX_PAGE: &str = "index";

/// A link carrying both path-info and a query `a` parameter.
///
/// Such links predate path-style URLs and cannot be interpreted; the caller
/// must redirect to the query-string-only form of `query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleLink {
    pub query: String,
}

/// Parse path-info and query string into the ordered parameter list.
///
/// ```text
/// /kill_detail/45/unlimited        → (a, kill_detail, pos) (45, flag, pos) (unlimited, flag, pos)
/// ?a=kill_detail&id=45&unlimited   → (a, kill_detail) (id, 45) (unlimited, flag)
/// /45                              → (a, home, pos) (45, flag, pos)
/// ```
pub fn parse_args(path_info: Option<&str>, query: &str) -> Result<Vec<Param>, StaleLink> {
    let mut args = Vec::new();
    let mut page_found = false;

    let path_info = path_info
        .map(|p| p.trim_matches('/'))
        .filter(|p| !p.is_empty());

    if let Some(path) = path_info {
        for (pos, segment) in path.split('/').filter(|s| !s.is_empty()).enumerate() {
            if pos == 0 {
                if is_numeric(segment) {
                    args.push(Param::action(DEFAULT_PAGE, true));
                    args.push(Param::flag(segment, true));
                } else {
                    args.push(Param::action(segment, true));
                }
                page_found = true;
            } else {
                args.push(Param::flag(segment, true));
            }
        }
    }

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((k, v)) => (k, Some(v)),
            None => (pair, None),
        };

        if key == ACTION {
            let page = match value {
                Some(v) if !v.is_empty() => v,
                _ => continue,
            };
            if path_info.is_some() {
                return Err(StaleLink {
                    query: query.to_string(),
                });
            }
            args.retain(|p: &Param| !p.is_action());
            args.insert(0, Param::action(page, false));
            page_found = true;
        } else {
            let value = match value {
                Some(v) => ParamValue::Text(v.to_string()),
                None => ParamValue::Flag,
            };
            args.push(Param::new(key, value, false));
        }
    }

    if !page_found {
        args.insert(0, Param::action(DEFAULT_PAGE, false));
    }

    if let Some(first) = args.first_mut() {
        if first.value.as_text() == Some(INDEX_PAGE) {
            first.value = ParamValue::Text(DEFAULT_PAGE.to_string());
        }
    }

    Ok(args)
}

/// Whether a path segment reads as a decimal number (`45`, `-3`, `1.5e3`).
pub(crate) fn is_numeric(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(i) => (&unsigned[..i], Some(&unsigned[i + 1..])),
        None => (unsigned, None),
    };

    let mut digits = 0;
    let mut dots = 0;
    for c in mantissa.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(args: &[Param]) -> Vec<(String, Option<String>, bool)> {
        args.iter()
            .map(|p| {
                (
                    p.name.clone(),
                    p.value.as_text().map(str::to_string),
                    p.positional,
                )
            })
            .collect()
    }

    fn t(name: &str, value: Option<&str>, positional: bool) -> (String, Option<String>, bool) {
        (name.to_string(), value.map(str::to_string), positional)
    }

    #[test]
    fn test_path_info_parse() {
        let args = parse_args(Some("/kill_detail/45/unlimited/"), "").unwrap();
        assert_eq!(
            triples(&args),
            vec![
                t("a", Some("kill_detail"), true),
                t("45", None, true),
                t("unlimited", None, true),
            ]
        );
    }

    #[test]
    fn test_query_string_parse() {
        let args = parse_args(None, "a=kill_detail&id=45&unlimited").unwrap();
        assert_eq!(
            triples(&args),
            vec![
                t("a", Some("kill_detail"), false),
                t("id", Some("45"), false),
                t("unlimited", None, false),
            ]
        );
    }

    #[test]
    fn test_numeric_first_segment_continues_home() {
        let args = parse_args(Some("/1234/"), "").unwrap();
        assert_eq!(
            triples(&args),
            vec![t("a", Some("home"), true), t("1234", None, true)]
        );
    }

    #[test]
    fn test_mixed_path_and_query() {
        let args = parse_args(Some("kill_detail"), "id=45&unlimited").unwrap();
        assert_eq!(
            triples(&args),
            vec![
                t("a", Some("kill_detail"), true),
                t("id", Some("45"), false),
                t("unlimited", None, false),
            ]
        );
    }

    #[test]
    fn test_query_action_goes_first() {
        let args = parse_args(None, "id=45&a=pilot_detail").unwrap();
        assert_eq!(args[0], Param::action("pilot_detail", false));
        assert_eq!(args[1], Param::new("id", "45", false));
    }

    #[test]
    fn test_repeated_query_action_keeps_one() {
        let args = parse_args(None, "a=awards&a=kill_list").unwrap();
        assert_eq!(args.iter().filter(|p| p.is_action()).count(), 1);
        assert_eq!(args[0].value.as_text(), Some("kill_list"));
    }

    #[test]
    fn test_missing_page_defaults_to_home() {
        let args = parse_args(None, "").unwrap();
        assert_eq!(args, vec![Param::action("home", false)]);

        let args = parse_args(Some("///"), "id=3").unwrap();
        assert_eq!(args[0], Param::action("home", false));
        assert_eq!(args[1], Param::new("id", "3", false));
    }

    #[test]
    fn test_empty_action_is_skipped() {
        let args = parse_args(Some("/awards/"), "a=&x=1").unwrap();
        assert_eq!(args[0], Param::action("awards", true));
        assert_eq!(args.len(), 2);

        let args = parse_args(None, "a").unwrap();
        assert_eq!(args, vec![Param::action("home", false)]);
    }

    #[test]
    fn test_stale_link_detected() {
        let err = parse_args(Some("/kill_detail/"), "a=kill_detail&id=4").unwrap_err();
        assert_eq!(err.query, "a=kill_detail&id=4");
    }

    #[test]
    fn test_index_normalised_to_home() {
        let args = parse_args(Some("/index/"), "").unwrap();
        assert_eq!(args[0], Param::action("home", true));

        let args = parse_args(None, "a=index").unwrap();
        assert_eq!(args[0], Param::action("home", false));
    }

    // The parser sees path-info after the HTTP layer has removed the front
    // controller (`/index.php` or `/index`, see http/request.rs). A leading
    // `index` that reaches this far is a page name and becomes `home`.
    #[test]
    fn test_front_controller_segment_is_not_stripped() {
        let args = parse_args(Some("index/kill_detail/45/unlimited"), "").unwrap();
        assert_eq!(
            triples(&args),
            vec![
                t("a", Some("home"), true),
                t("kill_detail", None, true),
                t("45", None, true),
                t("unlimited", None, true),
            ]
        );

        let args = parse_args(Some("kill_detail/45/unlimited"), "").unwrap();
        assert_eq!(args[0], Param::action("kill_detail", true));
    }

    #[test]
    fn test_value_split_on_first_equals() {
        let args = parse_args(None, "a=search&q=x=y").unwrap();
        assert_eq!(args[1], Param::new("q", "x=y", false));
    }

    #[test]
    fn test_is_numeric() {
        for s in ["45", "-3", "+7", "1.5", ".5", "5.", "1e3", "2E-4"] {
            assert!(is_numeric(s), "{s} should be numeric");
        }
        for s in ["", "abc", "0x1A", "1.2.3", "e5", "1e", "12a", " 12", "."] {
            assert!(!is_numeric(s), "{s} should not be numeric");
        }
    }
}
