//! URI parameter model shared by the parser and the builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the parameter that selects the page (the "action").
pub const ACTION: &str = "a";

/// Value carried by a URI parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// The parameter was given without a value (`?unlimited`, `/unlimited/`).
    Flag,
    /// An explicit value.
    Text(String),
}

impl ParamValue {
    /// Returns the text, or `None` for a bare flag.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(s) => Some(s),
            ParamValue::Flag => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, ParamValue::Flag)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Text(n.to_string())
    }
}

/// One `(name, value, positional)` entry of a killboard URI.
///
/// `positional` is true when the parameter lives in the path part of the URL
/// rather than the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub value: ParamValue,
    pub positional: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>, positional: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            positional,
        }
    }

    /// A bare flag parameter with no value.
    pub fn flag(name: impl Into<String>, positional: bool) -> Self {
        Self {
            name: name.into(),
            value: ParamValue::Flag,
            positional,
        }
    }

    /// The page-selecting `a` parameter.
    pub fn action(page: impl Into<String>, positional: bool) -> Self {
        Self::new(ACTION, page.into(), positional)
    }

    pub fn is_action(&self) -> bool {
        self.name == ACTION
    }

    /// Text used when this parameter becomes a path segment.
    pub(crate) fn path_segment(&self) -> &str {
        match &self.value {
            ParamValue::Flag => &self.name,
            ParamValue::Text(v) => v,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            ParamValue::Flag => write!(f, "{}", self.name),
            ParamValue::Text(v) => write!(f, "{}={}", self.name, v),
        }
    }
}

/// Result of an argument lookup.
///
/// Lookups by position hand back the parameter's *name*, which is why this
/// borrows rather than referencing a [`ParamValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgValue<'a> {
    Flag,
    Text(&'a str),
}

impl<'a> ArgValue<'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            ArgValue::Text(s) => Some(s),
            ArgValue::Flag => None,
        }
    }

    pub fn is_flag(&self) -> bool {
        matches!(self, ArgValue::Flag)
    }
}

impl<'a> From<&'a ParamValue> for ArgValue<'a> {
    fn from(value: &'a ParamValue) -> Self {
        match value {
            ParamValue::Flag => ArgValue::Flag,
            ParamValue::Text(s) => ArgValue::Text(s),
        }
    }
}

/// Conversion of the accepted `build` argument shapes into one ordered list.
///
/// A single parameter, a list of parameters, or a list followed by one more
/// trailing parameter are all accepted.
pub trait IntoParams {
    fn into_params(self) -> Vec<Param>;
}

impl IntoParams for Param {
    fn into_params(self) -> Vec<Param> {
        vec![self]
    }
}

impl IntoParams for Vec<Param> {
    fn into_params(self) -> Vec<Param> {
        self
    }
}

impl IntoParams for &[Param] {
    fn into_params(self) -> Vec<Param> {
        self.to_vec()
    }
}

impl<const N: usize> IntoParams for [Param; N] {
    fn into_params(self) -> Vec<Param> {
        self.into()
    }
}

impl IntoParams for (Vec<Param>, Param) {
    fn into_params(self) -> Vec<Param> {
        let (mut list, last) = self;
        list.push(last);
        list
    }
}

impl IntoParams for () {
    fn into_params(self) -> Vec<Param> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_params_shapes() {
        let single = Param::action("awards", true).into_params();
        assert_eq!(single.len(), 1);

        let list = vec![Param::action("kill_detail", true), Param::new("id", "45", true)];
        assert_eq!(list.clone().into_params(), list);

        let merged = (list.clone(), Param::flag("unlimited", true)).into_params();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2].name, "unlimited");
        assert!(merged[2].value.is_flag());
    }

    #[test]
    fn test_path_segment_uses_name_for_flags() {
        assert_eq!(Param::flag("unlimited", true).path_segment(), "unlimited");
        assert_eq!(Param::new("id", "45", true).path_segment(), "45");
    }
}
