//! Side menu entries collected during page setup.

use serde::Serialize;

/// Default box size for image entries.
pub const DEFAULT_IMAGE_SIZE: u32 = 145;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuItemKind {
    Caption,
    Img,
    Link,
    Points,
}

/// One entry of the side menu. Only links need a url, only images a size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub kind: MenuItemKind,
    pub name: String,
    pub url: String,
    pub width: u32,
    pub height: u32,
    /// Script run on click, if any.
    pub onclick: Option<String>,
}

impl MenuItem {
    pub fn new(kind: MenuItemKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            url: String::new(),
            width: DEFAULT_IMAGE_SIZE,
            height: DEFAULT_IMAGE_SIZE,
            onclick: None,
        }
    }

    pub fn caption(name: impl Into<String>) -> Self {
        Self::new(MenuItemKind::Caption, name)
    }

    pub fn link(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new(MenuItemKind::Link, name)
        }
    }

    pub fn img(name: impl Into<String>, url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            ..Self::new(MenuItemKind::Img, name)
        }
    }

    pub fn points(name: impl Into<String>) -> Self {
        Self::new(MenuItemKind::Points, name)
    }

    pub fn with_onclick(mut self, script: impl Into<String>) -> Self {
        self.onclick = Some(script.into());
        self
    }
}
