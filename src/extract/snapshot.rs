use serde::{Deserialize, Serialize};

use crate::extract::layout::{ElementLayout, Layout};

/// Background image URLs declared by one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylesheetImages {
    /// Sheet location; `None` for inline `<style>` blocks
    pub href: Option<String>,
    pub urls: Vec<String>,
}

/// Serialized state of a rendered page, as captured by the layout probe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    /// `documentElement.outerHTML` with every element marked
    pub html: String,
    /// Final `location.href`
    pub url: String,
    pub base_uri: String,
    #[serde(default)]
    pub viewport_height: f64,
    #[serde(default)]
    pub document_height: f64,
    #[serde(default)]
    pub layout: Vec<ElementLayout>,
    #[serde(default)]
    pub stylesheets: Vec<StylesheetImages>,
}

impl PageSnapshot {
    /// Snapshot of static HTML with no rendering information.
    pub fn from_html(html: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            html: html.into(),
            base_uri: url.clone(),
            url,
            ..Default::default()
        }
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.layout.iter().cloned())
    }
}
