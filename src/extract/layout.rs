//! Rendered geometry captured from the live page.

use std::collections::HashMap;

use scraper::ElementRef;
use serde::{Deserialize, Serialize};

use crate::domain::Position;
use crate::extract::rules::NODE_MARKER_ATTR;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            right: width,
            bottom: height,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Position {
        Position {
            top: self.top,
            left: self.left,
            bottom: self.bottom,
            right: self.right,
        }
    }
}

/// Layout facts for one marked element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementLayout {
    pub node: u32,
    pub rect: Rect,
    pub offset_width: f64,
    pub offset_height: f64,
    pub client_rects: u32,
    pub background_color: String,
    pub has_border: bool,
}

impl ElementLayout {
    /// Non-zero box, or at least one client rect.
    pub fn is_visible(&self) -> bool {
        (self.offset_width > 0.0 && self.offset_height > 0.0) || self.client_rects > 0
    }
}

/// Lookup from marker value to layout.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    by_node: HashMap<u32, ElementLayout>,
}

impl Layout {
    pub fn new(entries: impl IntoIterator<Item = ElementLayout>) -> Self {
        Self {
            by_node: entries.into_iter().map(|e| (e.node, e)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Layout of an element carrying a probe marker.
    pub fn of(&self, element: ElementRef<'_>) -> Option<&ElementLayout> {
        let marker = element.value().attr(NODE_MARKER_ATTR)?;
        let node = marker.trim().parse::<u32>().ok()?;
        self.by_node.get(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_lookup_by_marker() {
        let html = Html::parse_fragment(
            r#"<img data-skimmer-node="7" src="a.png"><img src="b.png">"#,
        );
        let layout = Layout::new([ElementLayout {
            node: 7,
            rect: Rect::sized(40.0, 30.0),
            ..Default::default()
        }]);
        let sel = Selector::parse("img").unwrap();
        let imgs: Vec<_> = html.select(&sel).collect();
        assert_eq!(layout.of(imgs[0]).map(|l| l.rect.width), Some(40.0));
        assert!(layout.of(imgs[1]).is_none());
    }

    #[test]
    fn test_visibility() {
        let hidden = ElementLayout::default();
        assert!(!hidden.is_visible());

        let boxed = ElementLayout {
            offset_width: 10.0,
            offset_height: 10.0,
            ..Default::default()
        };
        assert!(boxed.is_visible());

        let inline = ElementLayout {
            client_rects: 1,
            ..Default::default()
        };
        assert!(inline.is_visible());
    }

    #[test]
    fn test_deserializes_probe_entry() {
        let json = r#"{"node":3,"rect":{"top":1,"left":2,"bottom":3,"right":4,"width":2,"height":2},"clientRects":1,"backgroundColor":"rgb(0, 0, 0)"}"#;
        let entry: ElementLayout = serde_json::from_str(json).unwrap();
        assert_eq!(entry.node, 3);
        assert_eq!(entry.client_rects, 1);
        assert!(!entry.has_border);
    }
}
