use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a harvested element reads as a plain link or a call-to-action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Link,
    Cta,
}

/// Coarse page region an element occupied when it was harvested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkLocation {
    Header,
    Footer,
    Content,
}

/// Viewport-relative bounding box captured at scan time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

/// One anchor or button-like element found in the source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    /// Absolute target, resolved against the document base URI
    pub url: String,
    pub text: String,
    #[serde(alias = "type")]
    pub kind: LinkKind,
    pub is_button: bool,
    pub position: Position,
    pub classes: String,
    pub id: String,
    pub attributes: BTreeMap<String, String>,
    pub location: LinkLocation,
}

/// Collapse records sharing a URL, keeping the first in scan order.
pub fn dedup_by_url(records: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = std::collections::HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, text: &str) -> LinkRecord {
        LinkRecord {
            url: url.to_string(),
            text: text.to_string(),
            kind: LinkKind::Link,
            is_button: false,
            position: Position::default(),
            classes: String::new(),
            id: String::new(),
            attributes: BTreeMap::new(),
            location: LinkLocation::Content,
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let records = vec![
            record("https://example.com/a", "first"),
            record("https://example.com/b", "other"),
            record("https://example.com/a", "second"),
        ];
        let unique = dedup_by_url(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].text, "first");
        assert_eq!(unique[1].url, "https://example.com/b");
    }

    #[test]
    fn test_wire_names() {
        let mut link = record("https://example.com/apply", "Apply");
        link.kind = LinkKind::Cta;
        link.is_button = true;
        let json = serde_json::to_value(&link).unwrap();
        assert_eq!(json["kind"], "cta");
        assert_eq!(json["isButton"], true);
        assert_eq!(json["location"], "content");
    }

    #[test]
    fn test_accepts_legacy_type_field() {
        let json = r#"{
            "url": "https://example.com/x", "text": "x", "type": "link",
            "isButton": false,
            "position": {"top": 0.0, "left": 0.0, "bottom": 0.0, "right": 0.0},
            "classes": "", "id": "", "attributes": {}, "location": "footer"
        }"#;
        let link: LinkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(link.kind, LinkKind::Link);
        assert_eq!(link.location, LinkLocation::Footer);
    }
}
