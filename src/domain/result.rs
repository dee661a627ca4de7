use serde::{Deserialize, Serialize};

use crate::domain::LinkRecord;

/// Terminal value handed back to the requesting page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,
    /// Sanitized HTML fragment
    pub content: String,
    pub url: String,
    pub excerpt: Option<String>,
    pub byline: Option<String>,
    #[serde(alias = "dir")]
    pub direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(default)]
    pub extracted_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<LinkRecord>>,
}

/// Structured failure that replaces an [`ExtractionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorReply {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reply_without_details_has_single_field() {
        let reply = ErrorReply::new("Readability couldn't parse the content");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Readability couldn't parse the content"})
        );
    }

    #[test]
    fn test_result_wire_names() {
        let result = ExtractionResult {
            title: "T".into(),
            url: "https://example.com/".into(),
            direction: Some("ltr".into()),
            extracted_images: vec!["https://example.com/a.png".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["direction"], "ltr");
        assert_eq!(json["extractedImages"][0], "https://example.com/a.png");
        assert!(json.get("links").is_none());
        assert!(json.get("length").is_none());
    }

    #[test]
    fn test_result_accepts_dir_alias() {
        let json = r#"{"title":"T","content":"","url":"u","excerpt":null,"byline":null,"dir":"rtl"}"#;
        let result: ExtractionResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.direction.as_deref(), Some("rtl"));
        assert!(result.extracted_images.is_empty());
    }
}
