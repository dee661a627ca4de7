use serde::{Deserialize, Serialize};

/// Output of the readability parser, consumed as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    /// HTML fragment holding the main content
    pub content: String,
    pub excerpt: Option<String>,
    pub byline: Option<String>,
    pub direction: Option<String>,
    pub length: usize,
}
