use thiserror::Error;

use crate::domain::ErrorReply;

pub const PARSE_FAILURE_MESSAGE: &str = "Readability couldn't parse the content";
pub const BRIDGE_UNAVAILABLE_MESSAGE: &str = "Bridge is not active";

#[derive(Error, Debug)]
pub enum SkimmerError {
    #[error("{}", PARSE_FAILURE_MESSAGE)]
    ParseFailure,

    #[error("{0}")]
    Platform(String),

    #[error("Unexpected result structure")]
    MalformedResult { details: String },

    #[error("{}", BRIDGE_UNAVAILABLE_MESSAGE)]
    BridgeUnavailable,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl SkimmerError {
    /// Wire form delivered to the requester.
    pub fn reply(&self) -> ErrorReply {
        let reply = ErrorReply::new(self.to_string());
        match self {
            Self::MalformedResult { details } => reply.with_details(details.clone()),
            Self::BridgeUnavailable => reply.with_details(
                "The bridge context may have been invalidated. Please reload the page.",
            ),
            _ => reply,
        }
    }
}

pub type Result<T> = std::result::Result<T, SkimmerError>;
