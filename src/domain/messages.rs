//! Structured messages exchanged between the page, the relay and the
//! orchestrator.

use serde::{Deserialize, Serialize};

use crate::domain::{ErrorReply, ExtractionResult};

/// Requests posted by the page to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageMessage {
    CheckExtensionStatus,
    ExtractData { url: String },
}

/// Messages the relay posts back to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelayMessage {
    ExtensionStatus {
        status: bool,
    },
    ExtractedData {
        url: String,
        data: ExtractionResult,
    },
    ExtractionError {
        error: String,
        details: String,
    },
}

/// Relay to orchestrator call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum OrchestratorRequest {
    #[serde(rename = "extractData")]
    ExtractData { url: String },
}

impl OrchestratorRequest {
    pub fn extract(url: impl Into<String>) -> Self {
        Self::ExtractData { url: url.into() }
    }

    pub fn url(&self) -> &str {
        match self {
            Self::ExtractData { url } => url,
        }
    }
}

/// The single reply to an [`OrchestratorRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrchestratorResponse {
    Failure(ErrorReply),
    Success(Box<ExtractionResult>),
}

impl From<crate::app::Result<ExtractionResult>> for OrchestratorResponse {
    fn from(result: crate::app::Result<ExtractionResult>) -> Self {
        match result {
            Ok(data) => Self::Success(Box::new(data)),
            Err(e) => Self::Failure(e.reply()),
        }
    }
}
