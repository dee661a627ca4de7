//! Relay between a requesting page and the orchestrator.
//!
//! The page talks to the relay with [`PageMessage`]s and receives
//! [`RelayMessage`]s back. The relay forwards extraction requests over an
//! [`OrchestratorLink`] and tracks whether that link is usable in a
//! [`BridgeSession`], which a [`LivenessMonitor`] refreshes on a fixed
//! interval. While the session is unreachable, requests are refused
//! immediately and requests already in flight fail fast.
//!
//! [`PageMessage`]: crate::domain::PageMessage
//! [`RelayMessage`]: crate::domain::RelayMessage

mod config;
mod link;
mod liveness;
mod relay;
mod session;

pub use config::BridgeConfig;
pub use link::OrchestratorLink;
pub use liveness::LivenessMonitor;
pub use relay::{Relay, RETRY_GUIDANCE};
pub use session::{BridgeSession, SessionState};
