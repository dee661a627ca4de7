use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

/// Reachability of the orchestrator as seen by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing observed yet
    Unknown,
    Live,
    Unreachable,
}

/// Shared bridge state, read before every outgoing call.
///
/// Clones observe the same state.
#[derive(Debug, Clone)]
pub struct BridgeSession {
    state: Arc<watch::Sender<SessionState>>,
}

impl Default for BridgeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl BridgeSession {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::Unknown);
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Status reported to the page: anything but unreachable counts as active.
    pub fn is_active(&self) -> bool {
        self.state() != SessionState::Unreachable
    }

    pub fn mark_live(&self) {
        let previous = self.state.send_replace(SessionState::Live);
        if previous == SessionState::Unreachable {
            info!("Bridge reachable again");
        }
    }

    pub fn mark_unreachable(&self) {
        let previous = self.state.send_replace(SessionState::Unreachable);
        if previous != SessionState::Unreachable {
            warn!("Bridge became unreachable");
        }
    }

    /// Resolves once the session is unreachable.
    pub async fn unreachable(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|s| *s == SessionState::Unreachable).await;
    }
}
