use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{OrchestratorRequest, OrchestratorResponse};
use crate::orchestrator::OrchestratorHandle;

/// Transport from the relay to the orchestrator.
#[async_trait]
pub trait OrchestratorLink: Send + Sync {
    /// Deliver one request and wait for its single response.
    ///
    /// `Err` means the transport failed, not the extraction.
    async fn send(&self, request: OrchestratorRequest) -> Result<OrchestratorResponse>;

    fn is_alive(&self) -> bool;
}

#[async_trait]
impl OrchestratorLink for OrchestratorHandle {
    async fn send(&self, request: OrchestratorRequest) -> Result<OrchestratorResponse> {
        self.request(request).await
    }

    fn is_alive(&self) -> bool {
        OrchestratorHandle::is_alive(self)
    }
}
