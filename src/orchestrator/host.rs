use async_trait::async_trait;

use crate::app::Result;
use crate::orchestrator::signals::{LoadSignals, TabId};

/// Browser tab operations the orchestrator relies on.
///
/// `navigate` only starts the load; completion is reported through
/// [`TabHost::load_signals`].
#[async_trait]
pub trait TabHost: Send + Sync {
    /// Open a new tab that is never shown to the user
    async fn open_hidden(&self) -> Result<TabId>;

    async fn navigate(&self, tab: TabId, url: &str) -> Result<()>;

    /// Evaluate `script` in the tab and return its JSON value
    async fn inject(&self, tab: TabId, script: &str) -> Result<serde_json::Value>;

    async fn remove(&self, tab: TabId) -> Result<()>;

    fn load_signals(&self) -> &LoadSignals;
}
