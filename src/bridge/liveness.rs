use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

use crate::bridge::link::OrchestratorLink;
use crate::bridge::session::BridgeSession;
use crate::domain::RelayMessage;

/// Periodically probes the link and reports the result to the page.
pub struct LivenessMonitor<L: OrchestratorLink> {
    link: Arc<L>,
    session: BridgeSession,
    outbox: mpsc::Sender<RelayMessage>,
    period: Duration,
}

impl<L: OrchestratorLink + 'static> LivenessMonitor<L> {
    pub fn new(
        link: Arc<L>,
        session: BridgeSession,
        outbox: mpsc::Sender<RelayMessage>,
        period: Duration,
    ) -> Self {
        Self {
            link,
            session,
            outbox,
            period,
        }
    }

    /// Check once immediately, then every period, until the page goes away.
    pub async fn run(self) {
        let mut ticker = interval(self.period);

        loop {
            ticker.tick().await;

            let alive = self.link.is_alive();
            if alive {
                self.session.mark_live();
            } else {
                self.session.mark_unreachable();
            }

            let status = RelayMessage::ExtensionStatus { status: alive };
            if self.outbox.send(status).await.is_err() {
                debug!("Page is gone, stopping liveness checks");
                break;
            }
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
