use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::SkimmerError;
use crate::bridge::link::OrchestratorLink;
use crate::bridge::session::BridgeSession;
use crate::domain::{OrchestratorRequest, OrchestratorResponse, PageMessage, RelayMessage};

/// Details attached to failures that carry none of their own.
pub const RETRY_GUIDANCE: &str = "An error occurred while extracting data. Please try again.";

/// Translates page messages into orchestrator calls and posts the outcome
/// back to the page.
pub struct Relay<L: OrchestratorLink> {
    link: Arc<L>,
    session: BridgeSession,
    outbox: mpsc::Sender<RelayMessage>,
}

impl<L: OrchestratorLink> Clone for Relay<L> {
    fn clone(&self) -> Self {
        Self {
            link: self.link.clone(),
            session: self.session.clone(),
            outbox: self.outbox.clone(),
        }
    }
}

impl<L: OrchestratorLink + 'static> Relay<L> {
    pub fn new(link: Arc<L>, session: BridgeSession, outbox: mpsc::Sender<RelayMessage>) -> Self {
        Self {
            link,
            session,
            outbox,
        }
    }

    pub fn session(&self) -> &BridgeSession {
        &self.session
    }

    /// Serve page messages until the inbox closes.
    ///
    /// Extractions run concurrently; status queries are answered in order.
    pub async fn run(self, mut inbox: mpsc::Receiver<PageMessage>) {
        info!("Relay started");
        while let Some(message) = inbox.recv().await {
            match message {
                PageMessage::CheckExtensionStatus => self.report_status().await,
                PageMessage::ExtractData { url } => {
                    let relay = self.clone();
                    tokio::spawn(async move {
                        relay.extract(url).await;
                    });
                }
            }
        }
        info!("Relay inbox closed");
    }

    pub async fn report_status(&self) {
        self.post(RelayMessage::ExtensionStatus {
            status: self.session.is_active(),
        })
        .await;
    }

    /// Relay one extraction and post exactly one reply.
    pub async fn extract(&self, url: String) {
        let reply = self.reply_for(url).await;
        self.post(reply).await;
    }

    async fn reply_for(&self, url: String) -> RelayMessage {
        if !self.session.is_active() {
            return unavailable();
        }

        let request = OrchestratorRequest::extract(url.clone());
        tokio::select! {
            response = self.link.send(request) => match response {
                Ok(OrchestratorResponse::Success(data)) => {
                    self.session.mark_live();
                    RelayMessage::ExtractedData { url, data: *data }
                }
                Ok(OrchestratorResponse::Failure(reply)) => {
                    self.session.mark_live();
                    RelayMessage::ExtractionError {
                        error: reply.error,
                        details: reply.details.unwrap_or_else(|| RETRY_GUIDANCE.to_string()),
                    }
                }
                Err(e) => {
                    warn!("Failed to reach orchestrator for {}: {}", url, e);
                    self.session.mark_unreachable();
                    RelayMessage::ExtractionError {
                        error: e.to_string(),
                        details: RETRY_GUIDANCE.to_string(),
                    }
                }
            },
            _ = self.session.unreachable() => {
                warn!("Bridge lost while extracting {}", url);
                unavailable()
            }
        }
    }

    async fn post(&self, message: RelayMessage) {
        if self.outbox.send(message).await.is_err() {
            debug!("Page is gone, dropping relay message");
        }
    }
}

fn unavailable() -> RelayMessage {
    let reply = SkimmerError::BridgeUnavailable.reply();
    RelayMessage::ExtractionError {
        error: reply.error,
        details: reply.details.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Result;
    use crate::domain::{ErrorReply, ExtractionResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    enum Answer {
        Success,
        Failure(ErrorReply),
        Transport,
        Hang,
    }

    struct FakeLink {
        answer: Answer,
        alive: AtomicBool,
        calls: AtomicUsize,
        called: Notify,
    }

    impl FakeLink {
        fn new(answer: Answer) -> Arc<Self> {
            Arc::new(Self {
                answer,
                alive: AtomicBool::new(true),
                calls: AtomicUsize::new(0),
                called: Notify::new(),
            })
        }
    }

    #[async_trait]
    impl OrchestratorLink for FakeLink {
        async fn send(&self, request: OrchestratorRequest) -> Result<OrchestratorResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.called.notify_one();
            match &self.answer {
                Answer::Success => Ok(OrchestratorResponse::Success(Box::new(ExtractionResult {
                    title: "Title".into(),
                    content: "<p>Body</p>".into(),
                    url: request.url().to_string(),
                    length: Some(4),
                    links: Some(Vec::new()),
                    ..Default::default()
                }))),
                Answer::Failure(reply) => Ok(OrchestratorResponse::Failure(reply.clone())),
                Answer::Transport => Err(SkimmerError::Other(
                    "Could not establish connection".into(),
                )),
                Answer::Hang => std::future::pending().await,
            }
        }

        fn is_alive(&self) -> bool {
            self.alive.load(Ordering::SeqCst)
        }
    }

    fn relay(link: Arc<FakeLink>) -> (Relay<FakeLink>, mpsc::Receiver<RelayMessage>) {
        let (tx, rx) = mpsc::channel(8);
        (Relay::new(link, BridgeSession::new(), tx), rx)
    }

    #[tokio::test]
    async fn test_status_query() {
        let (relay, mut out) = relay(FakeLink::new(Answer::Success));
        relay.report_status().await;
        assert_eq!(
            out.recv().await.unwrap(),
            RelayMessage::ExtensionStatus { status: true }
        );

        relay.session().mark_unreachable();
        relay.report_status().await;
        assert_eq!(
            out.recv().await.unwrap(),
            RelayMessage::ExtensionStatus { status: false }
        );
    }

    #[tokio::test]
    async fn test_success_forwards_full_result() {
        let (relay, mut out) = relay(FakeLink::new(Answer::Success));
        relay.extract("https://a.test/post".into()).await;

        match out.recv().await.unwrap() {
            RelayMessage::ExtractedData { url, data } => {
                assert_eq!(url, "https://a.test/post");
                assert_eq!(data.url, "https://a.test/post");
                assert_eq!(data.length, Some(4));
                assert!(data.links.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(relay.session().state(), crate::bridge::SessionState::Live);
    }

    #[tokio::test]
    async fn test_orchestrator_error_is_relayed() {
        let link = FakeLink::new(Answer::Failure(ErrorReply::new(
            "Readability couldn't parse the content",
        )));
        let (relay, mut out) = relay(link);
        relay.extract("https://a.test/".into()).await;

        assert_eq!(
            out.recv().await.unwrap(),
            RelayMessage::ExtractionError {
                error: "Readability couldn't parse the content".into(),
                details: RETRY_GUIDANCE.into(),
            }
        );
    }

    #[tokio::test]
    async fn test_transport_error_marks_unreachable() {
        let link = FakeLink::new(Answer::Transport);
        let (relay, mut out) = relay(link.clone());
        relay.extract("https://a.test/".into()).await;

        assert_eq!(
            out.recv().await.unwrap(),
            RelayMessage::ExtractionError {
                error: "Could not establish connection".into(),
                details: RETRY_GUIDANCE.into(),
            }
        );
        assert!(!relay.session().is_active());

        // further requests are refused without touching the link
        relay.extract("https://a.test/".into()).await;
        match out.recv().await.unwrap() {
            RelayMessage::ExtractionError { error, details } => {
                assert_eq!(error, "Bridge is not active");
                assert!(details.contains("reload"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(link.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_in_flight_request_fails_fast() {
        let link = FakeLink::new(Answer::Hang);
        let (relay, mut out) = relay(link.clone());

        let worker = relay.clone();
        let task = tokio::spawn(async move { worker.extract("https://a.test/".into()).await });

        link.called.notified().await;
        relay.session().mark_unreachable();

        let reply = tokio::time::timeout(Duration::from_secs(1), out.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(reply, RelayMessage::ExtractionError { ref error, .. } if error == "Bridge is not active"));
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_run_serves_inbox() {
        let (relay, mut out) = relay(FakeLink::new(Answer::Success));
        let (tx, rx) = mpsc::channel(8);
        let server = tokio::spawn(relay.run(rx));

        tx.send(PageMessage::CheckExtensionStatus).await.unwrap();
        assert!(matches!(
            out.recv().await.unwrap(),
            RelayMessage::ExtensionStatus { status: true }
        ));

        tx.send(PageMessage::ExtractData {
            url: "https://a.test/".into(),
        })
        .await
        .unwrap();
        assert!(matches!(
            out.recv().await.unwrap(),
            RelayMessage::ExtractedData { .. }
        ));

        drop(tx);
        server.await.unwrap();
    }
}
