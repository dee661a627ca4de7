use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use tokio::sync::{mpsc, oneshot, Semaphore};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::app::{Result, SkimmerError};
use crate::domain::{ExtractionResult, OrchestratorRequest, OrchestratorResponse};
use crate::extract::{Extractor, PageSnapshot};
use crate::orchestrator::config::BrowserConfig;
use crate::orchestrator::host::TabHost;
use crate::orchestrator::probe::LayoutProbe;
use crate::orchestrator::signals::TabId;

/// Loads pages in hidden tabs and runs the extraction pipeline on them.
pub struct Orchestrator<H: TabHost> {
    host: Arc<H>,
    config: BrowserConfig,
    extractor: Extractor,
    probe: LayoutProbe,
}

impl<H: TabHost> Orchestrator<H> {
    pub fn new(host: Arc<H>, config: BrowserConfig, extractor: Extractor) -> Self {
        let probe = LayoutProbe::new(extractor.config().collect_stylesheet_images);
        Self {
            host,
            config,
            extractor,
            probe,
        }
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Extract one page. The hidden tab is removed on every path.
    pub async fn extract(&self, url: &str) -> Result<ExtractionResult> {
        let target = Url::parse(url)?;
        let started = Utc::now();

        let tab = self.host.open_hidden().await?;
        let outcome = self.extract_in_tab(tab, target.as_str()).await;

        if let Err(e) = self.host.remove(tab).await {
            warn!("Failed to remove {}: {}", tab, e);
        }

        let elapsed = Utc::now() - started;
        match &outcome {
            Ok(result) => info!(
                "Extracted {} in {}ms ({} images)",
                url,
                elapsed.num_milliseconds(),
                result.extracted_images.len()
            ),
            Err(e) => error!("Extraction of {} failed: {}", url, e),
        }

        outcome
    }

    async fn extract_in_tab(&self, tab: TabId, url: &str) -> Result<ExtractionResult> {
        // Register before navigating so a fast load is not missed.
        let loaded = self.host.load_signals().register(tab);
        self.host.navigate(tab, url).await?;
        loaded.wait(self.config.timeout()).await?;
        debug!("{} loaded {}", tab, url);

        tokio::time::sleep(self.config.wait_after_load()).await;

        let raw = self.host.inject(tab, &self.probe.script()).await?;
        let snapshot = decode_snapshot(&raw)?;

        let extractor = self.extractor.clone();
        tokio::task::spawn_blocking(move || extractor.extract(&snapshot))
            .await
            .map_err(|e| SkimmerError::Other(format!("Extraction task failed: {}", e)))?
    }

    /// Answer one relay request.
    pub async fn handle(&self, request: OrchestratorRequest) -> OrchestratorResponse {
        match request {
            OrchestratorRequest::ExtractData { url } => self.extract(&url).await.into(),
        }
    }
}

fn decode_snapshot(raw: &serde_json::Value) -> Result<PageSnapshot> {
    PageSnapshot::deserialize(raw).map_err(|_| SkimmerError::MalformedResult {
        details: raw.to_string(),
    })
}

/// Message type for the orchestrator service
#[derive(Debug)]
pub enum OrchestratorMessage {
    Request {
        request: OrchestratorRequest,
        reply: oneshot::Sender<OrchestratorResponse>,
    },
    Shutdown,
}

/// Handle to send requests to a running orchestrator
#[derive(Clone)]
pub struct OrchestratorHandle {
    tx: mpsc::Sender<OrchestratorMessage>,
}

impl OrchestratorHandle {
    /// Send a request and wait for its single reply
    pub async fn request(&self, request: OrchestratorRequest) -> Result<OrchestratorResponse> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(OrchestratorMessage::Request { request, reply })
            .await
            .map_err(|_| SkimmerError::Other("Orchestrator is not running".to_string()))?;
        rx.await
            .map_err(|_| SkimmerError::Other("Orchestrator dropped the request".to_string()))
    }

    pub fn is_alive(&self) -> bool {
        !self.tx.is_closed()
    }

    /// Shutdown the orchestrator
    pub async fn shutdown(&self) {
        let _ = self.tx.send(OrchestratorMessage::Shutdown).await;
    }
}

/// Orchestrator service that serves requests concurrently
pub struct OrchestratorService<H: TabHost + 'static> {
    orchestrator: Arc<Orchestrator<H>>,
    semaphore: Arc<Semaphore>,
    rx: mpsc::Receiver<OrchestratorMessage>,
}

impl<H: TabHost + 'static> OrchestratorService<H> {
    /// Create a new service and return a handle to communicate with it
    pub fn new(orchestrator: Orchestrator<H>, capacity: usize) -> (Self, OrchestratorHandle) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let semaphore = Arc::new(Semaphore::new(orchestrator.config().max_concurrency.max(1)));
        let service = Self {
            orchestrator: Arc::new(orchestrator),
            semaphore,
            rx,
        };
        (service, OrchestratorHandle { tx })
    }

    /// Run the service loop
    pub async fn run(mut self) {
        info!("Orchestrator started");

        while let Some(msg) = self.rx.recv().await {
            match msg {
                OrchestratorMessage::Request { request, reply } => {
                    let orchestrator = self.orchestrator.clone();
                    let semaphore = self.semaphore.clone();
                    tokio::spawn(async move {
                        let _permit = semaphore.acquire_owned().await;
                        let response = orchestrator.handle(request).await;
                        if reply.send(response).is_err() {
                            debug!("Requester went away before the reply");
                        }
                    });
                }
                OrchestratorMessage::Shutdown => {
                    info!("Orchestrator shutting down");
                    break;
                }
            }
        }
    }
}

/// Spawn the orchestrator service as a tokio task
pub fn spawn_orchestrator<H: TabHost + 'static>(
    orchestrator: Orchestrator<H>,
    capacity: usize,
) -> OrchestratorHandle {
    let (service, handle) = OrchestratorService::new(orchestrator, capacity);

    tokio::spawn(async move {
        service.run().await;
    });

    handle
}
