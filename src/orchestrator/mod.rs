//! Hidden-tab page loading and extraction.
//!
//! For every request the orchestrator opens a tab the user never sees,
//! waits for that tab (and only that tab) to finish loading, injects the
//! layout probe and runs the extraction pipeline on what it returns. The
//! tab is removed whether extraction succeeds or fails.
//!
//! # Architecture
//!
//! ```text
//! OrchestratorRequest → open hidden tab → navigate → load signal
//!                     → probe → Extractor → OrchestratorResponse
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use skimmer::orchestrator::{spawn_orchestrator, BrowserConfig, ChromeTabHost, Orchestrator};
//!
//! let host = Arc::new(ChromeTabHost::launch(BrowserConfig::default()).await?);
//! let orchestrator = Orchestrator::new(host, BrowserConfig::default(), extractor);
//! let handle = spawn_orchestrator(orchestrator, 100);
//! let response = handle.request(OrchestratorRequest::extract(url)).await?;
//! ```

mod chrome;
mod config;
mod host;
mod probe;
mod service;
mod signals;

pub use chrome::ChromeTabHost;
pub use config::BrowserConfig;
pub use host::TabHost;
pub use probe::LayoutProbe;
pub use service::{
    spawn_orchestrator, Orchestrator, OrchestratorHandle, OrchestratorMessage, OrchestratorService,
};
pub use signals::{LoadOutcome, LoadSignals, LoadWait, TabId};
