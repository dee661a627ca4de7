//! # Skimmer
//!
//! Readable-content extraction for web pages rendered in a hidden browser tab.
//!
//! ## Architecture
//!
//! ```text
//! page → Relay → Orchestrator → hidden tab → Extractor → Orchestrator → Relay → page
//! ```
//!
//! - [`bridge`]: relay between the requesting page and the orchestrator
//! - [`orchestrator`]: hidden-tab lifecycle and load tracking
//! - [`extract`]: icon suppression, link harvesting, readability, images
//!
//! ## Quick Start
//!
//! ```bash
//! # Extract a page end to end
//! skimmer extract https://example.com/article --pretty
//!
//! # Serve page messages as JSON lines
//! skimmer bridge
//!
//! # Run the pipeline on a saved file
//! skimmer parse saved.html --url https://example.com/article
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration, the
/// extractor and the orchestrator together.
pub mod app;

/// Page bridge: message relay, session state and liveness checks.
pub mod bridge;

/// Command-line interface using clap.
///
/// - `extract <url>` - Load a page in a hidden tab and extract it
/// - `bridge` - JSON-lines bridge on stdin/stdout
/// - `parse <file> --url <url>` - Extract a saved HTML file
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/skimmer/config.toml` with `[browser]`,
/// `[extraction]` and `[bridge]` sections.
pub mod config;

/// Core domain models.
///
/// - [`ExtractionResult`](domain::ExtractionResult): what the page receives
/// - [`LinkRecord`](domain::LinkRecord): a harvested link or call to action
/// - [`PageMessage`](domain::PageMessage) and [`RelayMessage`](domain::RelayMessage): bridge wire format
pub mod domain;

/// Content extraction pipeline.
pub mod extract;

/// Hidden-tab orchestration over chromiumoxide.
///
/// - [`ChromeTabHost`](orchestrator::ChromeTabHost): Chrome-backed tabs
/// - [`TabHost`](orchestrator::TabHost): Async trait for tab implementations
/// - [`BrowserConfig`](orchestrator::BrowserConfig): Configuration options
pub mod orchestrator;
