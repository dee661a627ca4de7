//! Content extraction pipeline.
//!
//! Turns a captured page into a readable article plus its images and links.
//!
//! # Architecture
//!
//! ```text
//! PageSnapshot → icon sweep → link harvest → clone + sweep → readability
//!              → fragment post-processing → image discovery → ExtractionResult
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use skimmer::extract::{ExtractionConfig, Extractor, PageSnapshot};
//!
//! let extractor = Extractor::new(ExtractionConfig::default());
//! let snapshot = PageSnapshot::from_html(html, "https://example.com/article");
//! let result = extractor.extract(&snapshot)?;
//! ```
//!
//! The live page is represented by a [`PageSnapshot`]: serialized HTML whose
//! elements carry probe markers, plus the layout recorded for each marker.
//! Pipeline stages never mutate the parsed tree; they record removals and
//! attribute overrides which are applied on re-serialization.

mod config;
mod icons;
mod images;
mod layout;
mod links;
mod pipeline;
mod postprocess;
mod readability;
mod render;
pub mod rules;
mod snapshot;

pub use config::{ExtractionConfig, ImagePolicy};
pub use icons::{is_decorative_icon, suppress_icons};
pub use images::ImageCollector;
pub use layout::{ElementLayout, Layout, Rect};
pub use links::{harvest_links, PageGeometry};
pub use pipeline::Extractor;
pub use readability::{ArticleParser, DomSmoothieParser};
pub use render::{render_document, render_inner, Edits, Markers};
pub use snapshot::{PageSnapshot, StylesheetImages};
