//! Orchestration of the extraction stages over one page snapshot.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info};
use url::Url;

use crate::app::{Result, SkimmerError};
use crate::domain::ExtractionResult;
use crate::extract::config::ExtractionConfig;
use crate::extract::icons::suppress_icons;
use crate::extract::images::ImageCollector;
use crate::extract::links::{harvest_links, PageGeometry};
use crate::extract::postprocess::{plan_content, ImageGate};
use crate::extract::readability::{ArticleParser, DomSmoothieParser};
use crate::extract::render::{render_document, Edits, Markers};
use crate::extract::snapshot::PageSnapshot;

/// Runs the full extraction pipeline against captured pages.
#[derive(Clone)]
pub struct Extractor {
    config: ExtractionConfig,
    parser: Arc<dyn ArticleParser>,
}

impl Extractor {
    pub fn new(config: ExtractionConfig) -> Self {
        let parser = Arc::new(DomSmoothieParser::new(config.max_elements_to_parse));
        Self { config, parser }
    }

    pub fn with_parser(config: ExtractionConfig, parser: Arc<dyn ArticleParser>) -> Self {
        Self { config, parser }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract the readable article, its images and its links.
    ///
    /// A parser miss is terminal: no partial result is produced.
    pub fn extract(&self, page: &PageSnapshot) -> Result<ExtractionResult> {
        let base = Url::parse(&page.base_uri).or_else(|_| Url::parse(&page.url))?;
        let layout = page.layout();
        let document = Html::parse_document(&page.html);
        let root = document.root_element();

        // Live document: icons first, so they never reach link text.
        let mut live_edits = Edits::new();
        suppress_icons(root, &layout, &mut live_edits);

        let geometry = PageGeometry {
            layout: &layout,
            viewport_height: page.viewport_height,
            document_height: page.document_height,
        };
        let links = harvest_links(root, &base, &geometry, &live_edits);

        // Deep clone for the parser, swept again before parsing.
        let clone = Html::parse_document(&render_document(&document, &live_edits, Markers::Keep));
        let mut clone_edits = Edits::new();
        suppress_icons(clone.root_element(), &layout, &mut clone_edits);
        let clone_html = render_document(&clone, &clone_edits, Markers::Keep);

        let article = self
            .parser
            .parse(&clone_html, &page.url)
            .ok_or(SkimmerError::ParseFailure)?;
        debug!("Parsed article {:?} ({} chars)", article.title, article.length);

        let fragment = Html::parse_fragment(&article.content);

        let mut gate = ImageGate::new(&self.config, &layout);
        gate.learn_sources(root, &live_edits, &base);
        let content = plan_content(&fragment, &gate, &base);

        let mut collector = ImageCollector::new(&base);
        collector.scan(root, &live_edits, |img| gate.admits(img, &base));
        collector.scan(fragment.root_element(), &content.edits, |img| {
            gate.admits(img, &base)
        });
        if self.config.collect_stylesheet_images {
            collector.scan_stylesheets(&page.stylesheets);
        }
        let mut images = collector.finish();
        images.retain(|url| !content.rejected_images.contains(url));

        info!(
            "Extracted {:?}: {} images, {} links",
            page.url,
            images.len(),
            links.len()
        );

        Ok(ExtractionResult {
            title: article.title,
            content: content.render(&fragment),
            url: page.url.clone(),
            excerpt: article.excerpt,
            byline: article.byline,
            direction: article.direction,
            length: Some(article.length),
            extracted_images: images.into_vec(),
            links: Some(links),
        })
    }
}
