//! Final clean-up of the parsed article fragment.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::extract::config::{ExtractionConfig, ImagePolicy};
use crate::extract::icons::suppress_icons;
use crate::extract::images::{img_candidates, resolve_image};
use crate::extract::layout::{ElementLayout, Layout};
use crate::extract::render::{render_inner, Edits, Markers};
use crate::extract::rules;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("anchor selector should parse"));
static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("table selector should parse"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td, th").expect("cell selector should parse"));
static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("img selector should parse"));

/// Decides whether an `<img>` survives under the configured policy.
pub struct ImageGate<'a> {
    policy: ImagePolicy,
    min_width: f64,
    min_height: f64,
    layout: &'a Layout,
    by_src: HashMap<String, ElementLayout>,
}

impl<'a> ImageGate<'a> {
    pub fn new(config: &ExtractionConfig, layout: &'a Layout) -> Self {
        Self {
            policy: config.image_policy,
            min_width: config.min_image_width,
            min_height: config.min_image_height,
            layout,
            by_src: HashMap::new(),
        }
    }

    /// Remember live-page layout of images by resolved URL, so copies of
    /// them inside the parser output can be measured too.
    pub fn learn_sources(&mut self, root: ElementRef<'_>, edits: &Edits, base: &Url) {
        for img in root.select(&IMG) {
            if edits.is_pruned(*img) {
                continue;
            }
            let Some(entry) = self.layout.of(img) else {
                continue;
            };
            for raw in img_candidates(img) {
                if let Some(url) = resolve_image(raw, base) {
                    self.by_src.entry(url).or_insert_with(|| entry.clone());
                }
            }
        }
    }

    pub fn layout(&self) -> &'a Layout {
        self.layout
    }

    fn measure(&self, img: ElementRef<'_>, base: &Url) -> Option<&ElementLayout> {
        self.layout.of(img).or_else(|| {
            img.value()
                .attr("src")
                .and_then(|src| resolve_image(src, base))
                .and_then(|url| self.by_src.get(&url))
        })
    }

    /// Images without any layout information are admitted.
    pub fn admits(&self, img: ElementRef<'_>, base: &Url) -> bool {
        if self.policy == ImagePolicy::KeepAll {
            return true;
        }
        match self.measure(img, base) {
            Some(entry) => {
                entry.is_visible()
                    && entry.rect.width >= self.min_width
                    && entry.rect.height >= self.min_height
            }
            None => true,
        }
    }
}

/// Pending edits to the article fragment plus the image URLs it dropped.
pub struct ContentEdits {
    pub edits: Edits,
    pub rejected_images: HashSet<String>,
}

impl ContentEdits {
    pub fn render(&self, fragment: &Html) -> String {
        render_inner(fragment.root_element(), &self.edits, Markers::Strip)
    }
}

/// Plan every post-processing edit for the article fragment.
pub fn plan_content(fragment: &Html, gate: &ImageGate<'_>, base: &Url) -> ContentEdits {
    let root = fragment.root_element();
    let mut edits = Edits::new();
    let mut rejected_images = HashSet::new();

    suppress_icons(root, gate.layout(), &mut edits);

    for anchor in root.select(&ANCHOR) {
        edits.set_attr(anchor.id(), "target", rules::ANCHOR_TARGET);
        edits.set_attr(anchor.id(), "rel", rules::ANCHOR_REL);
    }

    for table in root.select(&TABLE) {
        edits.set_attr(table.id(), "border", rules::TABLE_BORDER);
        edits.set_attr(table.id(), "style", append_style(table, rules::TABLE_STYLE));
    }
    for cell in root.select(&CELL) {
        edits.set_attr(cell.id(), "style", append_style(cell, rules::CELL_STYLE));
    }

    for img in root.select(&IMG) {
        if edits.is_pruned(*img) || gate.admits(img, base) {
            continue;
        }
        edits.remove(img.id());
        rejected_images.extend(
            img_candidates(img)
                .into_iter()
                .filter_map(|raw| resolve_image(raw, base)),
        );
    }

    if !rejected_images.is_empty() {
        debug!("Dropped {} small or hidden images", rejected_images.len());
    }

    ContentEdits {
        edits,
        rejected_images,
    }
}

fn append_style(element: ElementRef<'_>, rule: &str) -> String {
    let existing = element
        .value()
        .attr("style")
        .unwrap_or_default()
        .trim()
        .trim_end_matches(';')
        .trim();
    if existing.is_empty() {
        rule.to_string()
    } else {
        format!("{existing}; {rule}")
    }
}
