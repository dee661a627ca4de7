//! Image URL discovery across markup, inline styles and stylesheets.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::warn;
use url::Url;

use crate::domain::ImageSet;
use crate::extract::render::Edits;
use crate::extract::rules;
use crate::extract::snapshot::StylesheetImages;

static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("img selector should parse"));
static BACKGROUND_STYLED: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(rules::BACKGROUND_STYLE_SELECTOR).expect("background selector should parse")
});

/// Every raw URL an `<img>` element references, in attribute order.
pub fn img_candidates(img: ElementRef<'_>) -> Vec<&str> {
    let value = img.value();
    let mut raw = Vec::new();
    if let Some(src) = value.attr("src") {
        raw.push(src);
    }
    if let Some(srcset) = value.attr("srcset") {
        raw.extend(rules::srcset_urls(srcset));
    }
    for attr in rules::LAZY_IMAGE_ATTRS {
        if let Some(v) = value.attr(attr) {
            raw.push(v);
        }
    }
    for attr in rules::LAZY_SRCSET_ATTRS {
        if let Some(v) = value.attr(attr) {
            raw.extend(rules::srcset_urls(v));
        }
    }
    raw
}

/// Resolve a raw candidate and apply the image post-filter.
pub fn resolve_image(raw: &str, base: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || rules::is_placeholder(raw) {
        return None;
    }
    match base.join(raw) {
        Ok(url) => {
            let absolute = url.to_string();
            rules::is_acceptable_image_url(&absolute).then_some(absolute)
        }
        Err(e) => {
            warn!("Invalid image URL {:?}: {}", raw, e);
            None
        }
    }
}

/// Accumulates discovered images in first-discovery order.
pub struct ImageCollector<'a> {
    base: &'a Url,
    images: ImageSet,
}

impl<'a> ImageCollector<'a> {
    pub fn new(base: &'a Url) -> Self {
        Self {
            base,
            images: ImageSet::new(),
        }
    }

    fn add(&mut self, raw: &str, base: &Url) {
        if let Some(url) = resolve_image(raw, base) {
            self.images.insert(url);
        }
    }

    /// Scan `<img>` elements and inline background styles under `root`.
    ///
    /// Pruned subtrees are skipped, as are images `admit` rejects.
    pub fn scan(
        &mut self,
        root: ElementRef<'_>,
        edits: &Edits,
        admit: impl Fn(ElementRef<'_>) -> bool,
    ) {
        let base = self.base;
        for img in root.select(&IMG) {
            if edits.is_pruned(*img) || !admit(img) {
                continue;
            }
            for raw in img_candidates(img) {
                self.add(raw, base);
            }
        }

        for el in root.select(&BACKGROUND_STYLED) {
            if edits.is_pruned(*el) {
                continue;
            }
            if let Some(style) = el.value().attr("style") {
                for raw in rules::css_urls(style) {
                    self.add(raw, base);
                }
            }
        }
    }

    /// Add background images declared by same-origin stylesheets.
    ///
    /// URLs resolve against the sheet's own location when it has one.
    pub fn scan_stylesheets(&mut self, sheets: &[StylesheetImages]) {
        for sheet in sheets {
            let sheet_base = sheet
                .href
                .as_deref()
                .and_then(|href| self.base.join(href).ok());
            let base = sheet_base.as_ref().unwrap_or(self.base);
            for raw in &sheet.urls {
                self.add(raw, base);
            }
        }
    }

    pub fn finish(self) -> ImageSet {
        self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn base() -> Url {
        Url::parse("https://news.example.com/2024/story.html").unwrap()
    }

    #[test]
    fn test_img_sources_in_order() {
        let html = Html::parse_fragment(
            r#"<img src="a.jpg" srcset="a-480.jpg 480w, a-960.jpg 960w" data-src="/lazy.jpg" data-srcset="b-1x.jpg 1x, b-2x.jpg 2x">"#,
        );
        let base = base();
        let mut collector = ImageCollector::new(&base);
        collector.scan(html.root_element(), &Edits::new(), |_| true);
        assert_eq!(
            collector.finish().into_vec(),
            vec![
                "https://news.example.com/2024/a.jpg",
                "https://news.example.com/2024/a-480.jpg",
                "https://news.example.com/2024/a-960.jpg",
                "https://news.example.com/lazy.jpg",
                "https://news.example.com/2024/b-1x.jpg",
                "https://news.example.com/2024/b-2x.jpg",
            ]
        );
    }

    #[test]
    fn test_inline_background_styles() {
        let html = Html::parse_fragment(
            r#"<div style="background-image: url('/hero.png')"></div><div style="color: url(/nope.png)"></div><section style="background: url(tile.gif) repeat"></section>"#,
        );
        let base = base();
        let mut collector = ImageCollector::new(&base);
        collector.scan(html.root_element(), &Edits::new(), |_| true);
        assert_eq!(
            collector.finish().into_vec(),
            vec![
                "https://news.example.com/hero.png",
                "https://news.example.com/2024/tile.gif",
            ]
        );
    }

    #[test]
    fn test_filters_and_dedup() {
        let html = Html::parse_fragment(
            r#"<img src="data:image/gif;base64,R0lGOD">
               <img src="https://tracking.example.net/p.gif">
               <img src="/analytics/beacon.png">
               <div style="background: url(/bundle.js)"></div>
               <img src="undefined">
               <img src="/photo.jpg"><img src="https://news.example.com/photo.jpg">"#,
        );
        let base = base();
        let mut collector = ImageCollector::new(&base);
        collector.scan(html.root_element(), &Edits::new(), |_| true);
        assert_eq!(
            collector.finish().into_vec(),
            vec!["https://news.example.com/photo.jpg"]
        );
    }

    #[test]
    fn test_admit_predicate_rejects_images() {
        let html = Html::parse_fragment(r#"<img class="tiny" src="/t.png"><img src="/big.png">"#);
        let base = base();
        let mut collector = ImageCollector::new(&base);
        collector.scan(html.root_element(), &Edits::new(), |img| {
            img.value().attr("class") != Some("tiny")
        });
        assert_eq!(
            collector.finish().into_vec(),
            vec!["https://news.example.com/big.png"]
        );
    }

    #[test]
    fn test_stylesheet_urls_resolve_against_sheet() {
        let base = base();
        let mut collector = ImageCollector::new(&base);
        collector.scan_stylesheets(&[
            StylesheetImages {
                href: Some("https://static.example.com/css/site.css".into()),
                urls: vec!["../img/bg.png".into()],
            },
            StylesheetImages {
                href: None,
                urls: vec!["inline.png".into()],
            },
        ]);
        assert_eq!(
            collector.finish().into_vec(),
            vec![
                "https://static.example.com/img/bg.png",
                "https://news.example.com/2024/inline.png",
            ]
        );
    }

    #[test]
    fn test_unresolvable_candidate_is_dropped() {
        let base = Url::parse("https://example.com/").unwrap();
        assert!(resolve_image("http://[::1", &base).is_none());
        assert_eq!(
            resolve_image(" /x.png ", &base).as_deref(),
            Some("https://example.com/x.png")
        );
    }
}
