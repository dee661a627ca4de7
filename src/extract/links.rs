//! Call-to-action and link harvesting over the full source document.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::domain::{dedup_by_url, LinkKind, LinkLocation, LinkRecord};
use crate::extract::layout::{ElementLayout, Layout};
use crate::extract::render::{text_content, Edits};
use crate::extract::rules;

static CANDIDATES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(rules::LINK_CANDIDATE_SELECTOR).expect("link candidate selector should parse")
});
static BUTTON_ROLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(rules::BUTTON_ROLE_SELECTOR).expect("button role selector should parse")
});

/// Page-wide facts the harvester needs alongside the DOM.
pub struct PageGeometry<'a> {
    pub layout: &'a Layout,
    pub viewport_height: f64,
    pub document_height: f64,
}

/// Scan `root` for link-bearing elements, one record per distinct URL.
pub fn harvest_links(
    root: ElementRef<'_>,
    base: &Url,
    geometry: &PageGeometry<'_>,
    edits: &Edits,
) -> Vec<LinkRecord> {
    let mut records = Vec::new();

    for element in root.select(&CANDIDATES) {
        if edits.is_pruned(*element) {
            continue;
        }
        let Some(raw) = raw_target(element) else {
            continue;
        };
        let url = match base.join(raw) {
            Ok(url) => url,
            Err(e) => {
                warn!("Error processing URL {:?}: {}", raw, e);
                continue;
            }
        };
        records.push(build_record(element, url, geometry, edits));
    }

    let total = records.len();
    let unique = dedup_by_url(records);
    debug!("Harvested {} links ({} unique)", total, unique.len());
    unique
}

/// Raw link target: `href`, then a click handler assignment, then the
/// first `data-*` attribute mentioning `http`.
fn raw_target(element: ElementRef<'_>) -> Option<&str> {
    let value = element.value();

    let href = (value.name() == "a")
        .then(|| value.attr("href"))
        .flatten()
        .filter(|href| !rules::is_unusable_target(href));
    if href.is_some() {
        return href;
    }

    let handler = value
        .attr("onclick")
        .and_then(rules::click_handler_target)
        .filter(|target| !rules::is_unusable_target(target));
    if handler.is_some() {
        return handler;
    }

    value
        .attrs()
        .find(|(name, v)| name.starts_with("data-") && v.contains("http"))
        .map(|(_, v)| v)
        .filter(|v| !rules::is_unusable_target(v))
}

fn build_record(
    element: ElementRef<'_>,
    url: Url,
    geometry: &PageGeometry<'_>,
    edits: &Edits,
) -> LinkRecord {
    let value = element.value();
    let text = text_content(element, edits).trim().to_string();
    let classes = value.attr("class").unwrap_or_default().to_string();
    let id = value.attr("id").unwrap_or_default().to_string();
    let layout = geometry.layout.of(element);

    let is_button = BUTTON_ROLE.matches(&element)
        || rules::is_cta_class(&classes)
        || rules::is_cta_id(&id)
        || rules::is_cta_text(&text)
        || layout.is_some_and(has_button_styling);

    let rect = layout.map(|l| l.rect).unwrap_or_default();
    let location = if rules::in_header_band(rect.top, geometry.viewport_height) {
        LinkLocation::Header
    } else if rules::in_footer_band(rect.bottom, geometry.document_height) {
        LinkLocation::Footer
    } else {
        LinkLocation::Content
    };

    let attributes: BTreeMap<String, String> = value
        .attrs()
        .filter(|(name, _)| *name != rules::NODE_MARKER_ATTR)
        .map(|(name, v)| (name.to_string(), v.to_string()))
        .collect();

    LinkRecord {
        url: url.to_string(),
        text,
        kind: if is_button { LinkKind::Cta } else { LinkKind::Link },
        is_button,
        position: rect.position(),
        classes,
        id,
        attributes,
        location,
    }
}

fn has_button_styling(layout: &ElementLayout) -> bool {
    !rules::is_transparent(&layout.background_color) || layout.has_border
}
