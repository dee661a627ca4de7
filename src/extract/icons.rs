//! Decorative vector icon suppression.
//!
//! Inline `<svg>` glyphs used as navigation arrows, button adornments or
//! dropdown carets carry no article content. They are pruned from the live
//! snapshot before link harvesting, from the clone handed to the parser, and
//! from the final content fragment.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::extract::layout::Layout;
use crate::extract::render::Edits;
use crate::extract::rules;

static SVG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("svg").expect("svg selector should parse"));
static PATH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("path").expect("path selector should parse"));
static ICON_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(rules::ICON_CONTAINER_SELECTOR).expect("icon container selector should parse")
});

/// Decide whether an `<svg>` element is UI chrome rather than content.
pub fn is_decorative_icon(svg: ElementRef<'_>, layout: &Layout) -> bool {
    if let Some(entry) = layout.of(svg) {
        if rules::is_icon_sized(entry.rect.width, entry.rect.height) {
            return true;
        }
    }

    let in_container = std::iter::once(svg)
        .chain(svg.ancestors().filter_map(ElementRef::wrap))
        .any(|el| ICON_CONTAINER.matches(&el));
    if in_container {
        return true;
    }

    let known_glyph = svg
        .select(&PATH)
        .filter_map(|path| path.value().attr("d"))
        .any(rules::matches_icon_signature);
    if known_glyph {
        return true;
    }

    svg.parent()
        .and_then(ElementRef::wrap)
        .and_then(|parent| parent.value().attr("class"))
        .is_some_and(rules::is_icon_parent_class)
}

/// Prune every decorative icon under `root`. Returns how many were newly pruned.
pub fn suppress_icons(root: ElementRef<'_>, layout: &Layout, edits: &mut Edits) -> usize {
    let mut pruned = 0;
    for svg in root.select(&SVG) {
        if edits.is_pruned(*svg) {
            continue;
        }
        if is_decorative_icon(svg, layout) && edits.remove(svg.id()) {
            pruned += 1;
        }
    }
    if pruned > 0 {
        debug!("Suppressed {} decorative icons", pruned);
    }
    pruned
}
