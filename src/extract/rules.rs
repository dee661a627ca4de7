//! Heuristic rule table for the extraction pipeline.
//!
//! Every keyword list and threshold used to classify icons, calls-to-action,
//! page regions and image candidates lives here, as constants plus small
//! predicates over plain strings and numbers. DOM traversal code calls into
//! these so the rules can be tested on their own.

use std::sync::LazyLock;

use regex::Regex;

/// Marker attribute stamped on every element by the layout probe.
pub const NODE_MARKER_ATTR: &str = "data-skimmer-node";

// ---- decorative icons ----

/// Icons no larger than this (in both dimensions) count as UI chrome.
pub const ICON_MAX_SIZE: f64 = 24.0;

/// Containers whose vector graphics are always chrome.
pub const ICON_CONTAINER_SELECTOR: &str = r#"nav, button, [role="button"], .btn, header"#;

/// Path geometry fragments of known navigation glyphs.
pub const ICON_PATH_SIGNATURES: &[&str] = &["L6.5 7.125", "M1.25 1.875"];

pub const ICON_PARENT_CLASS_KEYWORDS: &[&str] = &["icon", "button", "dropdown"];

pub fn is_icon_sized(width: f64, height: f64) -> bool {
    width <= ICON_MAX_SIZE && height <= ICON_MAX_SIZE
}

pub fn matches_icon_signature(path_data: &str) -> bool {
    ICON_PATH_SIGNATURES.iter().any(|sig| path_data.contains(sig))
}

pub fn is_icon_parent_class(class_name: &str) -> bool {
    contains_any_keyword(class_name, ICON_PARENT_CLASS_KEYWORDS)
}

// ---- calls to action ----

/// Everything that may carry a link or act as a button.
pub const LINK_CANDIDATE_SELECTOR: &str = r#"a, button, [role="button"], .btn, .button, .cta, [class*="apply"], [id*="apply"], [class*="action"], [id*="action"], [class*="cta"], [id*="cta"]"#;

pub const BUTTON_ROLE_SELECTOR: &str = r#"button, a.button, [role="button"]"#;

pub const CTA_CLASS_KEYWORDS: &[&str] = &["btn", "button", "cta", "apply"];
pub const CTA_ID_KEYWORDS: &[&str] = &["cta", "apply"];
pub const CTA_TEXT_KEYWORDS: &[&str] = &["apply", "submit", "get started"];

pub fn is_cta_class(class_name: &str) -> bool {
    contains_any_keyword(class_name, CTA_CLASS_KEYWORDS)
}

pub fn is_cta_id(id: &str) -> bool {
    contains_any_keyword(id, CTA_ID_KEYWORDS)
}

pub fn is_cta_text(text: &str) -> bool {
    contains_any_keyword(text, CTA_TEXT_KEYWORDS)
}

/// Whether a computed `background-color` paints nothing.
pub fn is_transparent(color: &str) -> bool {
    let color = color.trim().to_ascii_lowercase();
    if color.is_empty() || color == "transparent" {
        return true;
    }
    let Some(args) = color
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
    else {
        return false;
    };
    args.split(',')
        .nth(3)
        .and_then(|alpha| alpha.trim().parse::<f64>().ok())
        .is_some_and(|alpha| alpha == 0.0)
}

static WINDOW_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"window\.location(?:\.href)?\s*=\s*['"]([^'"]+)['"]"#)
        .expect("WINDOW_LOCATION_RE should compile")
});

/// Target of a `window.location = '...'` assignment in a click handler.
pub fn click_handler_target(handler: &str) -> Option<&str> {
    WINDOW_LOCATION_RE
        .captures(handler)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Raw link targets that never name a navigable resource.
pub fn is_unusable_target(raw: &str) -> bool {
    let raw = raw.trim();
    raw.is_empty() || raw.starts_with('#') || raw.to_ascii_lowercase().starts_with("javascript:")
}

// ---- page regions ----

pub const HEADER_BAND: f64 = 0.2;
pub const FOOTER_BAND: f64 = 0.8;

pub fn in_header_band(top: f64, viewport_height: f64) -> bool {
    top < viewport_height * HEADER_BAND
}

pub fn in_footer_band(bottom: f64, document_height: f64) -> bool {
    bottom > document_height * FOOTER_BAND
}

// ---- images ----

pub const LAZY_IMAGE_ATTRS: &[&str] = &["data-src", "data-original", "data-lazy"];
pub const LAZY_SRCSET_ATTRS: &[&str] = &["data-srcset"];

/// Elements whose inline style may carry a background image.
pub const BACKGROUND_STYLE_SELECTOR: &str = r#"[style*="background"]"#;

pub const TRACKING_MARKERS: &[&str] = &["tracking", "analytics"];
pub const PLACEHOLDER_VALUES: &[&str] = &["undefined", "null"];

static CSS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url\(\s*['"]?([^'")]+?)['"]?\s*\)"#).expect("CSS_URL_RE should compile")
});

static NON_IMAGE_EXT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(js|css|json|xml)($|\?)").expect("NON_IMAGE_EXT_RE should compile")
});

/// Every `url(...)` argument in a CSS declaration block.
pub fn css_urls(style: &str) -> Vec<&str> {
    CSS_URL_RE
        .captures_iter(style)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|url| !url.is_empty())
        .collect()
}

/// URL of each candidate in a `srcset` list.
pub fn srcset_urls(srcset: &str) -> Vec<&str> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
        .collect()
}

/// Whether a raw candidate is a JS-side placeholder such as `undefined`.
pub fn is_placeholder(raw: &str) -> bool {
    let raw = raw.trim();
    PLACEHOLDER_VALUES.contains(&raw)
}

/// Post-filter applied to every resolved image URL.
pub fn is_acceptable_image_url(absolute: &str) -> bool {
    if absolute.starts_with("data:") {
        return false;
    }
    if TRACKING_MARKERS.iter().any(|m| absolute.contains(m)) {
        return false;
    }
    if NON_IMAGE_EXT_RE.is_match(absolute) {
        return false;
    }
    !absolute
        .split(['/', '?', '#'])
        .any(|segment| PLACEHOLDER_VALUES.contains(&segment))
}

// ---- content post-processing ----

pub const ANCHOR_TARGET: &str = "_blank";
pub const ANCHOR_REL: &str = "noopener noreferrer";
pub const TABLE_BORDER: &str = "1";
pub const TABLE_STYLE: &str = "border-collapse: collapse;";
pub const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 8px;";

pub const MIN_IMAGE_WIDTH: f64 = 100.0;
pub const MIN_IMAGE_HEIGHT: f64 = 100.0;

fn contains_any_keyword(haystack: &str, keywords: &[&str]) -> bool {
    let haystack = haystack.to_lowercase();
    keywords.iter().any(|k| haystack.contains(k))
}
