//! Re-serialization of parsed HTML with pending edits applied.
//!
//! `scraper` trees are read-only, so pipeline stages record removals and
//! attribute overrides in [`Edits`] and the tree is written back out here.

use std::collections::{HashMap, HashSet};

use ego_tree::{NodeId, NodeRef};
use html_escape::{encode_double_quoted_attribute, encode_text};
use scraper::{ElementRef, Html, Node};

use crate::extract::rules::NODE_MARKER_ATTR;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

/// Whether probe markers survive serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markers {
    Keep,
    Strip,
}

#[derive(Debug, Default)]
pub struct Edits {
    removed: HashSet<NodeId>,
    attrs: HashMap<NodeId, Vec<(&'static str, String)>>,
}

impl Edits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop a node and its subtree. Returns false if it was already dropped.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.removed.insert(id)
    }

    /// Whether the node or any of its ancestors has been dropped.
    pub fn is_pruned(&self, node: NodeRef<'_, Node>) -> bool {
        if self.removed.is_empty() {
            return false;
        }
        self.removed.contains(&node.id()) || node.ancestors().any(|a| self.removed.contains(&a.id()))
    }

    /// Override (or add) an attribute on an element.
    pub fn set_attr(&mut self, id: NodeId, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        let entry = self.attrs.entry(id).or_default();
        match entry.iter_mut().find(|(n, _)| *n == name) {
            Some(existing) => existing.1 = value,
            None => entry.push((name, value)),
        }
    }
}

/// Serialize a whole document.
pub fn render_document(html: &Html, edits: &Edits, markers: Markers) -> String {
    let mut out = String::new();
    for child in html.tree.root().children() {
        write_node(&mut out, child, edits, markers);
    }
    out
}

/// Serialize the children of an element (its inner HTML).
pub fn render_inner(element: ElementRef<'_>, edits: &Edits, markers: Markers) -> String {
    let mut out = String::new();
    for child in element.children() {
        write_node(&mut out, child, edits, markers);
    }
    out
}

/// Visible text of an element, skipping pruned subtrees.
pub fn text_content(element: ElementRef<'_>, edits: &Edits) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        if let Node::Text(t) = node.value() {
            if !edits.is_pruned(node) {
                text.push_str(t);
            }
        }
    }
    text
}

fn write_node(out: &mut String, node: NodeRef<'_, Node>, edits: &Edits, markers: Markers) {
    if edits.removed.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Document | Node::Fragment => {
            for child in node.children() {
                write_node(out, child, edits, markers);
            }
        }
        Node::Doctype(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(doctype.name());
            out.push('>');
        }
        Node::Comment(comment) => {
            let comment: &str = comment;
            out.push_str("<!--");
            out.push_str(comment);
            out.push_str("-->");
        }
        Node::Text(text) => {
            let text: &str = text;
            let raw = node
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|p| RAW_TEXT_ELEMENTS.contains(&p.value().name()));
            if raw {
                out.push_str(text);
            } else {
                out.push_str(&encode_text(text));
            }
        }
        Node::Element(element) => {
            let name = element.name();
            out.push('<');
            out.push_str(name);

            let overrides = edits.attrs.get(&node.id());
            for (key, value) in element.attrs() {
                if markers == Markers::Strip && key == NODE_MARKER_ATTR {
                    continue;
                }
                let value = overrides
                    .and_then(|o| o.iter().find(|(n, _)| *n == key))
                    .map_or(value, |(_, v)| v.as_str());
                write_attr(out, key, value);
            }
            if let Some(overrides) = overrides {
                for (key, value) in overrides {
                    if element.attr(key).is_none() {
                        write_attr(out, key, value);
                    }
                }
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&name) {
                return;
            }
            for child in node.children() {
                write_node(out, child, edits, markers);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        _ => {}
    }
}

fn write_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&encode_double_quoted_attribute(value));
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    fn first<'a>(html: &'a Html, css: &str) -> ElementRef<'a> {
        let sel = Selector::parse(css).unwrap();
        html.select(&sel).next().unwrap()
    }

    #[test]
    fn test_round_trip_without_edits() {
        let html = Html::parse_fragment(r#"<p class="x">a &amp; b<br><img src="i.png"></p>"#);
        let out = render_inner(html.root_element(), &Edits::new(), Markers::Keep);
        assert_eq!(out, r#"<p class="x">a &amp; b<br><img src="i.png"></p>"#);
    }

    #[test]
    fn test_removed_subtree_is_skipped() {
        let html = Html::parse_fragment("<div><span>gone</span><b>kept</b></div>");
        let mut edits = Edits::new();
        edits.remove(first(&html, "span").id());
        let out = render_inner(html.root_element(), &edits, Markers::Keep);
        assert_eq!(out, "<div><b>kept</b></div>");
    }

    #[test]
    fn test_attr_override_and_append() {
        let html = Html::parse_fragment(r#"<a href="/x" target="_self">x</a>"#);
        let mut edits = Edits::new();
        let id = first(&html, "a").id();
        edits.set_attr(id, "target", "_blank");
        edits.set_attr(id, "rel", "noopener");
        let out = render_inner(html.root_element(), &edits, Markers::Keep);
        assert_eq!(out, r#"<a href="/x" target="_blank" rel="noopener">x</a>"#);
    }

    #[test]
    fn test_markers_stripped_on_request() {
        let html = Html::parse_fragment(r#"<p data-skimmer-node="4" id="p">t</p>"#);
        let out = render_inner(html.root_element(), &Edits::new(), Markers::Strip);
        assert_eq!(out, r#"<p id="p">t</p>"#);
    }

    #[test]
    fn test_text_content_skips_pruned() {
        let html = Html::parse_fragment("<a>Apply<svg><title>arrow</title></svg> now</a>");
        let mut edits = Edits::new();
        edits.remove(first(&html, "svg").id());
        assert_eq!(text_content(first(&html, "a"), &edits), "Apply now");
        assert!(edits.is_pruned(*first(&html, "title")));
    }

    #[test]
    fn test_script_text_is_not_escaped() {
        let html = Html::parse_document("<html><head><script>if (a < b) {}</script></head><body></body></html>");
        let out = render_document(&html, &Edits::new(), Markers::Keep);
        assert!(out.contains("<script>if (a < b) {}</script>"));
    }

    #[test]
    fn test_noscript_survives_repeated_rendering() {
        let source = r#"<html><head></head><body><noscript><img src="/real.jpg"></noscript></body></html>"#;
        let once = render_document(&Html::parse_document(source), &Edits::new(), Markers::Keep);
        let twice = render_document(&Html::parse_document(&once), &Edits::new(), Markers::Keep);
        assert!(twice.contains(r#"<noscript><img src="/real.jpg"></noscript>"#));
        assert_eq!(once, twice);
    }
}
