use std::collections::HashSet;

/// Absolute image URLs, unique by string, kept in first-discovery order.
#[derive(Debug, Clone, Default)]
pub struct ImageSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a URL. Returns false when it was already present.
    pub fn insert(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.order.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every URL the predicate rejects, preserving order.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        let seen = &mut self.seen;
        self.order.retain(|url| {
            let kept = keep(url);
            if !kept {
                seen.remove(url);
            }
            kept
        });
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}
