//! Seam around the external readability parser.

use dom_smoothie::{Config, Readability};
use tracing::debug;

use crate::domain::ArticleRecord;

/// HTML document in, main article out; `None` when nothing readable was found.
pub trait ArticleParser: Send + Sync {
    fn parse(&self, html: &str, url: &str) -> Option<ArticleRecord>;
}

/// Readability.js port provided by `dom_smoothie`.
#[derive(Debug, Clone)]
pub struct DomSmoothieParser {
    max_elements_to_parse: usize,
}

impl DomSmoothieParser {
    pub fn new(max_elements_to_parse: usize) -> Self {
        Self {
            max_elements_to_parse,
        }
    }
}

impl Default for DomSmoothieParser {
    fn default() -> Self {
        Self::new(9000)
    }
}

impl ArticleParser for DomSmoothieParser {
    fn parse(&self, html: &str, url: &str) -> Option<ArticleRecord> {
        let cfg = Config {
            max_elements_to_parse: self.max_elements_to_parse,
            ..Default::default()
        };

        let mut readability = match Readability::new(html, Some(url), Some(cfg)) {
            Ok(r) => r,
            Err(e) => {
                debug!("Readability setup failed for {}: {}", url, e);
                return None;
            }
        };

        let article = match readability.parse() {
            Ok(article) => article,
            Err(e) => {
                debug!("Readability found no article in {}: {}", url, e);
                return None;
            }
        };

        Some(ArticleRecord {
            title: article.title,
            content: article.content.to_string(),
            excerpt: article.excerpt,
            byline: article.byline,
            direction: article.dir,
            length: article.length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_article() {
        let paragraph = "This paragraph carries enough words to look like real article prose, \
                         with commas, clauses, and a steady rhythm that readability scores well. ";
        let html = format!(
            "<html><head><title>Launch notes</title></head><body>\
             <nav><a href='/'>Home</a></nav>\
             <article><h1>Launch notes</h1><p>{0}</p><p>{0}</p><p>{0}</p><p>{0}</p></article>\
             </body></html>",
            paragraph.repeat(3)
        );
        let article = DomSmoothieParser::default()
            .parse(&html, "https://example.com/launch")
            .expect("article should parse");
        assert!(article.title.contains("Launch notes"));
        assert!(article.content.contains("steady rhythm"));
        assert!(article.length > 0);
    }
}
