use scraper::{Html, Node, Selector};

use crate::IngestError;

/// Tags whose entire subtrees are dropped before text extraction.
pub const STRIPPED_TAGS: [&str; 6] = ["script", "style", "nav", "footer", "header", "aside"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// `<title>` text, empty when the document has none.
    pub title: String,
    /// Whitespace-collapsed visible text of `<body>`.
    pub body: String,
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Result<PageText, IngestError>;
}

/// DOM extractor over html5ever's lenient parser. Malformed markup never
/// errors; the `ParsingFailed` path exists only as an escape hatch for
/// the selector machinery. Pure: identical input yields identical output.
#[derive(Debug, Default, Clone, Copy)]
pub struct DomExtractor;

impl Extractor for DomExtractor {
    fn extract(&self, html: &str) -> Result<PageText, IngestError> {
        let title_sel = selector("title")?;
        let body_sel = selector("body")?;

        let mut doc = Html::parse_document(html);
        strip_noise(&mut doc);

        let title = doc
            .select(&title_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let body = doc
            .select(&body_sel)
            .next()
            .map(|el| collapse_whitespace(el.text()))
            .unwrap_or_default();

        Ok(PageText { title, body })
    }
}

fn selector(css: &str) -> Result<Selector, IngestError> {
    Selector::parse(css).map_err(|err| IngestError::ParsingFailed(err.to_string()))
}

/// Detaches every non-content element subtree from the parsed tree.
fn strip_noise(doc: &mut Html) {
    let doomed: Vec<_> = doc
        .tree
        .nodes()
        .filter(|node| match node.value() {
            Node::Element(element) => STRIPPED_TAGS.contains(&element.name()),
            _ => false,
        })
        .map(|node| node.id())
        .collect();

    for id in doomed {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in parts.flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
