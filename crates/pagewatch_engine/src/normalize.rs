use std::sync::Arc;

use ego_tree::iter::Edge;
use pagewatch_core::CanonicalText;
use scraper::{Html, Node};

/// Classifies element kinds as rendered or not, independent of the parser.
pub trait VisibilityFilter: Send + Sync {
    /// `tag` is the lowercase local element name.
    fn is_rendered(&self, tag: &str) -> bool;
}

/// Element kinds whose content never reaches the reader.
pub const NON_RENDERED_TAGS: &[&str] = &[
    "script", "style", "meta", "link", "noscript", "template", "iframe", "object",
];

/// Hides a fixed set of element kinds; everything else is treated as visible.
#[derive(Debug, Clone)]
pub struct TagDenyList {
    hidden: Vec<String>,
}

impl TagDenyList {
    pub fn new<I, S>(hidden: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            hidden: hidden
                .into_iter()
                .map(|tag| tag.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }
}

impl Default for TagDenyList {
    fn default() -> Self {
        Self::new(NON_RENDERED_TAGS)
    }
}

impl VisibilityFilter for TagDenyList {
    fn is_rendered(&self, tag: &str) -> bool {
        !self.hidden.iter().any(|hidden| hidden == tag)
    }
}

/// Turns markup into [`CanonicalText`]: visible text in document order with
/// every whitespace run collapsed to a single space.
#[derive(Clone)]
pub struct TextNormalizer {
    filter: Arc<dyn VisibilityFilter>,
}

impl TextNormalizer {
    pub fn new(filter: Arc<dyn VisibilityFilter>) -> Self {
        Self { filter }
    }

    /// Parsing is best-effort; malformed markup never fails.
    pub fn normalize(&self, markup: &str) -> CanonicalText {
        let document = Html::parse_document(markup);
        let mut raw = String::with_capacity(markup.len() / 2);
        let mut hidden_depth = 0usize;

        for edge in document.tree.root().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Element(element) => {
                        if hidden_depth > 0 || !self.filter.is_rendered(element.name()) {
                            hidden_depth += 1;
                        }
                    }
                    Node::Text(text) if hidden_depth == 0 => raw.push_str(text),
                    _ => {}
                },
                Edge::Close(node) => {
                    if node.value().is_element() && hidden_depth > 0 {
                        hidden_depth -= 1;
                    }
                }
            }
        }

        CanonicalText::from_canonical(collapse_whitespace(&raw))
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(TagDenyList::default()))
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer").finish_non_exhaustive()
    }
}

/// Collapses whitespace runs to single spaces and trims both ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::collapse_whitespace;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(collapse_whitespace("  a\t\tb\n\n c  "), "a b c");
        assert_eq!(collapse_whitespace("\u{a0}x\u{2003}y"), "x y");
    }

    #[test]
    fn blank_input_becomes_empty() {
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }
}
