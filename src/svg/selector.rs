use super::{Document, DocumentError, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// A single compound such as `stop`, `#party`, `linearGradient#party` or `*`
#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
}

impl Compound {
    fn parse(source: &str, text: &str) -> Result<Self, DocumentError> {
        let invalid = |reason: &str| DocumentError::InvalidSelector(source.to_string(), reason.to_string());
        let (tag, id) = match text.split_once('#') {
            Some((tag, id)) => (tag, Some(id)),
            None => (text, None),
        };
        if id.is_some_and(|id| id.is_empty() || id.contains('#')) {
            return Err(invalid("malformed id"));
        }
        if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*') {
            return Err(invalid("unsupported compound"));
        }
        let tag = match tag {
            "" | "*" => None,
            tag => Some(tag.to_string()),
        };
        Ok(Self { tag, id: id.map(str::to_string) })
    }

    fn matches(&self, document: &Document, node: NodeId) -> bool {
        let Some(name) = document.tag_name(node) else {
            return false;
        };
        let tag_matches = self.tag.as_deref().map_or(true, |tag| name.eq_ignore_ascii_case(tag));
        let id_matches = self.id.as_deref().map_or(true, |id| document.attr(node, "id") == Some(id));
        tag_matches && id_matches
    }
}

/// A parsed selector made of compounds joined by descendant or child combinators.
///
/// Like `querySelectorAll`, only the candidates are restricted to the scope of a selection; the
/// ancestors used to satisfy the combinators may lie anywhere above them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    // The combinator on each entry links it to the previous compound
    parts: Vec<(Combinator, Compound)>,
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, DocumentError> {
        let spaced = source.replace('>', " > ");
        let mut parts = Vec::new();
        let mut combinator = Combinator::Descendant;
        let mut pending_child = false;
        for token in spaced.split_whitespace() {
            if token == ">" {
                if parts.is_empty() || pending_child {
                    return Err(DocumentError::InvalidSelector(source.to_string(), "dangling '>'".to_string()));
                }
                pending_child = true;
                combinator = Combinator::Child;
                continue;
            }
            parts.push((combinator, Compound::parse(source, token)?));
            combinator = Combinator::Descendant;
            pending_child = false;
        }
        if parts.is_empty() {
            return Err(DocumentError::InvalidSelector(source.to_string(), "empty selector".to_string()));
        }
        if pending_child {
            return Err(DocumentError::InvalidSelector(source.to_string(), "dangling '>'".to_string()));
        }
        Ok(Self { parts })
    }

    pub(crate) fn matches(&self, document: &Document, node: NodeId) -> bool {
        self.matches_from(document, node, self.parts.len() - 1)
    }

    fn matches_from(&self, document: &Document, node: NodeId, index: usize) -> bool {
        let (combinator, compound) = &self.parts[index];
        if !compound.matches(document, node) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match combinator {
            Combinator::Child => {
                document.parent(node).is_some_and(|parent| self.matches_from(document, parent, index - 1))
            }
            Combinator::Descendant => {
                let mut current = document.parent(node);
                while let Some(ancestor) = current {
                    if self.matches_from(document, ancestor, index - 1) {
                        return true;
                    }
                    current = document.parent(ancestor);
                }
                false
            }
        }
    }
}

impl TryFrom<&str> for Selector {
    type Error = DocumentError;

    fn try_from(source: &str) -> Result<Self, Self::Error> {
        Self::parse(source)
    }
}
