use super::{Document, DocumentError, NodeId, Selector};

/// An ordered group of elements, operated on the way d3 selections are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: Vec<NodeId>,
}

impl Selection {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The first element in the selection
    pub fn node(&self) -> Option<NodeId> {
        self.nodes.first().copied()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// For every element, the first descendant matching `selector`; elements without a match are dropped
    pub fn select(&self, document: &Document, selector: &Selector) -> Selection {
        let nodes = self
            .nodes
            .iter()
            .filter_map(|node| document.descendants(*node).into_iter().find(|d| selector.matches(document, *d)))
            .collect();
        Self { nodes }
    }

    /// Every descendant matching `selector`, grouped in selection order without duplicates
    pub fn select_all(&self, document: &Document, selector: &Selector) -> Selection {
        let mut nodes = Vec::new();
        for node in &self.nodes {
            for descendant in document.descendants(*node) {
                if selector.matches(document, descendant) && !nodes.contains(&descendant) {
                    nodes.push(descendant);
                }
            }
        }
        Self { nodes }
    }

    /// Whether every node in the selection is an element of `document`
    pub fn belongs_to(&self, document: &Document) -> bool {
        self.nodes.iter().all(|node| document.is_element(*node))
    }

    /// Append a new element with the given tag to every element, selecting the new elements
    pub fn append(&self, document: &mut Document, tag: &str) -> Result<Selection, DocumentError> {
        self.check_elements(document)?;
        let nodes = self.nodes.iter().map(|node| document.append_element(*node, tag)).collect::<Result<_, _>>()?;
        Ok(Self { nodes })
    }

    /// Set the same attribute value on every element
    pub fn attr(&self, document: &mut Document, name: &str, value: &str) -> Result<&Self, DocumentError> {
        self.attr_with(document, name, |_, _| value.to_string())
    }

    /// Set an attribute computed per element from its index and the selection length.
    ///
    /// Nothing is written unless every node is an element of `document`.
    pub fn attr_with<F>(&self, document: &mut Document, name: &str, value: F) -> Result<&Self, DocumentError>
    where
        F: Fn(usize, usize) -> String,
    {
        self.check_elements(document)?;
        let total = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            document.set_attr(*node, name, value(index, total))?;
        }
        Ok(self)
    }

    fn check_elements(&self, document: &Document) -> Result<(), DocumentError> {
        match self.nodes.iter().find(|node| !document.is_element(**node)) {
            Some(node) if document.contains(*node) => Err(DocumentError::NotAnElement),
            Some(_) => Err(DocumentError::UnknownNode),
            None => Ok(()),
        }
    }
}

impl From<Vec<NodeId>> for Selection {
    fn from(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }
}

impl From<NodeId> for Selection {
    fn from(node: NodeId) -> Self {
        Self { nodes: vec![node] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> Document {
        Document::parse(
            r#"<svg><g id="chart"><rect id="a"/><rect id="b"/></g><g><rect id="c"/></g></svg>"#,
        )
        .expect("failed to parse")
    }

    #[test]
    fn select_all_scoped_to_selection() {
        let document = chart();
        let chart = Selection::from(document.element_by_id("chart").unwrap());
        let rects = chart.select_all(&document, &Selector::parse("rect").unwrap());

        let ids: Vec<_> = rects.nodes().iter().map(|n| document.attr(*n, "id").unwrap()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn select_takes_first_match() {
        let document = chart();
        let rect = document.select("rect").unwrap();
        assert_eq!(rect.size(), 1);
        assert_eq!(document.attr(rect.node().unwrap(), "id"), Some("a"));
    }

    #[test]
    fn select_without_match_is_empty() {
        let document = chart();
        assert!(document.select("defs > #party").unwrap().is_empty());
    }

    #[test]
    fn append_and_attr_with() {
        let mut document = chart();
        let groups = document.select_all("g").unwrap();
        let circles = groups.append(&mut document, "circle").unwrap();
        circles.attr_with(&mut document, "r", |index, total| format!("{index}/{total}")).unwrap();

        let radii: Vec<_> = circles.nodes().iter().map(|n| document.attr(*n, "r").unwrap().to_string()).collect();
        assert_eq!(radii, vec!["0/2", "1/2"]);
        assert_eq!(document.select_all("circle").unwrap().size(), 2);
    }

    #[test]
    fn foreign_selection_is_rejected_untouched() {
        let mut document = chart();
        let other = chart();
        let local = document.select("rect").unwrap().node().unwrap();
        let foreign = other.select("rect").unwrap().node().unwrap();
        let mixed = Selection::from(vec![local, foreign]);

        assert!(!mixed.belongs_to(&document));
        assert!(matches!(mixed.attr(&mut document, "fill", "red"), Err(DocumentError::UnknownNode)));
        assert!(document.select_all("rect").unwrap().nodes().iter().all(|n| document.attr(*n, "fill").is_none()));
        assert!(matches!(mixed.append(&mut document, "title"), Err(DocumentError::UnknownNode)));
        assert!(document.select_all("title").unwrap().is_empty());
    }

    #[test]
    fn text_nodes_are_never_selected() {
        let document = Document::parse("<svg><text>label</text></svg>").unwrap();
        let all = document.select_all("*").unwrap();
        assert_eq!(all.size(), 1);
        assert!(all.belongs_to(&document));
    }
}
