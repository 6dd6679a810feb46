use super::{DocumentError, Selection, Selector};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DOCUMENT_ID: AtomicUsize = AtomicUsize::new(0);

/// Handle to a node stored in a [`Document`].
///
/// Handles remember the document that created them; using one with any other document behaves as
/// if the node did not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    document: usize,
    index: usize,
}

#[derive(Debug, Clone)]
enum NodeData {
    Element { tag: String, attributes: Vec<(String, String)> },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// An in-memory SVG tree of elements and text.
///
/// Nodes live in an arena and are addressed through [`NodeId`]s. Nodes that were created but never
/// appended anywhere, or that were removed, stay in the arena detached: they have no parent and
/// are not serialized. A cloned document shares its handles with the original.
#[derive(Debug, Clone)]
pub struct Document {
    id: usize,
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self { id: NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed), nodes: Vec::new(), root: None }
    }

    /// Create a document whose root is a single element with the given tag
    pub fn with_root(tag: &str) -> Self {
        let mut document = Self::new();
        let root = document.create_element(tag);
        document.root = Some(root);
        document
    }

    /// Parse SVG markup into a document
    pub fn parse(markup: &str) -> Result<Self, DocumentError> {
        super::parse::parse_markup(markup)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    /// Whether `node` was created by this document
    pub fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        if id.document != self.id {
            return None;
        }
        self.nodes.get(id.index)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        if id.document != self.id {
            return Err(DocumentError::UnknownNode);
        }
        self.nodes.get_mut(id.index).ok_or(DocumentError::UnknownNode)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId { document: self.id, index: self.nodes.len() };
        self.nodes.push(Node { data, children: Vec::new(), parent: None });
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element { tag: tag.to_string(), attributes: Vec::new() })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it from any previous parent first.
    ///
    /// Fails if either node belongs elsewhere, if `parent` is not an element, or if `child` is
    /// `parent` itself or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        if !self.contains(child) {
            return Err(DocumentError::UnknownNode);
        }
        if !self.is_element(parent) {
            return Err(self.not_an_element(parent));
        }
        if self.ancestors_inclusive(parent).any(|ancestor| ancestor == child) {
            return Err(DocumentError::HierarchyRequest);
        }

        if let Some(old_parent) = self.parent(child) {
            self.node_mut(old_parent)?.children.retain(|c| *c != child);
        }
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> Result<NodeId, DocumentError> {
        if !self.is_element(parent) {
            return Err(self.not_an_element(parent));
        }
        let child = self.create_element(tag);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DocumentError> {
        if !self.is_element(parent) {
            return Err(self.not_an_element(parent));
        }
        let child = self.create_text(text);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Detach every child of `node`. The children stay in the arena.
    pub fn remove_children(&mut self, node: NodeId) -> Result<(), DocumentError> {
        let children = std::mem::take(&mut self.node_mut(node)?.children);
        for child in children {
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn is_element(&self, node: NodeId) -> bool {
        matches!(self.node(node), Some(Node { data: NodeData::Element { .. }, .. }))
    }

    /// The tag of an element; `None` for text nodes
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    /// The contents of a text node
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    fn attribute_list(&self, node: NodeId) -> &[(String, String)] {
        match self.node(node).map(|n| &n.data) {
            Some(NodeData::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attribute_list(node).iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.attribute_list(node).iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Set an attribute, replacing its value in place if it already exists
    pub fn set_attr<V: Into<String>>(&mut self, node: NodeId, name: &str, value: V) -> Result<(), DocumentError> {
        let NodeData::Element { attributes, .. } = &mut self.node_mut(node)?.data else {
            return Err(DocumentError::NotAnElement);
        };
        let value = value.into();
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => attributes.push((name.to_string(), value)),
        }
        Ok(())
    }

    /// `node` followed by its ancestors, nearest first
    pub fn ancestors_inclusive(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.contains(node).then_some(node);
        std::iter::successors(start, move |current| self.parent(*current))
    }

    /// All descendants of `node` in document order, excluding `node` itself
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut output = Vec::new();
        let mut pending: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            output.push(next);
            pending.extend(self.children(next).iter().rev().copied());
        }
        output
    }

    /// Find the first attached element with the given id
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let root = self.root?;
        std::iter::once(root).chain(self.descendants(root)).find(|node| self.attr(*node, "id") == Some(id))
    }

    /// Select all elements under the document root matching a selector
    pub fn select_all(&self, selector: &str) -> Result<Selection, DocumentError> {
        let selector = Selector::parse(selector)?;
        let roots: Vec<NodeId> = self.root.into_iter().collect();
        Ok(Selection::from(roots).select_all(self, &selector))
    }

    /// Select the first element under the document root matching a selector
    pub fn select(&self, selector: &str) -> Result<Selection, DocumentError> {
        let selector = Selector::parse(selector)?;
        let roots: Vec<NodeId> = self.root.into_iter().collect();
        Ok(Selection::from(roots).select(self, &selector))
    }

    /// Serialize the whole document
    pub fn to_markup(&self) -> String {
        self.root.map(|root| self.outer_markup(root)).unwrap_or_default()
    }

    /// Serialize a single node and its subtree
    pub fn outer_markup(&self, node: NodeId) -> String {
        let mut output = String::new();
        super::markup::write_node(self, node, &mut output);
        output
    }

    fn not_an_element(&self, node: NodeId) -> DocumentError {
        if self.contains(node) {
            DocumentError::NotAnElement
        } else {
            DocumentError::UnknownNode
        }
    }
}
