mod document;
mod markup;
mod parse;
mod selection;
mod selector;

pub use document::{Document, NodeId};
pub use selection::Selection;
pub use selector::Selector;

/// Errors that can occur when building, parsing or editing SVG documents
#[derive(thiserror::Error, Debug)]
pub enum DocumentError {
    #[error("failed to parse markup: {0}")]
    ParseError(String),

    #[error("invalid selector '{0}': {1}")]
    InvalidSelector(String, String),

    #[error("node does not belong to this document")]
    UnknownNode,

    #[error("only elements can hold attributes or children")]
    NotAnElement,

    #[error("a node can't be appended into itself or its own descendants")]
    HierarchyRequest,
}
