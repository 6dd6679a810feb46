use crate::svg::{Document, NodeId, Selection};

/// Walk up from `node` (inclusive) to the nearest `<svg>` element
pub fn find_root_svg(document: &Document, node: NodeId) -> Option<NodeId> {
    document
        .ancestors_inclusive(node)
        .find(|candidate| document.tag_name(*candidate).is_some_and(|tag| tag.eq_ignore_ascii_case("svg")))
}

/// [`find_root_svg`] starting from the first element of a selection
pub fn find_root_svg_of(document: &Document, selection: &Selection) -> Option<NodeId> {
    selection.node().and_then(|node| find_root_svg(document, node))
}
