use super::{Document, DocumentError, NodeId};

pub(super) fn parse_markup(markup: &str) -> Result<Document, DocumentError> {
    let xml = roxmltree::Document::parse(markup).map_err(|e| DocumentError::ParseError(e.to_string()))?;
    let mut document = Document::new();
    let root = build_element(&mut document, xml.root_element())?;
    document.set_root(root);
    Ok(document)
}

// Comments and processing instructions are dropped; text is kept verbatim
fn build_element(document: &mut Document, node: roxmltree::Node<'_, '_>) -> Result<NodeId, DocumentError> {
    let element = document.create_element(&qualified_name(node, node.tag_name().namespace(), node.tag_name().name()));

    // Only declarations that aren't already in scope from the parent
    let inherited: Vec<(Option<String>, String)> = node
        .parent_element()
        .map(|p| p.namespaces().map(|ns| (ns.name().map(str::to_string), ns.uri().to_string())).collect())
        .unwrap_or_default();
    for namespace in node.namespaces() {
        let in_scope = inherited.iter().any(|(name, uri)| name.as_deref() == namespace.name() && uri == namespace.uri());
        if in_scope || namespace.name() == Some("xml") {
            continue;
        }
        let name = match namespace.name() {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_string(),
        };
        document.set_attr(element, &name, namespace.uri())?;
    }
    for attribute in node.attributes() {
        let name = qualified_name(node, attribute.namespace(), attribute.name());
        document.set_attr(element, &name, attribute.value())?;
    }

    for child in node.children() {
        if child.is_element() {
            let child = build_element(document, child)?;
            document.append_child(element, child)?;
        } else if child.is_text() {
            if let Some(text) = child.text() {
                document.append_text(element, text)?;
            }
        }
    }
    Ok(element)
}

fn qualified_name(node: roxmltree::Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}
