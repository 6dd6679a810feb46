use super::{Document, NodeId};
use std::fmt::Write;

pub(super) fn write_node(document: &Document, node: NodeId, output: &mut String) {
    if let Some(text) = document.text(node) {
        output.push_str(&escape(text, false));
        return;
    }
    let Some(tag) = document.tag_name(node) else {
        return;
    };
    output.push('<');
    output.push_str(tag);
    for (name, value) in document.attributes(node) {
        let _ = write!(output, " {name}=\"{}\"", escape(value, true));
    }

    let children = document.children(node);
    if children.is_empty() {
        output.push_str("/>");
        return;
    }
    output.push('>');
    for child in children {
        write_node(document, *child, output);
    }
    let _ = write!(output, "</{tag}>");
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
