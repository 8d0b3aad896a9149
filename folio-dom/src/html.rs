//! HTML serialization of a document subtree.

use crate::{Document, Element, NodeId};
use std::fmt::Write;

const INDENT: &str = "    ";

/// Serializes a node and its subtree as indented HTML.
pub fn outer_html(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, 0, &mut out);
    out
}

/// Serializes the children of a node, each starting at `depth` indentation.
pub fn inner_html(doc: &Document, node: NodeId, depth: usize) -> String {
    let mut out = String::new();
    for child in doc.children(node) {
        write_node(doc, *child, depth, &mut out);
    }
    out
}

fn write_node(doc: &Document, node: NodeId, depth: usize, out: &mut String) {
    let Some(element) = doc.get(node) else {
        return;
    };
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    open_tag(element, out);
    if let Some(text) = &element.text {
        out.push_str(&escape_text(text));
    }
    let children = doc.children(node);
    if !children.is_empty() {
        out.push('\n');
        for child in children {
            write_node(doc, *child, depth + 1, out);
        }
        out.push_str(&pad);
    }
    let _ = writeln!(out, "</{}>", element.tag);
}

fn open_tag(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    if let Some(id) = &element.id {
        let _ = write!(out, " id=\"{}\"", escape_attr(id));
    }
    if !element.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_attr(&element.classes.join(" ")));
    }
    for (name, value) in &element.attributes {
        let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
    }
    out.push('>');
}

/// Escapes text content.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes an attribute value for a double-quoted attribute.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
