//! Thin helpers over the html5ever DOM. All raw-markup parsing lives behind
//! these; the converter only ever sees `Handle`s.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment and return the DOM plus the nodes that make up its
/// body. html5ever always builds a full document, so the fragment's content
/// ends up as the children of the synthesized `<body>`.
///
/// The returned `RcDom` must outlive every use of the handles: rcdom's
/// `Node::drop` empties the `children` of all nodes still reachable from a
/// node whose last strong reference goes away, so dropping the document (or
/// any popped ancestor it no longer keeps alive) severs the subtrees.
pub(crate) fn parse_fragment(input: &str) -> (RcDom, Vec<Handle>) {
    let dom: RcDom = parse_document(RcDom::default(), Default::default()).one(input);
    let children = match find_element(&dom.document, "body") {
        Some(body) => node_children(&body),
        None => node_children(&dom.document),
    };
    (dom, children)
}

/// The body nodes alone, for callers that only inspect the top-level handles.
#[cfg(test)]
pub(crate) fn fragment_children(input: &str) -> Vec<Handle> {
    parse_fragment(input).1
}

pub(crate) fn node_children(handle: &Handle) -> Vec<Handle> {
    handle.children.borrow().clone()
}

pub(crate) fn element_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// A printable name for error messages: the element name, or a `#`-prefixed
/// label for non-element nodes.
pub(crate) fn node_label(handle: &Handle) -> String {
    match &handle.data {
        NodeData::Element { name, .. } => name.local.to_string(),
        NodeData::Text { .. } => "#text".to_string(),
        NodeData::Comment { .. } => "#comment".to_string(),
        NodeData::Document => "#document".to_string(),
        NodeData::Doctype { .. } => "#doctype".to_string(),
        NodeData::ProcessingInstruction { .. } => "#processing-instruction".to_string(),
    }
}

pub(crate) fn attr(handle: &Handle, attr_name: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr_name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

fn find_element(handle: &Handle, name: &str) -> Option<Handle> {
    if let NodeData::Element { name: qual, .. } = &handle.data {
        if qual.local.to_string().eq_ignore_ascii_case(name) {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(found) = find_element(child, name) {
            return Some(found);
        }
    }
    None
}
