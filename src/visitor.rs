//! Double-dispatch traversal over the document tree.
//!
//! Visit order is pre-order: a node is seen before its children, children in
//! document order.

use regex::Regex;

use crate::ast::{Collection, Node, Root};

/// Read-only traversal. The root and run collections get their own hooks so
/// a visitor can observe the full structure; both default to no-ops.
pub trait Visitor {
    fn visit(&mut self, node: &Node);

    fn visit_root(&mut self, _root: &Root) {}

    fn visit_collection(&mut self, _collection: &Collection) {}
}

/// Mutating traversal, used once after the tree is built.
pub trait MutVisitor {
    fn visit(&mut self, node: &mut Node);
}

/// Collects the debug description of every node matching a pattern, in visit
/// order. Structural inspection only; never part of the render path.
pub struct GrepVisitor {
    pattern: Regex,
    matches: Vec<String>,
}

impl GrepVisitor {
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            matches: Vec::new(),
        }
    }

    pub fn into_matches(self) -> Vec<String> {
        self.matches
    }

    fn check(&mut self, description: String) {
        if self.pattern.is_match(&description) {
            self.matches.push(description);
        }
    }
}

impl Visitor for GrepVisitor {
    fn visit(&mut self, node: &Node) {
        self.check(node.to_string());
    }

    fn visit_root(&mut self, root: &Root) {
        self.check(root.to_string());
    }

    fn visit_collection(&mut self, collection: &Collection) {
        self.check(collection.to_string());
    }
}

/// Trims trailing line breaks from every paragraph's run collection. Runs
/// once between tree construction and rendering; a second pass is a no-op.
pub struct TrailingNewlineRemover;

impl MutVisitor for TrailingNewlineRemover {
    fn visit(&mut self, node: &mut Node) {
        let runs = match node {
            Node::Paragraph(p) => &mut p.runs,
            Node::ListParagraph(p) => &mut p.runs,
            Node::Text(_) | Node::Newline => return,
        };
        while matches!(runs.nodes().last(), Some(Node::Newline)) {
            runs.pop();
        }
    }
}
