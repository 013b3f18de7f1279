//! The intermediate document tree: paragraph-level and run-level nodes plus
//! their WordprocessingML rendering.
//!
//! Rendering is pure; the only post-build mutation is the trailing-newline
//! cleanup visitor, after which the tree is read-only and renders the same
//! bytes every time.

use std::fmt;

use crate::format::TextFormat;
use crate::visitor::{MutVisitor, Visitor};

pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A tree node. Paragraph-level variants live directly under the root;
/// run-level variants live inside a paragraph's run collection.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Paragraph(Paragraph),
    ListParagraph(ListParagraph),
    Text(Text),
    Newline,
}

impl Node {
    pub fn render(&self) -> String {
        match self {
            Node::Paragraph(p) => p.render(),
            Node::ListParagraph(p) => p.render(),
            Node::Text(t) => t.render(),
            Node::Newline => "<w:r><w:br/></w:r>".to_string(),
        }
    }

    /// Double dispatch: the visitor sees this node first, then each owned
    /// child in document order. Leaf nodes have no children to forward to.
    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit(self);
        match self {
            Node::Paragraph(p) => p.runs.accept(visitor),
            Node::ListParagraph(p) => p.runs.accept(visitor),
            Node::Text(_) | Node::Newline => {}
        }
    }

    pub fn accept_mut(&mut self, visitor: &mut dyn MutVisitor) {
        visitor.visit(self);
        match self {
            Node::Paragraph(p) => p.runs.accept_mut(visitor),
            Node::ListParagraph(p) => p.runs.accept_mut(visitor),
            Node::Text(_) | Node::Newline => {}
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Paragraph(p) => write!(f, "<Paragraph{{{}}}: {}>", p.style, p.runs),
            Node::ListParagraph(p) => {
                write!(f, "<ListParagraph{{{}}}: {}>", p.style, p.runs)
            }
            Node::Text(t) => write!(f, "<Text{{{}}}: {}>", t.format, t.content),
            Node::Newline => write!(f, "<Newline>"),
        }
    }
}

/// Ordered sequence of nodes; insertion order is document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collection {
    nodes: Vec<Node>,
}

impl Collection {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn pop(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    pub fn render(&self) -> String {
        self.nodes.iter().map(Node::render).collect()
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_collection(self);
        for node in &self.nodes {
            node.accept(visitor);
        }
    }

    pub fn accept_mut(&mut self, visitor: &mut dyn MutVisitor) {
        for node in &mut self.nodes {
            node.accept_mut(visitor);
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// The whole converted fragment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Root {
    nodes: Collection,
}

impl Root {
    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes.nodes()
    }

    pub fn render(&self) -> String {
        self.nodes.render()
    }

    pub fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.visit_root(self);
        self.nodes.accept(visitor);
    }

    pub fn accept_mut(&mut self, visitor: &mut dyn MutVisitor) {
        self.nodes.accept_mut(visitor);
    }

    /// Depth-first search over debug descriptions; introspection and test
    /// support, not part of the render path.
    pub fn grep(&self, pattern: &regex::Regex) -> Vec<String> {
        let mut visitor = crate::visitor::GrepVisitor::new(pattern.clone());
        self.accept(&mut visitor);
        visitor.into_matches()
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Root: {}>", self.nodes)
    }
}

// The shared paragraph wrapper. The `extra_properties` hook is the only
// place Paragraph and ListParagraph rendering differ.
fn paragraph_xml(style: &str, extra_properties: &str, runs: &Collection) -> String {
    format!(
        "<w:p><w:pPr><w:pStyle w:val=\"{}\" />{}</w:pPr>{}</w:p>",
        style,
        extra_properties,
        runs.render()
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub style: String,
    pub runs: Collection,
}

impl Paragraph {
    pub fn new(style: &str, runs: Collection) -> Self {
        Self {
            style: style.to_string(),
            runs,
        }
    }

    pub fn render(&self) -> String {
        paragraph_xml(&self.style, "", &self.runs)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListParagraph {
    pub style: String,
    pub runs: Collection,
    pub num_id: u32,
    pub indent_level: usize,
}

impl ListParagraph {
    pub fn new(style: &str, runs: Collection, num_id: u32, indent_level: usize) -> Self {
        Self {
            style: style.to_string(),
            runs,
            num_id,
            indent_level,
        }
    }

    fn numbering_properties(&self) -> String {
        format!(
            "<w:numPr><w:ilvl w:val=\"{}\" /><w:numId w:val=\"{}\" /></w:numPr>",
            self.indent_level, self.num_id
        )
    }

    pub fn render(&self) -> String {
        paragraph_xml(&self.style, &self.numbering_properties(), &self.runs)
    }
}

/// Leaf text run. Stored content is kept verbatim; non-breaking spaces are
/// substituted with ordinary spaces at render time only.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    pub content: String,
    pub format: TextFormat,
}

impl Text {
    pub fn new(content: String, format: TextFormat) -> Self {
        Self { content, format }
    }

    pub fn render(&self) -> String {
        let normalized = self.content.replace('\u{a0}', " ");
        format!(
            "<w:r>{}<w:t xml:space=\"preserve\">{}</w:t></w:r>",
            self.format.run_properties(),
            escape_text(&normalized)
        )
    }
}
