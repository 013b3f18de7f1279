//! The block-level work stack.
//!
//! Plain recursion cannot express "an element discovered while extracting
//! inline runs turns out to be block-level and must become a sibling
//! paragraph after the current one". The builder keeps a stack of
//! pending-element queues instead: the inline extractor hands such elements
//! back with `push`, and the driver loop keeps draining `next` until no
//! layer has pending work, no matter how deep the discovery happened.

use std::collections::VecDeque;

use markup5ever_rcdom::Handle;

use crate::ast::{Node, Root};

struct Layer {
    pending: VecDeque<Handle>,
    list_level: bool,
}

pub struct AstBuilder {
    layers: Vec<Layer>,
    root: Root,
}

impl AstBuilder {
    pub fn new(nodes: Vec<Handle>) -> Self {
        Self {
            layers: vec![Layer {
                pending: nodes.into(),
                list_level: false,
            }],
            root: Root::default(),
        }
    }

    /// Push a fresh empty layer; list-flagged layers drive indent bookkeeping.
    pub fn new_layer(&mut self, list_level: bool) {
        self.layers.push(Layer {
            pending: VecDeque::new(),
            list_level,
        });
    }

    /// Pop the front pending element of the current layer, discarding
    /// exhausted layers first.
    pub fn next(&mut self) -> Option<Handle> {
        self.drop_exhausted();
        self.layers.last_mut().and_then(|layer| layer.pending.pop_front())
    }

    /// Append to the topmost layer — not necessarily the layer that was
    /// active when the caller started. This is what lets the inline
    /// extractor defer a block element without disturbing list bookkeeping.
    pub fn push(&mut self, node: Handle) {
        if self.layers.is_empty() {
            self.new_layer(false);
        }
        if let Some(layer) = self.layers.last_mut() {
            layer.pending.push_back(node);
        }
    }

    pub fn push_all(&mut self, nodes: Vec<Handle>) {
        for node in nodes {
            self.push(node);
        }
    }

    /// True once no layer holds pending elements.
    pub fn done(&mut self) -> bool {
        self.drop_exhausted();
        self.layers.is_empty()
    }

    /// Whether the active context sits inside another list context.
    pub fn nested(&self) -> bool {
        self.indent_level() > 0
    }

    /// Count of list-flagged layers on the stack, minus one: the indent
    /// level of the list item currently being built.
    pub fn indent_level(&self) -> usize {
        self.layers
            .iter()
            .filter(|layer| layer.list_level)
            .count()
            .saturating_sub(1)
    }

    /// Emission always targets the single shared root, never a layer.
    pub fn emit(&mut self, node: Node) {
        self.root.push(node);
    }

    pub fn into_root(self) -> Root {
        self.root
    }

    fn drop_exhausted(&mut self) {
        while self
            .layers
            .last()
            .is_some_and(|layer| layer.pending.is_empty())
        {
            self.layers.pop();
        }
    }
}
