//! Cycle-safe graph walk.
//!
//! Owned children are translated recursively in place. Shared children are
//! queued and processed after the current node's lock is released, so at
//! most one node lock is held at a time and a reference back to any node
//! already seen is skipped through the visited set.

use std::collections::HashSet;

use super::{FieldOverrides, TranslationEngine, TranslationStats};
use crate::graph::{ChildVisitor, NodeId, SharedNode, Translatable};

pub(super) struct GraphWalk<'e> {
    engine: &'e TranslationEngine,
    overrides: Option<&'e FieldOverrides>,
    visited: HashSet<NodeId>,
    pending: Vec<SharedNode>,
    pub(super) stats: TranslationStats,
}

impl<'e> GraphWalk<'e> {
    pub(super) fn new(engine: &'e TranslationEngine, overrides: Option<&'e FieldOverrides>) -> Self {
        Self {
            engine,
            overrides,
            visited: HashSet::new(),
            pending: Vec::new(),
            stats: TranslationStats::default(),
        }
    }

    /// Walks from an owned root.
    pub(super) fn run_owned(&mut self, root: &mut dyn Translatable) {
        self.visited.insert(NodeId::owned(&*root));
        self.process(root);
        self.drain();
    }

    /// Walks from a shared root.
    pub(super) fn run_shared(&mut self, root: SharedNode) {
        self.pending.push(root);
        self.drain();
    }

    fn process(&mut self, value: &mut dyn Translatable) {
        let stats = self.engine.translate_fields(value, self.overrides);
        self.stats.absorb(stats);
        value.visit_children(self);
    }

    fn drain(&mut self) {
        while let Some(node) = self.pending.pop() {
            if !self.visited.insert(node.node_id()) {
                continue;
            }
            node.with_value(&mut |value| self.process(value));
        }
    }
}

impl ChildVisitor for GraphWalk<'_> {
    fn visit_owned(&mut self, child: &mut dyn Translatable) {
        if self.visited.insert(NodeId::owned(&*child)) {
            self.process(child);
        }
    }

    fn visit_shared(&mut self, child: SharedNode) {
        if !self.visited.contains(&child.node_id()) {
            self.pending.push(child);
        }
    }
}
