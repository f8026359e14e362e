//! Structural comparison and text dumps.

use std::fmt::Write;

use super::NodeKind;
use crate::{Ast, NodeId};

impl Ast {
    /// Whether the subtrees at `a` and `b` have the same kinds, payloads,
    /// and spans, ignoring the ids of owned children.
    ///
    /// Non-owning handles must be identical.
    pub fn structurally_equal(&self, a: NodeId, b: NodeId) -> bool {
        odb_stack::ensure_sufficient_stack(|| {
            if self.span(a) != self.span(b) {
                return false;
            }
            let (kind_a, kind_b) = (self.kind(a), self.kind(b));
            let (children_a, children_b) = (kind_a.children(), kind_b.children());
            if children_a.len() != children_b.len() || !same_payload(kind_a, kind_b) {
                return false;
            }
            children_a
                .iter()
                .zip(children_b.iter())
                .all(|(&ca, &cb)| self.structurally_equal(ca, cb))
        })
    }

    /// Indented one-node-per-line rendering of the subtree at `root`.
    ///
    /// ```text
    /// Program
    ///   Block
    ///     VarAssignment
    /// ```
    pub fn dump(&self, root: NodeId) -> String {
        let mut out = String::new();
        for (id, depth) in self.with_depth(root) {
            let _ = writeln!(out, "{:indent$}{}", "", self.kind(id).name(), indent = depth * 2);
        }
        out
    }

    fn with_depth(&self, root: NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut stack = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            out.push((id, depth));
            for &child in self.children(id).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }
}

/// Payload equality with every owned child slot masked out.
fn same_payload(a: &NodeKind, b: &NodeKind) -> bool {
    let mask = |kind: &NodeKind| {
        let mut kind = kind.clone();
        for slot in kind.child_slots_mut() {
            *slot = NodeId::new(0);
        }
        kind
    };
    mask(a) == mask(b)
}
