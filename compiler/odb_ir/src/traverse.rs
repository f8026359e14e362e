//! Depth-first cursors that tolerate tree mutation.
//!
//! A cursor holds only node ids, never a borrow of the [`Ast`], so a pass can
//! inspect the current node, mutate the tree, and then advance. Children are
//! read from the arena at the moment a node is expanded:
//!
//! - **Pre-order** expands a node when advancing past it. Replacing the
//!   current node with [`PreOrder::replace_node`] therefore makes the next
//!   advance descend into the replacement's children.
//! - **Post-order** expands the whole first-child spine before yielding, so
//!   the current node's children have already been visited. Replacing it
//!   leaves the remaining order unchanged.
//!
//! The parent of the current node is tracked on the stack, which is what
//! lets a handler call [`Ast::swap_child`] without knowing its ancestry.

use crate::{Ast, NodeId};

/// Traversal order for the visitor drivers.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Order {
    PreOrder,
    PostOrder,
}

/// Pre-order cursor.
#[derive(Clone, Debug)]
pub struct PreOrder {
    /// `(node, parent)`; the top is the current node.
    stack: Vec<(NodeId, Option<NodeId>)>,
}

impl PreOrder {
    /// Start a traversal at `root`, which may be any node of the tree.
    pub fn new(root: NodeId) -> Self {
        PreOrder {
            stack: vec![(root, None)],
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.stack.last().map(|&(node, _)| node)
    }

    /// Parent of the current node, `None` at the traversal root.
    pub fn parent(&self) -> Option<NodeId> {
        self.stack.last().and_then(|&(_, parent)| parent)
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    /// Pop the current node and schedule its children.
    pub fn advance(&mut self, ast: &Ast) {
        let Some((node, _)) = self.stack.pop() else {
            return;
        };
        for &child in ast.children(node).iter().rev() {
            self.stack.push((child, Some(node)));
        }
    }

    /// Swap the current node for `new` in its parent and retarget the
    /// cursor, so the next advance expands `new`.
    ///
    /// # Panics
    /// Panics when exhausted or positioned on the traversal root.
    pub fn replace_node(&mut self, ast: &mut Ast, new: NodeId) {
        let Some(top) = self.stack.last_mut() else {
            panic!("replace_node on an exhausted traversal");
        };
        let Some(parent) = top.1 else {
            panic!("replace_node cannot replace the traversal root");
        };
        ast.swap_child(parent, top.0, new);
        top.0 = new;
    }
}

impl PartialEq for PreOrder {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current()
    }
}

#[derive(Copy, Clone, Debug)]
struct PostEntry {
    node: NodeId,
    parent: Option<NodeId>,
    expanded: bool,
}

/// Post-order cursor.
#[derive(Clone, Debug)]
pub struct PostOrder {
    stack: Vec<PostEntry>,
}

impl PostOrder {
    /// Start a traversal at `root`; the first current node is its
    /// deepest-leftmost descendant.
    pub fn new(ast: &Ast, root: NodeId) -> Self {
        let mut cursor = PostOrder {
            stack: vec![PostEntry {
                node: root,
                parent: None,
                expanded: false,
            }],
        };
        cursor.expand_top(ast);
        cursor
    }

    pub fn current(&self) -> Option<NodeId> {
        self.stack.last().map(|entry| entry.node)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.stack.last().and_then(|entry| entry.parent)
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn advance(&mut self, ast: &Ast) {
        if self.stack.pop().is_some() && !self.stack.is_empty() {
            self.expand_top(ast);
        }
    }

    fn expand_top(&mut self, ast: &Ast) {
        while let Some(top) = self.stack.last_mut() {
            if top.expanded {
                break;
            }
            top.expanded = true;
            let node = top.node;
            for &child in ast.children(node).iter().rev() {
                self.stack.push(PostEntry {
                    node: child,
                    parent: Some(node),
                    expanded: false,
                });
            }
        }
    }

    /// Swap the current node for `new` in its parent. The current entry is
    /// already expanded, so `new`'s children are not visited.
    ///
    /// # Panics
    /// Panics when exhausted or positioned on the traversal root.
    pub fn replace_node(&mut self, ast: &mut Ast, new: NodeId) {
        let Some(top) = self.stack.last_mut() else {
            panic!("replace_node on an exhausted traversal");
        };
        let Some(parent) = top.parent else {
            panic!("replace_node cannot replace the traversal root");
        };
        ast.swap_child(parent, top.node, new);
        top.node = new;
    }
}

impl PartialEq for PostOrder {
    fn eq(&self, other: &Self) -> bool {
        self.current() == other.current()
    }
}

/// Read-only pre-order iterator over `(node, parent)` pairs.
pub fn pre_order(ast: &Ast, root: NodeId) -> PreOrderIter<'_> {
    PreOrderIter {
        ast,
        cursor: PreOrder::new(root),
    }
}

/// Read-only post-order iterator over `(node, parent)` pairs.
pub fn post_order(ast: &Ast, root: NodeId) -> PostOrderIter<'_> {
    PostOrderIter {
        ast,
        cursor: PostOrder::new(ast, root),
    }
}

pub struct PreOrderIter<'a> {
    ast: &'a Ast,
    cursor: PreOrder,
}

impl Iterator for PreOrderIter<'_> {
    type Item = (NodeId, Option<NodeId>);

    fn next(&mut self) -> Option<Self::Item> {
        let item = (self.cursor.current()?, self.cursor.parent());
        self.cursor.advance(self.ast);
        Some(item)
    }
}

pub struct PostOrderIter<'a> {
    ast: &'a Ast,
    cursor: PostOrder,
}

impl Iterator for PostOrderIter<'_> {
    type Item = (NodeId, Option<NodeId>);

    fn next(&mut self) -> Option<Self::Item> {
        let item = (self.cursor.current()?, self.cursor.parent());
        self.cursor.advance(self.ast);
        Some(item)
    }
}
