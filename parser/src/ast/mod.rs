/*! Parse tree for the regular expression dialect supported by this crate.

Each node in the tree corresponds to some construct in the pattern: a
literal symbol, a concatenation, an alternation, or a quantified
sub-expression.

The tree is stored as an arena: all nodes live in a single vector owned by
[`ParseTree`] and refer to each other through [`NodeId`] indices, with the
parent link of every node stored alongside its children. The parser
restructures the tree while it scans (an already-attached node may be
re-parented into a freshly created sequence or alternation wrapper), and
index-based links turn that re-parenting into plain index assignments.
*/

#[cfg(feature = "ascii-tree")]
mod ascii_tree;

use std::fmt::{Debug, Formatter};

/// Identifies a node within a [`ParseTree`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Repetition operators.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Quantifier {
    /// The `*` operator.
    ZeroOrMore,
    /// The `+` operator.
    OneOrMore,
}

/// Each of the constructs that a node can represent.
///
/// A well-formed tree, as produced by the parser, maintains these structural
/// invariants: an `Alternation` has at least two children, and a
/// `Quantifier` has exactly one child which is either a `Symbol` or a
/// `Sequence` (quantified alternations are always wrapped in a sequence by
/// the grouping parentheses that the grammar requires around them).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeKind {
    /// A literal that matches exactly one character.
    Symbol(char),
    /// Concatenation of the node's children, in order. Used both for
    /// parenthesized groups and for the implicit top-level sequence.
    Sequence,
    /// A choice among the node's children.
    Alternation,
    /// Repetition of the node's single child.
    Quantifier(Quantifier),
}

struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parse tree for a regular expression.
///
/// The root is always a [`NodeKind::Sequence`] node representing the
/// implicit top-level concatenation. Trees are created by
/// [`Parser::parse`](crate::Parser::parse) and are read-only from that point
/// on; the mutating methods exist for the parser's in-scan restructuring and
/// for building trees by hand in tests.
pub struct ParseTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl ParseTree {
    /// Creates a tree containing only an empty root sequence.
    pub fn new() -> Self {
        let root = Node { kind: NodeKind::Sequence, parent: None, children: Vec::new() };
        Self { nodes: vec![root], root: NodeId(0) }
    }

    /// Returns the root node of the tree.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the kind of the given node.
    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    /// Returns the children of the given node, in left-to-right order.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes[id.index()].children.as_slice()
    }

    /// Returns the parent of the given node, or `None` for the root and for
    /// nodes not yet attached to the tree.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Returns the total number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a new, detached node of the given kind.
    pub fn new_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, parent: None, children: Vec::new() });
        id
    }

    /// Appends `child` as the last child of `parent`, updating the child's
    /// parent link.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Replaces the last child of `parent` with `new_child`. The node that
    /// previously occupied the slot keeps its stale parent link until it is
    /// re-attached somewhere else.
    pub fn replace_last_child(&mut self, parent: NodeId, new_child: NodeId) {
        self.nodes[new_child.index()].parent = Some(parent);
        let last = self.nodes[parent.index()]
            .children
            .last_mut()
            .expect("replace_last_child on a node without children");
        *last = new_child;
    }

    /// Detaches and returns all children of `parent`. The detached nodes
    /// keep their stale parent links until they are re-attached.
    pub fn take_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        std::mem::take(&mut self.nodes[parent.index()].children)
    }
}

impl Default for ParseTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ascii-tree")]
impl Debug for ParseTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        ::ascii_tree::write_tree(f, &self.ascii_tree())
    }
}

#[cfg(not(feature = "ascii-tree"))]
impl Debug for ParseTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParseTree({} nodes)", self.node_count())
    }
}

#[cfg(feature = "ascii-tree")]
impl ParseTree {
    /// Returns a printable ASCII tree representing the parse tree.
    pub fn ascii_tree(&self) -> ::ascii_tree::Tree {
        crate::ast::ascii_tree::tree_ascii_tree(self, self.root)
    }
}
