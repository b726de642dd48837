use ascii_tree::Tree;

use crate::ast::{NodeId, NodeKind, ParseTree, Quantifier};

/// Returns a representation of the given node as an ASCII tree.
pub(crate) fn tree_ascii_tree(tree: &ParseTree, id: NodeId) -> Tree {
    let children =
        || tree.children(id).iter().map(|c| tree_ascii_tree(tree, *c)).collect();

    match tree.kind(id) {
        NodeKind::Symbol(c) => Tree::Leaf(vec![c.to_string()]),
        NodeKind::Sequence => Tree::Node("sequence".to_string(), children()),
        NodeKind::Alternation => {
            Tree::Node("alternation".to_string(), children())
        }
        NodeKind::Quantifier(Quantifier::ZeroOrMore) => {
            Tree::Node("zero_or_more".to_string(), children())
        }
        NodeKind::Quantifier(Quantifier::OneOrMore) => {
            Tree::Node("one_or_more".to_string(), children())
        }
    }
}
