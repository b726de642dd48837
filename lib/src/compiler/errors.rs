use thiserror::Error;

/// The compiler was handed a parse tree that breaks the structural
/// invariants the parser guarantees.
///
/// A tree produced by [`Parser::parse`](renfa_parser::Parser::parse) can
/// never trigger any of these. They exist as fail-fast checks on the
/// parser/compiler contract: a violation aborts the conversion instead of
/// producing an automaton from a malformed tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An alternation branch is itself an alternation. Alternations are
    /// always flattened by the parser.
    #[error("alternation branch is itself an alternation")]
    NestedAlternation,

    /// An alternation with fewer than two branches.
    #[error("alternation has {found} branches, expected at least 2")]
    NotEnoughBranches { found: usize },

    /// A quantifier whose operand count is not exactly one.
    #[error("quantifier has {found} operands, expected exactly 1")]
    QuantifierArity { found: usize },

    /// A quantifier applied directly to an alternation or to another
    /// quantifier. The parser always wraps such operands in a sequence.
    #[error("quantifier operand is {found}, expected a symbol or a sequence")]
    InvalidQuantifierOperand { found: &'static str },
}
