use thiserror::Error;

/// An error occurred while parsing a regular expression.
///
/// Positions are zero-based character offsets within the pattern as passed
/// to [`Parser::parse`](crate::Parser::parse). A parse error aborts the
/// whole conversion; no partial tree is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A `(` without a matching `)`, or a stray `)`.
    #[error("unbalanced parenthesis at position {pos}")]
    UnbalancedParens { pos: usize },

    /// A `*` or `+` with no quantifiable construct before it. This includes
    /// a quantifier at the start of an expression, right after a `|`, or
    /// right after another quantifier.
    #[error("quantifier `{quantifier}` at position {pos} has nothing to repeat")]
    MisplacedQuantifier { quantifier: char, pos: usize },

    /// A `|` with a missing operand: at the start or end of an expression,
    /// or right after another `|`.
    #[error("alternation `|` at position {pos} is missing an operand")]
    MisplacedAlternation { pos: usize },
}
