/*! Compiles regular expressions into nondeterministic finite automata.

The supported dialect covers literal characters, concatenation, alternation
(`|`), grouping (`(...)`) and the quantifiers `*` and `+`. A pattern goes
through a two-stage pipeline: [`Parser`] turns the string into a
[`ast::ParseTree`] in a single scan, and [`Compiler`] walks that tree
performing a Thompson-style construction, producing an [`Nfa`] with explicit
ε-transitions. Both stages are pure, synchronous transformations, and the
whole pipeline is deterministic: the same pattern always yields the same
state numbering and the same exported table, byte for byte.

The resulting automaton is not minimized, determinized or executed; it is
meant as input for such later stages, or for export with
[`Nfa::write_table`].

# Example

```rust
let nfa = renfa::compile("(ab)*|c").unwrap();

let mut table = Vec::new();
nfa.write_table(&mut table).unwrap();
```
*/

pub mod compiler;
pub mod nfa;

use thiserror::Error;

pub use renfa_parser::ast;
pub use renfa_parser::ParseError;
pub use renfa_parser::Parser;

pub use crate::compiler::Compiler;
pub use crate::compiler::InvariantViolation;
pub use crate::nfa::Label;
pub use crate::nfa::Nfa;
pub use crate::nfa::StateId;

/// Errors that can abort a conversion.
///
/// There are no retries anywhere: both stages are pure transformations over
/// a fixed input, so any failure is terminal for that conversion and no
/// partial tree or automaton is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The compiler received a tree that breaks the parser's structural
    /// guarantees. This signals a bug, not bad user input.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// Compiles a regular expression pattern into an [`Nfa`].
///
/// Whitespace is not stripped here; the caller is expected to have removed
/// it already.
pub fn compile(pattern: &str) -> Result<Nfa, Error> {
    let tree = Parser::new().parse(pattern)?;
    let nfa = Compiler::new().compile(&tree)?;
    Ok(nfa)
}
