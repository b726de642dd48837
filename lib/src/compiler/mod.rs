/*! A regexp-to-NFA compiler based on the [Thompson's construction][1]
algorithm.

The compiler walks a parse tree produced by [`renfa_parser::Parser`] and
builds an [`Nfa`] fragment for every construct, wiring fragments together
through fresh states and ε-transitions. Construction threads an entry state
through the tree: a sequence feeds each child's exit into the next child's
entry, an alternation builds every branch from the same entry into one
shared exit, and a quantifier builds a loop that re-enters itself through an
ε edge.

The wiring is not uniform across contexts. A literal branch of an
alternation goes straight into the shared exit with a single labeled edge,
while a sequence branch is built into a fresh internal exit that is then
ε-linked, and a quantifier branch targets the shared exit directly so no
redundant ε-hop is introduced. Quantifiers over a single symbol use a
compact self-loop; quantifiers over a group build the whole body between a
loop-start/loop-end pair of states.

[1]: https://en.wikipedia.org/wiki/Thompson%27s_construction
*/

mod errors;

#[cfg(test)]
mod tests;

use log::debug;

use renfa_parser::ast::{NodeId, NodeKind, ParseTree, Quantifier};

use crate::nfa::{Label, Nfa, StateId};

pub use errors::InvariantViolation;

/// Compiles a parse tree into an [`Nfa`].
///
/// The compiler owns the automaton being built and its fresh-state
/// allocator, so independent conversions never interfere with each other.
/// State `q0` is reserved for the global start; every other state is
/// allocated by a monotonically increasing counter that is never reset
/// during a conversion.
pub struct Compiler {
    nfa: Nfa,
}

impl Compiler {
    /// Creates a new compiler with an automaton containing only `q0`.
    pub fn new() -> Self {
        Self { nfa: Nfa::new() }
    }

    /// Builds the automaton for the given parse tree.
    ///
    /// The accepting state is the exit produced by building the root
    /// sequence from `q0`. Fails with an [`InvariantViolation`] only if the
    /// tree breaks the structural invariants the parser guarantees.
    pub fn compile(
        mut self,
        tree: &ParseTree,
    ) -> Result<Nfa, InvariantViolation> {
        let start = self.nfa.start();
        let exit = self.sequence(tree, tree.root(), start)?;
        self.nfa.set_accepting(exit);
        debug!(
            "compiled NFA with {} states and {} transitions, accepting state {}",
            self.nfa.state_count(),
            self.nfa.transition_count(),
            self.nfa.accepting(),
        );
        Ok(self.nfa)
    }

    fn alloc(&mut self) -> StateId {
        self.nfa.add_state()
    }

    /// Builds the given node between `entry` and a fresh exit, returning
    /// the exit.
    fn node(
        &mut self,
        tree: &ParseTree,
        id: NodeId,
        entry: StateId,
    ) -> Result<StateId, InvariantViolation> {
        match tree.kind(id) {
            NodeKind::Symbol(c) => {
                let exit = self.alloc();
                self.nfa.add_transition(entry, Label::Symbol(c), exit);
                Ok(exit)
            }
            NodeKind::Sequence => self.sequence(tree, id, entry),
            NodeKind::Alternation => self.alternation(tree, id, entry),
            NodeKind::Quantifier(op) => {
                self.quantifier(tree, id, op, entry, None)
            }
        }
    }

    /// Threads construction left to right: each child is built from the
    /// previous child's exit. The final child's exit is the sequence's
    /// exit; an empty sequence's exit is its entry.
    fn sequence(
        &mut self,
        tree: &ParseTree,
        id: NodeId,
        entry: StateId,
    ) -> Result<StateId, InvariantViolation> {
        let mut state = entry;
        for &child in tree.children(id) {
            state = self.node(tree, child, state)?;
        }
        Ok(state)
    }

    /// Builds every branch from the same entry into one shared exit,
    /// allocated upfront. The wiring to the shared exit depends on the
    /// branch kind.
    fn alternation(
        &mut self,
        tree: &ParseTree,
        id: NodeId,
        entry: StateId,
    ) -> Result<StateId, InvariantViolation> {
        let branches = tree.children(id);
        if branches.len() < 2 {
            return Err(InvariantViolation::NotEnoughBranches {
                found: branches.len(),
            });
        }
        let exit = self.alloc();
        for &branch in branches {
            match tree.kind(branch) {
                // A literal branch needs no ε at all.
                NodeKind::Symbol(c) => {
                    self.nfa.add_transition(entry, Label::Symbol(c), exit);
                }
                // A group branch is built into a fresh internal exit and
                // then ε-linked, so loops inside the branch never touch
                // the shared exit.
                NodeKind::Sequence => {
                    let internal = self.sequence(tree, branch, entry)?;
                    self.nfa.add_transition(internal, Label::Epsilon, exit);
                }
                // A quantifier branch targets the shared exit directly,
                // avoiding a redundant ε-hop; the quantifier rules keep
                // loop edges on their own states.
                NodeKind::Quantifier(op) => {
                    self.quantifier(tree, branch, op, entry, Some(exit))?;
                }
                NodeKind::Alternation => {
                    return Err(InvariantViolation::NestedAlternation);
                }
            }
        }
        Ok(exit)
    }

    /// Builds a quantified symbol or group between `entry` and `exit`,
    /// allocating a fresh exit when none is supplied.
    fn quantifier(
        &mut self,
        tree: &ParseTree,
        id: NodeId,
        op: Quantifier,
        entry: StateId,
        exit: Option<StateId>,
    ) -> Result<StateId, InvariantViolation> {
        let operands = tree.children(id);
        let &[operand] = operands else {
            return Err(InvariantViolation::QuantifierArity {
                found: operands.len(),
            });
        };

        match tree.kind(operand) {
            NodeKind::Symbol(c) => {
                // A single repeated symbol needs only one looping state.
                let loop_state = self.alloc();
                self.nfa.add_transition(
                    loop_state,
                    Label::Symbol(c),
                    loop_state,
                );
                let exit = match exit {
                    Some(exit) => exit,
                    None => self.alloc(),
                };
                match op {
                    Quantifier::ZeroOrMore => {
                        self.nfa.add_transition(
                            entry,
                            Label::Epsilon,
                            loop_state,
                        );
                        // Zero occurrences skip the loop entirely.
                        self.nfa.add_transition(entry, Label::Epsilon, exit);
                    }
                    Quantifier::OneOrMore => {
                        // The first occurrence is consumed on the way in.
                        self.nfa.add_transition(
                            entry,
                            Label::Symbol(c),
                            loop_state,
                        );
                    }
                }
                self.nfa.add_transition(loop_state, Label::Epsilon, exit);
                Ok(exit)
            }
            NodeKind::Sequence => {
                // The body is built between a loop-start/loop-end pair so
                // the repeat edge never collides with a shared downstream
                // state.
                let loop_start = self.alloc();
                self.nfa.add_transition(entry, Label::Epsilon, loop_start);
                let loop_end = self.sequence(tree, operand, loop_start)?;
                self.nfa.add_transition(loop_end, Label::Epsilon, loop_start);
                let exit = match exit {
                    Some(exit) => exit,
                    None => self.alloc(),
                };
                match op {
                    Quantifier::ZeroOrMore => {
                        self.nfa.add_transition(
                            loop_start,
                            Label::Epsilon,
                            exit,
                        );
                    }
                    Quantifier::OneOrMore => {
                        // No skip edge: the body must run at least once.
                        self.nfa.add_transition(
                            loop_end,
                            Label::Epsilon,
                            exit,
                        );
                    }
                }
                Ok(exit)
            }
            NodeKind::Alternation => {
                Err(InvariantViolation::InvalidQuantifierOperand {
                    found: "an alternation",
                })
            }
            NodeKind::Quantifier(_) => {
                Err(InvariantViolation::InvalidQuantifierOperand {
                    found: "another quantifier",
                })
            }
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}
