/*! The nondeterministic finite automaton produced by the compiler.

An [`Nfa`] is an immutable value: a set of states in allocation order, a
transition relation labeled with either literal symbols or ε, one start
state and one accepting state. The alphabet is not stored separately, it is
derived from the non-ε labels appearing in the relation.

The automaton can be serialized as a semicolon-delimited table with
[`Nfa::write_table`]: a header row marking the accepting state, a row of
state names, and one row per observed label (ε included) holding the
comma-separated destination states per state column.
*/

use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

/// Identifies a state in an [`Nfa`].
///
/// States are assigned by the compiler in allocation order and never reused
/// or renamed. They display as `q0`, `q1`, etc., with `q0` reserved for the
/// start state.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateId(u32);

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A transition label: either a literal symbol or ε.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Label {
    /// A transition that consumes the given character.
    Symbol(char),
    /// A transition that consumes no input.
    Epsilon,
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Label::Symbol(c) => write!(f, "{}", c),
            Label::Epsilon => write!(f, "ε"),
        }
    }
}

/// A nondeterministic finite automaton with explicit ε-transitions.
///
/// Built incrementally by the [`Compiler`](crate::Compiler) and frozen once
/// returned; the public interface is read-only.
#[derive(Clone, Debug)]
pub struct Nfa {
    /// Transition relation, with one entry per state in allocation order.
    /// Destinations are kept as insertion-ordered sets, so re-adding an
    /// identical transition is a no-op and iteration is deterministic.
    transitions: IndexMap<StateId, IndexMap<Label, IndexSet<StateId>>>,
    /// Labels in the order they were first used in a transition.
    labels: IndexSet<Label>,
    start: StateId,
    accepting: StateId,
}

impl Nfa {
    /// Creates an automaton containing only the start state `q0`.
    pub(crate) fn new() -> Self {
        let mut nfa = Self {
            transitions: IndexMap::new(),
            labels: IndexSet::new(),
            start: StateId(0),
            accepting: StateId(0),
        };
        nfa.add_state();
        nfa
    }

    /// Allocates a fresh state.
    pub(crate) fn add_state(&mut self) -> StateId {
        let id = StateId(self.transitions.len() as u32);
        self.transitions.insert(id, IndexMap::new());
        id
    }

    /// Adds the transition `from --label--> to`. Adding an identical
    /// transition again is a no-op.
    pub(crate) fn add_transition(
        &mut self,
        from: StateId,
        label: Label,
        to: StateId,
    ) {
        debug_assert!(self.transitions.contains_key(&to));
        self.labels.insert(label);
        self.transitions
            .get_mut(&from)
            .expect("transition from an unallocated state")
            .entry(label)
            .or_default()
            .insert(to);
    }

    pub(crate) fn set_accepting(&mut self, state: StateId) {
        self.accepting = state;
    }

    /// Returns the start state (`q0`).
    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Returns the single accepting state.
    #[inline]
    pub fn accepting(&self) -> StateId {
        self.accepting
    }

    /// Returns all states in allocation order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.transitions.keys().copied()
    }

    /// Returns the number of states.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    /// Returns all labels observed in the transition relation, ε included,
    /// in first-seen order.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels.iter().copied()
    }

    /// Returns the alphabet: the set of non-ε symbols observed as
    /// transition labels, in first-seen order.
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.labels.iter().filter_map(|label| match label {
            Label::Symbol(c) => Some(*c),
            Label::Epsilon => None,
        })
    }

    /// Returns the states reachable from `state` on `label`, in insertion
    /// order. Empty if there is no such transition.
    pub fn destinations(
        &self,
        state: StateId,
        label: Label,
    ) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .get(&state)
            .and_then(|by_label| by_label.get(&label))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Returns the total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions
            .values()
            .flat_map(|by_label| by_label.values())
            .map(|destinations| destinations.len())
            .sum()
    }

    /// Writes the automaton as a semicolon-delimited table.
    ///
    /// The first row marks the accepting state with `F`, the second row
    /// holds the state names, and each following row holds one label and
    /// the comma-separated destinations per state column. States appear in
    /// allocation order and labels in first-seen order.
    pub fn write_table<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for state in self.states() {
            let marker = if state == self.accepting { "F" } else { "" };
            write!(writer, ";{}", marker)?;
        }
        writeln!(writer)?;

        for state in self.states() {
            write!(writer, ";{}", state)?;
        }
        writeln!(writer)?;

        for label in self.labels() {
            write!(writer, "{}", label)?;
            for state in self.states() {
                write!(
                    writer,
                    ";{}",
                    self.destinations(state, label).join(",")
                )?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Writes the automaton's table to the given file.
    pub fn export_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_table(&mut writer)?;
        writer.flush()
    }
}
