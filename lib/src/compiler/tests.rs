use pretty_assertions::assert_eq;

use renfa_parser::ast::{NodeKind, ParseTree, Quantifier};
use renfa_parser::Parser;

use super::{Compiler, InvariantViolation};
use crate::nfa::{Label, Nfa, StateId};
use crate::ParseError;

fn compile(pattern: &str) -> Nfa {
    let tree = Parser::new().parse(pattern).unwrap();
    Compiler::new().compile(&tree).unwrap()
}

fn table(nfa: &Nfa) -> String {
    let mut buf = Vec::new();
    nfa.write_table(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

/// ε-closure of a single state, for reachability assertions.
fn epsilon_closure(nfa: &Nfa, from: StateId) -> Vec<StateId> {
    let mut closure = vec![from];
    let mut pending = vec![from];
    while let Some(state) = pending.pop() {
        for destination in nfa.destinations(state, Label::Epsilon) {
            if !closure.contains(&destination) {
                closure.push(destination);
                pending.push(destination);
            }
        }
    }
    closure
}

fn accepts_empty_string(nfa: &Nfa) -> bool {
    epsilon_closure(nfa, nfa.start()).contains(&nfa.accepting())
}

/// Every state referenced by a transition must be in the state set, and
/// every label must actually appear in the relation.
fn assert_well_formed(nfa: &Nfa) {
    let states: Vec<StateId> = nfa.states().collect();
    assert!(states.contains(&nfa.start()));
    assert!(states.contains(&nfa.accepting()));
    for label in nfa.labels() {
        let mut used = false;
        for &state in &states {
            for destination in nfa.destinations(state, label) {
                assert!(states.contains(&destination));
                used = true;
            }
        }
        assert!(used, "label {} appears in no transition", label);
    }
}

#[test]
fn single_symbol() {
    let nfa = compile("a");
    assert_eq!(nfa.state_count(), 2);
    assert_eq!(nfa.alphabet().collect::<Vec<_>>(), vec!['a']);
    assert_eq!(table(&nfa), ";;F\n;q0;q1\na;q1;\n");
}

#[test]
fn concatenation() {
    let nfa = compile("ab");
    assert_eq!(nfa.state_count(), 3);
    assert_eq!(table(&nfa), ";;;F\n;q0;q1;q2\na;q1;;\nb;;q2;\n");
}

#[test]
fn alternation_of_literals() {
    // Literal branches go straight from the entry into the shared exit,
    // with no ε edges anywhere.
    let nfa = compile("a|b");
    assert_eq!(nfa.state_count(), 2);
    assert_eq!(table(&nfa), ";;F\n;q0;q1\na;q1;\nb;q1;\n");
}

#[test]
fn alternation_is_flat() {
    let nfa = compile("a|b|c");
    assert_eq!(nfa.state_count(), 2);
    assert_eq!(table(&nfa), ";;F\n;q0;q1\na;q1;\nb;q1;\nc;q1;\n");
}

#[test]
fn zero_or_more_symbol() {
    let nfa = compile("a*");
    assert_eq!(table(&nfa), ";;;F\n;q0;q1;q2\na;;q1;\nε;q1,q2;q2;\n");
    // The loop state self-loops on `a` and the entry ε-skips to the exit,
    // so the empty string is accepted.
    assert!(accepts_empty_string(&nfa));
}

#[test]
fn one_or_more_symbol() {
    let nfa = compile("a+");
    assert_eq!(table(&nfa), ";;;F\n;q0;q1;q2\na;q1;q1;\nε;;q2;\n");
    // Same shape as `a*` except the entry edge consumes an `a` and there
    // is no ε-skip.
    assert!(!accepts_empty_string(&nfa));
}

#[test]
fn zero_or_more_group() {
    let nfa = compile("(ab)*");
    assert_eq!(
        table(&nfa),
        ";;;;;F\n;q0;q1;q2;q3;q4\nε;q1;q4;;q1;\na;;q2;;;\nb;;;q3;;\n"
    );
    assert!(accepts_empty_string(&nfa));
}

#[test]
fn one_or_more_group() {
    let nfa = compile("(ab)+");
    assert_eq!(
        table(&nfa),
        ";;;;;F\n;q0;q1;q2;q3;q4\nε;q1;;;q1,q4;\na;;q2;;;\nb;;;q3;;\n"
    );
    assert!(!accepts_empty_string(&nfa));
}

#[test]
fn alternation_with_quantifier_branch() {
    // The quantifier branch targets the shared exit directly; no extra
    // ε-hop between the loop and the exit.
    let nfa = compile("a|b*");
    assert_eq!(
        table(&nfa),
        ";;F;\n;q0;q1;q2\na;q1;;\nb;;;q2\nε;q2,q1;;q1\n"
    );
    assert!(accepts_empty_string(&nfa));
}

#[test]
fn alternation_with_group_branch() {
    // The group branch is built into its own exit and then ε-linked to the
    // shared one.
    let nfa = compile("(ab)|c");
    assert_eq!(
        table(&nfa),
        ";;F;;\n;q0;q1;q2;q3\na;q2;;;\nb;;;q3;\nε;;;;q1\nc;q1;;;\n"
    );
}

#[test]
fn empty_pattern() {
    let nfa = compile("");
    assert_eq!(nfa.state_count(), 1);
    assert_eq!(nfa.accepting(), nfa.start());
    assert_eq!(nfa.alphabet().count(), 0);
}

#[test]
fn conversion_is_deterministic() {
    for pattern in
        ["ab|c(a|(cd+|c)*)", "(a|b)*|(b|c)+", "(a+b(b+ab)*aa)*", "a*b+c"]
    {
        assert_eq!(table(&compile(pattern)), table(&compile(pattern)));
    }
}

#[test]
fn produced_automata_are_well_formed() {
    for pattern in [
        "a",
        "ab",
        "a|b",
        "a*",
        "a+",
        "(ab)*",
        "(ab)+",
        "a|b*c|d",
        "ab|c(a|(cd+|c)*)",
        "(a|b)*|(b|c)+",
        "(a+b(b+ab)*aa)*",
    ] {
        assert_well_formed(&compile(pattern));
    }
}

#[test]
fn state_allocation_is_never_reset() {
    let nfa = compile("(ab)*(cd)+");
    let states: Vec<String> =
        nfa.states().map(|s| s.to_string()).collect();
    let expected: Vec<String> =
        (0..states.len()).map(|i| format!("q{}", i)).collect();
    assert_eq!(states, expected);
}

#[test]
fn pipeline_reports_parse_errors() {
    assert_eq!(
        crate::compile("(ab").unwrap_err(),
        crate::Error::Parse(ParseError::UnbalancedParens { pos: 0 })
    );
}

#[test]
fn trailing_alternation_is_a_parse_error() {
    // A dangling `|` must be caught by the parser; it must never surface
    // as a one-branch alternation reaching the compiler's internal checks.
    for (pattern, pos) in [("a|", 1), ("ab|", 2), ("(a|)", 2)] {
        assert_eq!(
            crate::compile(pattern).unwrap_err(),
            crate::Error::Parse(ParseError::MisplacedAlternation { pos })
        );
    }
}

#[test]
fn nested_alternation_is_rejected() {
    let mut tree = ParseTree::new();
    let alternation = tree.new_node(NodeKind::Alternation);
    let inner = tree.new_node(NodeKind::Alternation);
    let symbol = tree.new_node(NodeKind::Symbol('a'));
    tree.append_child(alternation, inner);
    tree.append_child(alternation, symbol);
    tree.append_child(tree.root(), alternation);

    assert_eq!(
        Compiler::new().compile(&tree).unwrap_err(),
        InvariantViolation::NestedAlternation
    );
}

#[test]
fn single_branch_alternation_is_rejected() {
    let mut tree = ParseTree::new();
    let alternation = tree.new_node(NodeKind::Alternation);
    let symbol = tree.new_node(NodeKind::Symbol('a'));
    tree.append_child(alternation, symbol);
    tree.append_child(tree.root(), alternation);

    assert_eq!(
        Compiler::new().compile(&tree).unwrap_err(),
        InvariantViolation::NotEnoughBranches { found: 1 }
    );
}

#[test]
fn empty_quantifier_is_rejected() {
    let mut tree = ParseTree::new();
    let quantifier =
        tree.new_node(NodeKind::Quantifier(Quantifier::ZeroOrMore));
    tree.append_child(tree.root(), quantifier);

    assert_eq!(
        Compiler::new().compile(&tree).unwrap_err(),
        InvariantViolation::QuantifierArity { found: 0 }
    );
}

#[test]
fn quantifier_with_two_operands_is_rejected() {
    let mut tree = ParseTree::new();
    let quantifier =
        tree.new_node(NodeKind::Quantifier(Quantifier::OneOrMore));
    let a = tree.new_node(NodeKind::Symbol('a'));
    let b = tree.new_node(NodeKind::Symbol('b'));
    tree.append_child(quantifier, a);
    tree.append_child(quantifier, b);
    tree.append_child(tree.root(), quantifier);

    assert_eq!(
        Compiler::new().compile(&tree).unwrap_err(),
        InvariantViolation::QuantifierArity { found: 2 }
    );
}

#[test]
fn quantified_quantifier_is_rejected() {
    let mut tree = ParseTree::new();
    let outer = tree.new_node(NodeKind::Quantifier(Quantifier::ZeroOrMore));
    let inner = tree.new_node(NodeKind::Quantifier(Quantifier::OneOrMore));
    let symbol = tree.new_node(NodeKind::Symbol('a'));
    tree.append_child(inner, symbol);
    tree.append_child(outer, inner);
    tree.append_child(tree.root(), outer);

    assert_eq!(
        Compiler::new().compile(&tree).unwrap_err(),
        InvariantViolation::InvalidQuantifierOperand {
            found: "another quantifier"
        }
    );
}

#[test]
fn quantified_alternation_is_rejected() {
    let mut tree = ParseTree::new();
    let quantifier =
        tree.new_node(NodeKind::Quantifier(Quantifier::ZeroOrMore));
    let alternation = tree.new_node(NodeKind::Alternation);
    let a = tree.new_node(NodeKind::Symbol('a'));
    let b = tree.new_node(NodeKind::Symbol('b'));
    tree.append_child(alternation, a);
    tree.append_child(alternation, b);
    tree.append_child(quantifier, alternation);
    tree.append_child(tree.root(), quantifier);

    assert_eq!(
        Compiler::new().compile(&tree).unwrap_err(),
        InvariantViolation::InvalidQuantifierOperand {
            found: "an alternation"
        }
    );
}
