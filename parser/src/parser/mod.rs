/*! Implements the single-pass regular expression parser.

The parser consumes the pattern left to right exactly once, building the
parse tree as it goes. Operator precedence (`*`/`+` binding tighter than
`|`, grouping via parentheses) is not resolved by a separate pass; instead,
the scan maintains a cursor pointing at the most recently attached node plus
the kind of construct most recently completed, and restructures the tree in
place whenever an operator changes the meaning of what was already parsed.

Two restructurings do all the work:

- A quantifier wraps the cursor in place, replacing it at its position in
  its parent.
- The first `|` at a nesting level promotes every sibling parsed so far into
  a single branch, and wraps that branch in an alternation that takes their
  place. Later `|` at the same level just close the current branch, so the
  alternation stays flat.

Literals and groups attach as siblings of the cursor, except when the
cursor's parent is an alternation: then the cursor is an entire branch, and
the new node must be wrapped together with it into a sequence so the branch
remains a single subtree. Every restructuring re-verifies parent links, as
the cursor may sit at any depth below the current nesting level.
*/

pub(crate) mod errors;


use log::debug;

use crate::ast::{NodeId, NodeKind, ParseTree, Quantifier};
use crate::ParseError;

/// Parses regular expression patterns.
///
/// ```rust
/// use renfa_parser::Parser;
///
/// let tree = Parser::new().parse("a|b*").unwrap();
/// ```
#[derive(Default)]
pub struct Parser {}

impl Parser {
    /// Creates a new [`Parser`].
    pub fn new() -> Self {
        Self {}
    }

    /// Parses the given pattern and returns its parse tree.
    ///
    /// The pattern is expected to have whitespace already removed; a space
    /// is treated as a literal symbol. Reserved characters are `|`, `*`,
    /// `+`, `(` and `)`, and there is no escape mechanism for them.
    pub fn parse(&self, pattern: &str) -> Result<ParseTree, ParseError> {
        let chars: Vec<char> = pattern.chars().collect();
        let mut scan = Scan::new();
        let root = scan.tree.root();
        scan.expression(root, &chars, 0)?;
        debug!(
            "parsed `{}` into {} tree nodes",
            pattern,
            scan.tree.node_count()
        );
        Ok(scan.tree)
    }
}

/// The kind of construct most recently completed by the scan.
///
/// This is scan state, not tree state: it determines how the next character
/// attaches to the tree, together with the cursor node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LastConstruct {
    None,
    Symbol,
    Group,
    Quantifier,
    Alternation,
}

/// The state threaded through one scan: the tree being built, the most
/// recently attached node, and the kind of construct it completed.
struct Scan {
    tree: ParseTree,
    cursor: NodeId,
    last: LastConstruct,
}

impl Scan {
    fn new() -> Self {
        let tree = ParseTree::new();
        let cursor = tree.root();
        Self { tree, cursor, last: LastConstruct::None }
    }

    /// Parses `chars` as the expression filling `level`, which must be a
    /// detached or root sequence node. `base` is the position of `chars[0]`
    /// within the whole pattern, used for error reporting.
    fn expression(
        &mut self,
        level: NodeId,
        chars: &[char],
        base: usize,
    ) -> Result<(), ParseError> {
        self.cursor = level;
        self.last = LastConstruct::None;
        let mut i = 0;
        while i < chars.len() {
            let pos = base + i;
            match chars[i] {
                '|' => self.alternation(pos)?,
                '*' => self.quantifier(Quantifier::ZeroOrMore, '*', pos)?,
                '+' => self.quantifier(Quantifier::OneOrMore, '+', pos)?,
                '(' => i = self.group(chars, i, base)?,
                ')' => return Err(ParseError::UnbalancedParens { pos }),
                c => self.symbol(c),
            }
            i += 1;
        }
        // A `|` that opened a new branch must be followed by one; otherwise
        // the alternation would end up with a dangling empty branch.
        if self.last == LastConstruct::Alternation {
            return Err(ParseError::MisplacedAlternation {
                pos: base + chars.len() - 1,
            });
        }
        Ok(())
    }

    /// Attaches a new literal symbol at the cursor.
    fn symbol(&mut self, c: char) {
        let node = self.tree.new_node(NodeKind::Symbol(c));
        self.attach(node);
        self.cursor = node;
        self.last = LastConstruct::Symbol;
    }

    /// Parses the balanced group starting at `chars[open]` into a detached
    /// sequence and attaches it. Returns the index of the closing `)`.
    fn group(
        &mut self,
        chars: &[char],
        open: usize,
        base: usize,
    ) -> Result<usize, ParseError> {
        let mut depth = 1;
        let mut close = open + 1;
        while close < chars.len() {
            match chars[close] {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            close += 1;
        }
        if depth != 0 {
            return Err(ParseError::UnbalancedParens { pos: base + open });
        }

        // The inner expression is parsed with its own cursor and scan state;
        // the state saved here drives the attachment of the finished group.
        let saved_cursor = self.cursor;
        let saved_last = self.last;

        let group = self.tree.new_node(NodeKind::Sequence);
        self.expression(group, &chars[open + 1..close], base + open + 1)?;

        self.cursor = saved_cursor;
        self.last = saved_last;
        self.attach(group);

        self.cursor = group;
        self.last = LastConstruct::Group;
        Ok(close)
    }

    /// Wraps the cursor (the most recently completed symbol or group) in a
    /// quantifier node that replaces it at its position in the parent.
    fn quantifier(
        &mut self,
        op: Quantifier,
        symbol: char,
        pos: usize,
    ) -> Result<(), ParseError> {
        match self.last {
            LastConstruct::Symbol | LastConstruct::Group => {
                let parent = self.parent_of_cursor();
                let quantifier =
                    self.tree.new_node(NodeKind::Quantifier(op));
                self.tree.replace_last_child(parent, quantifier);
                self.tree.append_child(quantifier, self.cursor);
                self.cursor = quantifier;
                self.last = LastConstruct::Quantifier;
                Ok(())
            }
            LastConstruct::None
            | LastConstruct::Alternation
            | LastConstruct::Quantifier => {
                Err(ParseError::MisplacedQuantifier { quantifier: symbol, pos })
            }
        }
    }

    /// Handles a `|`: either closes the current branch of an alternation
    /// already in progress at this level, or creates the alternation by
    /// promoting the siblings parsed so far into its first branch.
    fn alternation(&mut self, pos: usize) -> Result<(), ParseError> {
        match self.last {
            LastConstruct::None | LastConstruct::Alternation => {
                return Err(ParseError::MisplacedAlternation { pos });
            }
            LastConstruct::Symbol
            | LastConstruct::Group
            | LastConstruct::Quantifier => {
                let parent = self.parent_of_cursor();
                let grandparent = self.tree.parent(parent);
                if self.tree.kind(parent) == NodeKind::Alternation {
                    // The cursor is a whole branch; move up so the next
                    // construct starts a new branch instead of nesting.
                    self.cursor = parent;
                } else if let Some(grandparent) = grandparent
                    .filter(|g| self.tree.kind(*g) == NodeKind::Alternation)
                {
                    // The cursor ends the sequence wrapping the current
                    // branch.
                    self.cursor = grandparent;
                } else {
                    // First `|` at this nesting level: everything parsed so
                    // far at the level becomes the first branch.
                    let siblings = self.tree.take_children(parent);
                    debug_assert!(!siblings.is_empty());
                    let branch = if siblings.len() > 1 {
                        let sequence =
                            self.tree.new_node(NodeKind::Sequence);
                        for sibling in siblings {
                            self.tree.append_child(sequence, sibling);
                        }
                        sequence
                    } else {
                        siblings[0]
                    };
                    let alternation =
                        self.tree.new_node(NodeKind::Alternation);
                    self.tree.append_child(alternation, branch);
                    self.tree.append_child(parent, alternation);
                    self.cursor = alternation;
                }
            }
        }
        self.last = LastConstruct::Alternation;
        Ok(())
    }

    /// Attaches a freshly created node (symbol or group) according to the
    /// current scan state.
    fn attach(&mut self, node: NodeId) {
        match self.last {
            // Nothing completed yet at this level, or a `|` was just seen:
            // the cursor is the node that receives children directly (the
            // level's sequence, or the alternation gaining a new branch).
            LastConstruct::None | LastConstruct::Alternation => {
                self.tree.append_child(self.cursor, node);
            }
            // A construct was just completed: the new node is its sibling.
            LastConstruct::Symbol
            | LastConstruct::Group
            | LastConstruct::Quantifier => {
                let parent = self.parent_of_cursor();
                if self.tree.kind(parent) == NodeKind::Alternation {
                    // The cursor is an entire branch of an alternation;
                    // wrap it together with the new node into a sequence
                    // that takes its place, so the branch stays a single
                    // subtree.
                    let sequence = self.tree.new_node(NodeKind::Sequence);
                    self.tree.replace_last_child(parent, sequence);
                    self.tree.append_child(sequence, self.cursor);
                    self.tree.append_child(sequence, node);
                } else {
                    self.tree.append_child(parent, node);
                }
            }
        }
    }

    fn parent_of_cursor(&self) -> NodeId {
        match self.tree.parent(self.cursor) {
            Some(parent) => parent,
            // The cursor designates an attached node in every scan state
            // other than `None` and `Alternation`.
            None => unreachable!("scan cursor has no parent"),
        }
    }
}
