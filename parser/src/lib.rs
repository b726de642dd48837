/*! A parsing library for the regular expression dialect compiled by `renfa`.

The dialect supports literal characters, concatenation, alternation (`|`),
grouping (`(...)`) and the quantifiers `*` (zero or more) and `+` (one or
more). `*` and `+` bind tighter than `|`, and there is no escape mechanism
for using a reserved character as a literal.

The parser performs a single left-to-right scan of the pattern and produces
a [`ast::ParseTree`], restructuring the tree in place as operator precedence
resolves. There is no separate tokenization or precedence-climbing pass.

# Example

```rust
use renfa_parser::Parser;

let tree = Parser::new().parse("(ab)*|c").unwrap();
```
*/

pub mod ast;
mod parser;

pub use parser::errors::ParseError;
pub use parser::Parser;
