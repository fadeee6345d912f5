//! Parser for arithmetic expressions over the single variable `x`.
//!
//! The grammar, from the loosest to the tightest binding tier:
//!
//! ```text
//! S -> A
//! A -> M (('+' | '-') A)          left-associative
//! M -> E (('*' | '/') M)          left-associative
//! E -> 'log' '(' S ')' | P '^' E | P
//! P -> '(' S ')' | L | V
//! L -> <decimal or scientific float literal>
//! V -> 'x'
//! ```
//!
//! Whitespace is removed from the whole input before parsing. The result is a
//! [`dx_tree::Expr`], which can then be evaluated, differentiated and printed.
//!
//! ```
//! let expr = dx_parser::parse("4 * (x + 5 * x)").unwrap();
//! assert_eq!(expr.evaluate(3.0), 72.0);
//! assert_eq!(dx_parser::parse("x+x").unwrap().convert_to_string(0), "+\n\tx\n\tx\n");
//! ```

pub mod parser;
pub mod tokenizer;

pub use parser::{error::Error, Parser, DEFAULT_MAX_DEPTH};

use dx_tree::Expr;

/// Parses the given text into an expression tree, using the default nesting limit.
pub fn parse(text: &str) -> Result<Expr, Error> {
    Parser::new(text).parse()
}
