//! Parser for the algebraic expressions and `lhs = rhs` equations accepted by MathCheck.
//!
//! Text is first split into [`tokenizer::Token`]s by a [`logos`] lexer, then assembled into an
//! abstract syntax tree by the recursive-descent [`parser::Parser`]. The parser is the defensive
//! boundary of the engine: every piece of client text goes through it before any symbolic or
//! numeric operation, and it enforces nesting and size limits so that pathological input fails
//! with an error instead of exhausting the stack.
//!
//! ```
//! use mathcheck_parser::parser::{ast::Expr, Parser};
//!
//! let mut parser = Parser::new("2*x + 4");
//! let expr = parser.try_parse_full::<Expr>().unwrap();
//! assert_eq!(expr.to_string(), "2 * x + 4");
//! ```

pub mod parser;
pub mod tokenizer;
