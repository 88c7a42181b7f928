//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`mathcheck_parser::parser::ast::Expr`] nodes produced by [`mathcheck_parser`],
//! with the main difference being that [`SymExpr`] nodes **flatten** out the tree structure.
//!
//! For example, the expression `x + (y + z)` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`, where as the
//! [`mathcheck_parser::parser::ast::Expr`] node would have two children, `x` and `(y + z)`.
//!
//! This is done to make it easier to perform algebraic manipulations on the expression. A common
//! step in simplifying an expression is to combine "like terms", that is, to combine terms that
//! share the same factors (e.g. `x + x = 2x`). This is much easier to do when the terms in
//! question are all at the same level in the tree.
//!
//! Conversion from the parser's tree is lossy: [`SymExpr`] does not store span information, and
//! subtraction, division and roots are rewritten as sums, products and powers.
//!
//! ```
//! use mathcheck_compute::symbolic::expr::SymExpr;
//! use mathcheck_parser::parser::parse;
//!
//! let expr = SymExpr::from(parse("x + (y + z)").unwrap());
//! assert_eq!(expr, SymExpr::Add(vec![
//!     SymExpr::symbol("x"),
//!     SymExpr::symbol("y"),
//!     SymExpr::symbol("z"),
//! ]));
//! ```
//!
//! # Simplification
//!
//! The [`simplify()`] function reduces an expression to a canonical form: exact arithmetic is
//! carried out, like terms and factors are combined, products of sums are expanded, and known
//! values of logarithms, roots and trigonometric functions are substituted. Two expressions that
//! simplify to strictly equal forms are equivalent, though the converse does not always hold.
//!
//! Simplification fails with a domain error when the expression is undefined, such as `1/0` or
//! `log(-1)`. See the [`mod@simplify`] module for details.

pub mod expr;
pub mod simplify;
pub mod step_collector;

pub use expr::SymExpr;
pub use simplify::{simplify, simplify_with, simplify_with_steps, Limits};
pub use step_collector::StepCollector;

use mathcheck_error::Error;
use mathcheck_parser::parser::{parse_with_limits, ParseLimits};

/// Parses the given text into a [`SymExpr`], with the default parser limits.
pub fn parse(source: &str) -> Result<SymExpr, Error> {
    parse_with_limits(source, ParseLimits::default()).map(SymExpr::from)
}
