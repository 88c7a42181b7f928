//! The analysis engine behind MathCheck.
//!
//! Every operation of this crate takes client text, parses it with [`mathcheck_parser`], converts
//! it into a [`symbolic::SymExpr`], and answers with one of the structured results in
//! [`response`]. Parse and domain failures never escape these operations: they become a negative
//! answer with a message for the student. The only errors that do escape are resource limits,
//! which the service reports as a failure of the request itself.
//!
//! - [`check::equivalence::check_equivalent`] decides whether two expressions are equal.
//! - [`solve::solve`] finds the real solutions of an equation in one unknown.
//! - [`process::verify_process`] checks a derivation line by line.
//! - [`analysis::inverse::inverse`] and [`analysis::transform::transform`] work on a function of
//!   one variable.
//!
//! ```
//! use mathcheck_compute::check::equivalence::check_equivalent;
//!
//! let result = check_equivalent("log(100, 10)", "2").unwrap();
//! assert!(result.correct);
//! ```

pub mod analysis;
pub mod check;
pub mod error;
pub mod numerical;
pub mod primitive;
pub mod process;
pub mod response;
pub mod solve;
pub mod symbolic;
