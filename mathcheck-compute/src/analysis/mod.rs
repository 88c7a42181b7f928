//! Analyses of a function of one variable, given as the text of its right-hand side.
//!
//! - [`inverse::inverse`] finds the inverse of the function.
//! - [`transform::transform`] substitutes an expression for the variable.

pub mod inverse;
pub mod transform;

use mathcheck_error::Error;
use mathcheck_parser::parser::parse_symbol_name;
use crate::error::recover;
use crate::symbolic::{parse, SymExpr};

/// A function whose text and variable were both accepted.
#[derive(Debug, Clone)]
pub(crate) struct Function {
    /// The body of the function.
    pub body: SymExpr,

    /// The name of the variable.
    pub variable: String,
}

/// Parses the body and the variable of a function.
///
/// The outer error only carries resource limits. The inner error is a message for the student.
pub(crate) fn parse_function(body: &str, variable: &str) -> Result<Result<Function, String>, Error> {
    let variable = match parse_symbol_name(variable) {
        Ok(variable) => variable,
        Err(err) => {
            let err = recover(err)?;
            return Ok(Err(format!("⚠️ La variable no es válida: {}", err.message())));
        },
    };
    let body = match parse(body) {
        Ok(body) => body,
        Err(err) => {
            let err = recover(err)?;
            return Ok(Err(format!("⚠️ La función ingresada no es válida: {}", err.message())));
        },
    };
    Ok(Ok(Function { body, variable }))
}
