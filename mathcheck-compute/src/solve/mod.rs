//! Solving equations in one unknown.
//!
//! An equation is given as an expression equated to zero, or as `lhs = rhs`. After simplification,
//! the expression is brought to a single fraction, and the numerator is solved with the first
//! method that applies:
//!
//! 1. If it is a polynomial in the unknown, its roots are found with the methods of
//!    [`polynomial`].
//! 2. If it is a polynomial of degree two or more in some expression containing the unknown, such
//!    as `sin(x)^2 - 1/4`, it is solved for that expression first, and then for the unknown.
//! 3. Otherwise, the unknown is [isolated](isolate::isolate) by inverting the operations around it.
//!
//! Every candidate is then substituted back into the equation as written, and kept only if the
//! equation holds and no part of it is undefined there.
//!
//! ```
//! use mathcheck_compute::solve::solve;
//!
//! let result = solve("x**2 - 4", "x").unwrap();
//! assert_eq!(result.solutions, vec!["-2", "2"]);
//! ```

pub mod isolate;
pub mod polynomial;
pub mod verify;

use mathcheck_error::Error;
use mathcheck_parser::parser::parse_symbol_name;
use tracing::debug;
use crate::error::{recover, NoMethod};
use crate::response::SolveResult;
use crate::symbolic::{
    parse,
    simplify,
    simplify::fraction::numer_denom,
    SymExpr,
};
use isolate::isolate;
use polynomial::Polynomial;

/// The solutions of an equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Solutions {
    /// The equation holds for every value of the unknown.
    All,

    /// The equation holds for the listed values, in order. The list may be empty.
    Finite(Vec<SymExpr>),
}

/// Parses `lhs = rhs`, or an expression equated to zero, into a single expression.
pub fn parse_equation_text(text: &str) -> Result<SymExpr, Error> {
    if text.contains('=') {
        let equation = mathcheck_parser::parser::parse_equation(text)?;
        Ok(SymExpr::from(&equation.lhs) - SymExpr::from(&equation.rhs))
    } else {
        parse(text)
    }
}

/// Returns the expression inside the first factor of the first term that contains the unknown,
/// stripped of a positive integer exponent.
///
/// For `3*sin(x)^2 - sin(x)`, this is `sin(x)`.
fn inner_variable(expr: &SymExpr, unknown: &str) -> Option<SymExpr> {
    let factor = expr.terms()
        .iter()
        .flat_map(SymExpr::factors)
        .find(|factor| factor.contains_symbol(unknown))?;
    let (base, exp) = factor.base_exp();
    if exp.as_integer().map_or(false, |n| *n > 0) {
        Some(base.clone())
    } else {
        Some(factor.clone())
    }
}

/// Finds the candidate roots of the numerator, which must be simplified.
fn candidates(numer: &SymExpr, unknown: &str) -> Result<Vec<SymExpr>, Error> {
    let unknown_expr = SymExpr::symbol(unknown);
    if let Some(poly) = Polynomial::from_expr(numer, &unknown_expr, unknown)? {
        if let Some(roots) = poly.roots()? {
            debug!(degree = poly.degree(), "solved as a polynomial");
            return Ok(roots);
        }
        return Err(isolate::no_method(numer));
    }

    if let Some(var) = inner_variable(numer, unknown).filter(|var| *var != unknown_expr) {
        if let Some(poly) = Polynomial::from_expr(numer, &var, unknown)?.filter(|poly| poly.degree() >= 2) {
            if let Some(roots) = poly.roots()? {
                debug!(%var, degree = poly.degree(), "solved as a polynomial in a subexpression");
                let mut out = Vec::new();
                for root in roots {
                    out.extend(isolate(&var, &root, unknown)?);
                }
                return Ok(out);
            }
        }
    }

    isolate(numer, &SymExpr::zero(), unknown)
}

/// Solves the equation `expr = 0` for the unknown.
///
/// Returns a domain error if the expression is undefined as a whole, and a [`NoMethod`] error if
/// no method applies.
pub fn solve_expr(expr: &SymExpr, unknown: &str) -> Result<Solutions, Error> {
    let simplified = simplify(expr)?;
    if !simplified.contains_symbol(unknown) {
        return Ok(if simplified.is_zero() { Solutions::All } else { Solutions::Finite(Vec::new()) });
    }

    let (numer, denom) = numer_denom(&simplified);
    let numer = simplify(&numer)?;
    if !numer.contains_symbol(unknown) {
        return Ok(Solutions::Finite(Vec::new()));
    }

    let mut solutions = Vec::new();
    for candidate in candidates(&numer, unknown)? {
        if verify::satisfies(expr, &denom, unknown, &candidate)? {
            solutions.push(candidate);
        } else {
            debug!(%candidate, "candidate rejected");
        }
    }
    Ok(Solutions::Finite(verify::order(solutions)))
}

/// Solves the given equation for the given unknown.
///
/// The text is an expression equated to zero, or an equation `lhs = rhs`. Parse, domain and
/// unsupported failures are answered with `success: false` and a message. Only resource limits are
/// returned as errors.
pub fn solve(text: &str, unknown: &str) -> Result<SolveResult, Error> {
    let unknown = match parse_symbol_name(unknown) {
        Ok(unknown) => unknown,
        Err(err) => {
            let err = recover(err)?;
            return Ok(SolveResult::failed(format!("⚠️ La incógnita no es válida: {}", err.message())));
        },
    };
    let expr = match parse_equation_text(text) {
        Ok(expr) => expr,
        Err(err) => {
            let err = recover(err)?;
            return Ok(SolveResult::failed(format!("⚠️ La expresión ingresada no es válida: {}", err.message())));
        },
    };

    let solutions = match solve_expr(&expr, &unknown) {
        Ok(solutions) => solutions,
        Err(err) => {
            let err = recover(err)?;
            let message = if err.downcast_ref::<NoMethod>().is_some() {
                "⚠️ No se encontró un método para resolver la ecuación".to_owned()
            } else {
                format!("⚠️ La ecuación no está definida: {}", err.message())
            };
            return Ok(SolveResult::failed(message));
        },
    };

    debug!(%expr, %unknown, ?solutions, "solved");
    Ok(match solutions {
        Solutions::All => SolveResult {
            success: true,
            message: format!("✅ La ecuación se cumple para cualquier valor de {}", unknown),
            solutions: Vec::new(),
        },
        Solutions::Finite(solutions) if solutions.is_empty() => {
            SolveResult::failed("⚠️ No se encontraron soluciones")
        },
        Solutions::Finite(solutions) => SolveResult {
            success: true,
            message: "✅ Solución encontrada".to_owned(),
            solutions: solutions.iter().map(ToString::to_string).collect(),
        },
    })
}
