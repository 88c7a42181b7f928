//! Simplification of symbolic expressions.
//!
//! The simplifier works in **passes**. Each pass visits the expression bottom-up: the children of
//! a node are simplified first, then the node is checked for domain errors and resource limits
//! (see [`guard`]), and finally the first applicable rule from [`rules::all`] rewrites it. Passes
//! are repeated until one of them changes nothing, which is the simplified form.
//!
//! ```
//! use mathcheck_compute::symbolic::{simplify, SymExpr};
//! use mathcheck_parser::parser::parse;
//!
//! let expr = SymExpr::from(parse("x + x + 2*3").unwrap());
//! assert_eq!(simplify(&expr).unwrap().to_string(), "2*x + 6");
//! ```
//!
//! The rules never loop on their own, but the number of passes is still bounded by
//! [`Limits::max_passes`], along with the size of expansions, exact powers and factorials. Going
//! over any of these limits is a [`ErrorClass::ResourceLimit`] error.
//!
//! [`ErrorClass::ResourceLimit`]: mathcheck_error::ErrorClass::ResourceLimit

pub mod fraction;
pub mod guard;
pub mod rules;
pub mod step;

use mathcheck_error::Error;
use std::cmp::Ordering;
use tracing::{trace, warn};
use crate::error::TooManyPasses;
use super::step_collector::StepCollector;
use step::Step;

pub use super::expr::{cmp_expr, Primary, SymExpr};

/// Bounds on the work done by the simplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// The maximum number of passes over the expression.
    pub max_passes: usize,

    /// The maximum number of terms an expansion may produce.
    pub max_terms: usize,

    /// The maximum size, in bits, of the result of an exact power.
    pub max_power_bits: u64,

    /// The largest argument for which a factorial is computed exactly.
    pub max_factorial: u32,

    /// The largest exponent for which a power of a sum is expanded.
    pub max_expand_power: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_passes: 1000,
            max_terms: 4096,
            max_power_bits: 100_000,
            max_factorial: 1000,
            max_expand_power: 256,
        }
    }
}

/// Runs one pass over each expression of the slice. Returns the new expressions if any of them
/// changed.
fn pass_all(
    items: &[SymExpr],
    limits: &Limits,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<Vec<SymExpr>>, Error> {
    let mut changed: Option<Vec<SymExpr>> = None;
    for (idx, item) in items.iter().enumerate() {
        if let Some(new_item) = pass(item, limits, step_collector)? {
            changed.get_or_insert_with(|| items.to_vec())[idx] = new_item;
        }
    }
    Ok(changed)
}

/// Runs one pass over the children of the expression. Returns the rebuilt expression if any child
/// changed.
fn pass_children(
    expr: &SymExpr,
    limits: &Limits,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<SymExpr>, Error> {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            Ok(pass_all(args, limits, step_collector)?.map(|args| SymExpr::call(name.clone(), args)))
        },
        SymExpr::Primary(_) => Ok(None),
        SymExpr::Add(terms) => Ok(pass_all(terms, limits, step_collector)?.map(SymExpr::Add)),
        SymExpr::Mul(factors) => Ok(pass_all(factors, limits, step_collector)?.map(SymExpr::Mul)),
        SymExpr::Exp(base, exp) => {
            let new_base = pass(base, limits, step_collector)?;
            let new_exp = pass(exp, limits, step_collector)?;
            if new_base.is_none() && new_exp.is_none() {
                return Ok(None);
            }
            let base = new_base.unwrap_or_else(|| (**base).clone());
            let exp = new_exp.unwrap_or_else(|| (**exp).clone());
            Ok(Some(base.pow(exp)))
        },
    }
}

/// Runs one pass over the expression. Returns the new expression if anything changed.
fn pass(
    expr: &SymExpr,
    limits: &Limits,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<Option<SymExpr>, Error> {
    let with_children = pass_children(expr, limits, step_collector)?;
    let node = with_children.as_ref().unwrap_or(expr);
    guard::check(node, limits)?;

    match rules::all(node, step_collector) {
        Some(rewritten) if cmp_expr(&rewritten, node) != Ordering::Equal => Ok(Some(rewritten)),
        _ => Ok(with_children),
    }
}

/// Simplifies the given expression with the given limits, reporting each rewrite to the step
/// collector.
pub fn simplify_with(
    expr: &SymExpr,
    limits: &Limits,
    step_collector: &mut dyn StepCollector<Step>,
) -> Result<SymExpr, Error> {
    let mut current = expr.clone();
    for passes in 0..limits.max_passes {
        match pass(&current, limits, step_collector)? {
            Some(next) => current = next,
            None => {
                trace!(passes, result = %current, "simplified");
                return Ok(current);
            },
        }
    }

    warn!(max = limits.max_passes, expr = %expr, "simplification did not reach a fixed point");
    Err(Error::unspanned(TooManyPasses { max: limits.max_passes }))
}

/// Simplifies the given expression with the default limits.
pub fn simplify(expr: &SymExpr) -> Result<SymExpr, Error> {
    simplify_with(expr, &Limits::default(), &mut ())
}

/// Simplifies the given expression with the default limits, returning the steps taken along with
/// the result.
pub fn simplify_with_steps(expr: &SymExpr) -> Result<(SymExpr, Vec<Step>), Error> {
    let mut steps = Vec::new();
    let simplified = simplify_with(expr, &Limits::default(), &mut steps)?;
    Ok((simplified, steps))
}

#[cfg(test)]
mod tests {
    use mathcheck_error::ErrorClass;
    use mathcheck_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(text: &str) -> String {
        simplify(&SymExpr::from(parse(text).unwrap())).unwrap().to_string()
    }

    fn error_class(text: &str) -> ErrorClass {
        simplify(&SymExpr::from(parse(text).unwrap())).unwrap_err().class()
    }

    #[test]
    fn like_terms() {
        assert_eq!(simplified("x + x + x"), "3*x");
        assert_eq!(simplified("2*x + 4 - 10"), "2*x - 6");
        assert_eq!(simplified("x - x"), "0");
    }

    #[test]
    fn exact_arithmetic() {
        assert_eq!(simplified("1/3 + 1/6"), "1/2");
        assert_eq!(simplified("2^10"), "1024");
        assert_eq!(simplified("2^-3"), "1/8");
        assert_eq!(simplified("-2^2"), "-4");
        assert_eq!(simplified("(-2)^2"), "4");
    }

    #[test]
    fn expansion() {
        assert_eq!(simplified("(x + 1)^2"), "x**2 + 2*x + 1");
        assert_eq!(simplified("(x - 3)^2"), "x**2 - 6*x + 9");
        assert_eq!(simplified("(x + 1)*(x - 1)"), "x**2 - 1");
    }

    #[test]
    fn roots() {
        assert_eq!(simplified("sqrt(12)"), "2*sqrt(3)");
        assert_eq!(simplified("sqrt(16)"), "4");
        assert_eq!(simplified("root(-27, 3)"), "-3");
        assert_eq!(simplified("sqrt(2)*sqrt(8)"), "4");
    }

    #[test]
    fn logarithms_and_trigonometry() {
        assert_eq!(simplified("log(100, 10)"), "2");
        assert_eq!(simplified("ln(exp(3))"), "3");
        assert_eq!(simplified("sin(pi/6)"), "1/2");
        assert_eq!(simplified("cos(pi)"), "-1");
        assert_eq!(simplified("sin(x)^2 + cos(x)^2"), "1");
    }

    #[test]
    fn functions() {
        assert_eq!(simplified("abs(-5) + 3!"), "11");
    }

    #[test]
    fn floats() {
        assert_eq!(simplified("0.5 + 1/4"), "0.75");
        assert_eq!(simplified("2.0*x + x"), "3.0*x");
    }

    #[test]
    fn infinity() {
        assert_eq!(simplified("oo + 1"), "oo");
        assert_eq!(simplified("-2*oo"), "-oo");
        assert_eq!(simplified("2^-oo"), "0");
    }

    #[test]
    fn domain_errors() {
        assert_eq!(error_class("1/0"), ErrorClass::Domain);
        assert_eq!(error_class("1/(x - x)"), ErrorClass::Domain);
        assert_eq!(error_class("log(0)"), ErrorClass::Domain);
        assert_eq!(error_class("sqrt(-4)"), ErrorClass::Domain);
        assert_eq!(error_class("asin(2)"), ErrorClass::Domain);
        assert_eq!(error_class("tan(pi/2)"), ErrorClass::Domain);
        assert_eq!(error_class("0*oo"), ErrorClass::Domain);
        assert_eq!(error_class("oo - oo"), ErrorClass::Domain);
    }

    #[test]
    fn resource_limits() {
        assert_eq!(error_class("(x + 1)^100000"), ErrorClass::ResourceLimit);
        assert_eq!(error_class("9^9^9"), ErrorClass::ResourceLimit);
        assert_eq!(error_class("factorial(100000)"), ErrorClass::ResourceLimit);
    }

    #[test]
    fn steps_are_recorded() {
        let expr = SymExpr::from(parse("x + 0").unwrap());
        let (result, steps) = simplify_with_steps(&expr).unwrap();
        assert_eq!(result, SymExpr::symbol("x"));
        assert_eq!(steps, vec![Step::AddZero]);
    }
}
