//! Checks candidate solutions by substituting them back into the equation.

use mathcheck_error::Error;
use std::cmp::Ordering;
use crate::check::{approx_eq, is_identically_zero};
use crate::error::recover;
use crate::numerical::evaluate;
use crate::symbolic::{simplify, SymExpr};

/// A candidate satisfies the equation if its residual is at most this fraction of the magnitude of
/// the terms of the equation.
const RESIDUAL_TOLERANCE: f64 = 1e-8;

/// Evaluates the expression, treating undefined points as a failed check.
fn value_at(expr: &SymExpr) -> Result<Option<f64>, Error> {
    match evaluate(expr) {
        Ok(value) => Ok(Some(value)),
        Err(err) => recover(err).map(|_| None),
    }
}

/// Returns true if substituting the candidate for the unknown makes the expression zero, and keeps
/// the denominator away from zero.
///
/// The expression should be the equation as written, before simplification, so that points where
/// any part of it is undefined are rejected. If the expression has variables other than the
/// unknown, the check is symbolic, and the candidate is only rejected if the residual simplifies to
/// a nonzero number.
pub fn satisfies(expr: &SymExpr, denom: &SymExpr, unknown: &str, candidate: &SymExpr) -> Result<bool, Error> {
    let substituted = expr.substitute(unknown, candidate);
    let denom = denom.substitute(unknown, candidate);

    if substituted.is_closed() {
        let Some(value) = value_at(&substituted)? else {
            return Ok(false);
        };
        if let Some(denom) = value_at(&denom)? {
            if approx_eq(denom, 0.0) {
                return Ok(false);
            }
        }

        let mut scale = 1.0f64;
        for term in substituted.terms() {
            if let Some(term) = value_at(term)? {
                scale += term.abs();
            }
        }
        return Ok(value.is_finite() && value.abs() <= RESIDUAL_TOLERANCE * scale);
    }

    match simplify(&denom) {
        Ok(denom) if denom.is_zero() => return Ok(false),
        Ok(_) => {},
        Err(err) => {
            recover(err)?;
            return Ok(false);
        },
    }

    let residual = match simplify(&substituted) {
        Ok(residual) => residual,
        Err(err) => {
            recover(err)?;
            return Ok(false);
        },
    };
    if is_identically_zero(&residual)? {
        return Ok(true);
    }
    Ok(!residual.is_closed() || evaluate(&residual).map_or(true, |value| approx_eq(value, 0.0)))
}

/// Sorts the solutions: closed ones by value in increasing order, then the others by their text.
/// Duplicates are removed.
pub fn order(solutions: Vec<SymExpr>) -> Vec<SymExpr> {
    let mut numeric = Vec::new();
    let mut symbolic = Vec::new();
    for solution in solutions {
        match solution.is_closed().then(|| evaluate(&solution).ok()).flatten() {
            Some(value) => numeric.push((value, solution)),
            None => symbolic.push((solution.to_string(), solution)),
        }
    }

    numeric.sort_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    numeric.dedup_by(|(a, _), (b, _)| approx_eq(*a, *b));
    symbolic.sort_by(|(a, _), (b, _)| a.cmp(b));
    symbolic.dedup_by(|(a, _), (b, _)| a == b);

    numeric.into_iter()
        .map(|(_, solution)| solution)
        .chain(symbolic.into_iter().map(|(_, solution)| solution))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::parse;
    use super::*;

    fn check(expr: &str, candidate: &str) -> bool {
        let expr = parse(expr).unwrap();
        satisfies(&expr, &SymExpr::one(), "x", &parse(candidate).unwrap()).unwrap()
    }

    #[test]
    fn numeric_candidates() {
        assert!(check("x^2 - 4", "2"));
        assert!(check("x^2 - 2", "sqrt(2)"));
        assert!(check("x^3 - 2", "1.25992104989487"));
        assert!(!check("x^2 - 4", "3"));
    }

    #[test]
    fn undefined_points_are_rejected() {
        assert!(!check("x/x - 1", "0"));
        assert!(!check("sqrt(x) + 2", "4"));
        assert!(!check("log(x)", "-1"));
    }

    #[test]
    fn vanishing_denominator() {
        let expr = parse("x^2 - 1").unwrap();
        let denom = parse("x - 1").unwrap();
        assert!(!satisfies(&expr, &denom, "x", &SymExpr::one()).unwrap());
        assert!(satisfies(&expr, &denom, "x", &SymExpr::int(-1)).unwrap());
    }

    #[test]
    fn symbolic_candidates() {
        assert!(check("a*x - b", "b/a"));
        assert!(!check("x - a - 1", "a"));
    }

    #[test]
    fn ordering() {
        let solutions = ["sqrt(2)", "b", "-1", "a", "1.4142135623731", "-1"]
            .iter()
            .map(|text| parse(text).unwrap())
            .collect();
        let ordered = order(solutions).iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(ordered, vec!["-1", "sqrt(2)", "a", "b"]);
    }
}
