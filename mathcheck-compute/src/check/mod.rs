//! Comparison of expressions.
//!
//! Closed expressions are compared by value, within [`RELATIVE_TOLERANCE`]. Expressions with
//! variables are compared by form: their difference is brought to a single fraction, and they are
//! equal if the simplified numerator is zero.

pub mod equivalence;

use mathcheck_error::Error;
use crate::symbolic::{
    simplify,
    simplify::fraction::numer_denom,
    SymExpr,
};

/// The relative tolerance used to compare numeric values.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// The absolute tolerance used to compare numeric values close to zero.
pub const ABSOLUTE_TOLERANCE: f64 = 1e-12;

/// Floating-point coefficients at most this large in magnitude are considered rounding residue.
pub const FLOAT_RESIDUE: f64 = 1e-9;

/// Returns true if both values are equal within tolerance. Infinities are only equal to an
/// infinity of the same sign.
pub fn approx_eq(lhs: f64, rhs: f64) -> bool {
    if lhs.is_infinite() || rhs.is_infinite() {
        return lhs == rhs;
    }

    let diff = (lhs - rhs).abs();
    diff <= ABSOLUTE_TOLERANCE || diff <= RELATIVE_TOLERANCE * lhs.abs().max(rhs.abs())
}

/// Returns true if the simplified expression is zero, or a sum of floating-point terms small
/// enough to be rounding residue.
pub fn is_negligible(expr: &SymExpr) -> bool {
    expr.is_zero() || expr.terms().iter().all(|term| {
        term.split_coeff().0
            .as_float()
            .map_or(false, |coeff| coeff.to_f64().abs() <= FLOAT_RESIDUE)
    })
}

/// Brings the expression to a single fraction and returns its simplified numerator.
pub fn normalized_numerator(expr: &SymExpr) -> Result<SymExpr, Error> {
    let (numer, _) = numer_denom(expr);
    simplify(&numer)
}

/// Returns true if the simplified expression is identically zero.
///
/// The expression must already be simplified. If it is not zero as is, it is brought to a single
/// fraction, so that differences such as `1/x + 1/y - (x + y)/(x*y)` are recognized.
pub fn is_identically_zero(expr: &SymExpr) -> Result<bool, Error> {
    if is_negligible(expr) {
        return Ok(true);
    }

    Ok(is_negligible(&normalized_numerator(expr)?))
}

#[cfg(test)]
mod tests {
    use crate::symbolic::parse;
    use super::*;

    #[test]
    fn tolerance() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(approx_eq(1e-13, 0.0));
        assert!(!approx_eq(1.0, 1.001));
        assert!(approx_eq(f64::INFINITY, f64::INFINITY));
        assert!(!approx_eq(f64::INFINITY, f64::NEG_INFINITY));
    }

    #[test]
    fn zero_after_common_denominator() {
        let expr = simplify(&parse("1/x + 1/y - (x + y)/(x*y)").unwrap()).unwrap();
        assert!(is_identically_zero(&expr).unwrap());

        let expr = simplify(&parse("1/x - 1/y").unwrap()).unwrap();
        assert!(!is_identically_zero(&expr).unwrap());
    }

    #[test]
    fn float_residue() {
        assert!(is_negligible(&SymExpr::float(1e-12)));
        assert!(!is_negligible(&SymExpr::float(0.5)));
        assert!(!is_negligible(&SymExpr::symbol("x")));
    }
}
