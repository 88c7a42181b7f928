//! Arithmetic on numeric leaves, and evaluation of closed subtrees that contain a floating-point
//! number.

use rug::Float;
use crate::numerical::evaluate;
use crate::primitive::PRECISION;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::step::Step,
    step_collector::StepCollector,
};

/// Converts a numeric expression to a [`Float`].
pub(crate) fn to_float(expr: &SymExpr) -> Option<Float> {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => Some(Float::with_val(PRECISION, n)),
        SymExpr::Primary(Primary::Float(n)) => Some(n.clone()),
        _ => None,
    }
}

/// Adds two numeric expressions. The sum is exact if both operands are exact.
pub(crate) fn add(lhs: &SymExpr, rhs: &SymExpr) -> Option<SymExpr> {
    match (lhs.as_number(), rhs.as_number()) {
        (Some(a), Some(b)) => Some(SymExpr::number((a + b).into())),
        _ => Some(SymExpr::Primary(Primary::Float(to_float(lhs)? + to_float(rhs)?))),
    }
}

/// Multiplies two numeric expressions. The product is exact if both operands are exact.
pub(crate) fn mul(lhs: &SymExpr, rhs: &SymExpr) -> Option<SymExpr> {
    match (lhs.as_number(), rhs.as_number()) {
        (Some(a), Some(b)) => Some(SymExpr::number((a * b).into())),
        _ => Some(SymExpr::Primary(Primary::Float(to_float(lhs)? * to_float(rhs)?))),
    }
}

/// Returns the sign of a numeric expression, or of a positive constant.
pub(crate) fn sign(expr: &SymExpr) -> Option<i32> {
    if let Some(n) = expr.numeric_value() {
        return Some(if n > 0.0 { 1 } else if n < 0.0 { -1 } else { 0 });
    }
    expr.as_constant().map(|_| 1)
}

/// A closed subtree that contains a float is evaluated to a float.
///
/// `2.0*pi = 6.28318530717959`
/// `sqrt(2.0) = 1.4142135623731`
pub fn evaluate_floats(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    if expr.is_numeric() || !expr.contains_float() || !expr.is_closed() {
        return None;
    }

    let value = evaluate(expr).ok().filter(|value| value.is_finite())?;
    step_collector.push(Step::EvaluateFloat);
    Some(SymExpr::float(value))
}

/// Applies all numeric rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    evaluate_floats(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exact_and_float_arithmetic() {
        assert_eq!(add(&SymExpr::fraction(1, 2), &SymExpr::fraction(1, 3)), Some(SymExpr::fraction(5, 6)));
        assert_eq!(mul(&SymExpr::int(3), &SymExpr::float(0.5)), Some(SymExpr::float(1.5)));
        assert_eq!(add(&SymExpr::int(1), &SymExpr::symbol("x")), None);
    }

    #[test]
    fn closed_float_subtree() {
        let expr = SymExpr::Mul(vec![SymExpr::float(2.0), SymExpr::int(3)]);
        assert_eq!(evaluate_floats(&expr, &mut ()), Some(SymExpr::float(6.0)));

        let open = SymExpr::Mul(vec![SymExpr::float(2.0), SymExpr::symbol("x")]);
        assert_eq!(evaluate_floats(&open, &mut ()), None);
    }
}
