//! Checks run on every node before the simplification rules see it.
//!
//! The rules only decide whether a rewrite applies. Whether a node is defined at all, and whether
//! rewriting it would be too expensive, is decided here, so that undefined expressions such as
//! `1/0` are reported instead of being rewritten into something that looks meaningful.

use mathcheck_error::Error;
use rug::Integer;
use crate::error::{
    DivisionByZero,
    EvenRootOfNegative,
    ExpansionTooLarge,
    FactorialTooLarge,
    Indeterminate,
    InvalidLogBase,
    InverseTrigOutOfRange,
    NegativeFactorial,
    NonPositiveLogarithm,
    PowerTooLarge,
    TangentPole,
    Undefined,
};
use crate::symbolic::expr::{Constant, SymExpr};
use super::{rules::trigonometry::pi_multiple, Limits};

/// Returns the value of a numeric expression or a finite constant.
fn value_of(expr: &SymExpr) -> Option<f64> {
    match expr.as_constant() {
        Some(Constant::Pi | Constant::E) => expr.as_constant().map(Constant::value),
        Some(Constant::Infinity) => None,
        None => expr.numeric_value(),
    }
}

/// Returns true if the expression is `oo` or `-oo`, or contains `oo` as a factor.
fn is_infinite(expr: &SymExpr) -> bool {
    expr.as_constant() == Some(Constant::Infinity) || expr.infinity_sign().is_some()
}

/// Returns true if a numeric exponent is a fraction with an even denominator, or a float that is
/// not an integer.
fn is_even_root(exp: &SymExpr) -> bool {
    if let Some(n) = exp.as_number() {
        return n.denom().is_even();
    }
    exp.as_float().map_or(false, |n| !n.is_integer())
}

fn check_power(expr: &SymExpr, base: &SymExpr, exp: &SymExpr, limits: &Limits) -> Result<(), Error> {
    let exp_negative = exp.numeric_value().map_or(false, |n| n < 0.0) || exp.infinity_sign() == Some(-1);
    if base.is_zero() && exp_negative {
        return Err(Error::unspanned(DivisionByZero));
    }

    if base.numeric_value().map_or(false, |value| value < 0.0) {
        if exp.infinity_sign().is_some() {
            return Err(Error::unspanned(Undefined { expr: expr.to_string() }));
        }
        if is_even_root(exp) {
            return Err(Error::unspanned(EvenRootOfNegative { value: base.to_string() }));
        }
    }

    if base.is_one() && exp.infinity_sign().is_some() {
        return Err(Error::unspanned(Indeterminate { form: "1**oo" }));
    }

    // exact powers: the size of the result grows with the size of the base and the exponent
    if let (Some(n), Some(e)) = (base.as_number(), exp.as_number()) {
        let trivial = *n == 0 || *n == 1 || *n == -1;
        if !trivial {
            let bits = u64::from(n.numer().significant_bits()) + u64::from(n.denom().significant_bits());
            let whole = Integer::from(e.numer().abs_ref()) / e.denom() + 1u32;
            let too_large = whole.to_u64()
                .and_then(|whole| whole.checked_mul(bits))
                .map_or(true, |total| total > limits.max_power_bits);
            if too_large {
                return Err(Error::unspanned(PowerTooLarge { max: limits.max_power_bits }));
            }
        }
    }

    // expansion of a sum raised to a positive integer power
    if let (SymExpr::Add(terms), Some(n)) = (base, exp.as_integer()) {
        if *n >= 2 && terms.len() >= 2 {
            let n = n.to_u32().filter(|n| *n <= limits.max_expand_power);
            let terms_len = u32::try_from(terms.len()).ok();
            let result_terms = n.zip(terms_len)
                .map(|(n, k)| Integer::from(Integer::binomial_u(n + k - 1, k - 1)));
            let too_large = result_terms.map_or(true, |count| count > limits.max_terms);
            if too_large {
                return Err(Error::unspanned(ExpansionTooLarge { max: limits.max_terms }));
            }
        }
    }

    Ok(())
}

fn check_product(factors: &[SymExpr], limits: &Limits) -> Result<(), Error> {
    if factors.iter().any(SymExpr::is_zero) && factors.iter().any(is_infinite) {
        return Err(Error::unspanned(Indeterminate { form: "0*oo" }));
    }

    let sums = factors.iter()
        .filter(|factor| matches!(factor, SymExpr::Add(_)))
        .map(|factor| factor.terms().len())
        .collect::<Vec<_>>();
    if sums.len() >= 2 || (sums.len() == 1 && factors.iter().filter(|f| !f.is_reciprocal()).count() >= 2) {
        let product = sums.iter().try_fold(1usize, |product, len| product.checked_mul(*len));
        if product.map_or(true, |product| product > limits.max_terms) {
            return Err(Error::unspanned(ExpansionTooLarge { max: limits.max_terms }));
        }
    }

    Ok(())
}

fn check_sum(terms: &[SymExpr]) -> Result<(), Error> {
    let positive = terms.iter().any(|term| term.infinity_sign() == Some(1));
    let negative = terms.iter().any(|term| term.infinity_sign() == Some(-1));
    if positive && negative {
        return Err(Error::unspanned(Indeterminate { form: "oo - oo" }));
    }
    Ok(())
}

fn check_call(name: &str, args: &[SymExpr], limits: &Limits) -> Result<(), Error> {
    match (name, args) {
        ("log", [value, rest @ ..]) => {
            let non_positive = value_of(value).map_or(false, |v| v <= 0.0) || value.infinity_sign() == Some(-1);
            if non_positive {
                return Err(Error::unspanned(NonPositiveLogarithm { value: value.to_string() }));
            }
            if let [base] = rest {
                let invalid = value_of(base).map_or(false, |b| b <= 0.0 || b == 1.0);
                if invalid {
                    return Err(Error::unspanned(InvalidLogBase { base: base.to_string() }));
                }
            }
        },
        ("asin" | "acos", [value]) => {
            if value_of(value).map_or(false, |v| v.abs() > 1.0) || is_infinite(value) {
                let function = if name == "asin" { "asin" } else { "acos" };
                return Err(Error::unspanned(InverseTrigOutOfRange { function, value: value.to_string() }));
            }
        },
        ("tan", [value]) => {
            if let Some(r) = pi_multiple(value) {
                let doubled = r * 2u32;
                if *doubled.denom() == 1 && doubled.numer().is_odd() {
                    return Err(Error::unspanned(TangentPole { value: value.to_string() }));
                }
            }
        },
        ("factorial", [value]) => {
            if let Some(n) = value.as_integer() {
                if *n < 0 {
                    return Err(Error::unspanned(NegativeFactorial { value: value.to_string() }));
                }
                if *n > limits.max_factorial {
                    return Err(Error::unspanned(FactorialTooLarge {
                        value: value.to_string(),
                        max: limits.max_factorial,
                    }));
                }
            }
        },
        _ => {},
    }

    Ok(())
}

/// Returns an error if the node is undefined, or if simplifying it would exceed the limits.
///
/// Only the node itself is checked. The driver checks the children first.
pub fn check(expr: &SymExpr, limits: &Limits) -> Result<(), Error> {
    match expr {
        SymExpr::Exp(base, exp) => check_power(expr, base, exp, limits),
        SymExpr::Mul(factors) => check_product(factors, limits),
        SymExpr::Add(terms) => check_sum(terms),
        SymExpr::Primary(_) => match expr.as_call() {
            Some((name, args)) => check_call(name, args, limits),
            None => Ok(()),
        },
    }
}

#[cfg(test)]
mod tests {
    use mathcheck_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use super::*;

    fn class_of(expr: &SymExpr) -> Option<ErrorClass> {
        check(expr, &Limits::default()).err().map(|err| err.class())
    }

    #[test]
    fn division_by_zero() {
        let expr = SymExpr::zero().recip();
        assert_eq!(class_of(&expr), Some(ErrorClass::Domain));
        assert!(check(&expr, &Limits::default()).unwrap_err().downcast_ref::<DivisionByZero>().is_some());
    }

    #[test]
    fn even_roots() {
        assert_eq!(class_of(&SymExpr::int(-4).sqrt()), Some(ErrorClass::Domain));
        assert_eq!(class_of(&SymExpr::int(-8).pow(SymExpr::fraction(1, 3))), None);
    }

    #[test]
    fn logarithms() {
        assert_eq!(class_of(&SymExpr::call("log", vec![SymExpr::int(-1)])), Some(ErrorClass::Domain));
        assert_eq!(class_of(&SymExpr::call("log", vec![SymExpr::int(8), SymExpr::one()])), Some(ErrorClass::Domain));
        assert_eq!(class_of(&SymExpr::call("log", vec![SymExpr::symbol("x")])), None);
    }

    #[test]
    fn trigonometry() {
        let half_pi = SymExpr::Mul(vec![SymExpr::fraction(1, 2), SymExpr::constant(Constant::Pi)]);
        assert_eq!(class_of(&SymExpr::call("tan", vec![half_pi])), Some(ErrorClass::Domain));
        assert_eq!(class_of(&SymExpr::call("asin", vec![SymExpr::int(2)])), Some(ErrorClass::Domain));
    }

    #[test]
    fn indeterminate_forms() {
        let oo = SymExpr::constant(Constant::Infinity);
        let expr = SymExpr::Add(vec![oo.clone(), SymExpr::Mul(vec![SymExpr::int(-1), oo.clone()])]);
        assert_eq!(class_of(&expr), Some(ErrorClass::Domain));
        let expr = SymExpr::Mul(vec![SymExpr::zero(), oo]);
        assert_eq!(class_of(&expr), Some(ErrorClass::Domain));
    }

    #[test]
    fn resource_limits() {
        let expr = SymExpr::int(10).pow(SymExpr::int(1_000_000));
        assert_eq!(class_of(&expr), Some(ErrorClass::ResourceLimit));

        let sum = SymExpr::Add(vec![SymExpr::symbol("x"), SymExpr::one()]);
        assert_eq!(class_of(&sum.clone().pow(SymExpr::int(1000))), Some(ErrorClass::ResourceLimit));
        assert_eq!(class_of(&sum.pow(SymExpr::int(20))), None);

        let expr = SymExpr::call("factorial", vec![SymExpr::int(5000)]);
        assert_eq!(class_of(&expr), Some(ErrorClass::ResourceLimit));
    }
}
