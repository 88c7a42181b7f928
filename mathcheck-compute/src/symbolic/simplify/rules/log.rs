//! Simplification rules for logarithms.

use rug::{Integer, Rational};
use crate::symbolic::{
    expr::{Constant, SymExpr},
    simplify::{rules::{do_call, root::perfect_power}, step::Step},
    step_collector::StepCollector,
};

/// Writes a positive rational as `g^k`, where `g` is an integer that is not a perfect power.
///
/// Only integers and reciprocals of integers can be written this way.
fn as_power_of_integer(n: &Rational) -> Option<(Integer, i64)> {
    let (int, sign) = if *n.denom() == 1 {
        (n.numer(), 1)
    } else if *n.numer() == 1 {
        (n.denom(), -1)
    } else {
        return None;
    };

    match perfect_power(int) {
        Some((base, k)) => Some((base, sign * i64::from(k))),
        None => Some((int.clone(), sign)),
    }
}

/// Returns the exact value of `log(value, base)` if it is rational.
///
/// `log(8, 4) = 3/2`
/// `log(1/100, 10) = -2`
fn exact_log(value: &Rational, base: &Rational) -> Option<Rational> {
    if *value <= 0 || *base <= 0 || *base == 1 {
        return None;
    }
    if *value == 1 {
        return Some(Rational::new());
    }

    let (value_base, value_exp) = as_power_of_integer(value)?;
    let (base_base, base_exp) = as_power_of_integer(base)?;
    if value_base == base_base && value_base > 1 {
        Some(Rational::from((value_exp, base_exp)))
    } else {
        None
    }
}

/// `log(1) = 0`
/// `log(E) = 1`
/// `log(E^k) = k`
pub fn natural_log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "log", |args| {
        let [arg] = args else {
            return None;
        };

        if arg.is_one() {
            return Some(SymExpr::zero());
        }
        if arg.as_constant() == Some(Constant::E) {
            return Some(SymExpr::one());
        }
        match arg {
            SymExpr::Exp(base, exp) if base.as_constant() == Some(Constant::E) => Some((**exp).clone()),
            _ => None,
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Logarithm);
    Some(opt)
}

/// `log(100, 10) = 2`
/// `log(x, E) = log(x)`
/// `log(x, x) = 1`
/// `log(x, 2) = log(x) / log(2)`
///
/// Logarithms with an explicit base that cannot be computed exactly are rewritten in terms of the
/// natural logarithm, so that logarithms in different bases can be compared.
pub fn log_with_base(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "log", |args| {
        let [value, base] = args else {
            return None;
        };

        if base.as_constant() == Some(Constant::E) {
            return Some(SymExpr::call("log", vec![value.clone()]));
        }
        if value == base {
            return Some(SymExpr::one());
        }
        if value.is_one() {
            return Some(SymExpr::zero());
        }

        if let (Some(value), Some(base)) = (value.as_number(), base.as_number()) {
            if let Some(exact) = exact_log(value, base) {
                return Some(SymExpr::number(exact));
            }
        }

        // floats are left for numeric evaluation
        if value.is_closed() && base.is_closed() && (value.contains_float() || base.contains_float()) {
            return None;
        }

        Some(SymExpr::Mul(vec![
            SymExpr::call("log", vec![value.clone()]),
            SymExpr::call("log", vec![base.clone()]).recip(),
        ]))
    })?;

    step_collector.push(Step::Logarithm);
    Some(opt)
}

/// Applies all logarithm rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    natural_log(expr, step_collector)
        .or_else(|| log_with_base(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn log(args: Vec<SymExpr>) -> SymExpr {
        SymExpr::call("log", args)
    }

    #[test]
    fn exact_logarithms() {
        let expr = log(vec![SymExpr::int(100), SymExpr::int(10)]);
        assert_eq!(log_with_base(&expr, &mut ()), Some(SymExpr::int(2)));

        let expr = log(vec![SymExpr::int(8), SymExpr::int(4)]);
        assert_eq!(log_with_base(&expr, &mut ()), Some(SymExpr::fraction(3, 2)));

        let expr = log(vec![SymExpr::fraction(1, 8), SymExpr::int(2)]);
        assert_eq!(log_with_base(&expr, &mut ()), Some(SymExpr::int(-3)));
    }

    #[test]
    fn change_of_base() {
        let x = SymExpr::symbol("x");
        let expr = log(vec![x.clone(), SymExpr::int(2)]);
        assert_eq!(log_with_base(&expr, &mut ()), Some(SymExpr::Mul(vec![
            log(vec![x.clone()]),
            log(vec![SymExpr::int(2)]).recip(),
        ])));

        let expr = log(vec![x.clone(), SymExpr::constant(Constant::E)]);
        assert_eq!(log_with_base(&expr, &mut ()), Some(log(vec![x])));
    }

    #[test]
    fn natural_logarithms() {
        let e = SymExpr::constant(Constant::E);
        assert_eq!(natural_log(&log(vec![SymExpr::one()]), &mut ()), Some(SymExpr::zero()));
        assert_eq!(natural_log(&log(vec![e.clone()]), &mut ()), Some(SymExpr::one()));
        assert_eq!(
            natural_log(&log(vec![e.pow(SymExpr::symbol("k"))]), &mut ()),
            Some(SymExpr::symbol("k")),
        );
        assert_eq!(natural_log(&log(vec![SymExpr::int(2)]), &mut ()), None);
    }
}
