//! Arithmetic with infinity.
//!
//! Negative infinity is written `-1*oo`. Indeterminate forms such as `oo - oo` and `0*oo` are
//! rejected before the rules run, so the rules here only handle the determinate cases.

use crate::symbolic::{
    expr::{Constant, SymExpr},
    simplify::{rules::{do_add, do_call, do_multiply, do_power, numeric}, step::Step},
    step_collector::StepCollector,
};

/// Returns `oo` or `-oo`.
pub(crate) fn infinity(sign: i32) -> SymExpr {
    let oo = SymExpr::constant(Constant::Infinity);
    if sign < 0 {
        SymExpr::Mul(vec![SymExpr::int(-1), oo])
    } else {
        oo
    }
}

/// Returns true if the expression is a finite number or a finite constant.
fn is_finite_value(expr: &SymExpr) -> bool {
    expr.is_numeric() || matches!(expr.as_constant(), Some(Constant::Pi | Constant::E))
}

/// `oo + 1 = oo`
/// `-oo + pi = -oo`
/// `oo + oo = oo`
pub fn absorb_into_infinity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let sign = terms.iter().find_map(SymExpr::infinity_sign)?;
        let mut new_terms = terms.iter()
            .filter(|term| !is_finite_value(term) && term.infinity_sign().is_none())
            .cloned()
            .collect::<Vec<_>>();
        new_terms.push(infinity(sign));

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AbsorbIntoInfinity);
    Some(opt)
}

/// `2*oo = oo`
/// `-3*oo = -oo`
/// `pi*oo = oo`
pub fn multiply_infinity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if !factors.iter().any(|factor| factor.as_constant() == Some(Constant::Infinity)) {
            return None;
        }

        let mut sign = 1;
        for factor in factors {
            if factor.as_constant().is_some() {
                continue;
            }
            match numeric::sign(factor) {
                Some(s) if s != 0 => sign *= s,
                _ => return None,
            }
        }

        let result = infinity(sign);
        if result == *expr {
            None
        } else {
            Some(result)
        }
    })?;

    step_collector.push(Step::Infinity);
    Some(opt)
}

/// Returns the value of a finite base as an `f64`, if it is known.
fn base_value(expr: &SymExpr) -> Option<f64> {
    match expr.as_constant() {
        Some(Constant::Pi | Constant::E) => expr.as_constant().map(Constant::value),
        Some(Constant::Infinity) => None,
        None => expr.numeric_value(),
    }
}

/// `oo^2 = oo`, `oo^-1 = 0`
/// `(-oo)^3 = -oo`, `(-oo)^2 = oo`
/// `2^oo = oo`, `2^-oo = 0`, `(1/2)^oo = 0`
pub fn power_of_infinity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let Some(base_sign) = lhs.infinity_sign() {
            let exp = base_value(rhs).or_else(|| rhs.infinity_sign().map(f64::from))?;
            if exp < 0.0 {
                return Some(SymExpr::zero());
            }
            if exp == 0.0 {
                return None;
            }
            if base_sign > 0 {
                return Some(infinity(1));
            }

            // negative infinity to an integer power
            let n = rhs.as_integer()?;
            return Some(infinity(if n.is_even() { 1 } else { -1 }));
        }

        let exp_sign = rhs.infinity_sign()?;
        let base = base_value(lhs)?;
        if base < 0.0 || base == 1.0 {
            return None;
        }
        match (base > 1.0, exp_sign > 0) {
            (true, true) | (false, false) => Some(infinity(1)),
            (true, false) | (false, true) => Some(SymExpr::zero()),
        }
    })?;

    step_collector.push(Step::Infinity);
    Some(opt)
}

/// `log(oo) = oo`
/// `atan(oo) = pi/2`
/// `atan(-oo) = -pi/2`
pub fn functions_at_infinity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "log", |args| {
        match args {
            [arg] if arg.infinity_sign() == Some(1) => Some(infinity(1)),
            _ => None,
        }
    }).or_else(|| do_call(expr, "atan", |args| {
        let sign = args.first()?.infinity_sign()?;
        Some(SymExpr::Mul(vec![
            SymExpr::fraction(i64::from(sign), 2),
            SymExpr::constant(Constant::Pi),
        ]))
    }))?;

    step_collector.push(Step::Infinity);
    Some(opt)
}

/// Applies all infinity rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    absorb_into_infinity(expr, step_collector)
        .or_else(|| multiply_infinity(expr, step_collector))
        .or_else(|| power_of_infinity(expr, step_collector))
        .or_else(|| functions_at_infinity(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn oo() -> SymExpr {
        SymExpr::constant(Constant::Infinity)
    }

    #[test]
    fn finite_terms_are_absorbed() {
        let expr = SymExpr::Add(vec![oo(), SymExpr::int(1), SymExpr::constant(Constant::Pi)]);
        assert_eq!(absorb_into_infinity(&expr, &mut ()), Some(oo()));

        let expr = SymExpr::Add(vec![infinity(-1), SymExpr::symbol("x")]);
        assert_eq!(absorb_into_infinity(&expr, &mut ()), None);
    }

    #[test]
    fn coefficients() {
        let expr = SymExpr::Mul(vec![SymExpr::int(-3), oo()]);
        assert_eq!(multiply_infinity(&expr, &mut ()), Some(infinity(-1)));
        assert_eq!(multiply_infinity(&infinity(-1), &mut ()), None);
    }

    #[test]
    fn powers() {
        assert_eq!(power_of_infinity(&oo().pow(SymExpr::int(-1)), &mut ()), Some(SymExpr::zero()));
        assert_eq!(power_of_infinity(&infinity(-1).pow(SymExpr::int(3)), &mut ()), Some(infinity(-1)));
        assert_eq!(power_of_infinity(&SymExpr::int(2).pow(oo()), &mut ()), Some(oo()));
        assert_eq!(power_of_infinity(&SymExpr::fraction(1, 2).pow(oo()), &mut ()), Some(SymExpr::zero()));
        assert_eq!(power_of_infinity(&SymExpr::int(2).pow(infinity(-1)), &mut ()), Some(SymExpr::zero()));
    }

    #[test]
    fn functions() {
        let expr = SymExpr::call("atan", vec![infinity(-1)]);
        assert_eq!(functions_at_infinity(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::fraction(-1, 2),
            SymExpr::constant(Constant::Pi),
        ])));
    }
}
