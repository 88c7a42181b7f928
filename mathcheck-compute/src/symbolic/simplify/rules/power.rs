//! Simplification rules for powers.

use rug::{ops::Pow, Rational};
use crate::symbolic::{
    expr::{Constant, SymExpr},
    simplify::{rules::do_power, step::Step},
    step_collector::StepCollector,
};

/// `a^0 = 1`
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.is_zero() {
            Some(SymExpr::one())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.is_one() {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.is_one() {
            Some(SymExpr::one())
        } else {
            None
        }
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, where `a` is a positive number or constant
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let positive = rhs.numeric_value().map_or(false, |n| n > 0.0) || rhs.as_constant().is_some();
        if lhs.is_zero() && positive {
            Some(SymExpr::zero())
        } else {
            None
        }
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// Raises an exact number to an integer power, if the exponent fits in an `i32`.
pub(crate) fn exact_power(base: &Rational, exp: &SymExpr) -> Option<Rational> {
    let exp = exp.as_integer()?.to_i32()?;
    if *base == 0 && exp < 0 {
        return None;
    }
    Some(base.clone().pow(exp))
}

/// `2^3 = 8`
/// `(2/3)^-2 = 9/4`
pub fn numeric_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let power = exact_power(lhs.as_number()?, rhs)?;
        Some(SymExpr::number(power))
    })?;

    step_collector.push(Step::NumericPower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`, where `c` is an integer
///
/// The rule is not applied for fractional `c`, since `(x^2)^(1/2)` is `abs(x)`, not `x`.
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rhs.as_integer()?;
        if let SymExpr::Exp(base, exp) = lhs {
            Some((**base).clone().pow((**exp).clone() * rhs.clone()))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Returns true if the factor is known to be positive, so that a fractional power may be taken
/// of it alone.
fn is_positive_factor(factor: &SymExpr) -> bool {
    match factor.as_constant() {
        Some(Constant::Pi | Constant::E) => true,
        Some(Constant::Infinity) => false,
        None => factor.numeric_value().map_or(false, |n| n > 0.0),
    }
}

/// `(a*b)^c = a^c * b^c`, where `c` is an integer
/// `(4*x)^(1/2) = 4^(1/2) * x^(1/2)`
///
/// For fractional exponents, only the factors that are known to be positive are taken out of the
/// power.
pub fn power_of_product(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Mul(factors) = lhs else {
            return None;
        };

        if rhs.as_integer().is_some() {
            let new_factors = factors.iter()
                .map(|factor| factor.clone().pow(rhs.clone()))
                .collect::<Vec<_>>();
            return Some(SymExpr::Mul(new_factors));
        }

        rhs.as_number()?;
        let (positive, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(is_positive_factor);
        if positive.is_empty() {
            return None;
        }

        let mut new_factors = positive.into_iter()
            .map(|factor| factor.pow(rhs.clone()))
            .collect::<Vec<_>>();
        if !rest.is_empty() {
            new_factors.push(SymExpr::Mul(rest).downgrade().pow(rhs.clone()));
        }
        Some(SymExpr::Mul(new_factors))
    })?;

    step_collector.push(Step::PowerOfProduct);
    Some(opt)
}

/// `E^log(x) = x`
/// `E^(c*log(b)) = b^c`
pub fn exp_of_log(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if lhs.as_constant() != Some(Constant::E) {
            return None;
        }

        let natural_log_arg = |expr: &SymExpr| match expr.as_call() {
            Some(("log", [arg])) => Some(arg.clone()),
            _ => None,
        };

        if let Some(arg) = natural_log_arg(rhs) {
            return Some(arg);
        }

        let SymExpr::Mul(factors) = rhs else {
            return None;
        };
        let idx = factors.iter().position(|factor| natural_log_arg(factor).is_some())?;
        let mut rest = factors.clone();
        let arg = natural_log_arg(&rest.remove(idx))?;
        Some(arg.pow(SymExpr::Mul(rest).downgrade()))
    })?;

    step_collector.push(Step::ExpOfLog);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| numeric_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
        .or_else(|| power_of_product(expr, step_collector))
        .or_else(|| exp_of_log(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn trivial_powers() {
        assert_eq!(power_zero(&x().pow(SymExpr::zero()), &mut ()), Some(SymExpr::one()));
        assert_eq!(power_one(&x().pow(SymExpr::one()), &mut ()), Some(x()));
        assert_eq!(one_power(&SymExpr::one().pow(x()), &mut ()), Some(SymExpr::one()));
        assert_eq!(zero_power(&SymExpr::zero().pow(SymExpr::int(3)), &mut ()), Some(SymExpr::zero()));
        assert_eq!(zero_power(&SymExpr::zero().pow(x()), &mut ()), None);
    }

    #[test]
    fn exact_numeric_powers() {
        let expr = SymExpr::int(2).pow(SymExpr::int(10));
        assert_eq!(numeric_power(&expr, &mut ()), Some(SymExpr::int(1024)));

        let expr = SymExpr::fraction(2, 3).pow(SymExpr::int(-2));
        assert_eq!(numeric_power(&expr, &mut ()), Some(SymExpr::fraction(9, 4)));

        let expr = SymExpr::int(2).pow(SymExpr::fraction(1, 2));
        assert_eq!(numeric_power(&expr, &mut ()), None);
    }

    #[test]
    fn nested_powers() {
        let expr = x().pow(SymExpr::int(2)).pow(SymExpr::int(3));
        assert_eq!(
            power_of_power(&expr, &mut ()),
            Some(x().pow(SymExpr::Mul(vec![SymExpr::int(2), SymExpr::int(3)]))),
        );

        let expr = x().pow(SymExpr::int(2)).pow(SymExpr::fraction(1, 2));
        assert_eq!(power_of_power(&expr, &mut ()), None);
    }

    #[test]
    fn products() {
        let expr = SymExpr::Mul(vec![SymExpr::int(4), x()]).pow(SymExpr::fraction(1, 2));
        assert_eq!(power_of_product(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::int(4).sqrt(),
            x().sqrt(),
        ])));

        let expr = SymExpr::Mul(vec![SymExpr::int(-1), x()]).pow(SymExpr::fraction(1, 2));
        assert_eq!(power_of_product(&expr, &mut ()), None);
    }

    #[test]
    fn exponential_of_logarithm() {
        let e = SymExpr::constant(Constant::E);
        let log_x = SymExpr::call("log", vec![x()]);
        assert_eq!(exp_of_log(&e.clone().pow(log_x.clone()), &mut ()), Some(x()));

        let expr = e.pow(SymExpr::Mul(vec![SymExpr::int(2), log_x]));
        assert_eq!(exp_of_log(&expr, &mut ()), Some(x().pow(SymExpr::int(2))));
    }
}
