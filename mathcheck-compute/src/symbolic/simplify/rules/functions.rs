//! Simplification rules for `abs` and `factorial`.

use rug::Integer;
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::{rules::do_call, step::Step},
    step_collector::StepCollector,
};

/// `abs(-3) = 3`
/// `abs(pi) = pi`
/// `abs(-2x) = 2*abs(x)`
/// `abs(x^2) = x^2`
/// `abs(abs(x)) = abs(x)`
pub fn abs(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "abs", |args| {
        let [arg] = args else {
            return None;
        };

        match arg {
            SymExpr::Primary(Primary::Number(n)) => Some(SymExpr::number(n.clone().abs())),
            SymExpr::Primary(Primary::Float(n)) => Some(SymExpr::Primary(Primary::Float(n.clone().abs()))),
            SymExpr::Primary(Primary::Const(_)) => Some(arg.clone()),
            SymExpr::Primary(Primary::Call(name, _)) if name == "abs" => Some(arg.clone()),
            SymExpr::Exp(_, exp) => {
                let even = exp.as_integer().map_or(false, |n| n.is_even());
                even.then(|| arg.clone())
            },
            SymExpr::Mul(_) => {
                let (coeff, rest) = arg.split_coeff();
                if coeff.is_one() {
                    return None;
                }
                let magnitude = match coeff {
                    SymExpr::Primary(Primary::Number(n)) => SymExpr::number(n.abs()),
                    SymExpr::Primary(Primary::Float(n)) => SymExpr::Primary(Primary::Float(n.abs())),
                    _ => return None,
                };
                let abs_rest = SymExpr::call("abs", vec![rest]);
                if magnitude.is_one() {
                    Some(abs_rest)
                } else {
                    Some(SymExpr::Mul(vec![magnitude, abs_rest]))
                }
            },
            _ => None,
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AbsoluteValue);
    Some(opt)
}

/// `5! = 120`
///
/// Negative and oversized arguments are rejected before the rules run.
pub fn factorial(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_call(expr, "factorial", |args| {
        let n = args.first()?.as_integer()?.to_u32()?;
        Some(SymExpr::number(Integer::from(Integer::factorial(n)).into()))
    })?;

    step_collector.push(Step::Factorial);
    Some(opt)
}

/// Applies all function rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    abs(expr, step_collector)
        .or_else(|| factorial(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn abs_of(arg: SymExpr) -> SymExpr {
        SymExpr::call("abs", vec![arg])
    }

    #[test]
    fn absolute_values() {
        let x = SymExpr::symbol("x");
        assert_eq!(abs(&abs_of(SymExpr::fraction(-3, 2)), &mut ()), Some(SymExpr::fraction(3, 2)));
        assert_eq!(abs(&abs_of(x.clone().pow(SymExpr::int(2))), &mut ()), Some(x.clone().pow(SymExpr::int(2))));
        assert_eq!(
            abs(&abs_of(SymExpr::Mul(vec![SymExpr::int(-2), x.clone()])), &mut ()),
            Some(SymExpr::Mul(vec![SymExpr::int(2), abs_of(x.clone())])),
        );
        assert_eq!(abs(&abs_of(abs_of(x.clone())), &mut ()), Some(abs_of(x.clone())));
        assert_eq!(abs(&abs_of(x), &mut ()), None);
    }

    #[test]
    fn factorials() {
        let expr = SymExpr::call("factorial", vec![SymExpr::int(5)]);
        assert_eq!(factorial(&expr, &mut ()), Some(SymExpr::int(120)));

        let expr = SymExpr::call("factorial", vec![SymExpr::int(0)]);
        assert_eq!(factorial(&expr, &mut ()), Some(SymExpr::one()));
    }
}
