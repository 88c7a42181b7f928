//! Simplification rules for trigonometric functions and their inverses.
//!
//! Angles are normalized to a multiple of `pi`, reduced to a fundamental interval using the
//! periodicity and symmetry of each function, and looked up in a table of known exact values.

use rug::Rational;
use crate::primitive::rational;
use crate::symbolic::{
    expr::{Constant, SymExpr},
    simplify::{rules::do_add, step::Step},
    step_collector::StepCollector,
};

/// If the expression is a rational multiple of `pi`, returns the multiple.
///
/// `0 -> 0`, `pi -> 1`, `pi/6 -> 1/6`
pub(crate) fn pi_multiple(expr: &SymExpr) -> Option<Rational> {
    if expr.as_number().map_or(false, |n| *n == 0) {
        return Some(Rational::new());
    }
    if expr.as_constant() == Some(Constant::Pi) {
        return Some(rational(1));
    }

    match expr {
        SymExpr::Mul(factors) if factors.len() == 2 => {
            let coeff = factors.iter().find_map(SymExpr::as_number)?;
            factors.iter().any(|factor| factor.as_constant() == Some(Constant::Pi))
                .then(|| coeff.clone())
        },
        _ => None,
    }
}

/// Returns the expression `r*pi`.
fn times_pi(r: Rational) -> SymExpr {
    let pi = SymExpr::constant(Constant::Pi);
    if r == 0 {
        SymExpr::zero()
    } else if r == 1 {
        pi
    } else {
        SymExpr::Mul(vec![SymExpr::number(r), pi])
    }
}

/// Returns the expression `c*sqrt(n)`.
fn radical(c: Rational, n: i64) -> SymExpr {
    let root = SymExpr::int(n).sqrt();
    if c == 1 {
        root
    } else {
        SymExpr::Mul(vec![SymExpr::number(c), root])
    }
}

/// Returns `r mod m`, in the range `[0, m)`.
fn modulo(r: &Rational, m: i64) -> Rational {
    let quotient = Rational::from(r / m).floor();
    Rational::from(r - quotient * m)
}

/// `sin(r*pi)`, for `r` in `[0, 1/2]`.
fn sin_table(r: &Rational) -> Option<SymExpr> {
    let value = if *r == 0 {
        SymExpr::zero()
    } else if *r == rational((1, 6)) {
        SymExpr::fraction(1, 2)
    } else if *r == rational((1, 4)) {
        radical(rational((1, 2)), 2)
    } else if *r == rational((1, 3)) {
        radical(rational((1, 2)), 3)
    } else if *r == rational((1, 2)) {
        SymExpr::one()
    } else {
        return None;
    };
    Some(value)
}

/// `sin(r*pi)` for any rational `r` whose reduced angle is in the table.
fn exact_sin(r: &Rational) -> Option<SymExpr> {
    let mut r = modulo(r, 2);
    let mut negate = false;
    if r >= 1 {
        r -= 1;
        negate = true;
    }
    if r > rational((1, 2)) {
        r = Rational::from(1 - &r);
    }

    let value = sin_table(&r)?;
    Some(if negate { -value } else { value })
}

/// `cos(r*pi) = sin((r + 1/2)*pi)`
fn exact_cos(r: &Rational) -> Option<SymExpr> {
    exact_sin(&Rational::from(r + rational((1, 2))))
}

/// `tan(r*pi)` for any rational `r` whose reduced angle is in the table. The poles are rejected
/// before the rules run.
fn exact_tan(r: &Rational) -> Option<SymExpr> {
    let mut r = modulo(r, 1);
    let mut negate = false;
    if r > rational((1, 2)) {
        r = Rational::from(1 - &r);
        negate = true;
    }

    let value = if r == 0 {
        SymExpr::zero()
    } else if r == rational((1, 6)) {
        radical(rational((1, 3)), 3)
    } else if r == rational((1, 4)) {
        SymExpr::one()
    } else if r == rational((1, 3)) {
        radical(rational(1), 3)
    } else {
        return None;
    };
    Some(if negate { -value } else { value })
}

/// `asin(v) = r*pi`, for the values in [`sin_table`].
fn asin_table(value: &SymExpr) -> Option<Rational> {
    [(0, 1), (1, 6), (1, 4), (1, 3), (1, 2)]
        .into_iter()
        .map(rational)
        .find(|r| sin_table(r).as_ref() == Some(value))
}

/// `atan(v) = r*pi`, for the values of `tan` on `[0, pi/2)`.
fn atan_table(value: &SymExpr) -> Option<Rational> {
    [(0, 1), (1, 6), (1, 4), (1, 3)]
        .into_iter()
        .map(rational)
        .find(|r| exact_tan(r).as_ref() == Some(value))
}

/// If the argument has a negative numeric coefficient, returns the negated argument.
fn negated_arg(arg: &SymExpr) -> Option<SymExpr> {
    let (coeff, _) = arg.split_coeff();
    if coeff.numeric_value().map_or(false, |n| n < 0.0) {
        Some(-arg.clone())
    } else {
        None
    }
}

/// `sin(pi/6) = 1/2`
/// `cos(pi) = -1`
/// `tan(pi/3) = sqrt(3)`
pub fn exact_values(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, args) = expr.as_call()?;
    let [arg] = args else {
        return None;
    };

    let opt = match name {
        "sin" => exact_sin(&pi_multiple(arg)?),
        "cos" => exact_cos(&pi_multiple(arg)?),
        "tan" => exact_tan(&pi_multiple(arg)?),
        "asin" => asin_table(arg).map(times_pi),
        "acos" => asin_table(arg).map(|r| times_pi(Rational::from(rational((1, 2)) - r))),
        "atan" => atan_table(arg).map(times_pi),
        _ => None,
    }?;

    step_collector.push(Step::Trigonometry);
    Some(opt)
}

/// `sin(-x) = -sin(x)`
/// `cos(-x) = cos(x)`
/// `acos(-x) = pi - acos(x)`
pub fn symmetry(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let (name, args) = expr.as_call()?;
    let [arg] = args else {
        return None;
    };
    let positive = negated_arg(arg)?;

    let opt = match name {
        "sin" | "tan" | "asin" | "atan" => -SymExpr::call(name, vec![positive]),
        "cos" => SymExpr::call(name, vec![positive]),
        "acos" => SymExpr::Add(vec![
            SymExpr::constant(Constant::Pi),
            -SymExpr::call(name, vec![positive]),
        ]),
        _ => return None,
    };

    step_collector.push(Step::Trigonometry);
    Some(opt)
}

/// If the term is `c*f(u)^2`, returns `c` and `u`.
fn squared_call<'a>(term: &'a SymExpr, name: &str) -> Option<(SymExpr, &'a SymExpr)> {
    let rest_factor = match term {
        SymExpr::Mul(factors) if factors.len() == 2 && factors.iter().any(SymExpr::is_numeric) => {
            factors.iter().find(|factor| !factor.is_numeric())?
        },
        other => other,
    };
    let coeff = match term {
        SymExpr::Mul(factors) => factors.iter().find(|factor| factor.is_numeric())?.clone(),
        _ => SymExpr::one(),
    };

    let SymExpr::Exp(base, exp) = rest_factor else {
        return None;
    };
    if exp.as_integer().map_or(true, |n| *n != 2) {
        return None;
    }
    match base.as_call() {
        Some((call_name, [arg])) if call_name == name => Some((coeff, arg)),
        _ => None,
    }
}

/// `sin(x)^2 + cos(x)^2 = 1`
/// `3*sin(x)^2 + 3*cos(x)^2 = 3`
pub fn pythagorean_identity(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        for (sin_idx, term) in terms.iter().enumerate() {
            let Some((coeff, arg)) = squared_call(term, "sin") else {
                continue;
            };
            let cos_idx = terms.iter().position(|other| {
                squared_call(other, "cos").map_or(false, |(other_coeff, other_arg)| {
                    other_coeff == coeff && other_arg == arg
                })
            });

            if let Some(cos_idx) = cos_idx {
                let mut new_terms = terms.iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != sin_idx && *idx != cos_idx)
                    .map(|(_, term)| term.clone())
                    .collect::<Vec<_>>();
                new_terms.push(coeff);
                return Some(SymExpr::Add(new_terms).downgrade());
            }
        }

        None
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PythagoreanIdentity);
    Some(opt)
}

/// Applies all trigonometric rules.
///
/// All trigonometric rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    exact_values(expr, step_collector)
        .or_else(|| symmetry(expr, step_collector))
        .or_else(|| pythagorean_identity(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn call(name: &str, arg: SymExpr) -> SymExpr {
        SymExpr::call(name, vec![arg])
    }

    #[test]
    fn multiples_of_pi() {
        assert_eq!(pi_multiple(&times_pi(rational((1, 6)))), Some(rational((1, 6))));
        assert_eq!(pi_multiple(&SymExpr::constant(Constant::Pi)), Some(rational(1)));
        assert_eq!(pi_multiple(&SymExpr::symbol("x")), None);
    }

    #[test]
    fn sine_and_cosine() {
        let expr = call("sin", times_pi(rational((1, 6))));
        assert_eq!(exact_values(&expr, &mut ()), Some(SymExpr::fraction(1, 2)));

        let expr = call("sin", times_pi(rational((7, 6))));
        assert_eq!(exact_values(&expr, &mut ()), Some(SymExpr::fraction(-1, 2)));

        let expr = call("cos", SymExpr::constant(Constant::Pi));
        assert_eq!(exact_values(&expr, &mut ()), Some(SymExpr::int(-1)));

        let expr = call("cos", times_pi(rational((1, 4))));
        assert_eq!(exact_values(&expr, &mut ()), Some(radical(rational((1, 2)), 2)));
    }

    #[test]
    fn tangent() {
        let expr = call("tan", times_pi(rational((1, 3))));
        assert_eq!(exact_values(&expr, &mut ()), Some(SymExpr::int(3).sqrt()));

        let expr = call("tan", times_pi(rational((3, 4))));
        assert_eq!(exact_values(&expr, &mut ()), Some(SymExpr::int(-1)));
    }

    #[test]
    fn inverse_functions() {
        let expr = call("asin", SymExpr::fraction(1, 2));
        assert_eq!(exact_values(&expr, &mut ()), Some(times_pi(rational((1, 6)))));

        let expr = call("acos", SymExpr::zero());
        assert_eq!(exact_values(&expr, &mut ()), Some(times_pi(rational((1, 2)))));

        let expr = call("atan", SymExpr::one());
        assert_eq!(exact_values(&expr, &mut ()), Some(times_pi(rational((1, 4)))));
    }

    #[test]
    fn odd_and_even() {
        let x = SymExpr::symbol("x");
        let neg_x = SymExpr::Mul(vec![SymExpr::int(-1), x.clone()]);
        assert_eq!(symmetry(&call("sin", neg_x.clone()), &mut ()), Some(-call("sin", x.clone())));
        assert_eq!(symmetry(&call("cos", neg_x), &mut ()), Some(call("cos", x)));
    }

    #[test]
    fn pythagorean() {
        let x = SymExpr::symbol("x");
        let expr = SymExpr::Add(vec![
            call("sin", x.clone()).pow(SymExpr::int(2)),
            SymExpr::int(5),
            call("cos", x).pow(SymExpr::int(2)),
        ]);
        assert_eq!(pythagorean_identity(&expr, &mut ()), Some(SymExpr::Add(vec![
            SymExpr::int(5),
            SymExpr::one(),
        ])));
    }
}
