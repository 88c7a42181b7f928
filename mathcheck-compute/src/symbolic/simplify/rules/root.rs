//! Simplification rules for exact roots of rational numbers, which are represented as numbers
//! raised to fractional powers.

use crate::primitive::int;
use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_power, power::exact_power}, step::Step},
    step_collector::StepCollector,
};
use rug::{ops::Pow, Integer, Rational};

/// Trial division stops at this divisor. Whatever is left is treated as a single factor.
const TRIAL_DIVISION_LIMIT: u32 = 100_000;

/// If `n` is a perfect power, returns `(g, k)` such that `n = g^k`, with `k` as large as possible.
pub(crate) fn perfect_power(n: &Integer) -> Option<(Integer, u32)> {
    if *n < 2 || !n.is_perfect_power() {
        return None;
    }

    (2..=n.significant_bits())
        .rev()
        .find_map(|k| {
            let root = Integer::from(n.root_ref(k));
            if root.clone().pow(k) == *n {
                Some((root, k))
            } else {
                None
            }
        })
}

/// Splits a positive integer into powers of its factors.
///
/// Small primes are found by trial division. A remaining cofactor is kept as a single factor, or
/// as a perfect power if it is one.
fn factorize(n: &Integer) -> Vec<(Integer, u32)> {
    let mut n = n.clone();
    let mut factors = Vec::new();

    let mut p = 2u32;
    while p <= TRIAL_DIVISION_LIMIT && Integer::from(p) * p <= n {
        let mut count = 0;
        while n.is_divisible_u(p) {
            n /= p;
            count += 1;
        }
        if count > 0 {
            factors.push((int(p), count));
        }
        p += if p == 2 { 1 } else { 2 };
    }

    if n > 1 {
        match perfect_power(&n) {
            Some((base, k)) => factors.push((base, k)),
            None => factors.push((n, 1)),
        }
    }

    factors
}

/// `12^(1/2) = 2*3^(1/2)`
///
/// Moves the factors of a positive integer that are perfect `q`-th powers out of its root.
fn extract_factors(n: &Integer, exp: &Rational) -> Option<SymExpr> {
    let numer = exp.numer().to_u32()?;
    let q = exp.denom().to_u32()?;

    let mut outside = int(1);
    let mut inside = int(1);
    for (factor, count) in factorize(n) {
        let total = count.checked_mul(numer)?;
        outside *= factor.clone().pow(total / q);
        inside *= factor.pow(total % q);
    }

    if outside == 1 {
        return None;
    }

    let outside = SymExpr::number(outside.into());
    if inside == 1 {
        Some(outside)
    } else {
        Some(SymExpr::Mul(vec![
            outside,
            SymExpr::number(inside.into()).pow(SymExpr::fraction(1, i64::from(q))),
        ]))
    }
}

/// `4^(1/4) = 2^(1/2)`
///
/// Rewrites a root of a perfect power with a smaller root.
fn reduce_index(n: &Integer, exp: &Rational) -> Option<SymExpr> {
    let (base, k) = perfect_power(n)?;
    if Integer::from(exp.denom().gcd_u_ref(k)) == 1 {
        return None;
    }

    let new_exp = Rational::from(exp * k);
    Some(SymExpr::number(base.into()).pow(SymExpr::number(new_exp)))
}

/// Simplifies a rational number raised to a fractional power.
///
/// - `(-8)^(1/3) = -1 * 8^(1/3)`: odd roots of negative numbers are real.
/// - `2^(3/2) = 2 * 2^(1/2)`: the integer part of the exponent is taken out.
/// - `(2/3)^(1/2) = (1/3) * 2^(1/2) * 3^(1/2)`: the denominator is rationalized.
/// - `12^(1/2) = 2 * 3^(1/2)`, `4^(1/4) = 2^(1/2)`.
fn rational_power(base: &Rational, exp: &Rational) -> Option<SymExpr> {
    if *exp.denom() == 1 || *base == 0 || *base == 1 {
        return None;
    }

    if *base < 0 {
        // even roots of negative numbers never reach the rules
        if exp.denom().is_even() {
            return None;
        }
        let odd = exp.numer().is_odd();
        if *base == -1 {
            return Some(SymExpr::int(if odd { -1 } else { 1 }));
        }
        let magnitude = SymExpr::number(base.clone().abs()).pow(SymExpr::number(exp.clone()));
        return Some(if odd {
            SymExpr::Mul(vec![SymExpr::int(-1), magnitude])
        } else {
            magnitude
        });
    }

    if *exp < 0 || *exp > 1 {
        let whole = exp.clone().floor();
        let fractional = Rational::from(exp - &whole);
        let whole_power = exact_power(base, &SymExpr::number(whole))?;
        return Some(SymExpr::Mul(vec![
            SymExpr::number(whole_power),
            SymExpr::number(base.clone()).pow(SymExpr::number(fractional)),
        ]));
    }

    if *base.denom() != 1 {
        let (numer, denom) = base.clone().into_numer_denom();
        let conjugate = Rational::from(1 - exp);
        return Some(SymExpr::Mul(vec![
            SymExpr::number(Rational::from((int(1), denom.clone()))),
            SymExpr::number(numer.into()).pow(SymExpr::number(exp.clone())),
            SymExpr::number(denom.into()).pow(SymExpr::number(conjugate)),
        ]));
    }

    let n = base.numer();
    extract_factors(n, exp).or_else(|| reduce_index(n, exp))
}

/// `sqrt(12) = 2*sqrt(3)`
/// `root(-27, 3) = -3`
pub fn root(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        rational_power(lhs.as_number()?, rhs.as_number()?)
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Root);
    Some(opt)
}

/// Applies all root rules.
///
/// Root simplification may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it may be necessary for future rules to apply.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    root(expr, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn power(base: SymExpr, numer: i64, denom: i64) -> SymExpr {
        base.pow(SymExpr::fraction(numer, denom))
    }

    #[test]
    fn perfect_powers() {
        assert_eq!(perfect_power(&int(64)), Some((int(2), 6)));
        assert_eq!(perfect_power(&int(36)), Some((int(6), 2)));
        assert_eq!(perfect_power(&int(12)), None);
    }

    #[test]
    fn square_factors_are_extracted() {
        let expr = power(SymExpr::int(12), 1, 2);
        assert_eq!(root(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::int(2),
            power(SymExpr::int(3), 1, 2),
        ])));

        let expr = power(SymExpr::int(8), 1, 3);
        assert_eq!(root(&expr, &mut ()), Some(SymExpr::int(2)));

        assert_eq!(root(&power(SymExpr::int(6), 1, 2), &mut ()), None);
    }

    #[test]
    fn smaller_index() {
        let expr = power(SymExpr::int(4), 1, 4);
        assert_eq!(root(&expr, &mut ()), Some(power(SymExpr::int(2), 1, 2)));
    }

    #[test]
    fn odd_root_of_negative() {
        let expr = power(SymExpr::int(-8), 1, 3);
        assert_eq!(root(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::int(-1),
            power(SymExpr::int(8), 1, 3),
        ])));
        assert_eq!(root(&power(SymExpr::int(-1), 2, 3), &mut ()), Some(SymExpr::int(1)));
    }

    #[test]
    fn whole_part_of_exponent() {
        let expr = power(SymExpr::int(2), -1, 2);
        assert_eq!(root(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::fraction(1, 2),
            power(SymExpr::int(2), 1, 2),
        ])));
    }

    #[test]
    fn rationalized_denominator() {
        let expr = power(SymExpr::fraction(2, 3), 1, 2);
        assert_eq!(root(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::fraction(1, 3),
            power(SymExpr::int(2), 1, 2),
            power(SymExpr::int(3), 1, 2),
        ])));
    }
}
