//! Tools to help manipulate fractions.

use crate::symbolic::expr::{Primary, SymExpr};

/// Create a [`SymExpr`] representing a fraction with the given numerator and denominator.
///
/// The representation is a [`SymExpr::Mul`] containing two factors. The first factor is the
/// numerator, and the second factor is the denominator raised to the power of -1.
pub fn make_fraction(numerator: SymExpr, denominator: SymExpr) -> SymExpr {
    numerator * denominator.recip()
}

/// Multiplies the given factors, leaving out factors of one.
fn product(factors: Vec<SymExpr>) -> SymExpr {
    SymExpr::Mul(factors.into_iter().filter(|factor| !factor.is_one()).collect()).downgrade()
}

/// Splits an expression into a numerator and a denominator, such that `expr = numer / denom`.
///
/// Neither part is simplified. A sum is brought to a common denominator by multiplying each
/// numerator by the denominators of the other terms; identical denominators are only used once.
///
/// - `x/2` -> `(x, 2)`
/// - `(x + 1)/(x - 1)` -> `(x + 1, x - 1)`
/// - `1/x + 1/y` -> `(1*y + 1*x, x*y)`
/// - `x^(-1/2)` -> `(1, x^(1/2))`
pub fn numer_denom(expr: &SymExpr) -> (SymExpr, SymExpr) {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => {
            let (numer, denom) = n.clone().into_numer_denom();
            (SymExpr::number(numer.into()), SymExpr::number(denom.into()))
        },
        SymExpr::Exp(base, exp) if exp.is_negative_number() => {
            let positive = -(**exp).clone();
            if positive.as_integer().is_some() {
                // `(a/b)^-n = b^n / a^n`
                let (base_numer, base_denom) = numer_denom(base);
                if positive.is_one() {
                    (base_denom, base_numer)
                } else {
                    (power_of(base_denom, &positive), power_of(base_numer, &positive))
                }
            } else {
                (SymExpr::one(), (**base).clone().pow(positive))
            }
        },
        SymExpr::Exp(base, exp) if exp.as_float().map_or(false, |n| n.is_sign_negative()) => {
            (SymExpr::one(), (**base).clone().pow(-(**exp).clone()))
        },
        SymExpr::Mul(factors) => {
            let (numers, denoms): (Vec<_>, Vec<_>) = factors.iter().map(numer_denom).unzip();
            (product(numers), product(denoms))
        },
        SymExpr::Add(terms) => {
            let parts = terms.iter().map(numer_denom).collect::<Vec<_>>();
            let mut distinct: Vec<SymExpr> = Vec::new();
            for (_, denom) in &parts {
                if !denom.is_one() && !distinct.contains(denom) {
                    distinct.push(denom.clone());
                }
            }

            let numer_terms = parts.into_iter()
                .map(|(numer, denom)| {
                    let mut factors = vec![numer];
                    factors.extend(distinct.iter().filter(|other| **other != denom).cloned());
                    product(factors)
                })
                .collect::<Vec<_>>();
            (SymExpr::Add(numer_terms).downgrade(), product(distinct))
        },
        _ => (expr.clone(), SymExpr::one()),
    }
}

/// Raises the expression to the given power, unless the expression is one.
fn power_of(expr: SymExpr, exp: &SymExpr) -> SymExpr {
    if expr.is_one() {
        expr
    } else {
        expr.pow(exp.clone())
    }
}
