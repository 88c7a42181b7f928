//! Simplification rules related to the distributive property.
//!
//! Products of sums are expanded term by term, combining like terms as they are produced. This
//! keeps the intermediate sums as small as the result, so that `(x + 1)^20` expands in one step
//! instead of through a cascade of partial distributions.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, do_power, numeric}, step::Step},
    step_collector::StepCollector,
};

/// Multiplies two monomials without numeric coefficients, merging factors with the same base.
///
/// `x^2*y * x = x^3*y`
pub(crate) fn multiply_monomials(lhs: &SymExpr, rhs: &SymExpr) -> Option<SymExpr> {
    let mut factors = lhs.factors()
        .iter()
        .filter(|factor| !factor.is_one())
        .cloned()
        .collect::<Vec<_>>();

    for factor in rhs.factors().iter().filter(|factor| !factor.is_one()) {
        let (base, exp) = factor.base_exp();
        let existing = factors.iter().position(|other| other.base_exp().0 == base);
        match existing {
            Some(idx) => {
                let (_, other_exp) = factors[idx].base_exp();
                let new_exp = if exp.is_numeric() && other_exp.is_numeric() {
                    numeric::add(&exp, &other_exp)?
                } else {
                    other_exp + exp
                };

                if new_exp.is_zero() {
                    factors.remove(idx);
                } else if new_exp.is_one() {
                    factors[idx] = base.clone();
                } else {
                    factors[idx] = base.clone().pow(new_exp);
                }
            },
            None => factors.push(factor.clone()),
        }
    }

    Some(SymExpr::Mul(factors).downgrade())
}

/// Multiplies two sums, given as slices of terms, and returns the terms of the product with like
/// terms combined.
///
/// `(x + 1)(x - 1) = x^2 - 1`
pub(crate) fn multiply_sums(lhs: &[SymExpr], rhs: &[SymExpr]) -> Option<Vec<SymExpr>> {
    let mut groups: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(lhs.len() * rhs.len());
    for lhs_term in lhs {
        let (lhs_coeff, lhs_rest) = lhs_term.split_coeff();
        for rhs_term in rhs {
            let (rhs_coeff, rhs_rest) = rhs_term.split_coeff();
            let coeff = numeric::mul(&lhs_coeff, &rhs_coeff)?;
            let rest = multiply_monomials(&lhs_rest, &rhs_rest)?;

            match groups.iter_mut().find(|(_, other)| *other == rest) {
                Some((sum, _)) => *sum = numeric::add(sum, &coeff)?,
                None => groups.push((coeff, rest)),
            }
        }
    }

    Some(groups.into_iter()
        .filter(|(coeff, _)| !coeff.is_zero())
        .map(|(coeff, rest)| {
            if rest.is_one() {
                coeff
            } else if coeff.is_one() {
                rest
            } else {
                coeff * rest
            }
        })
        .collect())
}

/// `a*(b+c) = a*b + a*c`
/// `(x+1)*(x-1)/y = (x^2 - 1)/y`
///
/// Only the numerator is expanded. Factors with a negative exponent stay outside of the sum.
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (numerator, denominator): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(|factor| !factor.is_reciprocal());
        if numerator.len() < 2 || !numerator.iter().any(|factor| matches!(factor, SymExpr::Add(_))) {
            return None;
        }

        let expanded = numerator.iter()
            .try_fold(vec![SymExpr::one()], |terms, factor| multiply_sums(&terms, factor.terms()))?;
        let expanded = SymExpr::Add(expanded).downgrade();

        if denominator.is_empty() {
            Some(expanded)
        } else {
            let mut new_factors = vec![expanded];
            new_factors.extend(denominator);
            Some(SymExpr::Mul(new_factors))
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a+b)^2 = a^2 + 2ab + b^2`
///
/// Only positive integer powers are expanded. The size of the result is checked before the rules
/// run.
pub fn expand_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let SymExpr::Add(terms) = lhs else {
            return None;
        };
        let n = rhs.as_integer()?.to_u32().filter(|n| *n >= 2)?;

        let mut expanded = terms.clone();
        for _ in 1..n {
            expanded = multiply_sums(&expanded, terms)?;
        }
        Some(SymExpr::Add(expanded).downgrade())
    })?;

    step_collector.push(Step::ExpandPower);
    Some(opt)
}

/// Applies all distribution rules.
///
/// The distributive property may or may not reduce the complexity of the expression, since it can
/// introduce additional operations. However, it may be necessary for future rules to apply.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distributive_property(expr, step_collector)
        .or_else(|| expand_power(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn x_plus(n: i64) -> SymExpr {
        SymExpr::Add(vec![x(), SymExpr::int(n)])
    }

    #[test]
    fn monomials() {
        let lhs = SymExpr::Mul(vec![x().pow(SymExpr::int(2)), SymExpr::symbol("y")]);
        assert_eq!(multiply_monomials(&lhs, &x()), Some(SymExpr::Mul(vec![
            x().pow(SymExpr::int(3)),
            SymExpr::symbol("y"),
        ])));
        assert_eq!(multiply_monomials(&x(), &x().recip()), Some(SymExpr::one()));
    }

    #[test]
    fn difference_of_squares() {
        let expr = SymExpr::Mul(vec![x_plus(1), x_plus(-1)]);
        assert_eq!(distributive_property(&expr, &mut ()), Some(SymExpr::Add(vec![
            x().pow(SymExpr::int(2)),
            SymExpr::int(-1),
        ])));
    }

    #[test]
    fn denominator_stays_outside() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), x_plus(1), SymExpr::symbol("y").recip()]);
        assert_eq!(distributive_property(&expr, &mut ()), Some(SymExpr::Mul(vec![
            SymExpr::Add(vec![SymExpr::Mul(vec![SymExpr::int(2), x()]), SymExpr::int(2)]),
            SymExpr::symbol("y").recip(),
        ])));

        let quotient = SymExpr::Mul(vec![x_plus(1), x().recip()]);
        assert_eq!(distributive_property(&quotient, &mut ()), None);
    }

    #[test]
    fn square_of_sum() {
        let expr = x_plus(-3).pow(SymExpr::int(2));
        assert_eq!(expand_power(&expr, &mut ()), Some(SymExpr::Add(vec![
            x().pow(SymExpr::int(2)),
            SymExpr::Mul(vec![SymExpr::int(-6), x()]),
            SymExpr::int(9),
        ])));
    }

    #[test]
    fn negative_powers_are_not_expanded() {
        assert_eq!(expand_power(&x_plus(1).pow(SymExpr::int(-2)), &mut ()), None);
    }
}
