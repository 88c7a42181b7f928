//! Simplification rules for expressions involving multiplication, including combining like
//! factors.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_multiply, numeric}, step::Step},
    step_collector::StepCollector,
};

/// `0*a = 0`
/// `a*0 = 0`
pub fn multiply_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        if factors.iter().any(SymExpr::is_zero) {
            Some(SymExpr::zero())
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let new_factors = factors.iter()
            .filter(|factor| !factor.is_one())
            .cloned()
            .collect::<Vec<_>>();

        if new_factors.len() == factors.len() {
            None
        } else {
            Some(SymExpr::Mul(new_factors).downgrade())
        }
    })?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `2*x*3 = 6*x`
/// `(1/2)*4 = 2`
pub fn multiply_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let (numbers, rest): (Vec<_>, Vec<_>) = factors.iter()
            .cloned()
            .partition(SymExpr::is_numeric);
        if numbers.len() < 2 {
            return None;
        }

        let product = numbers.iter()
            .skip(1)
            .try_fold(numbers[0].clone(), |product, factor| numeric::mul(&product, factor))?;
        let mut new_factors = vec![product];
        new_factors.extend(rest);
        Some(SymExpr::Mul(new_factors).downgrade())
    })?;

    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// Returns true if two factors may be merged into a single power.
///
/// Plain numbers are folded by [`multiply_numbers`] instead, so that `2*sqrt(2)` is kept as is.
/// Two powers of the same sum are never merged when both are in the numerator: the product will be
/// expanded instead.
fn mergeable(lhs: &SymExpr, rhs: &SymExpr) -> bool {
    if lhs.is_numeric() || rhs.is_numeric() {
        return false;
    }

    let (lhs_base, _) = lhs.base_exp();
    if matches!(lhs_base, SymExpr::Add(_)) && !lhs.is_reciprocal() && !rhs.is_reciprocal() {
        return false;
    }

    lhs_base == rhs.base_exp().0
}

/// Combines like factors.
///
/// `a^b*a^c = a^(b+c)`
/// `x*x = x^2`
/// `sqrt(2)*sqrt(3) = sqrt(6)`
pub fn combine_like_factors(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        let mut new_factors = factors.to_vec();
        let mut current_idx = 0;
        let mut changed = false;

        // this is O(n^2) worst case, due to scanning the whole vec for each factor
        while current_idx < new_factors.len() {
            let mut next_idx = current_idx + 1;
            while next_idx < new_factors.len() {
                let current = &new_factors[current_idx];
                let next = &new_factors[next_idx];

                if mergeable(current, next) {
                    // bases are strictly equal: a^b*a^c = a^(b+c)
                    let (base, current_exp) = current.base_exp();
                    let (_, next_exp) = next.base_exp();
                    let merged = base.clone().pow(current_exp + next_exp);
                    new_factors[current_idx] = merged;
                    new_factors.swap_remove(next_idx);
                    changed = true;
                    continue;
                }

                // numeric bases with equal exponents: a^c*b^c = (a*b)^c
                let (current_base, current_exp) = current.base_exp();
                let (next_base, next_exp) = next.base_exp();
                let radicals = current.is_reciprocal() == next.is_reciprocal()
                    && current_exp == next_exp
                    && !current_exp.is_one()
                    && current_base.as_integer().map_or(false, |n| *n > 0)
                    && next_base.as_integer().map_or(false, |n| *n > 0);
                if radicals {
                    let product = numeric::mul(current_base, next_base)?;
                    new_factors[current_idx] = product.pow(current_exp);
                    new_factors.swap_remove(next_idx);
                    changed = true;
                    continue;
                }

                next_idx += 1;
            }

            current_idx += 1;
        }

        if changed {
            Some(SymExpr::Mul(new_factors).downgrade())
        } else {
            None
        }
    })?;

    step_collector.push(Step::CombineLikeFactors);
    Some(opt)
}

/// Applies all multiplication rules.
///
/// All multiplication rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    multiply_zero(expr, step_collector)
        .or_else(|| multiply_one(expr, step_collector))
        .or_else(|| multiply_numbers(expr, step_collector))
        .or_else(|| combine_like_factors(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn zero_and_one() {
        let expr = SymExpr::Mul(vec![x(), SymExpr::zero()]);
        assert_eq!(multiply_zero(&expr, &mut ()), Some(SymExpr::zero()));
        let expr = SymExpr::Mul(vec![SymExpr::one(), x()]);
        assert_eq!(multiply_one(&expr, &mut ()), Some(x()));
    }

    #[test]
    fn numbers_are_multiplied() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), x(), SymExpr::fraction(3, 4)]);
        assert_eq!(multiply_numbers(&expr, &mut ()), Some(SymExpr::Mul(vec![SymExpr::fraction(3, 2), x()])));
    }

    #[test]
    fn like_factors() {
        let expr = SymExpr::Mul(vec![x(), x().pow(SymExpr::int(2))]);
        assert_eq!(
            combine_like_factors(&expr, &mut ()),
            Some(x().pow(SymExpr::Add(vec![SymExpr::one(), SymExpr::int(2)]))),
        );
    }

    #[test]
    fn coefficient_is_not_merged_with_radical() {
        let expr = SymExpr::Mul(vec![SymExpr::int(2), SymExpr::int(2).sqrt()]);
        assert_eq!(combine_like_factors(&expr, &mut ()), None);
    }

    #[test]
    fn products_of_sums_are_left_for_expansion() {
        let sum = SymExpr::Add(vec![x(), SymExpr::one()]);
        let expr = SymExpr::Mul(vec![sum.clone(), sum.clone()]);
        assert_eq!(combine_like_factors(&expr, &mut ()), None);

        let quotient = SymExpr::Mul(vec![sum.clone(), sum.recip()]);
        assert!(combine_like_factors(&quotient, &mut ()).is_some());
    }
}
