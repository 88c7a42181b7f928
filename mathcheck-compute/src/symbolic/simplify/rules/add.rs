//! Simplification rules for expressions involving addition, including combining like terms.

use crate::symbolic::{
    expr::SymExpr,
    simplify::{rules::{do_add, numeric}, step::Step},
    step_collector::StepCollector,
};

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| !term.is_zero())
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `2 + x + 3 = x + 5`
///
/// Numbers are summed exactly; a single float among them makes the sum a float.
pub fn add_numbers(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let (numbers, mut rest): (Vec<_>, Vec<_>) = terms.iter()
            .cloned()
            .partition(SymExpr::is_numeric);
        if numbers.len() < 2 {
            return None;
        }

        let sum = numbers.iter()
            .skip(1)
            .try_fold(numbers[0].clone(), |sum, term| numeric::add(&sum, term))?;
        rest.push(sum);
        Some(SymExpr::Add(rest).downgrade())
    })?;

    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `3x - x = 2x`
/// `x*y + 2*x*y = 3*x*y`
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut groups: Vec<(SymExpr, SymExpr)> = Vec::with_capacity(terms.len());
        for term in terms {
            let (coeff, rest) = term.split_coeff();
            // numbers are handled by `add_numbers`
            if rest.is_one() {
                groups.push((coeff, rest));
                continue;
            }

            match groups.iter_mut().find(|(_, other)| !other.is_one() && *other == rest) {
                Some((sum, _)) => *sum = numeric::add(sum, &coeff)?,
                None => groups.push((coeff, rest)),
            }
        }

        if groups.len() == terms.len() {
            return None;
        }

        let new_terms = groups.into_iter()
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
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms).downgrade())
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| add_numbers(expr, step_collector))
        .or_else(|| combine_like_terms(expr, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn zero_terms_are_dropped() {
        let expr = SymExpr::Add(vec![x(), SymExpr::zero()]);
        assert_eq!(add_zero(&expr, &mut ()), Some(x()));
    }

    #[test]
    fn numbers_are_summed() {
        let expr = SymExpr::Add(vec![SymExpr::int(2), x(), SymExpr::fraction(1, 2)]);
        assert_eq!(add_numbers(&expr, &mut ()), Some(SymExpr::Add(vec![x(), SymExpr::fraction(5, 2)])));
    }

    #[test]
    fn like_terms() {
        let expr = SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::int(3), x()]),
            SymExpr::Mul(vec![SymExpr::int(-1), x()]),
            SymExpr::symbol("y"),
        ]);
        let mut steps = Vec::new();
        assert_eq!(combine_like_terms(&expr, &mut steps), Some(SymExpr::Add(vec![
            SymExpr::Mul(vec![SymExpr::int(2), x()]),
            SymExpr::symbol("y"),
        ])));
        assert_eq!(steps, vec![Step::CombineLikeTerms]);
    }

    #[test]
    fn cancelling_terms_vanish() {
        let expr = SymExpr::Add(vec![x(), SymExpr::Mul(vec![SymExpr::int(-1), x()])]);
        assert_eq!(combine_like_terms(&expr, &mut ()), Some(SymExpr::zero()));
    }
}
