//! Structural rules that keep expressions flat and sorted. These rules never change the meaning
//! of an expression, so they do not record a step.

use crate::symbolic::expr::{cmp_factors, cmp_terms, SymExpr};
use std::cmp::Ordering;

/// `a + (b + c) = a + b + c`
/// `a*(b*c) = a*b*c`
///
/// Also collapses sums and products of zero or one operand.
pub fn flatten(expr: &SymExpr) -> Option<SymExpr> {
    match expr {
        SymExpr::Add(terms) => {
            if terms.len() < 2 {
                return Some(expr.clone().downgrade());
            }
            if !terms.iter().any(|term| matches!(term, SymExpr::Add(_))) {
                return None;
            }
            Some(terms.iter().cloned().fold(SymExpr::Add(Vec::new()), |sum, term| sum + term))
        },
        SymExpr::Mul(factors) => {
            if factors.len() < 2 {
                return Some(expr.clone().downgrade());
            }
            if !factors.iter().any(|factor| matches!(factor, SymExpr::Mul(_))) {
                return None;
            }
            Some(factors.iter().cloned().fold(SymExpr::Mul(Vec::new()), |product, factor| product * factor))
        },
        _ => None,
    }
}

fn is_sorted(items: &[SymExpr], cmp: fn(&SymExpr, &SymExpr) -> Ordering) -> bool {
    items.windows(2).all(|pair| cmp(&pair[0], &pair[1]) != Ordering::Greater)
}

/// Sorts the terms of a sum and the factors of a product into canonical order.
pub fn sort(expr: &SymExpr) -> Option<SymExpr> {
    match expr {
        SymExpr::Add(terms) if !is_sorted(terms, cmp_terms) => {
            let mut terms = terms.clone();
            terms.sort_by(cmp_terms);
            Some(SymExpr::Add(terms))
        },
        SymExpr::Mul(factors) if !is_sorted(factors, cmp_factors) => {
            let mut factors = factors.clone();
            factors.sort_by(cmp_factors);
            Some(SymExpr::Mul(factors))
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn nested_sums() {
        let nested = SymExpr::Add(vec![
            SymExpr::symbol("a"),
            SymExpr::Add(vec![SymExpr::symbol("b"), SymExpr::symbol("c")]),
        ]);
        assert_eq!(flatten(&nested), Some(SymExpr::Add(vec![
            SymExpr::symbol("a"),
            SymExpr::symbol("b"),
            SymExpr::symbol("c"),
        ])));
        assert_eq!(flatten(&SymExpr::Mul(vec![SymExpr::symbol("a")])), Some(SymExpr::symbol("a")));
    }

    #[test]
    fn sorting_is_idempotent() {
        let expr = SymExpr::Add(vec![SymExpr::int(1), SymExpr::symbol("x")]);
        let sorted = sort(&expr).unwrap();
        assert_eq!(sorted.to_string(), "x + 1");
        assert_eq!(sort(&sorted), None);
    }
}
