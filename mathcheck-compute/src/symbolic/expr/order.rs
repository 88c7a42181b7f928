//! Total orders on symbolic expressions, used to put terms and factors in canonical order.

use rug::Rational;
use std::cmp::Ordering;
use super::{Primary, SymExpr};

/// Rank of each kind of node in the structural order.
fn rank(expr: &SymExpr) -> u8 {
    match expr {
        SymExpr::Primary(Primary::Number(_)) => 0,
        SymExpr::Primary(Primary::Float(_)) => 1,
        SymExpr::Primary(Primary::Const(_)) => 2,
        SymExpr::Primary(Primary::Symbol(_)) => 3,
        SymExpr::Primary(Primary::Call(..)) => 4,
        SymExpr::Exp(..) => 5,
        SymExpr::Mul(_) => 6,
        SymExpr::Add(_) => 7,
    }
}

fn cmp_slices(lhs: &[SymExpr], rhs: &[SymExpr], cmp: impl Fn(&SymExpr, &SymExpr) -> Ordering) -> Ordering {
    lhs.iter()
        .zip(rhs)
        .map(|(a, b)| cmp(a, b))
        .find(|ordering| ordering.is_ne())
        .unwrap_or_else(|| lhs.len().cmp(&rhs.len()))
}

/// A total structural order on expressions. Two expressions compare equal only if they are
/// structurally identical, operand order included.
pub fn cmp_expr(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    rank(lhs).cmp(&rank(rhs)).then_with(|| match (lhs, rhs) {
        (SymExpr::Primary(Primary::Number(a)), SymExpr::Primary(Primary::Number(b))) => a.cmp(b),
        (SymExpr::Primary(Primary::Float(a)), SymExpr::Primary(Primary::Float(b))) => {
            a.partial_cmp(b).unwrap_or(Ordering::Equal)
        },
        (SymExpr::Primary(Primary::Const(a)), SymExpr::Primary(Primary::Const(b))) => a.cmp(b),
        (SymExpr::Primary(Primary::Symbol(a)), SymExpr::Primary(Primary::Symbol(b))) => a.cmp(b),
        (SymExpr::Primary(Primary::Call(a_name, a_args)), SymExpr::Primary(Primary::Call(b_name, b_args))) => {
            a_name.cmp(b_name).then_with(|| cmp_slices(a_args, b_args, cmp_expr))
        },
        (SymExpr::Exp(a_base, a_exp), SymExpr::Exp(b_base, b_exp)) => {
            cmp_expr(a_base, b_base).then_with(|| cmp_expr(a_exp, b_exp))
        },
        (SymExpr::Mul(a), SymExpr::Mul(b)) | (SymExpr::Add(a), SymExpr::Add(b)) => {
            cmp_slices(a, b, cmp_expr)
        },
        _ => Ordering::Equal,
    })
}

/// Class of a factor: plain numbers first, then numeric radicals such as `sqrt(2)`, then
/// constants, then everything else.
fn factor_class(factor: &SymExpr) -> u8 {
    let (base, _) = factor.base_exp();
    if factor.is_numeric() {
        0
    } else if base.is_numeric() {
        1
    } else if base.as_constant().is_some() {
        2
    } else {
        3
    }
}

/// The order of factors in a product: `2*sqrt(3)*pi*x*y**2*sin(x)*(x + 1)`.
pub fn cmp_factors(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    let (lhs_base, lhs_exp) = lhs.base_exp();
    let (rhs_base, rhs_exp) = rhs.base_exp();
    factor_class(lhs).cmp(&factor_class(rhs))
        .then_with(|| cmp_expr(lhs_base, rhs_base))
        .then_with(|| cmp_expr(&lhs_exp, &rhs_exp))
}

/// The polynomial degree of a term, counting every variable. Non-polynomial factors, such as
/// `sin(x)`, have degree zero.
pub fn degree(term: &SymExpr) -> Rational {
    match term {
        SymExpr::Primary(Primary::Symbol(_)) => Rational::from(1),
        SymExpr::Exp(base, exp) => match (base.as_symbol(), exp.as_number()) {
            (Some(_), Some(n)) => n.clone(),
            _ => Rational::new(),
        },
        SymExpr::Mul(factors) => factors.iter().map(degree).sum(),
        _ => Rational::new(),
    }
}

/// Compares monomials factor by factor, putting higher powers of the same base first, so that
/// `x**2` comes before `x*y`.
fn cmp_monomials(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    cmp_slices(lhs.factors(), rhs.factors(), |a, b| {
        let (a_base, a_exp) = a.base_exp();
        let (b_base, b_exp) = b.base_exp();
        factor_class(a).cmp(&factor_class(b))
            .then_with(|| cmp_expr(a_base, b_base))
            .then_with(|| cmp_expr(&b_exp, &a_exp))
    })
}

/// The order of terms in a sum: descending degree, with the constant term last, as in
/// `x**2 - 6*x + 9`.
pub fn cmp_terms(lhs: &SymExpr, rhs: &SymExpr) -> Ordering {
    let (lhs_coeff, lhs_rest) = lhs.split_coeff();
    let (rhs_coeff, rhs_rest) = rhs.split_coeff();

    lhs_rest.is_one().cmp(&rhs_rest.is_one())
        .then_with(|| degree(&rhs_rest).cmp(&degree(&lhs_rest)))
        .then_with(|| cmp_monomials(&lhs_rest, &rhs_rest))
        .then_with(|| cmp_expr(&lhs_coeff, &rhs_coeff))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn terms_by_descending_degree() {
        let mut terms = vec![
            SymExpr::int(9),
            SymExpr::Mul(vec![SymExpr::int(-6), x()]),
            x().pow(SymExpr::int(2)),
        ];
        terms.sort_by(cmp_terms);
        assert_eq!(SymExpr::Add(terms).to_string(), "x**2 - 6*x + 9");
    }

    #[test]
    fn factors_numbers_first() {
        let mut factors = vec![
            SymExpr::call("sin", vec![x()]),
            x(),
            SymExpr::int(2).sqrt(),
            SymExpr::int(3),
        ];
        factors.sort_by(cmp_factors);
        assert_eq!(SymExpr::Mul(factors).to_string(), "3*sqrt(2)*x*sin(x)");
    }

    #[test]
    fn structural_order_is_total() {
        let a = SymExpr::Add(vec![x(), SymExpr::int(1)]);
        let b = SymExpr::Add(vec![SymExpr::int(1), x()]);
        assert_eq!(cmp_expr(&a, &a), Ordering::Equal);
        assert_ne!(cmp_expr(&a, &b), Ordering::Equal);
        assert_eq!(cmp_expr(&a, &b), cmp_expr(&b, &a).reverse());
    }
}
