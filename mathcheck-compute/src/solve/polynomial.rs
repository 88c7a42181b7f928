//! Roots of polynomials.
//!
//! Linear and quadratic polynomials are solved symbolically, with any coefficients. Polynomials of
//! higher degree need rational coefficients: their rational roots are found with the rational root
//! theorem and divided out, and whatever is left is solved with the quadratic formula or, failing
//! that, numerically.

use mathcheck_error::Error;
use rug::{Integer, Rational};
use crate::check::approx_eq;
use crate::numerical::evaluate;
use crate::symbolic::{simplify, SymExpr};

/// The largest degree a polynomial may have.
pub const MAX_DEGREE: usize = 64;

/// Integers larger than this are not factored when looking for rational roots.
const MAX_FACTORED: u64 = 1_000_000_000_000;

/// The largest number of divisors a coefficient may have for its rational roots to be searched.
const MAX_DIVISORS: usize = 64;

/// The number of bisection steps used to refine a numeric root.
const BISECTION_STEPS: usize = 200;

/// A polynomial in one variable, with coefficients free of the unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// The coefficients, indexed by degree. The last coefficient is not zero.
    coeffs: Vec<SymExpr>,
}

/// If the term is `c*var^n`, with `c` free of the unknown and `n` a non-negative integer, returns
/// `(c, n)`.
fn split_term(term: &SymExpr, var: &SymExpr, unknown: &str) -> Option<(SymExpr, usize)> {
    let mut coeff = Vec::new();
    let mut degree = 0usize;
    for factor in term.factors() {
        if !factor.contains_symbol(unknown) {
            coeff.push(factor.clone());
            continue;
        }
        if factor == var {
            degree = degree.checked_add(1)?;
            continue;
        }

        let (base, exp) = factor.base_exp();
        if base != var {
            return None;
        }
        let n = exp.as_integer()?.to_usize().filter(|n| *n > 0)?;
        degree = degree.checked_add(n)?;
    }

    Some((SymExpr::Mul(coeff).downgrade(), degree))
}

impl Polynomial {
    /// Reads the expanded expression as a polynomial in `var`, which is the unknown or an
    /// expression containing it. Returns [`None`] if the unknown appears anywhere other than in
    /// integer powers of `var`.
    ///
    /// The coefficients are simplified; an error is only returned if that fails.
    pub fn from_expr(expr: &SymExpr, var: &SymExpr, unknown: &str) -> Result<Option<Self>, Error> {
        let mut grouped: Vec<Vec<SymExpr>> = Vec::new();
        for term in expr.terms() {
            let Some((coeff, degree)) = split_term(term, var, unknown) else {
                return Ok(None);
            };
            if degree > MAX_DEGREE {
                return Ok(None);
            }
            if grouped.len() <= degree {
                grouped.resize(degree + 1, Vec::new());
            }
            grouped[degree].push(coeff);
        }

        let mut coeffs = grouped.into_iter()
            .map(|terms| simplify(&SymExpr::Add(terms).downgrade()))
            .collect::<Result<Vec<_>, _>>()?;
        while coeffs.last().map_or(false, SymExpr::is_zero) {
            coeffs.pop();
        }

        Ok(Some(Self { coeffs }))
    }

    /// Returns the degree of the polynomial. The zero polynomial has degree zero.
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// Returns the coefficient of the term of the given degree.
    pub fn coeff(&self, degree: usize) -> SymExpr {
        self.coeffs.get(degree).cloned().unwrap_or_default()
    }

    /// Returns the coefficients as exact rationals, if they all are.
    fn rational_coeffs(&self) -> Option<Vec<Rational>> {
        self.coeffs.iter().map(|coeff| coeff.as_number().cloned()).collect()
    }

    /// Returns the coefficients as floating-point values, if they are all closed.
    fn float_coeffs(&self) -> Option<Vec<f64>> {
        self.coeffs.iter().map(|coeff| evaluate(coeff).ok()).collect()
    }

    /// Returns the candidate roots of the polynomial, or [`None`] if no method applies.
    ///
    /// Roots are not verified, and may repeat.
    pub fn roots(&self) -> Result<Option<Vec<SymExpr>>, Error> {
        match self.degree() {
            0 => Ok(Some(Vec::new())),
            1 => linear(&self.coeff(1), &self.coeff(0)).map(Some),
            2 => quadratic(&self.coeff(2), &self.coeff(1), &self.coeff(0)).map(Some),
            _ => {
                if let Some(coeffs) = self.rational_coeffs() {
                    return rational_polynomial(coeffs).map(Some);
                }
                Ok(self.float_coeffs().map(|coeffs| {
                    real_roots(&coeffs).into_iter().map(SymExpr::float).collect()
                }))
            },
        }
    }
}

/// Solves `a*x + b = 0`.
pub fn linear(a: &SymExpr, b: &SymExpr) -> Result<Vec<SymExpr>, Error> {
    Ok(vec![simplify(&(-b.clone() * a.clone().recip()))?])
}

/// Solves `a*x^2 + b*x + c = 0` with the quadratic formula. Only real roots are returned.
///
/// If the discriminant has variables in it, both roots are returned.
pub fn quadratic(a: &SymExpr, b: &SymExpr, c: &SymExpr) -> Result<Vec<SymExpr>, Error> {
    let discriminant = simplify(&(b.clone().pow(SymExpr::int(2)) - SymExpr::int(4) * a.clone() * c.clone()))?;
    let denom = (SymExpr::int(2) * a.clone()).recip();

    if discriminant.is_zero() {
        return Ok(vec![simplify(&(-b.clone() * denom))?]);
    }
    if discriminant.is_closed() {
        if let Ok(value) = evaluate(&discriminant) {
            if approx_eq(value, 0.0) {
                return Ok(vec![simplify(&(-b.clone() * denom))?]);
            }
            if value < 0.0 {
                return Ok(Vec::new());
            }
        }
    }

    let root = discriminant.sqrt();
    Ok(vec![
        simplify(&((-b.clone() - root.clone()) * denom.clone()))?,
        simplify(&((-b.clone() + root) * denom))?,
    ])
}

/// Multiplies the coefficients by the least common multiple of their denominators.
fn normalize_to_integers(coeffs: &[Rational]) -> Vec<Integer> {
    let lcm = coeffs.iter()
        .filter(|coeff| **coeff != 0)
        .fold(Integer::from(1), |lcm, coeff| lcm.lcm(coeff.denom()));

    coeffs.iter()
        .map(|coeff| Integer::from(coeff.numer() * (Integer::from(&lcm / coeff.denom()))))
        .collect()
}

/// Returns the positive divisors of the integer, or [`None`] if it is too large or has too many.
fn divisors(n: &Integer) -> Option<Vec<Integer>> {
    let n = n.clone().abs().to_u64().filter(|n| *n > 0 && *n <= MAX_FACTORED)?;
    let mut out = Vec::new();
    let mut i = 1u64;
    while i * i <= n {
        if n % i == 0 {
            out.push(Integer::from(i));
            if i != n / i {
                out.push(Integer::from(n / i));
            }
        }
        i += 1;
    }

    (out.len() <= MAX_DIVISORS).then_some(out)
}

/// Returns the candidates for rational roots given by the rational root theorem: `±p/q`, where
/// `p` divides the constant coefficient and `q` divides the leading coefficient.
fn rational_root_candidates(int_coeffs: &[Integer]) -> Vec<Rational> {
    let (Some(a0), Some(an)) = (int_coeffs.first(), int_coeffs.last()) else {
        return Vec::new();
    };
    let (Some(ps), Some(qs)) = (divisors(a0), divisors(an)) else {
        return Vec::new();
    };

    let mut candidates: Vec<Rational> = Vec::new();
    for p in &ps {
        for q in &qs {
            let candidate = Rational::from((p.clone(), q.clone()));
            for candidate in [candidate.clone(), -candidate] {
                if !candidates.contains(&candidate) {
                    candidates.push(candidate);
                }
            }
        }
    }
    candidates
}

/// Evaluates the polynomial with the given coefficients, lowest degree first, at `x`.
fn horner_eval(coeffs: &[Rational], x: &Rational) -> Rational {
    let mut result = Rational::new();
    for coeff in coeffs.iter().rev() {
        result *= x;
        result += coeff;
    }
    result
}

/// Divides the polynomial by `x - root`, returning the quotient.
fn synthetic_division(coeffs: &[Rational], root: &Rational) -> Vec<Rational> {
    let n = coeffs.len();
    if n <= 1 {
        return Vec::new();
    }

    let mut quotient = vec![Rational::new(); n - 1];
    quotient[n - 2] = coeffs[n - 1].clone();
    for i in (0..n - 2).rev() {
        quotient[i] = Rational::from(root * &quotient[i + 1]) + &coeffs[i + 1];
    }
    quotient
}

/// Divides out the rational roots of the polynomial until its degree is at most two, or no more
/// rational roots are found. Returns the roots and the remaining polynomial.
fn find_rational_roots(mut coeffs: Vec<Rational>) -> (Vec<Rational>, Vec<Rational>) {
    let mut roots = Vec::new();
    loop {
        while coeffs.len() > 1 && coeffs[0] == 0 {
            coeffs.remove(0);
            roots.push(Rational::new());
        }
        if coeffs.len() <= 3 {
            break;
        }

        let candidates = rational_root_candidates(&normalize_to_integers(&coeffs));
        let Some(root) = candidates.into_iter().find(|candidate| horner_eval(&coeffs, candidate) == 0) else {
            break;
        };
        coeffs = synthetic_division(&coeffs, &root);
        roots.push(root);
    }

    (roots, coeffs)
}

/// Solves a polynomial of degree three or more with rational coefficients.
fn rational_polynomial(coeffs: Vec<Rational>) -> Result<Vec<SymExpr>, Error> {
    let (roots, residual) = find_rational_roots(coeffs);
    let mut out = roots.into_iter().map(SymExpr::number).collect::<Vec<_>>();

    let coeff = |degree: usize| SymExpr::number(residual[degree].clone());
    match residual.len() {
        0 | 1 => {},
        2 => out.extend(linear(&coeff(1), &coeff(0))?),
        3 => out.extend(quadratic(&coeff(2), &coeff(1), &coeff(0))?),
        _ => {
            let floats = residual.iter().map(Rational::to_f64).collect::<Vec<_>>();
            out.extend(real_roots(&floats).into_iter().map(SymExpr::float));
        },
    }
    Ok(out)
}

/// Evaluates the polynomial at `x`, returning its value and the sum of the magnitudes of its
/// terms, which is the scale against which the value is compared to zero.
fn eval_f64(coeffs: &[f64], x: f64) -> (f64, f64) {
    coeffs.iter().rev().fold((0.0, 0.0), |(value, scale), coeff| {
        (value * x + coeff, scale * x.abs() + coeff.abs())
    })
}

fn is_root(coeffs: &[f64], x: f64) -> bool {
    let (value, scale) = eval_f64(coeffs, x);
    value.abs() <= 1e-12 * scale.max(1.0)
}

/// Finds a root of the polynomial in `[lo, hi]`, where it changes sign, by bisection.
fn bisect(coeffs: &[f64], mut lo: f64, mut hi: f64) -> f64 {
    let lo_sign = eval_f64(coeffs, lo).0.signum();
    for _ in 0..BISECTION_STEPS {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }
        let value = eval_f64(coeffs, mid).0;
        if value == 0.0 {
            return mid;
        }
        if value.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo + (hi - lo) / 2.0
}

/// Finds the real roots of the polynomial with the given coefficients, lowest degree first, in
/// increasing order.
///
/// The roots of the derivative split the real line into intervals on which the polynomial is
/// monotonic, so each interval holds at most one root, which is found by bisection. The outer
/// intervals end at the Cauchy bound on the roots.
pub fn real_roots(coeffs: &[f64]) -> Vec<f64> {
    let mut coeffs = coeffs.to_vec();
    while coeffs.last().map_or(false, |coeff| *coeff == 0.0) {
        coeffs.pop();
    }

    match coeffs.len() {
        0 | 1 => return Vec::new(),
        2 => return vec![-coeffs[0] / coeffs[1]],
        _ => {},
    }

    let leading = coeffs[coeffs.len() - 1];
    let bound = 1.0 + coeffs[..coeffs.len() - 1].iter()
        .map(|coeff| (coeff / leading).abs())
        .fold(0.0, f64::max);

    let derivative = coeffs.iter()
        .enumerate()
        .skip(1)
        .map(|(degree, coeff)| coeff * degree as f64)
        .collect::<Vec<_>>();

    let mut points = vec![-bound];
    points.extend(real_roots(&derivative).into_iter().filter(|x| x.abs() < bound));
    points.push(bound);

    let mut roots: Vec<f64> = Vec::new();
    fn push(root: f64, roots: &mut Vec<f64>) {
        if !roots.iter().any(|existing| approx_eq(*existing, root)) {
            roots.push(root);
        }
    }

    for window in points.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        if is_root(&coeffs, lo) {
            push(lo, &mut roots);
            continue;
        }
        let lo_value = eval_f64(&coeffs, lo).0;
        let hi_value = eval_f64(&coeffs, hi).0;
        if lo_value.signum() != hi_value.signum() && !is_root(&coeffs, hi) {
            push(bisect(&coeffs, lo, hi), &mut roots);
        }
    }
    if let Some(last) = points.last() {
        if is_root(&coeffs, *last) {
            push(*last, &mut roots);
        }
    }

    roots.sort_by(f64::total_cmp);
    roots
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::symbolic::parse;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    fn poly(text: &str) -> Polynomial {
        let expr = simplify(&parse(text).unwrap()).unwrap();
        Polynomial::from_expr(&expr, &x(), "x").unwrap().unwrap()
    }

    fn root_strings(text: &str) -> Vec<String> {
        poly(text).roots().unwrap().unwrap().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn coefficients() {
        let p = poly("3x^2 - 2x + 5");
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coeff(2), SymExpr::int(3));
        assert_eq!(p.coeff(1), SymExpr::int(-2));
        assert_eq!(p.coeff(0), SymExpr::int(5));
    }

    #[test]
    fn symbolic_coefficients() {
        let p = poly("a*x^2 + b*x + a*x");
        assert_eq!(p.degree(), 2);
        assert_eq!(p.coeff(2), SymExpr::symbol("a"));
    }

    #[test]
    fn not_a_polynomial() {
        let expr = simplify(&parse("sin(x) + x").unwrap()).unwrap();
        assert_eq!(Polynomial::from_expr(&expr, &x(), "x").unwrap(), None);

        let expr = simplify(&parse("sqrt(x) + 1").unwrap()).unwrap();
        assert_eq!(Polynomial::from_expr(&expr, &x(), "x").unwrap(), None);
    }

    #[test]
    fn linear_and_quadratic() {
        assert_eq!(root_strings("2x - 6"), vec!["3"]);
        assert_eq!(root_strings("x^2 - 4"), vec!["-2", "2"]);
        assert_eq!(root_strings("x^2 - 2x + 1"), vec!["1"]);
        assert_eq!(root_strings("x^2 + 1"), Vec::<String>::new());
        assert_eq!(root_strings("x^2 - 2"), vec!["-sqrt(2)", "sqrt(2)"]);
    }

    #[test]
    fn rational_roots() {
        let mut roots = root_strings("x^3 - 6x^2 + 11x - 6");
        roots.sort();
        assert_eq!(roots, vec!["1", "2", "3"]);

        let mut roots = root_strings("2x^3 - x^2 - 2x + 1");
        roots.sort();
        assert_eq!(roots, vec!["-1", "1", "1/2"]);
    }

    #[test]
    fn division_helpers() {
        let coeffs = vec![Rational::from(-6), Rational::from(11), Rational::from(-6), Rational::from(1)];
        assert_eq!(horner_eval(&coeffs, &Rational::from(2)), 0);
        assert_eq!(
            synthetic_division(&coeffs, &Rational::from(1)),
            vec![Rational::from(6), Rational::from(-5), Rational::from(1)],
        );
        assert_eq!(
            normalize_to_integers(&[Rational::from((1, 2)), Rational::from((2, 3))]),
            vec![Integer::from(3), Integer::from(4)],
        );
    }

    #[test]
    fn numeric_roots() {
        let roots = real_roots(&[-2.0, 0.0, 0.0, 1.0]);
        assert_eq!(roots.len(), 1);
        assert_float_relative_eq!(roots[0], 2f64.cbrt());

        let roots = real_roots(&[0.0, -1.0, 0.0, 1.0]);
        assert_eq!(roots.len(), 3);
        assert_float_relative_eq!(roots[0], -1.0);
        assert_float_relative_eq!(roots[2], 1.0);
    }

    #[test]
    fn irrational_cubic() {
        let roots = poly("x^3 - 2").roots().unwrap().unwrap();
        assert_eq!(roots.len(), 1);
        assert_float_relative_eq!(roots[0].numeric_value().unwrap(), 2f64.cbrt());
    }
}
