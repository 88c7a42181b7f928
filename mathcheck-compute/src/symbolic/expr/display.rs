//! Printing of symbolic expressions.
//!
//! The output uses `**` for powers and can be parsed back into an equivalent expression.

use rug::Float;
use std::fmt::{self, Display, Formatter};
use super::{Constant, Primary, SymExpr};

/// Binding strength of a printed expression. An operand is wrapped in parentheses when its
/// precedence is lower than what its position requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Add,
    Mul,
    Pow,
    Atom,
}

/// Formats a floating-point number, rounded to 15 significant digits and trimmed of trailing
/// zeros. The result always contains a decimal point, so that it reads back as a float.
pub fn format_float(n: &Float) -> String {
    let value = n.to_f64();
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "oo" } else { "-oo" }.to_owned();
    }

    let rounded = format!("{:.14e}", value)
        .parse::<f64>()
        .unwrap_or(value);
    if rounded == 0.0 {
        return "0.0".to_owned();
    }

    let mut out = rounded.to_string();
    if !out.contains('.') {
        out.push_str(".0");
    }
    out
}

fn precedence(expr: &SymExpr) -> Prec {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => {
            if *n < 0 || *n.denom() != 1 { Prec::Mul } else { Prec::Atom }
        },
        SymExpr::Primary(Primary::Float(n)) => {
            if n.is_sign_negative() { Prec::Mul } else { Prec::Atom }
        },
        SymExpr::Primary(_) => Prec::Atom,
        SymExpr::Add(_) => Prec::Add,
        SymExpr::Mul(_) => Prec::Mul,
        SymExpr::Exp(base, exp) => {
            if exp.is_negative_number() {
                Prec::Mul
            } else if is_half(exp) || base.as_constant() == Some(Constant::E) {
                Prec::Atom
            } else {
                Prec::Pow
            }
        },
    }
}

fn is_half(expr: &SymExpr) -> bool {
    expr.as_number().map_or(false, |n| *n.numer() == 1 && *n.denom() == 2)
}

/// Writes the expression, wrapped in parentheses if its precedence is lower than `min`.
fn write_operand(f: &mut Formatter, expr: &SymExpr, min: Prec) -> fmt::Result {
    if precedence(expr) < min {
        write!(f, "({})", expr)
    } else {
        write!(f, "{}", expr)
    }
}

/// Writes a product as `sign numerator/denominator`, moving the denominator of the coefficient
/// and every factor with a negative exponent below the fraction bar.
fn write_product(f: &mut Formatter, factors: &[SymExpr]) -> fmt::Result {
    let mut negative = false;
    let mut numer = Vec::new();
    let mut denom = Vec::new();

    for factor in factors {
        match factor {
            SymExpr::Primary(Primary::Number(n)) => {
                if *n < 0 {
                    negative = !negative;
                }
                let (n_numer, n_denom) = n.clone().abs().into_numer_denom();
                if n_numer != 1 {
                    numer.push(SymExpr::number(n_numer.into()));
                }
                if n_denom != 1 {
                    denom.push(SymExpr::number(n_denom.into()));
                }
            },
            SymExpr::Primary(Primary::Float(n)) if n.is_sign_negative() => {
                negative = !negative;
                numer.push(SymExpr::Primary(Primary::Float(n.clone().abs())));
            },
            SymExpr::Exp(base, exp) if exp.is_negative_number() => {
                let positive = -(**exp).clone();
                if positive.is_one() {
                    denom.push((**base).clone());
                } else {
                    denom.push((**base).clone().pow(positive));
                }
            },
            other => numer.push(other.clone()),
        }
    }

    if negative {
        f.write_str("-")?;
    }

    // a lone sum in the numerator needs parentheses if anything surrounds it
    let numer_min = if numer.len() > 1 || !denom.is_empty() || negative { Prec::Mul } else { Prec::Add };
    if numer.is_empty() {
        f.write_str("1")?;
    }
    for (idx, factor) in numer.iter().enumerate() {
        if idx > 0 {
            f.write_str("*")?;
        }
        write_operand(f, factor, numer_min)?;
    }

    match denom.as_slice() {
        [] => Ok(()),
        [single] => {
            f.write_str("/")?;
            write_operand(f, single, Prec::Pow)
        },
        many => {
            f.write_str("/(")?;
            for (idx, factor) in many.iter().enumerate() {
                if idx > 0 {
                    f.write_str("*")?;
                }
                write_operand(f, factor, Prec::Mul)?;
            }
            f.write_str(")")
        },
    }
}

/// Returns true if the term should be printed after a minus sign.
fn is_negative_term(term: &SymExpr) -> bool {
    match term.split_coeff().0.numeric_value() {
        Some(coeff) => coeff < 0.0,
        None => false,
    }
}

impl Display for Primary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Primary::Number(n) => {
                if *n.denom() == 1 {
                    write!(f, "{}", n.numer())
                } else {
                    write!(f, "{}/{}", n.numer(), n.denom())
                }
            },
            Primary::Float(n) => f.write_str(&format_float(n)),
            Primary::Symbol(name) => f.write_str(name),
            Primary::Const(constant) => f.write_str(constant.name()),
            Primary::Call(name, args) => {
                write!(f, "{}(", name)?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            },
        }
    }
}

impl Display for SymExpr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SymExpr::Primary(primary) => primary.fmt(f),
            SymExpr::Add(terms) => {
                for (idx, term) in terms.iter().enumerate() {
                    if idx == 0 {
                        write_operand(f, term, Prec::Mul)?;
                    } else if is_negative_term(term) {
                        f.write_str(" - ")?;
                        write_operand(f, &-term.clone(), Prec::Mul)?;
                    } else {
                        f.write_str(" + ")?;
                        write_operand(f, term, Prec::Mul)?;
                    }
                }
                Ok(())
            },
            SymExpr::Mul(factors) => write_product(f, factors),
            SymExpr::Exp(base, exp) => {
                if exp.is_negative_number() {
                    write_product(f, std::slice::from_ref(self))
                } else if is_half(exp) {
                    write!(f, "sqrt({})", base)
                } else if base.as_constant() == Some(Constant::E) {
                    write!(f, "exp({})", exp)
                } else {
                    write_operand(f, base, Prec::Atom)?;
                    f.write_str("**")?;
                    write_operand(f, exp, Prec::Atom)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::symbolic::expr::SymExpr;
    use super::*;

    fn x() -> SymExpr {
        SymExpr::symbol("x")
    }

    #[test]
    fn polynomial() {
        let expr = SymExpr::Add(vec![
            x().pow(SymExpr::int(2)),
            SymExpr::Mul(vec![SymExpr::int(-6), x()]),
            SymExpr::int(9),
        ]);
        assert_eq!(expr.to_string(), "x**2 - 6*x + 9");
    }

    #[test]
    fn fractions() {
        assert_eq!(SymExpr::fraction(-3, 4).to_string(), "-3/4");
        assert_eq!(SymExpr::Mul(vec![SymExpr::fraction(1, 2), x()]).to_string(), "x/2");
        assert_eq!(SymExpr::Mul(vec![SymExpr::fraction(-3, 2), x()]).to_string(), "-3*x/2");
        assert_eq!(x().recip().to_string(), "1/x");
        let quotient = SymExpr::Mul(vec![
            SymExpr::Add(vec![x(), SymExpr::int(1)]),
            SymExpr::Add(vec![x(), SymExpr::int(-1)]).recip(),
        ]);
        assert_eq!(quotient.to_string(), "(x + 1)/(x - 1)");
    }

    #[test]
    fn powers_and_roots() {
        assert_eq!(SymExpr::int(2).sqrt().to_string(), "sqrt(2)");
        assert_eq!(x().pow(SymExpr::fraction(1, 3)).to_string(), "x**(1/3)");
        assert_eq!(SymExpr::int(-2).pow(x()).to_string(), "(-2)**x");
        assert_eq!(SymExpr::constant(Constant::E).pow(x()).to_string(), "exp(x)");
        assert_eq!(SymExpr::Add(vec![x(), SymExpr::int(1)]).pow(SymExpr::int(2)).to_string(), "(x + 1)**2");
        assert_eq!(SymExpr::Mul(vec![SymExpr::int(2), x()]).pow(SymExpr::int(-2)).to_string(), "1/(2*x)**2");
    }

    #[test]
    fn negation() {
        assert_eq!(SymExpr::Mul(vec![SymExpr::int(-1), x()]).to_string(), "-x");
        let sum = SymExpr::Add(vec![x(), SymExpr::int(1)]);
        assert_eq!(SymExpr::Mul(vec![SymExpr::int(-1), sum]).to_string(), "-(x + 1)");
    }

    #[test]
    fn floats() {
        assert_eq!(SymExpr::float(0.1 + 0.2).to_string(), "0.3");
        assert_eq!(SymExpr::float(2.0).to_string(), "2.0");
        assert_eq!(SymExpr::float(-1.5).to_string(), "-1.5");
    }

    #[test]
    fn calls() {
        let call = SymExpr::call("log", vec![x(), SymExpr::int(10)]);
        assert_eq!(call.to_string(), "log(x, 10)");
    }
}
