//! Numerical evaluation of closed expressions.
//!
//! Evaluation works on [`f64`] values. It is used to compare closed expressions, to check the
//! solutions found by the solver, and to locate the real roots of polynomials that have no exact
//! solution.

use mathcheck_error::Error;
use rug::Rational;
use crate::error::{
    CannotEvaluate,
    DivisionByZero,
    EvenRootOfNegative,
    FreeSymbol,
    Indeterminate,
    InvalidLogBase,
    InverseTrigOutOfRange,
    NegativeFactorial,
    NonPositiveLogarithm,
    TangentPole,
    Undefined,
};
use crate::symbolic::{expr::{Primary, SymExpr}, simplify};

/// Tolerance used to decide whether an argument sits on a pole or at the edge of a domain.
const EDGE_TOLERANCE: f64 = 1e-12;

/// The largest `n` for which `n!` is finite as an `f64`.
const MAX_FINITE_FACTORIAL: f64 = 170.0;

/// Evaluates a closed expression to a real number.
///
/// Returns an error if the expression contains a free variable, or if it is undefined at some
/// point, such as `1/0`, `log(-1)` or `tan(pi/2)`.
pub fn evaluate(expr: &SymExpr) -> Result<f64, Error> {
    let value = eval(expr)?;
    if value.is_nan() {
        Err(Error::unspanned(Undefined { expr: expr.to_string() }))
    } else {
        Ok(value)
    }
}

fn eval(expr: &SymExpr) -> Result<f64, Error> {
    match expr {
        SymExpr::Primary(Primary::Number(n)) => Ok(n.to_f64()),
        SymExpr::Primary(Primary::Float(n)) => Ok(n.to_f64()),
        SymExpr::Primary(Primary::Const(constant)) => Ok(constant.value()),
        SymExpr::Primary(Primary::Symbol(name)) => Err(Error::unspanned(FreeSymbol { name: name.clone() })),
        SymExpr::Primary(Primary::Call(name, args)) => {
            let values = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            eval_call(expr, name, args, &values)
        },
        SymExpr::Add(terms) => {
            let values = terms.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            let positive = values.iter().any(|v| *v == f64::INFINITY);
            let negative = values.iter().any(|v| *v == f64::NEG_INFINITY);
            if positive && negative {
                return Err(Error::unspanned(Indeterminate { form: "oo - oo" }));
            }
            Ok(values.into_iter().sum())
        },
        SymExpr::Mul(factors) => {
            let values = factors.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            let zero = values.iter().any(|v| *v == 0.0);
            let infinite = values.iter().any(|v| v.is_infinite());
            if zero && infinite {
                return Err(Error::unspanned(Indeterminate { form: "0*oo" }));
            }
            Ok(values.into_iter().product())
        },
        SymExpr::Exp(base, exp) => eval_power(base, exp),
    }
}

/// Returns the exponent as an exact fraction, folding an unsimplified exponent such as `1*3^-1`.
fn exact_exponent(exp: &SymExpr) -> Result<Option<Rational>, Error> {
    if let Some(n) = exp.as_number() {
        return Ok(Some(n.clone()));
    }
    if !exp.is_closed() || exp.contains_float() {
        return Ok(None);
    }
    Ok(simplify(exp)?.as_number().cloned())
}

fn eval_power(base: &SymExpr, exp: &SymExpr) -> Result<f64, Error> {
    let b = eval(base)?;
    let e = eval(exp)?;

    if b == 0.0 && e < 0.0 {
        return Err(Error::unspanned(DivisionByZero));
    }
    if b == 1.0 && e.is_infinite() {
        return Err(Error::unspanned(Indeterminate { form: "1**oo" }));
    }

    if b < 0.0 && e.fract() != 0.0 {
        // only exact fractions with an odd denominator have a real value
        return match exact_exponent(exp)? {
            Some(n) if n.denom().is_odd() => {
                let magnitude = (-b).powf(e);
                Ok(if n.numer().is_odd() { -magnitude } else { magnitude })
            },
            _ => Err(Error::unspanned(EvenRootOfNegative { value: base.to_string() })),
        };
    }

    Ok(b.powf(e))
}

fn eval_call(expr: &SymExpr, name: &str, args: &[SymExpr], values: &[f64]) -> Result<f64, Error> {
    let arg_text = || args.first().map(ToString::to_string).unwrap_or_default();
    match (name, values) {
        ("sin", [x]) => Ok(x.sin()),
        ("cos", [x]) => Ok(x.cos()),
        ("tan", [x]) => {
            let half_turns = x / std::f64::consts::PI - 0.5;
            if (half_turns - half_turns.round()).abs() < EDGE_TOLERANCE {
                return Err(Error::unspanned(TangentPole { value: arg_text() }));
            }
            Ok(x.tan())
        },
        ("asin" | "acos", [x]) => {
            if x.abs() > 1.0 + EDGE_TOLERANCE {
                let function = if name == "asin" { "asin" } else { "acos" };
                return Err(Error::unspanned(InverseTrigOutOfRange { function, value: arg_text() }));
            }
            let x = x.clamp(-1.0, 1.0);
            Ok(if name == "asin" { x.asin() } else { x.acos() })
        },
        ("atan", [x]) => Ok(x.atan()),
        ("log", [x, rest @ ..]) => {
            if *x <= 0.0 {
                return Err(Error::unspanned(NonPositiveLogarithm { value: arg_text() }));
            }
            match rest {
                [] => Ok(x.ln()),
                [b] => {
                    if *b <= 0.0 || *b == 1.0 {
                        let base = args.get(1).map(ToString::to_string).unwrap_or_default();
                        return Err(Error::unspanned(InvalidLogBase { base }));
                    }
                    Ok(x.ln() / b.ln())
                },
                _ => Err(Error::unspanned(CannotEvaluate { expr: expr.to_string() })),
            }
        },
        ("abs", [x]) => Ok(x.abs()),
        ("factorial", [n]) => {
            if n.fract() != 0.0 || n.is_nan() {
                return Err(Error::unspanned(CannotEvaluate { expr: expr.to_string() }));
            }
            if *n < 0.0 {
                return Err(Error::unspanned(NegativeFactorial { value: arg_text() }));
            }
            if *n > MAX_FINITE_FACTORIAL {
                return Ok(f64::INFINITY);
            }
            Ok((2..=*n as u32).map(f64::from).product())
        },
        _ => Err(Error::unspanned(CannotEvaluate { expr: expr.to_string() })),
    }
}
