//! Isolation of the unknown by inverting the outermost operation around it.
//!
//! `isolate(lhs, rhs)` solves `lhs = rhs`, where only `lhs` contains the unknown. Each step peels
//! one operation off `lhs` and applies its inverse to `rhs`, possibly splitting into several
//! branches, until `lhs` is the unknown itself.

use mathcheck_error::Error;
use crate::error::{recover, NoMethod};
use crate::symbolic::{
    expr::{Constant, Primary},
    simplify,
    SymExpr,
};

/// Returns the error reported when no inverse is known for the expression.
pub(crate) fn no_method(expr: &SymExpr) -> Error {
    Error::unspanned(NoMethod { expr: expr.to_string() })
}

/// Splits the operands into those that contain the unknown and those that do not.
fn partition(items: &[SymExpr], unknown: &str) -> (Vec<SymExpr>, Vec<SymExpr>) {
    items.iter().cloned().partition(|item| item.contains_symbol(unknown))
}

/// Solves every branch and collects the results.
fn branches(lhs: &SymExpr, rhs: impl IntoIterator<Item = SymExpr>, unknown: &str) -> Result<Vec<SymExpr>, Error> {
    let mut out = Vec::new();
    for rhs in rhs {
        out.extend(isolate(lhs, &rhs, unknown)?);
    }
    Ok(out)
}

/// Inverts `base^exp = rhs`, where only the base contains the unknown.
fn invert_power(base: &SymExpr, exp: &SymExpr, rhs: SymExpr, unknown: &str) -> Result<Vec<SymExpr>, Error> {
    match exp.as_number() {
        Some(n) => {
            let root = rhs.pow(SymExpr::number(n.clone().recip()));
            if n.numer().is_even() {
                // `x^2 = 4` has the two solutions `x = 2` and `x = -2`
                branches(base, [root.clone(), -root], unknown)
            } else {
                isolate(base, &root, unknown)
            }
        },
        None => isolate(base, &rhs.pow(exp.clone().recip()), unknown),
    }
}

/// Inverts `base^exp = rhs`, where only the exponent contains the unknown.
fn invert_exponential(base: &SymExpr, exp: &SymExpr, rhs: SymExpr, unknown: &str) -> Result<Vec<SymExpr>, Error> {
    let log = if base.as_constant() == Some(Constant::E) {
        SymExpr::call("log", vec![rhs])
    } else {
        SymExpr::call("log", vec![rhs, base.clone()])
    };
    isolate(exp, &log, unknown)
}

/// Returns the inverse of a trigonometric function, or of an inverse trigonometric function.
fn trig_inverse(name: &str) -> Option<&'static str> {
    Some(match name {
        "sin" => "asin",
        "cos" => "acos",
        "tan" => "atan",
        "asin" => "sin",
        "acos" => "cos",
        "atan" => "tan",
        _ => return None,
    })
}

/// Inverts a function call. Trigonometric functions are inverted to their principal value.
fn invert_call(expr: &SymExpr, name: &str, args: &[SymExpr], rhs: SymExpr, unknown: &str) -> Result<Vec<SymExpr>, Error> {
    if let (Some(inverse), [arg]) = (trig_inverse(name), args) {
        return isolate(arg, &SymExpr::call(inverse, vec![rhs]), unknown);
    }

    match (name, args) {
        ("log", [value]) => isolate(value, &SymExpr::constant(Constant::E).pow(rhs), unknown),
        ("log", [value, base]) if !base.contains_symbol(unknown) => isolate(value, &base.clone().pow(rhs), unknown),
        ("abs", [arg]) => branches(arg, [rhs.clone(), -rhs], unknown),
        _ => Err(no_method(expr)),
    }
}

/// Solves `lhs = rhs` for the unknown, where `rhs` does not contain it.
///
/// Branches on which an operation is undefined, such as `log(x) = log(-1)`, produce no candidates.
/// Candidates are not verified. Returns a [`NoMethod`] error if the unknown cannot be isolated.
pub fn isolate(lhs: &SymExpr, rhs: &SymExpr, unknown: &str) -> Result<Vec<SymExpr>, Error> {
    let rhs = match simplify(rhs) {
        Ok(rhs) => rhs,
        Err(err) => {
            recover(err)?;
            return Ok(Vec::new());
        },
    };

    if lhs.as_symbol() == Some(unknown) {
        return Ok(vec![rhs]);
    }

    match lhs {
        SymExpr::Add(terms) => {
            let (with, without) = partition(terms, unknown);
            match with.as_slice() {
                [single] => isolate(single, &(rhs - SymExpr::Add(without).downgrade()), unknown),
                _ => Err(no_method(lhs)),
            }
        },
        SymExpr::Mul(factors) => {
            let (with, without) = partition(factors, unknown);
            match with.as_slice() {
                [single] => isolate(single, &(rhs * SymExpr::Mul(without).downgrade().recip()), unknown),
                _ if rhs.is_zero() => {
                    // a product is zero if one of the factors of its numerator is
                    let mut out = Vec::new();
                    for factor in with.iter().filter(|factor| !factor.is_reciprocal()) {
                        out.extend(isolate(factor, &SymExpr::zero(), unknown)?);
                    }
                    Ok(out)
                },
                _ => Err(no_method(lhs)),
            }
        },
        SymExpr::Exp(base, exp) => {
            match (base.contains_symbol(unknown), exp.contains_symbol(unknown)) {
                (true, false) => invert_power(base, exp, rhs, unknown),
                (false, true) => invert_exponential(base, exp, rhs, unknown),
                _ => Err(no_method(lhs)),
            }
        },
        SymExpr::Primary(Primary::Call(name, args)) => invert_call(lhs, name, args, rhs, unknown),
        SymExpr::Primary(_) => Err(no_method(lhs)),
    }
}

#[cfg(test)]
mod tests {
    use mathcheck_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use crate::symbolic::parse;
    use super::*;

    fn isolated(lhs: &str, rhs: &str) -> Vec<String> {
        let lhs = simplify(&parse(lhs).unwrap()).unwrap();
        isolate(&lhs, &parse(rhs).unwrap(), "x")
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn linear_operations() {
        assert_eq!(isolated("2x + 4", "10"), vec!["3"]);
        assert_eq!(isolated("x/3 - 1", "1"), vec!["6"]);
    }

    #[test]
    fn powers_and_roots() {
        assert_eq!(isolated("x^2", "9"), vec!["3", "-3"]);
        assert_eq!(isolated("x^3", "-8"), vec!["-2"]);
        assert_eq!(isolated("sqrt(x)", "3"), vec!["9"]);
        assert_eq!(isolated("x^2", "-4"), Vec::<String>::new());
    }

    #[test]
    fn exponentials_and_logarithms() {
        assert_eq!(isolated("2^x", "8"), vec!["3"]);
        assert_eq!(isolated("exp(x)", "1"), vec!["0"]);
        assert_eq!(isolated("ln(x)", "2"), vec!["exp(2)"]);
        assert_eq!(isolated("log(x, 10)", "2"), vec!["100"]);
        assert_eq!(isolated("2^x", "-1"), Vec::<String>::new());
    }

    #[test]
    fn trigonometry() {
        assert_eq!(isolated("sin(x)", "1/2"), vec!["pi/6"]);
        assert_eq!(isolated("cos(x)", "0"), vec!["pi/2"]);
        assert_eq!(isolated("sin(x)", "2"), Vec::<String>::new());
    }

    #[test]
    fn absolute_value() {
        assert_eq!(isolated("abs(x - 1)", "2"), vec!["3", "-1"]);
    }

    #[test]
    fn zero_product() {
        let mut roots = isolated("x*log(x)", "0");
        roots.sort();
        assert_eq!(roots, vec!["0", "1"]);
    }

    #[test]
    fn no_method_found() {
        let lhs = simplify(&parse("x + sin(x)").unwrap()).unwrap();
        let err = isolate(&lhs, &SymExpr::zero(), "x").unwrap_err();
        assert_eq!(err.class(), ErrorClass::Unsupported);
        assert!(err.downcast_ref::<NoMethod>().is_some());
    }
}
