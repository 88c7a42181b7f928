//! Checks whether two expressions are equivalent.

use mathcheck_error::Error;
use tracing::debug;
use crate::error::recover;
use crate::numerical::evaluate;
use crate::response::VerificationResult;
use crate::symbolic::{parse, simplify, SymExpr};
use super::{approx_eq, is_identically_zero};

/// One of the two sides being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn name(self) -> &'static str {
        match self {
            Side::Left => "izquierdo",
            Side::Right => "derecho",
        }
    }
}

/// Parses and simplifies one side. Failures other than resource limits become the negative
/// result to answer with.
fn reduce(text: &str, side: Side) -> Result<Result<SymExpr, VerificationResult>, Error> {
    let expr = match parse(text) {
        Ok(expr) => expr,
        Err(err) => {
            let err = recover(err)?;
            return Ok(Err(VerificationResult::rejected(format!(
                "⚠️ La expresión ingresada no es válida (lado {}): {}",
                side.name(),
                err.message(),
            ))));
        },
    };

    match simplify(&expr) {
        Ok(simplified) => Ok(Ok(simplified)),
        Err(err) => {
            let err = recover(err)?;
            Ok(Err(VerificationResult::rejected(format!(
                "⚠️ El lado {} no está definido: {}",
                side.name(),
                err.message(),
            ))))
        },
    }
}

/// Returns true if two simplified expressions are equivalent.
///
/// Closed expressions are compared by value. Otherwise, or if either one cannot be evaluated, the
/// difference between them is checked to be identically zero.
pub fn equivalent(lhs: &SymExpr, rhs: &SymExpr) -> Result<bool, Error> {
    if lhs.is_closed() && rhs.is_closed() {
        if let (Ok(left), Ok(right)) = (evaluate(lhs), evaluate(rhs)) {
            return Ok(approx_eq(left, right));
        }
    }

    match simplify(&(lhs.clone() - rhs.clone())) {
        Ok(difference) => match is_identically_zero(&difference) {
            Ok(zero) => Ok(zero),
            Err(err) => recover(err).map(|_| false),
        },
        Err(err) => recover(err).map(|_| false),
    }
}

/// Checks whether the two given expressions are equivalent.
///
/// Parse and domain failures of either side are answered with `correct: false` and a message
/// naming the side. Only resource limits are returned as errors.
pub fn check_equivalent(lhs_text: &str, rhs_text: &str) -> Result<VerificationResult, Error> {
    let lhs = match reduce(lhs_text, Side::Left)? {
        Ok(expr) => expr,
        Err(rejected) => return Ok(rejected),
    };
    let rhs = match reduce(rhs_text, Side::Right)? {
        Ok(expr) => expr,
        Err(rejected) => return Ok(rejected),
    };

    let correct = equivalent(&lhs, &rhs)?;
    debug!(%lhs, %rhs, correct, "equivalence checked");

    if correct {
        return Ok(VerificationResult {
            correct,
            message: "✅ La ecuación es correcta".to_owned(),
            left_value: Some(lhs.to_string()),
            right_value: Some(rhs.to_string()),
            difference: None,
        });
    }

    let difference = match simplify(&(lhs.clone() - rhs.clone())) {
        Ok(difference) => Some(difference.to_string()),
        Err(err) => {
            recover(err)?;
            None
        },
    };
    Ok(VerificationResult {
        correct,
        message: "❌ La ecuación tiene un error".to_owned(),
        left_value: Some(lhs.to_string()),
        right_value: Some(rhs.to_string()),
        difference,
    })
}

#[cfg(test)]
mod tests {
    use mathcheck_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use super::*;

    fn correct(lhs: &str, rhs: &str) -> bool {
        check_equivalent(lhs, rhs).unwrap().correct
    }

    #[test]
    fn exact_values() {
        assert!(correct("log(100,10)", "2"));
        assert!(correct("sqrt(12)", "2*sqrt(3)"));
        assert!(correct("sin(pi/6)", "0.5"));
        assert!(!correct("2 + 2", "5"));
    }

    #[test]
    fn symbolic_forms() {
        assert!(correct("(x + 1)^2", "x^2 + 2x + 1"));
        assert!(correct("(x^2 - 1)/(x - 1)", "(x + 1)*(x - 1)/(x - 1)"));
        assert!(correct("1/x + 1/y", "(x + y)/(x*y)"));
        assert!(!correct("(x + 1)^2", "x^2 + 1"));
    }

    #[test]
    fn difference_on_mismatch() {
        let result = check_equivalent("2*x + 3", "2*x").unwrap();
        assert_eq!(result, VerificationResult {
            correct: false,
            message: "❌ La ecuación tiene un error".to_owned(),
            left_value: Some("2*x + 3".to_owned()),
            right_value: Some("2*x".to_owned()),
            difference: Some("3".to_owned()),
        });
    }

    #[test]
    fn parse_failures_name_the_side() {
        let result = check_equivalent("log((", "2").unwrap();
        assert!(!result.correct);
        assert!(result.message.contains("lado izquierdo"));
        assert_eq!(result.difference, None);

        let result = check_equivalent("2", "3 +").unwrap();
        assert!(result.message.contains("lado derecho"));
    }

    #[test]
    fn domain_failures_name_the_side() {
        let result = check_equivalent("1", "1/0").unwrap();
        assert!(!result.correct);
        assert!(result.message.starts_with("⚠️ El lado derecho no está definido"));
    }

    #[test]
    fn symmetric_and_reflexive() {
        for (a, b) in [("x^2 - 1", "(x - 1)(x + 1)"), ("x", "2x"), ("E^2", "exp(2)")] {
            assert!(correct(a, a));
            assert_eq!(correct(a, b), correct(b, a));
        }
    }

    #[test]
    fn resource_limits_escape() {
        let err = check_equivalent("(x + 1)^100000", "1").unwrap_err();
        assert_eq!(err.class(), ErrorClass::ResourceLimit);
    }
}
