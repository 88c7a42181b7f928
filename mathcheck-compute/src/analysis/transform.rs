//! Substitution of an expression for the variable of a function, such as a horizontal shift.

use mathcheck_error::Error;
use tracing::debug;
use crate::error::recover;
use crate::response::TransformResult;
use crate::symbolic::{parse, simplify};
use super::{parse_function, Function};

/// Replaces the variable of the function with the substitution, and simplifies the result.
///
/// Parse and domain failures are answered with `success: false`. Only resource limits are returned
/// as errors.
///
/// ```
/// use mathcheck_compute::analysis::transform::transform;
///
/// let result = transform("x^2", "x", "x - 3").unwrap();
/// assert_eq!(result.result.as_deref(), Some("x**2 - 6*x + 9"));
/// ```
pub fn transform(function_text: &str, variable: &str, substitution_text: &str) -> Result<TransformResult, Error> {
    let Function { body, variable } = match parse_function(function_text, variable)? {
        Ok(function) => function,
        Err(message) => return Ok(TransformResult::failed(message)),
    };
    let substitution = match parse(substitution_text) {
        Ok(substitution) => substitution,
        Err(err) => {
            let err = recover(err)?;
            return Ok(TransformResult::failed(format!("⚠️ La sustitución no es válida: {}", err.message())));
        },
    };

    match simplify(&body.substitute(&variable, &substitution)) {
        Ok(result) => {
            debug!(%body, %substitution, %result, "transformed");
            Ok(TransformResult {
                success: true,
                message: "✅ Transformación aplicada".to_owned(),
                result: Some(result.to_string()),
            })
        },
        Err(err) => {
            let err = recover(err)?;
            Ok(TransformResult::failed(format!("⚠️ La función transformada no está definida: {}", err.message())))
        },
    }
}

#[cfg(test)]
mod tests {
    use mathcheck_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use super::*;

    fn transformed(function: &str, substitution: &str) -> String {
        let result = transform(function, "x", substitution).unwrap();
        assert!(result.success, "{}: {}", function, result.message);
        result.result.unwrap()
    }

    #[test]
    fn shifts_and_scaling() {
        assert_eq!(transformed("x^2", "x - 3"), "x**2 - 6*x + 9");
        assert_eq!(transformed("x^2", "x + 1"), "x**2 + 2*x + 1");
        assert_eq!(transformed("sqrt(x)", "4"), "2");
    }

    #[test]
    fn other_symbols_are_untouched() {
        assert_eq!(transformed("a*x", "2"), "2*a");
    }

    #[test]
    fn failures() {
        let result = transform("1/x", "x", "0").unwrap();
        assert!(result.message.starts_with("⚠️ La función transformada no está definida"));

        let result = transform("x^2", "x", "x +").unwrap();
        assert!(result.message.starts_with("⚠️ La sustitución no es válida"));

        let result = transform("x^2", "", "x").unwrap();
        assert!(result.message.starts_with("⚠️ La variable no es válida"));
    }

    #[test]
    fn resource_limits_escape() {
        let err = transform("x^100000", "x", "x + 1").unwrap_err();
        assert_eq!(err.class(), ErrorClass::ResourceLimit);
    }
}
