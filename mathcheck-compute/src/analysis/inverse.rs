//! Inverse of a function of one variable.
//!
//! The inverse of `f` is found by solving `y = f(x)` for `x`, and renaming `y` back to `x`. A
//! function that is not one-to-one, such as `x^2`, has an inverse branch per solution.
//!
//! ```
//! use mathcheck_compute::analysis::inverse::inverse;
//!
//! let result = inverse("exp(x)", "x").unwrap();
//! assert_eq!(result.inverse.as_deref(), Some("log(x)"));
//! ```

use mathcheck_error::Error;
use tracing::debug;
use crate::error::{recover, NoMethod};
use crate::response::InverseResult;
use crate::solve::{solve_expr, Solutions};
use crate::symbolic::{simplify, SymExpr};
use super::{parse_function, Function};

/// Returns a symbol name that does not occur in the expression.
fn fresh_symbol(expr: &SymExpr, variable: &str) -> String {
    let used = expr.free_symbols();
    std::iter::once("y".to_owned())
        .chain((1..).map(|n| format!("y_{}", n)))
        .find(|name| name != variable && !used.contains(name))
        .unwrap_or_default()
}

/// Finds the inverse of the function with the given variable.
///
/// Parse, domain and unsupported failures are answered with `success: false`. Only resource
/// limits are returned as errors.
pub fn inverse(function_text: &str, variable: &str) -> Result<InverseResult, Error> {
    let Function { body, variable } = match parse_function(function_text, variable)? {
        Ok(function) => function,
        Err(message) => return Ok(InverseResult::failed(message)),
    };
    if !body.contains_symbol(&variable) {
        return Ok(InverseResult::failed(format!("⚠️ La función no depende de {}, no tiene inversa", variable)));
    }

    let output = fresh_symbol(&body, &variable);
    let equation = body - SymExpr::symbol(output.as_str());
    let solutions = match solve_expr(&equation, &variable) {
        Ok(Solutions::Finite(solutions)) => solutions,
        Ok(Solutions::All) => Vec::new(),
        Err(err) => {
            let err = recover(err)?;
            let message = if err.downcast_ref::<NoMethod>().is_some() {
                "⚠️ No se encontró un método para invertir la función".to_owned()
            } else {
                format!("⚠️ La función no está definida: {}", err.message())
            };
            return Ok(InverseResult::failed(message));
        },
    };

    let renamed = SymExpr::symbol(variable.as_str());
    let mut branches = Vec::new();
    for solution in solutions {
        match simplify(&solution.substitute(&output, &renamed)) {
            Ok(branch) => branches.push(branch.to_string()),
            Err(err) => { recover(err)?; },
        }
    }
    debug!(%variable, ?branches, "inverted");

    let Some(first) = branches.first().cloned() else {
        return Ok(InverseResult::failed("⚠️ No se encontró una función inversa"));
    };
    Ok(InverseResult {
        success: true,
        message: if branches.len() == 1 {
            "✅ Función inversa encontrada".to_owned()
        } else {
            format!("✅ La inversa tiene {} ramas", branches.len())
        },
        inverse: Some(first),
        branches,
    })
}

#[cfg(test)]
mod tests {
    use mathcheck_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use crate::check::equivalence::check_equivalent;
    use super::*;

    fn inverse_of(text: &str) -> String {
        let result = inverse(text, "x").unwrap();
        assert!(result.success, "{}: {}", text, result.message);
        result.inverse.unwrap()
    }

    #[test]
    fn linear() {
        let inverse = inverse_of("2x + 3");
        assert!(check_equivalent(&inverse, "(x - 3)/2").unwrap().correct, "{}", inverse);
    }

    #[test]
    fn exponential_and_logarithm() {
        assert_eq!(inverse_of("exp(x)"), "log(x)");
        assert_eq!(inverse_of("ln(x)"), "exp(x)");
    }

    #[test]
    fn several_branches() {
        let result = inverse("x^2", "x").unwrap();
        assert!(result.success);
        assert_eq!(result.branches.len(), 2);
        assert_eq!(result.inverse.as_ref(), result.branches.first());
        assert_eq!(result.message, "✅ La inversa tiene 2 ramas");
    }

    #[test]
    fn fresh_symbol_avoids_parameters() {
        let body = crate::symbolic::parse("a*x + y").unwrap();
        assert_eq!(fresh_symbol(&body, "x"), "y_1");
        assert_eq!(fresh_symbol(&body, "y_1"), "y_2");

        let inverse = inverse_of("x + y");
        assert!(check_equivalent(&inverse, "x - y").unwrap().correct, "{}", inverse);
    }

    #[test]
    fn failures() {
        let result = inverse("5", "x").unwrap();
        assert_eq!(result.message, "⚠️ La función no depende de x, no tiene inversa");

        let result = inverse("x + sin(x)", "x").unwrap();
        assert_eq!(result.message, "⚠️ No se encontró un método para invertir la función");

        let result = inverse("log((", "x").unwrap();
        assert!(result.message.starts_with("⚠️ La función ingresada no es válida"));

        let result = inverse("x", "1x").unwrap();
        assert!(result.message.starts_with("⚠️ La variable no es válida"));
    }

    #[test]
    fn resource_limits_escape() {
        let err = inverse("(x + 1)^100000", "x").unwrap_err();
        assert_eq!(err.class(), ErrorClass::ResourceLimit);
    }
}
