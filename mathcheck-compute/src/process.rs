//! Line-by-line verification of a derivation.
//!
//! Each non-blank line of a derivation is an equation `lhs = rhs`. The first equation is taken as
//! given; every following one must be a legal transformation of the one before it. A line is a
//! legal transformation if its difference `D_i = lhs_i - rhs_i` is a nonzero constant multiple of
//! the previous difference `D_{i-1}`: adding the same term to both sides leaves `D` unchanged, and
//! multiplying both sides by a constant scales it.
//!
//! The verification is a left fold over the lines, carrying the last parsed equation as the
//! reference for the next one. A line that parses but is rejected still becomes the reference, so
//! that a single mistake is reported once instead of on every following line.
//!
//! ```
//! use mathcheck_compute::process::verify_process;
//!
//! let result = verify_process("2*x + 4 = 10\n2*x = 6\nx = 3", "x").unwrap();
//! assert!(result.all_correct);
//! assert_eq!(result.final_solutions, vec!["3"]);
//! ```

use mathcheck_error::Error;
use mathcheck_parser::parser::{
    error::kind::{EmptySide, MissingEquals, TooManyEquals},
    parse_equation,
    parse_symbol_name,
};
use tracing::debug;
use crate::check::{equivalence::equivalent, is_identically_zero, is_negligible};
use crate::error::recover;
use crate::response::{ProcessResult, StepResult};
use crate::solve::{solve_expr, Solutions};
use crate::symbolic::{simplify, simplify::fraction::numer_denom, SymExpr};

/// A parsed and simplified line, used as the reference for the next one.
#[derive(Debug, Clone)]
struct Reference {
    /// The simplified left-hand side.
    lhs: SymExpr,

    /// The simplified right-hand side.
    rhs: SymExpr,

    /// The simplified difference `lhs - rhs`.
    diff: SymExpr,
}

/// The outcome of one line.
enum Line {
    /// The line is not an equation. It does not replace the reference.
    Malformed(StepResult),

    /// The line is an equation. It replaces the reference, if it could be simplified.
    Parsed(StepResult, Option<Reference>),
}

/// Builds a rejected step.
fn rejected(step_index: usize, raw_line: &str, message: &str, detail: Option<String>) -> StepResult {
    StepResult {
        step_index,
        raw_line: raw_line.to_owned(),
        correct: false,
        message: message.to_owned(),
        detail,
    }
}

/// Builds an accepted step.
fn accepted(step_index: usize, raw_line: &str, message: &str) -> StepResult {
    StepResult {
        step_index,
        raw_line: raw_line.to_owned(),
        correct: true,
        message: message.to_owned(),
        detail: None,
    }
}

/// Returns true if the error is about the shape of the line, rather than about an expression.
fn is_format_error(err: &Error) -> bool {
    err.downcast_ref::<MissingEquals>().is_some()
        || err.downcast_ref::<TooManyEquals>().is_some()
        || err.downcast_ref::<EmptySide>().is_some()
}

/// Splits a term into the product of its factors without variables, such as `3*pi*sqrt(2)`, and
/// the product of the rest.
fn split_closed(term: &SymExpr) -> (SymExpr, SymExpr) {
    let (closed, open) = term.factors()
        .iter()
        .cloned()
        .partition::<Vec<_>, _>(SymExpr::is_closed);
    (SymExpr::Mul(closed).downgrade(), SymExpr::Mul(open).downgrade())
}

/// Finds the constant `k` such that `expr = k * reference`, by comparing the constant factors of a
/// term of `expr` that has variables and the term of `reference` with the same variable part.
fn ratio(expr: &SymExpr, reference: &SymExpr) -> Result<Option<SymExpr>, Error> {
    let terms = expr.terms();
    let Some(term) = terms.iter().find(|term| !term.is_closed()).or_else(|| terms.first()) else {
        return Ok(None);
    };
    let (coeff, rest) = split_closed(term);
    let matching = reference.terms()
        .iter()
        .map(split_closed)
        .find(|(_, other_rest)| *other_rest == rest);

    let Some((other_coeff, _)) = matching else {
        return Ok(None);
    };
    let k = simplify(&(coeff * other_coeff.recip()))?;
    Ok((k.is_closed() && !k.is_zero()).then_some(k))
}

/// Returns true if any of the values is equivalent to the given one, so that `x = 3` and `x = 3.0`
/// count as one solution.
fn contains_equivalent(values: &[SymExpr], value: &SymExpr) -> Result<bool, Error> {
    for existing in values {
        if equivalent(existing, value)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Returns the residual `P_i*Q_{i-1} - k*P_{i-1}*Q_i` of the transition from `prev` to `diff`, with
/// `D = P/Q`, or [`None`] if it is zero and the transition is legal.
fn transition_residual(prev: &SymExpr, diff: &SymExpr) -> Result<Option<SymExpr>, Error> {
    let (prev_numer, prev_denom) = numer_denom(prev);
    let (numer, denom) = numer_denom(diff);
    let scaled = simplify(&(numer * prev_denom))?;
    let reference = simplify(&(prev_numer * denom))?;

    if is_negligible(&reference) {
        return Ok((!is_negligible(&scaled)).then_some(scaled));
    }

    // rearrangements that the simplifier leaves in a different shape have no matching term
    let k = ratio(&scaled, &reference)?.unwrap_or_else(SymExpr::one);
    let residual = simplify(&(scaled - k * reference))?;
    if is_identically_zero(&residual)? {
        Ok(None)
    } else {
        Ok(Some(residual))
    }
}

/// Explains why the line does not follow from the reference.
fn explain(reference: &Reference, current: &Reference, residual: &SymExpr, unknown: Option<&str>) -> Result<String, Error> {
    let mut parts = Vec::new();

    let lhs_same = equivalent(&current.lhs, &reference.lhs)?;
    let rhs_same = equivalent(&current.rhs, &reference.rhs)?;
    match (lhs_same, rhs_same) {
        (false, true) => parts.push(format!(
            "El lado izquierdo cambió incorrectamente. Pusiste '{}' pero debería ser equivalente a '{}'.",
            current.lhs,
            reference.lhs,
        )),
        (true, false) => parts.push(format!(
            "El lado derecho cambió incorrectamente. Pusiste '{}' pero debería ser equivalente a '{}'.",
            current.rhs,
            reference.rhs,
        )),
        _ => parts.push("Este paso no es equivalente al anterior. Revisá la operación que aplicaste.".to_owned()),
    }

    if let Some(term) = residual.terms().first() {
        parts.push(format!("El término '{}' no se cancela.", term));
    }

    if let Some(unknown) = unknown {
        let solutions = match solve_expr(&reference.diff, unknown) {
            Ok(Solutions::Finite(solutions)) => solutions,
            Ok(Solutions::All) => Vec::new(),
            Err(err) => {
                recover(err)?;
                Vec::new()
            },
        };
        if !solutions.is_empty() {
            let values = solutions.iter().map(ToString::to_string).collect::<Vec<_>>();
            parts.push(format!("La solución correcta es {} = {}.", unknown, values.join(", ")));
        }
    }

    Ok(parts.join(" "))
}

/// Simplifies both sides of the equation and their difference.
fn reduce(lhs: SymExpr, rhs: SymExpr) -> Result<Reference, Error> {
    Ok(Reference {
        diff: simplify(&(lhs.clone() - rhs.clone()))?,
        lhs: simplify(&lhs)?,
        rhs: simplify(&rhs)?,
    })
}

/// Checks one line against the reference.
fn check_line(
    step_index: usize,
    line: &str,
    reference: Option<&Reference>,
    unknown: Option<&str>,
) -> Result<Line, Error> {
    let equation = match parse_equation(line) {
        Ok(equation) => equation,
        Err(err) => {
            let err = recover(err)?;
            let step = if is_format_error(&err) {
                rejected(step_index, line, "⚠️ Formato inválido, usá 'expresión = expresión'", Some(err.message()))
            } else {
                rejected(step_index, line, "⚠️ Expresión inválida en este paso", Some(format!(
                    "Revisá que la sintaxis sea correcta. Usá ** para potencias, * para multiplicación. ({})",
                    err.message(),
                )))
            };
            return Ok(Line::Malformed(step));
        },
    };

    let current = match reduce(SymExpr::from(&equation.lhs), SymExpr::from(&equation.rhs)) {
        Ok(current) => current,
        Err(err) => {
            let err = recover(err)?;
            let step = rejected(step_index, line, "⚠️ Este paso no está definido", Some(err.message()));
            return Ok(Line::Parsed(step, None));
        },
    };

    let Some(reference) = reference else {
        let step = accepted(step_index, line, "✅ Paso inicial registrado");
        return Ok(Line::Parsed(step, Some(current)));
    };

    let step = match transition_residual(&reference.diff, &current.diff)? {
        None => accepted(step_index, line, "✅ Paso correcto"),
        Some(residual) => {
            debug!(step_index, %residual, "step rejected");
            let detail = explain(reference, &current, &residual, unknown)?;
            rejected(step_index, line, "❌ Este paso tiene un error", Some(detail))
        },
    };
    Ok(Line::Parsed(step, Some(current)))
}

/// If the line assigns a value to the unknown, as in `x = 3` or `3 = x`, returns the value.
fn assigned_value(reference: &Reference, unknown: &str) -> Option<SymExpr> {
    let (lhs, rhs) = (&reference.lhs, &reference.rhs);
    if lhs.as_symbol() == Some(unknown) && !rhs.contains_symbol(unknown) {
        Some(rhs.clone())
    } else if rhs.as_symbol() == Some(unknown) && !lhs.contains_symbol(unknown) {
        Some(lhs.clone())
    } else {
        None
    }
}

/// Verifies every non-blank line of the derivation.
///
/// One [`StepResult`] is returned per line. Only resource limits are returned as errors. If the
/// unknown is not a valid symbol name, the lines are still checked, but no final solutions are
/// reported.
pub fn verify_process(text: &str, unknown: &str) -> Result<ProcessResult, Error> {
    let unknown = match parse_symbol_name(unknown) {
        Ok(unknown) => Some(unknown),
        Err(err) => {
            recover(err)?;
            None
        },
    };

    let mut steps = Vec::new();
    let mut final_solutions: Vec<String> = Vec::new();
    let mut solution_values: Vec<SymExpr> = Vec::new();
    let mut reference: Option<Reference> = None;

    let lines = text.lines().map(str::trim).filter(|line| !line.is_empty());
    for (idx, line) in lines.enumerate() {
        match check_line(idx + 1, line, reference.as_ref(), unknown.as_deref())? {
            Line::Malformed(step) => steps.push(step),
            Line::Parsed(step, current) => {
                if let (true, Some(current), Some(unknown)) = (step.correct, &current, &unknown) {
                    if let Some(value) = assigned_value(current, unknown) {
                        if !contains_equivalent(&solution_values, &value)? {
                            final_solutions.push(value.to_string());
                            solution_values.push(value);
                        }
                    }
                }
                if current.is_some() {
                    reference = current;
                }
                steps.push(step);
            },
        }
    }

    let failures = steps.iter().filter(|step| !step.correct).count();
    let all_correct = !steps.is_empty() && failures == 0;
    let summary = if steps.is_empty() {
        "⚠️ No se ingresaron pasos".to_owned()
    } else if all_correct {
        "✅ Todo el proceso es correcto".to_owned()
    } else {
        format!("❌ Hay errores en el proceso ({} paso(s) con error)", failures)
    };
    debug!(lines = steps.len(), failures, "process verified");

    Ok(ProcessResult {
        all_correct,
        summary,
        steps,
        final_solutions,
    })
}

#[cfg(test)]
mod tests {
    use mathcheck_error::ErrorClass;
    use pretty_assertions::assert_eq;
    use super::*;

    fn verdicts(text: &str) -> Vec<bool> {
        verify_process(text, "x").unwrap().steps.iter().map(|step| step.correct).collect()
    }

    #[test]
    fn correct_derivation() {
        let result = verify_process("2*x + 4 = 10\n2*x = 10 - 4\n2*x = 6\nx = 3", "x").unwrap();
        assert!(result.all_correct);
        assert_eq!(result.summary, "✅ Todo el proceso es correcto");
        assert_eq!(result.final_solutions, vec!["3"]);
        assert_eq!(result.steps[0].message, "✅ Paso inicial registrado");
        assert_eq!(result.steps[3], StepResult {
            step_index: 4,
            raw_line: "x = 3".to_owned(),
            correct: true,
            message: "✅ Paso correcto".to_owned(),
            detail: None,
        });
    }

    #[test]
    fn wrong_step() {
        let result = verify_process("2*x + 4 = 10\n2*x = 10 - 4\n2*x = 7\nx = 7/2", "x").unwrap();
        assert_eq!(result.steps.iter().map(|step| step.correct).collect::<Vec<_>>(), vec![true, true, false, true]);
        assert_eq!(result.summary, "❌ Hay errores en el proceso (1 paso(s) con error)");

        let detail = result.steps[2].detail.as_deref().unwrap();
        assert!(detail.starts_with("El lado derecho cambió incorrectamente. Pusiste '7' pero debería ser equivalente a '6'."));
        assert!(detail.contains("La solución correcta es x = 3."));
    }

    #[test]
    fn scaling_and_moving_terms() {
        assert_eq!(verdicts("x/2 + 1 = 3\nx + 2 = 6\nx = 4"), vec![true, true, true]);
        assert_eq!(verdicts("x^2 = 4\nx^2 - 4 = 0\n(x - 2)(x + 2) = 0"), vec![true, true, true]);
        assert_eq!(verdicts("3 = (x + 1)/2\n6 = x + 1\n5 = x"), vec![true, true, true]);
        assert_eq!(verdicts("1/x = 2\n1 = 2x"), vec![true, false]);
    }

    #[test]
    fn scaling_by_irrational_constants() {
        assert_eq!(verdicts("sqrt(2)*x = 2\nx = sqrt(2)"), vec![true, true]);
        assert_eq!(verdicts("pi*x = 2\nx = 2/pi"), vec![true, true]);
        assert_eq!(verdicts("E*x = 1\nx = 1/E"), vec![true, true]);
        assert_eq!(verdicts("x = 2\nlog(2)*x = 2*log(2)"), vec![true, true]);
        assert_eq!(verdicts("x + sqrt(3) = 0\nsqrt(3)x + 3 = 0"), vec![true, true]);
        assert_eq!(verdicts("2x = pi\nx = pi/2"), vec![true, true]);
        assert_eq!(verdicts("pi*x = 2\nx = 2*pi"), vec![true, false]);
    }

    #[test]
    fn equivalent_solutions_are_listed_once() {
        let result = verify_process("x = 3\nx = 3.0", "x").unwrap();
        assert!(result.all_correct);
        assert_eq!(result.final_solutions, vec!["3"]);

        let result = verify_process("x = 1/2\n2x = 1\nx = 0.5", "x").unwrap();
        assert_eq!(result.final_solutions, vec!["1/2"]);
    }

    #[test]
    fn left_side_changed() {
        let result = verify_process("3x + 1 = 7\n2x = 6", "x").unwrap();
        let detail = result.steps[1].detail.as_deref().unwrap();
        assert!(detail.contains("El término"));
    }

    #[test]
    fn malformed_lines_keep_the_reference() {
        let result = verify_process("2x = 6\n2x + = 6 =\nx = 3", "x").unwrap();
        assert_eq!(result.steps.len(), 3);
        assert_eq!(result.steps[1].message, "⚠️ Formato inválido, usá 'expresión = expresión'");
        assert!(result.steps[2].correct);
        assert!(!result.all_correct);

        let result = verify_process("2x = 6\nlog(( = 2", "x").unwrap();
        assert_eq!(result.steps[1].message, "⚠️ Expresión inválida en este paso");
    }

    #[test]
    fn blank_lines_are_skipped() {
        let result = verify_process("\n  x + 1 = 2  \n\n x = 1\n", "x").unwrap();
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[0].raw_line, "x + 1 = 2");
        assert_eq!(result.steps[1].step_index, 2);
    }

    #[test]
    fn empty_input() {
        let result = verify_process("  \n ", "x").unwrap();
        assert!(!result.all_correct);
        assert_eq!(result.summary, "⚠️ No se ingresaron pasos");
        assert!(result.steps.is_empty());
    }

    #[test]
    fn repeatable() {
        let text = "2*x + 4 = 10\n2*x = 7\nx = 7/2";
        assert_eq!(verify_process(text, "x").unwrap(), verify_process(text, "x").unwrap());
    }

    #[test]
    fn resource_limits_escape() {
        let err = verify_process("(x + 1)^100000 = 0", "x").unwrap_err();
        assert_eq!(err.class(), ErrorClass::ResourceLimit);
    }
}
