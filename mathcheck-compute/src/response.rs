//! The structured answers of every analysis.
//!
//! These types are the wire format of the service: their fields serialize with the Spanish names
//! the client expects, and optional fields are left out of the JSON when they are empty.

use serde::{Deserialize, Serialize};

/// The answer to an equivalence check between two expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Whether both expressions are equivalent.
    #[serde(rename = "correcto")]
    pub correct: bool,

    /// A short verdict for the student.
    #[serde(rename = "mensaje")]
    pub message: String,

    /// The simplified left-hand side.
    #[serde(rename = "resultado_izquierda", default, skip_serializing_if = "Option::is_none")]
    pub left_value: Option<String>,

    /// The simplified right-hand side.
    #[serde(rename = "resultado_derecha", default, skip_serializing_if = "Option::is_none")]
    pub right_value: Option<String>,

    /// The simplified `lhs - rhs`, when the expressions are not equivalent.
    #[serde(rename = "diferencia", default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<String>,
}

impl VerificationResult {
    /// Creates a negative result with only a message, for input that could not be analysed.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            correct: false,
            message: message.into(),
            left_value: None,
            right_value: None,
            difference: None,
        }
    }
}

/// The answer to an equation solving request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Whether at least one solution was found.
    #[serde(rename = "exito")]
    pub success: bool,

    /// A short verdict for the student.
    #[serde(rename = "mensaje")]
    pub message: String,

    /// The solutions, numeric ones first in increasing order, then symbolic ones.
    #[serde(rename = "soluciones", default, skip_serializing_if = "Vec::is_empty")]
    pub solutions: Vec<String>,
}

impl SolveResult {
    /// Creates a negative result with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            solutions: Vec::new(),
        }
    }
}

/// The verdict on one line of a derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    /// The position of the line among the non-blank lines, starting at 1.
    #[serde(rename = "paso")]
    pub step_index: usize,

    /// The line, trimmed.
    #[serde(rename = "linea")]
    pub raw_line: String,

    /// Whether the line is a valid equation that follows from the previous one.
    #[serde(rename = "correcto")]
    pub correct: bool,

    /// A short verdict for the student.
    #[serde(rename = "mensaje")]
    pub message: String,

    /// What went wrong, for rejected lines.
    #[serde(rename = "detalle", default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// The verdict on a whole derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Whether there is at least one line, and every line is correct.
    #[serde(rename = "todos_correctos")]
    pub all_correct: bool,

    /// A short status, including the number of failing steps.
    #[serde(rename = "resumen")]
    pub summary: String,

    /// One entry per non-blank line, in order.
    #[serde(rename = "resultados")]
    pub steps: Vec<StepResult>,

    /// The values assigned to the unknown by lines of the form `x = value`, in first-seen order.
    #[serde(rename = "soluciones_finales", default, skip_serializing_if = "Vec::is_empty")]
    pub final_solutions: Vec<String>,
}

/// The inverse of a function of one variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InverseResult {
    /// Whether an inverse was found.
    #[serde(rename = "exito")]
    pub success: bool,

    /// A short verdict for the student.
    #[serde(rename = "mensaje")]
    pub message: String,

    /// The first branch of the inverse.
    #[serde(rename = "inversa", default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,

    /// Every branch of the inverse, when there is more than one.
    #[serde(rename = "ramas", default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,
}

impl InverseResult {
    /// Creates a negative result with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            inverse: None,
            branches: Vec::new(),
        }
    }
}

/// The result of substituting the variable of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Whether the transformation succeeded.
    #[serde(rename = "exito")]
    pub success: bool,

    /// A short verdict for the student.
    #[serde(rename = "mensaje")]
    pub message: String,

    /// The simplified transformed function.
    #[serde(rename = "resultado", default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl TransformResult {
    /// Creates a negative result with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            result: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use super::*;

    #[test]
    fn spanish_field_names() {
        let result = VerificationResult {
            correct: false,
            message: "❌ La ecuación tiene un error".to_owned(),
            left_value: Some("2*x".to_owned()),
            right_value: Some("x".to_owned()),
            difference: Some("x".to_owned()),
        };
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({
            "correcto": false,
            "mensaje": "❌ La ecuación tiene un error",
            "resultado_izquierda": "2*x",
            "resultado_derecha": "x",
            "diferencia": "x",
        }));
    }

    #[test]
    fn empty_fields_are_omitted() {
        assert_eq!(
            serde_json::to_value(SolveResult::failed("⚠️ No se encontraron soluciones")).unwrap(),
            json!({ "exito": false, "mensaje": "⚠️ No se encontraron soluciones" }),
        );

        let step = StepResult {
            step_index: 1,
            raw_line: "x = 3".to_owned(),
            correct: true,
            message: "✅ Paso inicial registrado".to_owned(),
            detail: None,
        };
        assert_eq!(serde_json::to_value(&step).unwrap(), json!({
            "paso": 1,
            "linea": "x = 3",
            "correcto": true,
            "mensaje": "✅ Paso inicial registrado",
        }));
    }
}
