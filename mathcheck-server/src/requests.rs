//! Request bodies of the analysis endpoints, and the analysis each of them runs.

use mathcheck_compute::{
    analysis::{inverse::inverse, transform::transform},
    check::equivalence::check_equivalent,
    process::verify_process,
    response::{InverseResult, ProcessResult, SolveResult, TransformResult, VerificationResult},
    solve::solve,
};
use mathcheck_error::{Error, ErrorClass};
use mathcheck_parser::parser::{parse_equation_with_limits, parse_with_limits, ParseLimits};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A request body that runs one analysis.
pub trait Analysis: DeserializeOwned {
    /// The response body.
    type Output: Serialize;

    /// Returns every piece of client text that is parsed as an expression or an equation.
    fn texts(&self) -> Vec<&str>;

    /// Runs the analysis. Only resource limits are returned as errors.
    fn run(&self) -> Result<Self::Output, Error>;
}

/// Checks the client text against the configured parser limits, so that the configured limits
/// apply even where they are tighter than the defaults of the analysis.
///
/// Syntax errors are ignored here. The analysis reports them to the client as a negative answer.
pub fn enforce_limits(texts: &[&str], limits: ParseLimits) -> Result<(), Error> {
    for text in texts {
        let result = if text.contains('=') {
            parse_equation_with_limits(text, limits).map(drop)
        } else {
            parse_with_limits(text, limits).map(drop)
        };
        match result {
            Err(err) if err.is(ErrorClass::ResourceLimit) => return Err(err),
            _ => {},
        }
    }
    Ok(())
}

/// `POST /verificar`
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyRequest {
    pub izquierda: String,
    pub derecha: String,
}

impl Analysis for VerifyRequest {
    type Output = VerificationResult;

    fn texts(&self) -> Vec<&str> {
        vec![&self.izquierda, &self.derecha]
    }

    fn run(&self) -> Result<Self::Output, Error> {
        check_equivalent(&self.izquierda, &self.derecha)
    }
}

/// `POST /resolver`
#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    pub ecuacion: String,
    pub incognita: String,
}

impl Analysis for SolveRequest {
    type Output = SolveResult;

    fn texts(&self) -> Vec<&str> {
        vec![&self.ecuacion]
    }

    fn run(&self) -> Result<Self::Output, Error> {
        solve(&self.ecuacion, &self.incognita)
    }
}

/// `POST /verificar-proceso`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    /// The lines of the derivation, separated by newlines.
    pub pasos: String,
    pub incognita: String,
}

impl Analysis for ProcessRequest {
    type Output = ProcessResult;

    fn texts(&self) -> Vec<&str> {
        self.pasos.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
    }

    fn run(&self) -> Result<Self::Output, Error> {
        verify_process(&self.pasos, &self.incognita)
    }
}

/// `POST /inversa`
#[derive(Debug, Clone, Deserialize)]
pub struct InverseRequest {
    pub funcion: String,
    pub variable: String,
}

impl Analysis for InverseRequest {
    type Output = InverseResult;

    fn texts(&self) -> Vec<&str> {
        vec![&self.funcion]
    }

    fn run(&self) -> Result<Self::Output, Error> {
        inverse(&self.funcion, &self.variable)
    }
}

/// `POST /transformar`
#[derive(Debug, Clone, Deserialize)]
pub struct TransformRequest {
    pub funcion: String,
    pub variable: String,
    pub sustitucion: String,
}

impl Analysis for TransformRequest {
    type Output = TransformResult;

    fn texts(&self) -> Vec<&str> {
        vec![&self.funcion, &self.sustitucion]
    }

    fn run(&self) -> Result<Self::Output, Error> {
        transform(&self.funcion, &self.variable, &self.sustitucion)
    }
}

#[cfg(test)]
mod tests {
    use mathcheck_parser::parser::error::kind::{InputTooLong, NestingTooDeep};
    use super::*;

    const TIGHT: ParseLimits = ParseLimits { max_input_len: 16, max_depth: 4 };

    #[test]
    fn limits_reject_deep_and_long_text() {
        let err = enforce_limits(&["((((((x))))))"], TIGHT).unwrap_err();
        assert!(err.downcast_ref::<NestingTooDeep>().is_some());

        let err = enforce_limits(&["x = 1 + 2 + 3 + 4 + 5"], TIGHT).unwrap_err();
        assert!(err.downcast_ref::<InputTooLong>().is_some());
    }

    #[test]
    fn limits_ignore_syntax_errors() {
        assert!(enforce_limits(&["log((", "x = = 1", ""], TIGHT).is_ok());
    }

    #[test]
    fn process_texts_are_lines() {
        let request = ProcessRequest {
            pasos: "2x = 6\n\n  x = 3 ".to_owned(),
            incognita: "x".to_owned(),
        };
        assert_eq!(request.texts(), vec!["2x = 6", "x = 3"]);
    }
}
