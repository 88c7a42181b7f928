//! Errors raised while reducing, evaluating, or solving expressions.
//!
//! None of these errors point at source text: by the time an expression is simplified, the link
//! between a subtree and the characters it came from is gone. They are reported with their
//! message and help only.

use ariadne::Fmt;
use mathcheck_attrs::ErrorKind;
use mathcheck_error::{Error, ErrorClass, EXPR};

/// A division by zero was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = "división por cero",
    help = "el denominador se anula",
)]
pub struct DivisionByZero;

/// The logarithm of a number that is not positive.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("el logaritmo de {} no está definido", value),
    help = "el logaritmo solo está definido para números positivos",
)]
pub struct NonPositiveLogarithm {
    /// The argument of the logarithm.
    pub value: String,
}

/// A logarithm with a base that is not positive, or a base of one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("la base {} no es válida para un logaritmo", base),
    help = "la base de un logaritmo debe ser positiva y distinta de 1",
)]
pub struct InvalidLogBase {
    /// The base of the logarithm.
    pub base: String,
}

/// An even root, or more generally a fractional power with an even denominator, of a negative
/// number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("la raíz par de {} no es un número real", value),
    help = "solo se trabaja con números reales",
)]
pub struct EvenRootOfNegative {
    /// The negative radicand.
    pub value: String,
}

/// The argument of `asin` or `acos` lies outside of `[-1, 1]`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("`{}({})` no está definido", function, value),
    help = format!("el argumento de {} debe estar entre -1 y 1", function.fg(EXPR)),
)]
pub struct InverseTrigOutOfRange {
    /// The name of the function.
    pub function: &'static str,

    /// The argument given.
    pub value: String,
}

/// The tangent at an odd multiple of `pi/2`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("`tan({})` no está definido", value),
    help = "la tangente no está definida en los múltiplos impares de pi/2",
)]
pub struct TangentPole {
    /// The argument given.
    pub value: String,
}

/// An indeterminate form, such as `0*oo` or `oo - oo`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("forma indeterminada: {}", form),
)]
pub struct Indeterminate {
    /// The indeterminate form.
    pub form: &'static str,
}

/// The factorial of a negative integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("el factorial de {} no está definido", value),
    help = "el factorial solo está definido para enteros no negativos",
)]
pub struct NegativeFactorial {
    /// The argument given.
    pub value: String,
}

/// A numeric computation produced a value that is not a real number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Domain,
    message = format!("`{}` no tiene un valor real", expr),
)]
pub struct Undefined {
    /// The expression that was evaluated.
    pub expr: String,
}

/// A numeric evaluation reached a symbol with no value.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Unsupported,
    message = format!("no se puede evaluar numéricamente: la variable `{}` no tiene valor", name),
)]
pub struct FreeSymbol {
    /// The name of the symbol.
    pub name: String,
}

/// A numeric evaluation of a function at a point where no numeric method is implemented.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Unsupported,
    message = format!("no se puede evaluar `{}` numéricamente", expr),
)]
pub struct CannotEvaluate {
    /// The expression that was evaluated.
    pub expr: String,
}

/// No solving strategy applies to the equation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = Unsupported,
    message = format!("no se encontró un método para resolver `{} = 0`", expr),
)]
pub struct NoMethod {
    /// The expression being solved.
    pub expr: String,
}

/// Expanding a product would create too many terms.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = ResourceLimit,
    message = format!("la expansión generaría demasiados términos (máximo {})", max),
)]
pub struct ExpansionTooLarge {
    /// The maximum number of terms.
    pub max: usize,
}

/// An exact power would produce a number that is too large.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = ResourceLimit,
    message = format!("la potencia exacta es demasiado grande (máximo {} bits)", max),
)]
pub struct PowerTooLarge {
    /// The maximum size of the result, in bits.
    pub max: u64,
}

/// An exact factorial would be too large.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = ResourceLimit,
    message = format!("el factorial de {} es demasiado grande (máximo {})", value, max),
)]
pub struct FactorialTooLarge {
    /// The argument given.
    pub value: String,

    /// The largest argument allowed.
    pub max: u32,
}

/// The simplifier did not reach a fixed point within its pass budget.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = ResourceLimit,
    message = format!("la simplificación no terminó en {} pasadas", max),
)]
pub struct TooManyPasses {
    /// The maximum number of passes.
    pub max: usize,
}

/// Splits errors into the ones an operation answers with a negative result, returned in `Ok`, and
/// resource limits, returned in `Err` so that they can be propagated with `?`.
///
/// ```
/// use mathcheck_compute::error::{recover, DivisionByZero, TooManyPasses};
/// use mathcheck_error::Error;
///
/// assert!(recover(Error::unspanned(DivisionByZero)).is_ok());
/// assert!(recover(Error::unspanned(TooManyPasses { max: 10 })).is_err());
/// ```
pub fn recover(err: Error) -> Result<Error, Error> {
    if err.is(ErrorClass::ResourceLimit) {
        Err(err)
    } else {
        Ok(err)
    }
}
