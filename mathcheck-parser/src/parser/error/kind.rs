//! The kinds of errors the parser can report.
//!
//! Messages are addressed to the person who typed the expression, so they are written in Spanish
//! like the rest of the service's answers.

use ariadne::Fmt;
use mathcheck_attrs::ErrorKind;
use mathcheck_error::EXPR;
use crate::tokenizer::TokenKind;

/// An intentionally useless error. This should only be used for errors that are immediately
/// recovered from, as it contains no useful information.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "error interno del analizador",
    labels = ["aquí"],
    help = "este error nunca debería mostrarse",
)]
pub struct NonFatal;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "la expresión terminó de forma inesperada",
    labels = [format!("quizás falta una {} aquí", "expresión".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "no se pudo interpretar el resto de la expresión",
    labels = ["a partir de aquí"],
    help = "si querías multiplicar, usá `*` entre los factores",
)]
pub struct ExpectedEof;

/// The text contained nothing but whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "la expresión está vacía",
    labels = [""],
)]
pub struct EmptyExpression;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "símbolo inesperado",
    labels = [format!("se esperaba uno de: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("se encontró {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A character outside of the expression alphabet was used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("carácter no válido: `{}`", character),
    labels = ["este carácter no forma parte de una expresión"],
    help = format!("se admiten números, variables, funciones, paréntesis y los operadores {}", "+ - * / ^ ** !".fg(EXPR)),
)]
pub struct InvalidCharacter {
    /// The offending character.
    pub character: String,
}

/// A parenthesis was not closed, or a closing parenthesis has no matching opening one.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if *opening { "paréntesis sin cerrar" } else { "paréntesis de cierre sin abrir" },
    labels = [if *opening { "este paréntesis nunca se cierra" } else { "este paréntesis no tiene pareja" }],
    help = if *opening {
        format!("agregá un {} al final", ")".fg(EXPR))
    } else {
        format!("quitá el {} o agregá el {} que falta", ")".fg(EXPR), "(".fg(EXPR))
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the unpaired parenthesis was an opening parenthesis `(`. Otherwise, it was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// A name followed by `(` does not refer to a known function.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("función desconocida: `{}`", name),
    labels = ["esta función no existe"],
    help = match suggestion {
        Some(suggestion) => format!("¿quisiste decir {}?", suggestion.fg(EXPR)),
        None => format!("para multiplicar por un paréntesis, escribí {}", format!("{}*(...)", name).fg(EXPR)),
    },
)]
pub struct UnknownFunction {
    /// The name that was used.
    pub name: String,

    /// The closest known function name, if any is close enough.
    pub suggestion: Option<&'static str>,
}

/// A function was called with the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("la función `{}` recibe {} argumento(s), pero se le pasaron {}", name, expected, given),
    labels = ["en esta llamada"],
)]
pub struct WrongArgumentCount {
    /// The name of the function.
    pub name: String,

    /// The accepted number of arguments, such as `1` or `1 o 2`.
    pub expected: String,

    /// The number of arguments given.
    pub given: usize,
}

/// An equation line has no `=`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "falta el signo `=`",
    labels = [""],
    help = format!("usá el formato {}", "expresión = expresión".fg(EXPR)),
)]
pub struct MissingEquals;

/// An equation line has more than one `=`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "hay más de un signo `=`",
    labels = ["este signo sobra"],
    help = format!("usá el formato {}", "expresión = expresión".fg(EXPR)),
)]
pub struct TooManyEquals;

/// One side of an equation is empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("el lado {} de la ecuación está vacío", if *right { "derecho" } else { "izquierdo" }),
    labels = ["junto a este signo"],
    help = format!("usá el formato {}", "expresión = expresión".fg(EXPR)),
)]
pub struct EmptySide {
    /// Whether the right-hand side is the empty one. Otherwise, it is the left-hand side.
    pub right: bool,
}

/// The text given as the name of a variable is not a single symbol.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` no es un nombre de variable válido", name),
    labels = [""],
    help = "un nombre de variable empieza con una letra, como `x` o `theta`",
)]
pub struct InvalidSymbolName {
    /// The text that was given.
    pub name: String,
}

/// The source text is longer than allowed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = ResourceLimit,
    message = format!("la expresión es demasiado larga ({} bytes, máximo {})", len, max),
    labels = [""],
)]
pub struct InputTooLong {
    /// The length of the source, in bytes.
    pub len: usize,

    /// The maximum length allowed.
    pub max: usize,
}

/// The expression is nested too deeply.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    class = ResourceLimit,
    message = format!("la expresión está anidada demasiado profundo (máximo {} niveles)", max),
    labels = ["aquí se supera el límite"],
)]
pub struct NestingTooDeep {
    /// The maximum nesting depth allowed.
    pub max: usize,
}

/// A function name was used without an argument list.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("la función `{}` necesita argumentos entre paréntesis", name),
    labels = ["esta función"],
    help = format!("por ejemplo: {}", format!("{}(x)", name).fg(EXPR)),
)]
pub struct MissingArguments {
    /// The name of the function.
    pub name: String,
}
