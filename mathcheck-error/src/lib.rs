//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`ErrorClass`] taxonomy every error belongs to.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug}, io, ops::Range};

// allows `#[derive(ErrorKind)]` to refer to this crate by name in this crate's own tests
extern crate self as mathcheck_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad category an error belongs to.
///
/// Every layer of the engine recovers from its own errors and turns them into a structured
/// negative answer, with the exception of [`ErrorClass::ResourceLimit`], which the HTTP layer is
/// allowed to surface as a service-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The input text could not be parsed.
    Syntax,

    /// An operation was applied outside of its domain, such as division by zero.
    Domain,

    /// The construct or solving strategy is not implemented.
    Unsupported,

    /// The input exceeds a recursion or size budget.
    ResourceLimit,

    /// The service could not be reached. Only produced by clients of the service.
    Transport,
}

impl ErrorClass {
    /// Returns the machine-readable name of the class.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Syntax => "sintaxis",
            Self::Domain => "dominio",
            Self::Unsupported => "no_soportado",
            Self::ResourceLimit => "limite_de_recursos",
            Self::Transport => "transporte",
        }
    }
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually implemented with `#[derive(ErrorKind)]` from the `mathcheck-attrs`
/// crate.
pub trait ErrorKind: Debug + Send + Sync {
    /// Returns `self` as [`Any`], so that callers can inspect the concrete error.
    fn as_any(&self) -> &dyn Any;

    /// The class of the error.
    fn class(&self) -> ErrorClass;

    /// A plain-text, single-line description of the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not associated with any region of source code.
    pub fn unspanned(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the class of the error.
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Returns a plain-text description of the error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Returns true if the error is of the given class.
    pub fn is(&self, class: ErrorClass) -> bool {
        self.class() == class
    }

    /// Returns a reference to the concrete error kind, if it is of type `T`.
    pub fn downcast_ref<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report of this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        self.build_report(src_id).eprint((src_id, Source::from(input)))
    }

    /// Writes the report of this error into a byte buffer.
    pub fn write_report(&self, src_id: &str, input: &str, out: &mut Vec<u8>) -> io::Result<()> {
        self.build_report(src_id).write((src_id, Source::from(input)), out)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use mathcheck_attrs::ErrorKind;
    use pretty_assertions::assert_eq;
    use super::*;

    #[derive(Debug, ErrorKind)]
    #[error(
        class = Domain,
        message = format!("cannot take the logarithm of {}", value),
        labels = ["this argument is not positive"],
        help = "the logarithm is only defined for positive numbers",
    )]
    struct NonPositiveLog {
        value: i32,
    }

    #[derive(Debug, ErrorKind)]
    #[error(message = "unexpected end of file")]
    struct Eof;

    #[test]
    fn derived_message_and_class() {
        let err = Error::new(vec![4..6], NonPositiveLog { value: -3 });
        assert_eq!(err.class(), ErrorClass::Domain);
        assert_eq!(err.message(), "cannot take the logarithm of -3");
        assert_eq!(err.to_string(), "cannot take the logarithm of -3");
        assert!(err.downcast_ref::<NonPositiveLog>().is_some());
        assert!(err.downcast_ref::<Eof>().is_none());
    }

    #[test]
    fn default_class_is_syntax() {
        let err = Error::unspanned(Eof);
        assert!(err.is(ErrorClass::Syntax));
    }

    #[test]
    fn report_mentions_message() {
        let input = "log(-3)";
        let err = Error::new(vec![4..6], NonPositiveLog { value: -3 });
        let mut out = Vec::new();
        err.write_report("input", input, &mut out).unwrap();

        let plain = String::from_utf8(strip_ansi_escapes::strip(out)).unwrap();
        assert!(plain.contains("cannot take the logarithm of -3"));
        assert!(plain.contains("this argument is not positive"));
    }
}
