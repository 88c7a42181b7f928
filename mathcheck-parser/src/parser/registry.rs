//! The fixed set of functions that may be called in an expression.

use levenshtein::levenshtein;

/// A function that can be called in an expression, along with the number of arguments it
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSpec {
    /// The name of the function.
    pub name: &'static str,

    /// The minimum number of arguments.
    pub min_args: usize,

    /// The maximum number of arguments.
    pub max_args: usize,
}

impl FunctionSpec {
    const fn unary(name: &'static str) -> Self {
        Self { name, min_args: 1, max_args: 1 }
    }

    /// Returns true if the function accepts the given number of arguments.
    pub fn accepts(&self, count: usize) -> bool {
        (self.min_args..=self.max_args).contains(&count)
    }

    /// Describes the accepted number of arguments, such as `1` or `1 o 2`.
    pub fn arity(&self) -> String {
        if self.min_args == self.max_args {
            self.min_args.to_string()
        } else {
            format!("{} o {}", self.min_args, self.max_args)
        }
    }
}

/// Every function known to the parser.
///
/// `log` takes an optional base as its second argument; `root(x, n)` is the `n`th root of `x`.
pub static FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec::unary("sqrt"),
    FunctionSpec { name: "root", min_args: 2, max_args: 2 },
    FunctionSpec { name: "log", min_args: 1, max_args: 2 },
    FunctionSpec::unary("ln"),
    FunctionSpec::unary("exp"),
    FunctionSpec::unary("sin"),
    FunctionSpec::unary("cos"),
    FunctionSpec::unary("tan"),
    FunctionSpec::unary("asin"),
    FunctionSpec::unary("acos"),
    FunctionSpec::unary("atan"),
    FunctionSpec::unary("abs"),
    FunctionSpec::unary("factorial"),
];

/// Returns the function with the given name, if it exists.
pub fn lookup(name: &str) -> Option<&'static FunctionSpec> {
    FUNCTIONS.iter().find(|spec| spec.name == name)
}

/// Returns the name of the known function closest to the given name, if one is close enough to
/// be a plausible typo.
pub fn suggest(name: &str) -> Option<&'static str> {
    FUNCTIONS.iter()
        .map(|spec| (spec.name, levenshtein(name, spec.name)))
        .filter(|(_, distance)| *distance <= 2 && *distance < name.len())
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}
