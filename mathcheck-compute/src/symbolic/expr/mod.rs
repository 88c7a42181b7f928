//! Simplified representation of an expression, used for symbolic manipulation.
//!
//! The [`SymExpr`] type is a flattened version of the parser's abstract syntax tree. Chains of
//! additions and multiplications become a single [`SymExpr::Add`] or [`SymExpr::Mul`] node with
//! any number of operands, subtraction becomes addition of a negated term, and division becomes
//! multiplication by a power of `-1`. The handful of functions that are really powers (`sqrt`,
//! `root`, `exp`) are rewritten as powers as well, so that the simplifier only has one shape to
//! deal with.
//!
//! # Strict equality
//!
//! [`SymExpr`] implements [`PartialEq`] with **strict equality**: two expressions are equal only
//! if they have the same shape. The operands of [`SymExpr::Add`] and [`SymExpr::Mul`] may appear
//! in any order, but nothing else is normalized. `x + x` is not strictly equal to `2*x`, even
//! though they are mathematically equivalent. Simplify both sides first to compare the meaning of
//! two expressions.

mod display;
mod order;

use mathcheck_parser::parser::{
    ast::{Binary, Call, Expr as AstExpr, Literal, Unary},
    token::op::{BinOpKind, UnaryOpKind},
};
use rug::{Float, Integer, Rational};
use std::{collections::BTreeSet, ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub}, slice};
use crate::primitive::{float, float_from_str, int_from_str};

pub use display::format_float;
pub use order::{cmp_expr, cmp_factors, cmp_terms, degree};

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Constant {
    /// The ratio of a circle's circumference to its diameter.
    Pi,

    /// Euler's number, the base of the natural logarithm.
    E,

    /// Positive infinity. Negative infinity is represented as `-1*oo`.
    Infinity,
}

impl Constant {
    /// Returns the constant with the given name, as it would be typed by the user.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "E" => Some(Self::E),
            "oo" => Some(Self::Infinity),
            _ => None,
        }
    }

    /// Returns the name of the constant, which is also how it is printed.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "pi",
            Self::E => "E",
            Self::Infinity => "oo",
        }
    }

    /// Returns the numerical value of the constant.
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
            Self::Infinity => f64::INFINITY,
        }
    }
}

/// A single term or factor.
#[derive(Debug, Clone)]
pub enum Primary {
    /// An exact rational number. Integers are rationals with a denominator of one.
    Number(Rational),

    /// A floating-point number, produced by decimal literals.
    Float(Float),

    /// A variable.
    Symbol(String),

    /// A named constant, such as `pi`.
    Const(Constant),

    /// A call to a function that has no simpler representation, such as `sin(x)` or `log(x)`.
    Call(String, Vec<SymExpr>),
}

impl PartialEq for Primary {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Primary::Number(lhs), Primary::Number(rhs)) => lhs == rhs,
            (Primary::Float(lhs), Primary::Float(rhs)) => lhs == rhs,
            (Primary::Symbol(lhs), Primary::Symbol(rhs)) => lhs == rhs,
            (Primary::Const(lhs), Primary::Const(rhs)) => lhs == rhs,
            (Primary::Call(lhs_name, lhs_args), Primary::Call(rhs_name, rhs_args)) => {
                lhs_name == rhs_name && lhs_args == rhs_args
            },
            _ => false,
        }
    }
}

/// A symbolic expression.
#[derive(Debug, Clone)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

/// Returns true if both slices contain the same operands, in any order.
fn same_operands(lhs: &[SymExpr], rhs: &[SymExpr]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut used = vec![false; rhs.len()];
    lhs.iter().all(|item| {
        let found = rhs.iter()
            .enumerate()
            .find(|(idx, candidate)| !used[*idx] && *candidate == item)
            .map(|(idx, _)| idx);
        match found {
            Some(idx) => {
                used[idx] = true;
                true
            },
            None => false,
        }
    })
}

impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SymExpr::Primary(lhs), SymExpr::Primary(rhs)) => lhs == rhs,
            (SymExpr::Add(lhs), SymExpr::Add(rhs))
                | (SymExpr::Mul(lhs), SymExpr::Mul(rhs)) => same_operands(lhs, rhs),
            (SymExpr::Exp(lhs_base, lhs_exp), SymExpr::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl Default for SymExpr {
    fn default() -> Self {
        Self::zero()
    }
}

impl SymExpr {
    /// Creates an exact integer.
    pub fn int<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        Self::number(Rational::from(Integer::from(n)))
    }

    /// Creates an exact rational number.
    pub fn number(n: Rational) -> Self {
        Self::Primary(Primary::Number(n))
    }

    /// Creates the exact fraction `numer / denom`. The denominator must not be zero.
    pub fn fraction(numer: i64, denom: i64) -> Self {
        Self::number(Rational::from((numer, denom)))
    }

    /// Creates a floating-point number.
    pub fn float(n: f64) -> Self {
        Self::Primary(Primary::Float(float(n)))
    }

    /// Creates a variable.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Primary(Primary::Symbol(name.into()))
    }

    /// Creates a named constant.
    pub fn constant(constant: Constant) -> Self {
        Self::Primary(Primary::Const(constant))
    }

    /// Creates a function call.
    pub fn call(name: impl Into<String>, args: Vec<SymExpr>) -> Self {
        Self::Primary(Primary::Call(name.into(), args))
    }

    /// The number zero.
    pub fn zero() -> Self {
        Self::int(0)
    }

    /// The number one.
    pub fn one() -> Self {
        Self::int(1)
    }

    /// Raises this expression to the given power.
    pub fn pow(self, exp: SymExpr) -> Self {
        Self::Exp(Box::new(self), Box::new(exp))
    }

    /// Returns `1 / self`.
    pub fn recip(self) -> Self {
        self.pow(Self::int(-1))
    }

    /// Returns the square root of this expression.
    pub fn sqrt(self) -> Self {
        self.pow(Self::fraction(1, 2))
    }

    /// If the expression is an exact number, returns it.
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is an exact integer, returns it.
    pub fn as_integer(&self) -> Option<&Integer> {
        self.as_number()
            .filter(|n| *n.denom() == 1)
            .map(Rational::numer)
    }

    /// If the expression is a floating-point number, returns it.
    pub fn as_float(&self) -> Option<&Float> {
        match self {
            Self::Primary(Primary::Float(n)) => Some(n),
            _ => None,
        }
    }

    /// If the expression is a variable, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(name)) => Some(name),
            _ => None,
        }
    }

    /// If the expression is a named constant, returns it.
    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Self::Primary(Primary::Const(constant)) => Some(*constant),
            _ => None,
        }
    }

    /// If the expression is a call to a function, returns its name and arguments.
    pub fn as_call(&self) -> Option<(&str, &[SymExpr])> {
        match self {
            Self::Primary(Primary::Call(name, args)) => Some((name, args)),
            _ => None,
        }
    }

    /// Returns true if the expression is an exact number or a floating-point number.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Primary(Primary::Number(_) | Primary::Float(_)))
    }

    /// If the expression is numeric, returns its value as an [`f64`].
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Self::Primary(Primary::Number(n)) => Some(n.to_f64()),
            Self::Primary(Primary::Float(n)) => Some(n.to_f64()),
            _ => None,
        }
    }

    /// Returns true if the expression is a numeric zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Primary(Primary::Number(n)) => *n == 0,
            Self::Primary(Primary::Float(n)) => n.is_zero(),
            _ => false,
        }
    }

    /// Returns true if the expression is the exact number one.
    pub fn is_one(&self) -> bool {
        self.as_number().map_or(false, |n| *n == 1)
    }

    /// Returns true if the expression is a negative exact number.
    pub fn is_negative_number(&self) -> bool {
        self.as_number().map_or(false, |n| *n < 0)
    }

    /// If the expression is positive or negative infinity, returns its sign.
    pub fn infinity_sign(&self) -> Option<i32> {
        match self {
            Self::Primary(Primary::Const(Constant::Infinity)) => Some(1),
            Self::Mul(factors) if factors.len() == 2 => {
                let has_infinity = factors.iter().any(|f| f.as_constant() == Some(Constant::Infinity));
                let sign = factors.iter().find_map(SymExpr::numeric_value)?;
                (has_infinity && sign != 0.0).then(|| if sign > 0.0 { 1 } else { -1 })
            },
            _ => None,
        }
    }

    /// Returns the terms of the expression: the operands of a [`SymExpr::Add`], or the expression
    /// itself.
    pub fn terms(&self) -> &[SymExpr] {
        match self {
            Self::Add(terms) => terms,
            expr => slice::from_ref(expr),
        }
    }

    /// Returns the factors of the expression: the operands of a [`SymExpr::Mul`], or the
    /// expression itself.
    pub fn factors(&self) -> &[SymExpr] {
        match self {
            Self::Mul(factors) => factors,
            expr => slice::from_ref(expr),
        }
    }

    /// Splits the expression into its numeric coefficient and the rest of the expression.
    ///
    /// - `3*x*y` -> `(3, x*y)`
    /// - `x` -> `(1, x)`
    /// - `5` -> `(5, 1)`
    pub fn split_coeff(&self) -> (SymExpr, SymExpr) {
        match self {
            Self::Primary(Primary::Number(_) | Primary::Float(_)) => (self.clone(), Self::one()),
            Self::Mul(factors) => {
                match factors.iter().position(SymExpr::is_numeric) {
                    Some(idx) => {
                        let mut rest = factors.clone();
                        let coeff = rest.remove(idx);
                        (coeff, Self::Mul(rest).downgrade())
                    },
                    None => (Self::one(), self.clone()),
                }
            },
            _ => (Self::one(), self.clone()),
        }
    }

    /// Splits the expression into a base and an exponent. Expressions that are not powers have an
    /// exponent of one.
    pub fn base_exp(&self) -> (&SymExpr, SymExpr) {
        match self {
            Self::Exp(base, exp) => (base, (**exp).clone()),
            expr => (expr, Self::one()),
        }
    }

    /// Returns true if the expression is a factor of a denominator, that is, a power with a
    /// negative numeric exponent.
    pub fn is_reciprocal(&self) -> bool {
        match self {
            Self::Exp(_, exp) => exp.numeric_value().map_or(false, |n| n < 0.0),
            _ => false,
        }
    }

    /// Applies the given function to every direct child of the expression, in order.
    pub fn for_each_child<'a>(&'a self, mut f: impl FnMut(&'a SymExpr)) {
        match self {
            Self::Primary(Primary::Call(_, args)) => args.iter().for_each(f),
            Self::Primary(_) => {},
            Self::Add(items) | Self::Mul(items) => items.iter().for_each(f),
            Self::Exp(base, exp) => {
                f(base);
                f(exp);
            },
        }
    }

    /// Returns true if any node of the expression satisfies the predicate.
    pub fn any(&self, predicate: &impl Fn(&SymExpr) -> bool) -> bool {
        if predicate(self) {
            return true;
        }

        let mut found = false;
        self.for_each_child(|child| found = found || child.any(predicate));
        found
    }

    /// Returns true if the expression mentions the variable with the given name.
    pub fn contains_symbol(&self, name: &str) -> bool {
        self.any(&|expr| expr.as_symbol() == Some(name))
    }

    /// Returns true if the expression contains a floating-point number.
    pub fn contains_float(&self) -> bool {
        self.any(&|expr| expr.as_float().is_some())
    }

    /// Returns true if the expression contains no variables.
    pub fn is_closed(&self) -> bool {
        !self.any(&|expr| expr.as_symbol().is_some())
    }

    /// Returns the names of every variable in the expression, in sorted order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        fn collect(expr: &SymExpr, out: &mut BTreeSet<String>) {
            if let Some(name) = expr.as_symbol() {
                out.insert(name.to_owned());
            }
            expr.for_each_child(|child| collect(child, out));
        }

        let mut out = BTreeSet::new();
        collect(self, &mut out);
        out
    }

    /// Replaces every occurrence of the variable with the given name by the given value.
    pub fn substitute(&self, name: &str, value: &SymExpr) -> SymExpr {
        match self {
            Self::Primary(Primary::Symbol(symbol)) if symbol == name => value.clone(),
            Self::Primary(Primary::Call(func, args)) => Self::call(
                func.clone(),
                args.iter().map(|arg| arg.substitute(name, value)).collect(),
            ),
            Self::Primary(_) => self.clone(),
            Self::Add(terms) => Self::Add(terms.iter().map(|term| term.substitute(name, value)).collect()),
            Self::Mul(factors) => Self::Mul(factors.iter().map(|factor| factor.substitute(name, value)).collect()),
            Self::Exp(base, exp) => base.substitute(name, value).pow(exp.substitute(name, value)),
        }
    }

    /// If this expression is a [`SymExpr::Add`] or [`SymExpr::Mul`] with zero or one operand,
    /// returns the simplest equivalent expression. An empty sum is `0`, an empty product is `1`,
    /// and a single operand is returned as-is.
    pub fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => match terms.len() {
                0 => Self::zero(),
                1 => terms.swap_remove(0),
                _ => Self::Add(terms),
            },
            Self::Mul(mut factors) => match factors.len() {
                0 => Self::one(),
                1 => factors.swap_remove(0),
                _ => Self::Mul(factors),
            },
            expr => expr,
        }
    }
}

/// Collects the operands of a left-leaning chain of binary operators of the same family.
///
/// Long sums such as `1 + 1 + ... + 1` produce very deep trees on their left side. The chain is
/// walked with a loop instead of recursion, so that only the right operands, whose depth is
/// bounded by the parser, are converted recursively.
fn collect_chain<'a>(
    mut expr: &'a AstExpr,
    in_family: impl Fn(BinOpKind) -> bool,
) -> (&'a AstExpr, Vec<(BinOpKind, &'a AstExpr)>) {
    let mut rhs_chain = Vec::new();
    while let AstExpr::Binary(Binary { lhs, op, rhs, .. }) = expr {
        if !in_family(op.kind) {
            break;
        }
        rhs_chain.push((op.kind, &**rhs));
        expr = lhs;
    }
    rhs_chain.reverse();
    (expr, rhs_chain)
}

fn convert_call(call: &Call) -> SymExpr {
    let mut args = call.args.iter().map(SymExpr::from).collect::<Vec<_>>();
    match (call.name.name.as_str(), args.len()) {
        ("sqrt", 1) => args.swap_remove(0).sqrt(),
        ("root", 2) => {
            let degree = args.swap_remove(1);
            args.swap_remove(0).pow(degree.recip())
        },
        ("exp", 1) => SymExpr::constant(Constant::E).pow(args.swap_remove(0)),
        ("ln", 1) => SymExpr::call("log", args),
        (name, _) => SymExpr::call(name, args),
    }
}

impl From<&AstExpr> for SymExpr {
    fn from(expr: &AstExpr) -> Self {
        match expr {
            AstExpr::Literal(Literal::Integer(int)) => Self::number(Rational::from(int_from_str(&int.value))),
            AstExpr::Literal(Literal::Float(f)) => Self::Primary(Primary::Float(float_from_str(&f.value))),
            AstExpr::Literal(Literal::Symbol(sym)) => match Constant::from_name(&sym.name) {
                Some(constant) => Self::constant(constant),
                None => Self::symbol(sym.name.clone()),
            },
            AstExpr::Paren(paren) => Self::from(&*paren.expr),
            AstExpr::Call(call) => convert_call(call),
            AstExpr::Unary(Unary { operand, op, .. }) => {
                let operand = Self::from(&**operand);
                match op.kind {
                    UnaryOpKind::Neg => -operand,
                    UnaryOpKind::Pos => operand,
                    UnaryOpKind::Factorial => Self::call("factorial", vec![operand]),
                }
            },
            AstExpr::Binary(Binary { lhs, op, rhs, .. }) => match op.kind {
                BinOpKind::Add | BinOpKind::Sub => {
                    let (first, rest) = collect_chain(expr, |kind| matches!(kind, BinOpKind::Add | BinOpKind::Sub));
                    rest.into_iter().fold(Self::from(first), |sum, (kind, term)| {
                        let term = Self::from(term);
                        if kind == BinOpKind::Sub { sum - term } else { sum + term }
                    })
                },
                BinOpKind::Mul | BinOpKind::Div => {
                    let (first, rest) = collect_chain(expr, |kind| matches!(kind, BinOpKind::Mul | BinOpKind::Div));
                    rest.into_iter().fold(Self::from(first), |product, (kind, factor)| {
                        let factor = Self::from(factor);
                        if kind == BinOpKind::Div { product * factor.recip() } else { product * factor }
                    })
                },
                BinOpKind::Exp => Self::from(&**lhs).pow(Self::from(&**rhs)),
            },
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        Self::from(&expr)
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are [`SymExpr::Add`], in which case the terms are combined into a single
/// [`SymExpr::Add`].
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Add(mut lhs), Self::Add(rhs)) => {
                lhs.extend(rhs);
                Self::Add(lhs)
            },
            (Self::Add(mut terms), other) => {
                terms.push(other);
                Self::Add(terms)
            },
            (other, Self::Add(mut terms)) => {
                terms.insert(0, other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        *self = std::mem::take(self) + rhs;
    }
}

impl Sub for SymExpr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are [`SymExpr::Mul`], in which case the factors are combined into a single
/// [`SymExpr::Mul`].
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Mul(mut lhs), Self::Mul(rhs)) => {
                lhs.extend(rhs);
                Self::Mul(lhs)
            },
            (Self::Mul(mut factors), other) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (other, Self::Mul(mut factors)) => {
                factors.insert(0, other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        *self = std::mem::take(self) * rhs;
    }
}

/// Negates a [`SymExpr`]. Numbers are negated directly, a product has its numeric coefficient
/// negated, and anything else is multiplied by `-1`.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Number(n)) => Self::number(-n),
            Self::Primary(Primary::Float(n)) => Self::Primary(Primary::Float(-n)),
            Self::Mul(mut factors) => match factors.iter().position(SymExpr::is_numeric) {
                Some(idx) => {
                    let coeff = -std::mem::take(&mut factors[idx]);
                    if coeff.is_one() {
                        factors.remove(idx);
                    } else {
                        factors[idx] = coeff;
                    }
                    Self::Mul(factors).downgrade()
                },
                None => {
                    factors.insert(0, Self::int(-1));
                    Self::Mul(factors)
                },
            },
            expr => Self::Mul(vec![Self::int(-1), expr]),
        }
    }
}

#[cfg(test)]
mod tests {
    use mathcheck_parser::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(text: &str) -> SymExpr {
        SymExpr::from(parse(text).unwrap())
    }

    #[test]
    fn flatten_sums_and_products() {
        assert_eq!(sym("1 + x + 2"), SymExpr::Add(vec![
            SymExpr::int(1),
            SymExpr::symbol("x"),
            SymExpr::int(2),
        ]));
        assert_eq!(sym("2 * x * y"), SymExpr::Mul(vec![
            SymExpr::int(2),
            SymExpr::symbol("x"),
            SymExpr::symbol("y"),
        ]));
    }

    #[test]
    fn subtraction_and_division() {
        assert_eq!(sym("x - y"), SymExpr::Add(vec![
            SymExpr::symbol("x"),
            SymExpr::Mul(vec![SymExpr::int(-1), SymExpr::symbol("y")]),
        ]));
        assert_eq!(sym("x / 2"), SymExpr::Mul(vec![
            SymExpr::symbol("x"),
            SymExpr::int(2).recip(),
        ]));
    }

    #[test]
    fn negated_literal_is_a_number() {
        assert_eq!(sym("-3"), SymExpr::int(-3));
        assert_eq!(sym("-x^2"), SymExpr::Mul(vec![
            SymExpr::int(-1),
            SymExpr::symbol("x").pow(SymExpr::int(2)),
        ]));
    }

    #[test]
    fn power_like_functions() {
        assert_eq!(sym("sqrt(x)"), SymExpr::symbol("x").pow(SymExpr::fraction(1, 2)));
        assert_eq!(sym("exp(2)"), SymExpr::constant(Constant::E).pow(SymExpr::int(2)));
        assert_eq!(sym("ln(x)"), SymExpr::call("log", vec![SymExpr::symbol("x")]));
        assert_eq!(sym("3!"), SymExpr::call("factorial", vec![SymExpr::int(3)]));
        assert_eq!(sym("root(8, 3)"), SymExpr::int(8).pow(SymExpr::int(3).recip()));
    }

    #[test]
    fn constants() {
        assert_eq!(sym("pi"), SymExpr::constant(Constant::Pi));
        assert_eq!(sym("-oo").infinity_sign(), Some(-1));
        assert_eq!(sym("e"), SymExpr::symbol("e"));
    }

    #[test]
    fn strict_equality_ignores_order() {
        assert_eq!(sym("x + y"), sym("y + x"));
        assert_ne!(sym("x + x"), sym("2*x"));
        assert_ne!(sym("x - y"), sym("y - x"));
    }

    #[test]
    fn long_sums_do_not_recurse() {
        let text = vec!["1"; 1000].join(" + ");
        let expr = sym(&text);
        assert_eq!(expr.terms().len(), 1000);
    }

    #[test]
    fn split_coefficients() {
        assert_eq!(sym("3*x*y").split_coeff(), (SymExpr::int(3), sym("x*y")));
        assert_eq!(sym("x").split_coeff(), (SymExpr::one(), sym("x")));
        assert_eq!(sym("5").split_coeff(), (SymExpr::int(5), SymExpr::one()));
    }

    #[test]
    fn substitution() {
        let expr = sym("x^2 + sin(x)").substitute("x", &sym("y + 1"));
        assert_eq!(expr, sym("(y + 1)^2 + sin(y + 1)"));
        assert!(!expr.contains_symbol("x"));
        assert_eq!(expr.free_symbols().into_iter().collect::<Vec<_>>(), vec!["y".to_owned()]);
    }
}
