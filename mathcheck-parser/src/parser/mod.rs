pub mod ast;
pub mod error;
pub mod registry;
pub mod token;

use ast::{equation::Equation, expr::Expr};
use error::{kind, Error};
use mathcheck_error::ErrorKind;
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// Bounds applied while parsing untrusted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// The maximum length of the source, in bytes.
    pub max_input_len: usize,

    /// The maximum nesting depth of operands, counting parentheses, function arguments, unary
    /// operators, and chained powers.
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_input_len: 4096,
            max_depth: 128,
        }
    }
}

/// A high-level parser for algebraic expressions. This is the type to use to parse an arbitrary
/// piece of text into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The length of the source, in bytes.
    source_len: usize,

    /// The current nesting depth.
    depth: usize,

    /// The bounds enforced by this parser.
    limits: ParseLimits,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source, with the default limits.
    pub fn new(source: &'source str) -> Self {
        Self::with_limits(source, ParseLimits::default())
    }

    /// Create a new parser for the given source, with the given limits.
    pub fn with_limits(source: &'source str, limits: ParseLimits) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            source_len: source.len(),
            depth: 0,
            limits,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the previous token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the beginning of the stream.
    pub fn prev_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor.checked_sub(1)?)
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the next non-whitespace token without moving the cursor.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor.min(self.tokens.len())..]
            .iter()
            .find(|token| !token.is_whitespace())
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_whitespace() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(self.error(kind::UnexpectedEof))
    }

    /// Returns the tokens that have not been consumed yet, including whitespace.
    pub fn remaining_tokens(&self) -> &[Token<'source>] {
        &self.tokens[self.cursor.min(self.tokens.len())..]
    }

    /// Returns true if the next non-whitespace token is a name that is immediately followed by an
    /// opening parenthesis, as in `f(`.
    pub fn name_touches_paren(&self) -> bool {
        let mut rest = self.remaining_tokens().iter().skip_while(|token| token.is_whitespace());
        matches!(
            (rest.next().map(|token| token.kind), rest.next().map(|token| token.kind)),
            (Some(TokenKind::Name), Some(TokenKind::OpenParen))
        )
    }

    /// Builds the error describing why parsing stopped before the next non-whitespace token.
    pub fn leftover_error(&self) -> Error {
        match self.peek_token() {
            None => self.error(kind::UnexpectedEof),
            Some(token) => {
                let span = vec![token.span.clone()];
                match token.kind {
                    TokenKind::CloseParen => Error::new(span, kind::UnclosedParenthesis { opening: false }),
                    TokenKind::Symbol => Error::new(span, kind::InvalidCharacter { character: token.lexeme.to_owned() }),
                    _ => Error::new(span, kind::ExpectedEof),
                }
            },
        }
    }

    /// Advances the cursor past any whitespace.
    pub fn skip_whitespace(&mut self) {
        while self.current_token().map_or(false, |token| token.is_whitespace()) {
            self.cursor += 1;
        }
    }

    /// Returns true if only whitespace remains in the stream.
    pub fn at_end(&self) -> bool {
        self.peek_token().is_none()
    }

    /// Runs the given parsing function one nesting level deeper, failing with a resource limit
    /// error if the configured maximum depth is exceeded.
    pub fn nested<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        if self.depth >= self.limits.max_depth {
            return Err(self.error(kind::NestingTooDeep { max: self.limits.max_depth }));
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value. The stream is left unchanged if parsing fails.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Speculatively parses a value from the given stream of tokens, with a validation predicate.
    /// The value must parse successfully, **and** the predicate must return [`Ok`] for this
    /// function to return successfully.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_then<T: Parse, F>(&mut self, predicate: F) -> Result<T, Error>
    where
        F: FnOnce(&T, &Parser) -> Result<(), Error>,
    {
        let start = self.cursor;

        // closure workaround allows us to use `?` in the closure
        let compute = |input: &mut Parser<'source>| {
            let value = T::parse(input)?;
            predicate(&value, input)?;
            Ok(value)
        };

        match compute(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Checks the size of the source against the configured limit, and rejects sources that
    /// contain nothing but whitespace.
    fn check_source(&self) -> Result<(), Error> {
        if self.source_len > self.limits.max_input_len {
            return Err(Error::new(vec![0..self.source_len], kind::InputTooLong {
                len: self.source_len,
                max: self.limits.max_input_len,
            }));
        }

        if self.at_end() {
            return Err(Error::new(vec![0..self.source_len], kind::EmptyExpression));
        }

        Ok(())
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        self.check_source()?;
        let value = T::parse(self)?;
        if self.at_end() {
            Ok(value)
        } else {
            Err(self.leftover_error())
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    ///
    /// This function should be used by consumers of the library.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The associativity of a binary or unary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// The binary / unary operation is left-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `(a op b) op c`. For unary
    /// operations, this means `a op op` is evaluated as `(a op) op` (the operators appear to the
    /// right of the operand).
    Left,

    /// The binary / unary operation is right-associative.
    ///
    /// For binary operations, this means `a op b op c` is evaluated as `a op (b op c)`. For unary
    /// operations, this means `op op a` is evaluated as `op (op a)` (the operators appear to the
    /// left of the operand).
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of unary negation and unary plus.
    Neg,

    /// Precedence of exponentiation (`^` or `**`).
    Exp,

    /// Precedence of factorial (`!`).
    Factorial,
}

impl Precedence {
    /// Returns the precedence one level above this one. Used to parse the right-hand side of a
    /// left-associative operator.
    pub fn next(self) -> Self {
        match self {
            Self::Any => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Neg,
            Self::Neg => Self::Exp,
            Self::Exp | Self::Factorial => Self::Factorial,
        }
    }
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// Parses a complete expression from the given text, with the default limits.
pub fn parse(source: &str) -> Result<Expr, Error> {
    parse_with_limits(source, ParseLimits::default())
}

/// Parses a complete expression from the given text.
pub fn parse_with_limits(source: &str, limits: ParseLimits) -> Result<Expr, Error> {
    Parser::with_limits(source, limits).try_parse_full::<Expr>()
}

/// Parses a single `lhs = rhs` line, with the default limits.
pub fn parse_equation(source: &str) -> Result<Equation, Error> {
    parse_equation_with_limits(source, ParseLimits::default())
}

/// Parses a single `lhs = rhs` line.
pub fn parse_equation_with_limits(source: &str, limits: ParseLimits) -> Result<Equation, Error> {
    Parser::with_limits(source, limits).try_parse_full::<Equation>()
}

/// Validates that the given text is exactly one symbol name, such as the name of an unknown, and
/// returns it trimmed.
pub fn parse_symbol_name(source: &str) -> Result<String, Error> {
    let mut parser = Parser::new(source);
    let valid = match (parser.next_token(), parser.at_end()) {
        (Ok(token), true) if token.kind == TokenKind::Name => Some(token.lexeme.to_owned()),
        _ => None,
    };

    valid.ok_or_else(|| Error::new(vec![0..source.len()], kind::InvalidSymbolName {
        name: source.trim().to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use mathcheck_error::ErrorClass;
    use super::*;

    use ast::{
        binary::Binary,
        call::Call,
        literal::{LitFloat, LitInt, LitSym, Literal},
        paren::Paren,
        unary::Unary,
    };
    use token::op::{BinOp, BinOpKind, UnaryOp, UnaryOpKind};

    fn int(value: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Integer(LitInt { value: value.to_owned(), span }))
    }

    fn sym(name: &str, span: Range<usize>) -> Expr {
        Expr::Literal(Literal::Symbol(LitSym { name: name.to_owned(), span }))
    }

    #[test]
    fn literal_int() {
        let expr = parse("16").unwrap();
        assert_eq!(expr, int("16", 0..2));
    }

    #[test]
    fn literal_float() {
        let expr = parse("3.14").unwrap();
        assert_eq!(expr, Expr::Literal(Literal::Float(LitFloat {
            value: "3.14".to_owned(),
            span: 0..4,
        })));
    }

    #[test]
    fn binary_left_associativity() {
        let expr = parse("3 - 2 - 1").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 0..1)),
                op: BinOp { kind: BinOpKind::Sub, implicit: false, span: 2..3 },
                rhs: Box::new(int("2", 4..5)),
                span: 0..5,
            })),
            op: BinOp { kind: BinOpKind::Sub, implicit: false, span: 6..7 },
            rhs: Box::new(int("1", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_right_associativity() {
        let expr = parse("2^3**4").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 1..2 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("3", 2..3)),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 3..5 },
                rhs: Box::new(int("4", 5..6)),
                span: 2..6,
            })),
            span: 0..6,
        }));
    }

    #[test]
    fn binary_precedence() {
        let expr = parse("1 + 2 * 3").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("1", 0..1)),
            op: BinOp { kind: BinOpKind::Add, implicit: false, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(int("2", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, implicit: false, span: 6..7 },
                rhs: Box::new(int("3", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn negation_applies_to_whole_power() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Binary(Binary {
                lhs: Box::new(sym("x", 1..2)),
                op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 2..3 },
                rhs: Box::new(int("2", 3..4)),
                span: 1..4,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..4,
        }));
    }

    #[test]
    fn signed_exponent() {
        let expr = parse("2^-3").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: BinOp { kind: BinOpKind::Exp, implicit: false, span: 1..2 },
            rhs: Box::new(Expr::Unary(Unary {
                operand: Box::new(int("3", 3..4)),
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 2..3 },
                span: 2..4,
            })),
            span: 0..4,
        }));
    }

    #[test]
    fn negation_binds_tighter_than_product() {
        let expr = parse("-2*x").unwrap();
        assert_eq!(expr.to_string(), "-2 * x");
        let Expr::Binary(binary) = expr else { panic!("expected a product") };
        assert!(matches!(*binary.lhs, Expr::Unary(_)));
    }

    #[test]
    fn factorial_binds_tightest() {
        let expr = parse("-3!").unwrap();
        assert_eq!(expr, Expr::Unary(Unary {
            operand: Box::new(Expr::Unary(Unary {
                operand: Box::new(int("3", 1..2)),
                op: UnaryOp { kind: UnaryOpKind::Factorial, span: 2..3 },
                span: 1..3,
            })),
            op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
            span: 0..3,
        }));
    }

    #[test]
    fn implicit_multiplication() {
        let expr = parse("2x").unwrap();
        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(int("2", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, implicit: true, span: 1..1 },
            rhs: Box::new(sym("x", 1..2)),
            span: 0..2,
        }));
    }

    #[test]
    fn implicit_multiplication_of_groups() {
        let expr = parse("3(x+1)(x-1)").unwrap();
        assert_eq!(expr.to_string(), "3 * (x + 1) * (x - 1)");
    }

    #[test]
    fn implicit_multiplication_after_power() {
        let expr = parse("2^3x").unwrap();
        assert_eq!(expr.to_string(), "2^3 * x");
    }

    #[test]
    fn parenthesized() {
        let expr = parse("(x)").unwrap();
        assert_eq!(expr, Expr::Paren(Paren {
            expr: Box::new(sym("x", 1..2)),
            span: 0..3,
        }));
    }

    #[test]
    fn call_with_arguments() {
        let expr = parse("log(100, 10)").unwrap();
        assert_eq!(expr, Expr::Call(Call {
            name: LitSym { name: "log".to_owned(), span: 0..3 },
            args: vec![int("100", 4..7), int("10", 9..11)],
            span: 0..12,
            paren_span: 3..12,
        }));
    }

    #[test]
    fn multi_character_symbols() {
        let expr = parse("theta + x_1").unwrap();
        assert_eq!(expr.to_string(), "theta + x_1");
    }

    #[test]
    fn display_round_trips() {
        for source in ["x**2 - 4", "-(x + 1)^2 / 3", "sqrt(2) * sin(pi / 4)", "root(8, 3) + 5!"] {
            let printed = parse(source).unwrap().to_string();
            let reparsed = parse(&printed).unwrap().to_string();
            assert_eq!(printed, reparsed);
        }
    }

    #[test]
    fn empty_input() {
        let err = parse("   ").unwrap_err();
        assert_eq!(err.class(), ErrorClass::Syntax);
        assert!(err.downcast_ref::<kind::EmptyExpression>().is_some());
    }

    #[test]
    fn unclosed_call() {
        let err = parse("log((").unwrap_err();
        assert_eq!(err.class(), ErrorClass::Syntax);
        assert_eq!(err.downcast_ref::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis { opening: true }));
        assert_eq!(err.spans, vec![4..5]);
    }

    #[test]
    fn stray_close_paren() {
        let err = parse("x + 1)").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::UnclosedParenthesis>(), Some(&kind::UnclosedParenthesis { opening: false }));
    }

    #[test]
    fn unknown_function() {
        let err = parse("sen(x)").unwrap_err();
        let unknown = err.downcast_ref::<kind::UnknownFunction>().unwrap();
        assert_eq!(unknown.name, "sen");
        assert_eq!(unknown.suggestion, Some("sin"));
    }

    #[test]
    fn symbol_followed_by_paren_is_a_call() {
        let err = parse("x(x + 1)").unwrap_err();
        assert!(err.downcast_ref::<kind::UnknownFunction>().is_some());
    }

    #[test]
    fn wrong_argument_count() {
        let err = parse("sqrt(4, 2)").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::WrongArgumentCount>(), Some(&kind::WrongArgumentCount {
            name: "sqrt".to_owned(),
            expected: "1".to_owned(),
            given: 2,
        }));

        let err = parse("log()").unwrap_err();
        assert!(err.downcast_ref::<kind::WrongArgumentCount>().is_some());
    }

    #[test]
    fn invalid_character() {
        let err = parse("2 $ 3").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::InvalidCharacter>(), Some(&kind::InvalidCharacter {
            character: "$".to_owned(),
        }));
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn dangling_operator() {
        let err = parse("2 +").unwrap_err();
        assert!(err.downcast_ref::<kind::UnexpectedEof>().is_some());
    }

    #[test]
    fn adjacent_numbers_are_rejected() {
        let err = parse("2 3").unwrap_err();
        assert!(err.downcast_ref::<kind::ExpectedEof>().is_some());
    }

    #[test]
    fn deep_nesting_is_a_resource_limit() {
        let source = format!("{}x{}", "(".repeat(500), ")".repeat(500));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.class(), ErrorClass::ResourceLimit);

        let source = format!("{}x", "-".repeat(500));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.class(), ErrorClass::ResourceLimit);
    }

    #[test]
    fn long_input_is_a_resource_limit() {
        let limits = ParseLimits { max_input_len: 8, ..ParseLimits::default() };
        let err = parse_with_limits("1 + 2 + 3 + 4", limits).unwrap_err();
        assert_eq!(err.class(), ErrorClass::ResourceLimit);
        assert!(parse_with_limits("1 + 2", limits).is_ok());
    }

    #[test]
    fn long_flat_sums_are_fine() {
        let source = vec!["x"; 1000].join(" + ");
        assert!(parse(&source).is_ok());
    }

    #[test]
    fn symbol_names() {
        assert_eq!(parse_symbol_name(" x ").unwrap(), "x");
        assert_eq!(parse_symbol_name("theta").unwrap(), "theta");
        assert!(parse_symbol_name("2x").is_err());
        assert!(parse_symbol_name("x y").is_err());
        assert!(parse_symbol_name("").is_err());
    }
}
