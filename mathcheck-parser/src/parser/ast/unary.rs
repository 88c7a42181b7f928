use crate::{
    parser::{
        ast::{binary::Binary, expr::{Expr, Primary}},
        error::{kind, Error},
        token::op::UnaryOp,
        Associativity,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attempt to parse a unary operator with the correct associativity. Returns a non-fatal error if
/// the operator is not of the correct associativity.
fn try_parse_unary_op(input: &mut Parser, associativity: Associativity) -> Result<UnaryOp, Error> {
    input.try_parse_then::<UnaryOp, _>(|op, input| {
        if op.associativity() == associativity {
            Ok(())
        } else {
            Err(input.error(kind::NonFatal))
        }
    })
}

/// A unary expression, such as `-x` or `5!`. Unary expressions can include nested expressions.
///
/// Unary expressions do not directly implement [`Parse`]. Instead, [`Unary::parse_or_lower`]
/// parses a complete operand, including any unary operators around it.
///
/// [`Parse`]: crate::parser::Parse
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression (left or right, depending on the associativity).
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parse a unary expression with right-associativity, such as `-x^2`.
    ///
    /// The operand extends over any powers that follow, so the sign applies to the whole power.
    pub fn parse_right(input: &mut Parser) -> Result<Self, Error> {
        let op = try_parse_unary_op(input, Associativity::Right)?;
        let start_span = op.span.start;
        let operand = {
            let lhs = Unary::parse_or_lower(input)?;
            Binary::parse_expr(input, lhs, Precedence::Exp)?
        };
        let end_span = operand.span().end;
        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }

    /// Parse an operand, followed by any number of left-associative unary operators, such as
    /// `3!!`.
    pub fn parse_left_or_operand(input: &mut Parser) -> Result<Expr, Error> {
        let operand = input.try_parse::<Primary>()?;
        let start_span = operand.span().start;
        let mut result = Expr::from(operand);

        while input.peek_token().map(|token| token.kind) == Some(TokenKind::Factorial) {
            let op = try_parse_unary_op(input, Associativity::Left)?;
            let end_span = op.span.end;
            result = Expr::Unary(Self {
                operand: Box::new(result),
                op,
                span: start_span..end_span,
            });
        }

        Ok(result)
    }

    /// Parses a unary expression, or lower precedence expressions. This is one level of nesting.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        input.nested(|input| {
            match input.peek_token().map(|token| token.kind) {
                Some(TokenKind::Sub | TokenKind::Add) => Self::parse_right(input).map(Expr::Unary),
                _ => Self::parse_left_or_operand(input),
            }
        })
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.op.associativity() {
            Associativity::Left => {
                self.operand.fmt(f)?;
                self.op.fmt(f)
            },
            Associativity::Right => {
                self.op.fmt(f)?;
                self.operand.fmt(f)
            },
        }
    }
}
