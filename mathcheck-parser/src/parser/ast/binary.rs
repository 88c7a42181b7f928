use crate::{
    parser::{
        ast::{expr::Expr, unary::Unary},
        error::{kind, Error},
        token::op::{BinOp, BinOpKind},
        Associativity,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Builds the node `lhs op rhs`.
    fn join(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        let span = lhs.span().start..rhs.span().end;
        Expr::Binary(Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
            span,
        })
    }

    /// Returns true if the next token begins an operand that multiplies the previous one without
    /// an explicit operator, as in `2x`, `3(x + 1)`, or `x sin(x)`.
    ///
    /// A number never starts an implicit product, so `2 3` is rejected instead of being read as
    /// `6`.
    fn implicit_mul_follows(input: &Parser) -> bool {
        matches!(
            input.peek_token().map(|token| token.kind),
            Some(TokenKind::Name | TokenKind::OpenParen)
        )
    }

    /// Parses the right-hand side of an operator whose precedence is `precedence`, one nesting
    /// level deeper.
    fn parse_rhs(input: &mut Parser, precedence: Precedence) -> Result<Expr, Error> {
        input.nested(|input| {
            let rhs = Unary::parse_or_lower(input)?;
            Self::parse_expr(input, rhs, precedence)
        })
    }

    /// After parsing the left-hand-side of a potential binary expression, parse ahead to see if
    /// there are binary operators and right-hand-sides with at least the given precedence.
    ///
    /// If we are parsing the expression `1 + 2 * 3`, we will first parse the left-hand-side `1`,
    /// then the operator `+`. The right-hand-side is parsed by calling into this function again
    /// with a precedence one level above `+`, so that it consumes `2 * 3` but would stop before
    /// another `+`. Right-associative operators (`^`) call into this function with their own
    /// precedence, so that `2^3^4` is read as `2^(3^4)`.
    ///
    /// Implicit multiplication is also handled here. When there is no operator after `lhs`, but
    /// a name or an opening parenthesis follows, we assume an implicit multiplication operator,
    /// then continue with the same procedure as if the operator did exist.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        loop {
            if let Ok(op) = input.try_parse_then::<BinOp, _>(|bin_op, input| {
                if bin_op.precedence() >= precedence {
                    Ok(())
                } else {
                    Err(input.error(kind::NonFatal))
                }
            }) {
                let rhs_precedence = match op.associativity() {
                    Associativity::Left => op.precedence().next(),
                    Associativity::Right => op.precedence(),
                };
                let rhs = Self::parse_rhs(input, rhs_precedence)?;
                lhs = Self::join(lhs, op, rhs);
            } else if BinOpKind::Mul.precedence() >= precedence && Self::implicit_mul_follows(input) {
                let rhs = Self::parse_rhs(input, BinOpKind::Mul.precedence().next())?;
                let op = BinOp {
                    kind: BinOpKind::Mul,
                    implicit: true,
                    span: lhs.span().end..rhs.span().start,
                };
                lhs = Self::join(lhs, op, rhs);
            } else {
                break;
            }
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}
