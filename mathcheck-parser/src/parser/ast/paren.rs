use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::OpenParen,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Consumes the closing parenthesis matching the opening parenthesis at `open_span`, or builds
/// the error describing what was found instead.
pub(crate) fn expect_close_paren(input: &mut Parser, open_span: Range<usize>) -> Result<Range<usize>, Error> {
    match input.peek_token().map(|token| token.kind) {
        Some(TokenKind::CloseParen) => Ok(input.next_token()?.span),
        None => Err(Error::new(vec![open_span], kind::UnclosedParenthesis { opening: true })),
        Some(TokenKind::Symbol) => Err(input.leftover_error()),
        Some(found) => {
            let token = input.next_token()?;
            Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[TokenKind::CloseParen],
                found,
            }))
        },
    }
}

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression.
    pub fn innermost(&self) -> &Expr {
        let mut inner = &self.expr;
        while let Expr::Paren(paren) = inner.as_ref() {
            inner = &paren.expr;
        }
        inner
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open_paren = input.try_parse::<OpenParen>()?;
        if input.at_end() {
            return Err(Error::new(vec![open_paren.span], kind::UnclosedParenthesis { opening: true }));
        }

        let expr = input.try_parse::<Expr>()?;
        let close_span = expect_close_paren(input, open_paren.span.clone())?;
        Ok(Self {
            expr: Box::new(expr),
            span: open_paren.span.start..close_span.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}
