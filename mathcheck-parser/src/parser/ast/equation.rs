use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        token::Assign,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One `lhs = rhs` line, such as a step of a derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equation {
    /// The left-hand side.
    pub lhs: Expr,

    /// The right-hand side.
    pub rhs: Expr,

    /// The region of the source code that this equation was parsed from.
    pub span: Range<usize>,
}

impl Equation {
    /// Returns the span of the equation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Equation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        // the shape of the line is checked before parsing either side, so that a line such as
        // `2x + = 4 =` reports the misplaced `=` rather than a confusing operand error
        let assign_spans = input.remaining_tokens()
            .iter()
            .filter(|token| token.kind == TokenKind::Assign)
            .map(|token| token.span.clone())
            .collect::<Vec<_>>();
        match assign_spans.as_slice() {
            [] => return Err(Error::new(vec![input.span().start..input.eof_span().end], kind::MissingEquals)),
            [_] => (),
            [_, extra, ..] => return Err(Error::new(vec![extra.clone()], kind::TooManyEquals)),
        }

        if input.peek_token().map(|token| token.kind) == Some(TokenKind::Assign) {
            return Err(Error::new(vec![assign_spans[0].clone()], kind::EmptySide { right: false }));
        }

        let lhs = input.try_parse::<Expr>()?;
        let assign = input.try_parse::<Assign>().map_err(|_| input.leftover_error())?;
        if input.at_end() {
            return Err(Error::new(vec![assign.span], kind::EmptySide { right: true }));
        }

        let rhs = input.try_parse::<Expr>()?;
        let span = lhs.span().start..rhs.span().end;
        Ok(Self { lhs, rhs, span })
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::{parse_equation, error::kind};

    #[test]
    fn simple_equation() {
        let equation = parse_equation("2*x + 4 = 10").unwrap();
        assert_eq!(equation.lhs.to_string(), "2 * x + 4");
        assert_eq!(equation.rhs.to_string(), "10");
        assert_eq!(equation.span, 0..12);
        assert_eq!(equation.to_string(), "2 * x + 4 = 10");
    }

    #[test]
    fn missing_equals() {
        let err = parse_equation("2*x + 4").unwrap_err();
        assert!(err.downcast_ref::<kind::MissingEquals>().is_some());
    }

    #[test]
    fn too_many_equals() {
        let err = parse_equation("x = 2 = 3").unwrap_err();
        assert!(err.downcast_ref::<kind::TooManyEquals>().is_some());
        assert_eq!(err.spans, vec![6..7]);
    }

    #[test]
    fn empty_sides() {
        let err = parse_equation(" = 3").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::EmptySide>(), Some(&kind::EmptySide { right: false }));

        let err = parse_equation("x =  ").unwrap_err();
        assert_eq!(err.downcast_ref::<kind::EmptySide>(), Some(&kind::EmptySide { right: true }));
    }

    #[test]
    fn malformed_side() {
        let err = parse_equation("2*x = (3").unwrap_err();
        assert!(err.downcast_ref::<kind::UnclosedParenthesis>().is_some());

        let err = parse_equation("2 $ x = 3").unwrap_err();
        assert!(err.downcast_ref::<kind::InvalidCharacter>().is_some());
    }
}
