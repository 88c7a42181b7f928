use crate::{
    parser::{
        ast::{expr::Expr, literal::LitSym, paren::expect_close_paren},
        error::{kind, Error},
        registry,
        token::{Comma, OpenParen},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A function call, such as `log(x, 10)`. Only functions from the
/// [registry](crate::parser::registry) can be called, with an accepted number of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the comma-separated arguments following the opening parenthesis, including the
    /// closing parenthesis. Returns the arguments and the span of the closing parenthesis.
    fn parse_args(input: &mut Parser, open_span: Range<usize>) -> Result<(Vec<Expr>, Range<usize>), Error> {
        let mut args = Vec::new();
        if input.peek_token().map(|token| token.kind) == Some(TokenKind::CloseParen) {
            return Ok((args, input.next_token()?.span));
        }

        loop {
            if input.at_end() {
                return Err(Error::new(vec![open_span], kind::UnclosedParenthesis { opening: true }));
            }

            args.push(input.try_parse::<Expr>()?);
            if input.try_parse::<Comma>().is_err() {
                let close_span = expect_close_paren(input, open_span)?;
                return Ok((args, close_span));
            }
        }
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()
            .map_err(|_| Error::new(vec![name.span.clone()], kind::MissingArguments {
                name: name.name.clone(),
            }))?;
        let (args, close_span) = Self::parse_args(input, open_paren.span.clone())?;
        let span = name.span.start..close_span.end;

        let Some(spec) = registry::lookup(&name.name) else {
            return Err(Error::new(vec![name.span.clone()], kind::UnknownFunction {
                suggestion: registry::suggest(&name.name),
                name: name.name,
            }));
        };

        if !spec.accepts(args.len()) {
            return Err(Error::new(vec![span], kind::WrongArgumentCount {
                name: name.name,
                expected: spec.arity(),
                given: args.len(),
            }));
        }

        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_span.end,
        })
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)?;
        write!(f, "(")?;
        if let Some((last, args)) = self.args.split_last() {
            for arg in args {
                arg.fmt(f)?;
                write!(f, ", ")?;
            }
            last.fmt(f)?;
        }
        write!(f, ")")
    }
}
