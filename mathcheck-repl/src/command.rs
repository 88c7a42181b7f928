/// One line of input to the REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Simplify an expression, listing the rules applied.
    Simplify(&'a str),

    /// Check whether both sides of `lhs = rhs` are equivalent.
    Verify(&'a str),

    /// `:resolver x <ecuación>`
    Solve { unknown: &'a str, equation: &'a str },

    /// `:inversa x <función>`
    Inverse { variable: &'a str, function: &'a str },

    /// `:ayuda`
    Help,
}

/// The text printed by `:ayuda`.
pub const HELP: &str = "\
<expresión>               simplifica la expresión
<izquierda> = <derecha>   verifica si ambos lados son equivalentes
:resolver x <ecuación>    resuelve la ecuación para x
:inversa x <función>      calcula la inversa de la función de x
:ayuda                    muestra esta ayuda";

/// Splits `x rest` into the name and the rest.
fn split_name(args: &str) -> Option<(&str, &str)> {
    let (name, rest) = args.trim().split_once(char::is_whitespace)?;
    Some((name, rest.trim()))
}

impl<'a> Command<'a> {
    /// Reads a line. Returns an error message for a command with missing arguments.
    pub fn parse(line: &'a str) -> Result<Self, String> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Ok(if line.contains('=') { Self::Verify(line) } else { Self::Simplify(line) });
        };

        let (name, args) = command.split_once(char::is_whitespace).unwrap_or((command, ""));
        match name {
            "resolver" => split_name(args)
                .map(|(unknown, equation)| Self::Solve { unknown, equation })
                .ok_or_else(|| "uso: :resolver x <ecuación>".to_owned()),
            "inversa" => split_name(args)
                .map(|(variable, function)| Self::Inverse { variable, function })
                .ok_or_else(|| "uso: :inversa x <función>".to_owned()),
            "ayuda" => Ok(Self::Help),
            _ => Err(format!("comando desconocido `:{}`, escribí :ayuda", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn expressions_and_equations() {
        assert_eq!(Command::parse(" (x + 1)^2 "), Ok(Command::Simplify("(x + 1)^2")));
        assert_eq!(Command::parse("2x = x + x"), Ok(Command::Verify("2x = x + x")));
    }

    #[test]
    fn commands() {
        assert_eq!(
            Command::parse(":resolver x x^2 - 4 = 0"),
            Ok(Command::Solve { unknown: "x", equation: "x^2 - 4 = 0" }),
        );
        assert_eq!(
            Command::parse(":inversa t   exp(t)"),
            Ok(Command::Inverse { variable: "t", function: "exp(t)" }),
        );
        assert_eq!(Command::parse(":ayuda"), Ok(Command::Help));
    }

    #[test]
    fn bad_commands() {
        assert_eq!(Command::parse(":resolver x"), Err("uso: :resolver x <ecuación>".to_owned()));
        assert!(Command::parse(":borrar").is_err());
    }
}
