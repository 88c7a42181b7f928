mod command;

use ariadne::Source;
use command::{Command, HELP};
use mathcheck_compute::{
    analysis::inverse::inverse,
    check::equivalence::equivalent,
    solve::solve,
    symbolic::{simplify_with_steps, SymExpr},
};
use mathcheck_error::Error;
use mathcheck_parser::parser::{parse, parse_equation};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};

/// Prints the report of an error to stderr, pointing into the input.
fn report(err: &Error, input: &str) {
    if err.build_report("input").eprint(("input", Source::from(input))).is_err() {
        eprintln!("{}", err);
    }
}

/// Simplifies an expression and prints the rules applied.
fn simplify_line(input: &str) -> Result<(), Error> {
    let expr = SymExpr::from(parse(input)?);
    let (simplified, steps) = simplify_with_steps(&expr)?;
    for step in steps {
        println!("  {}", step);
    }
    println!("{}", simplified);
    Ok(())
}

/// Checks whether both sides of an equation are equivalent.
fn verify_line(input: &str) -> Result<(), Error> {
    let equation = parse_equation(input)?;
    let lhs = SymExpr::from(&equation.lhs);
    let rhs = SymExpr::from(&equation.rhs);
    if equivalent(&lhs, &rhs)? {
        println!("✅ correcto");
    } else {
        let (difference, _) = simplify_with_steps(&(lhs - rhs))?;
        println!("❌ incorrecto, la diferencia es {}", difference);
    }
    Ok(())
}

/// Runs one line of input.
fn execute(input: &str) {
    let (source, result) = match Command::parse(input) {
        Ok(Command::Simplify(expr)) => (expr, simplify_line(expr)),
        Ok(Command::Verify(equation)) => (equation, verify_line(equation)),
        Ok(Command::Solve { unknown, equation }) => (equation, solve(equation, unknown).map(|result| {
            println!("{}", result.message);
            if !result.solutions.is_empty() {
                println!("{} = {}", unknown, result.solutions.join(", "));
            }
        })),
        Ok(Command::Inverse { variable, function }) => (function, inverse(function, variable).map(|result| {
            println!("{}", result.message);
            for branch in result.branches {
                println!("  {}", branch);
            }
        })),
        Ok(Command::Help) => {
            println!("{}", HELP);
            return;
        },
        Err(message) => {
            eprintln!("{}", message);
            return;
        },
    };

    if let Err(err) = result {
        report(&err, source);
    }
}

/// Runs every non-blank line of the input.
fn execute_all(input: &str) {
    input.lines()
        .filter(|line| !line.trim().is_empty())
        .for_each(execute);
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run every line of the file
        let mut input = String::new();
        let read = File::open(&filename)
            .and_then(|file| BufReader::new(file).read_to_string(&mut input));
        if let Err(err) = read {
            eprintln!("no se pudo leer `{}`: {}", filename, err);
            std::process::exit(1);
        }

        execute_all(&input);
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("no se pudo leer la entrada: {}", err);
            std::process::exit(1);
        }

        execute_all(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            },
        };

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            execute(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
