//! Line-oriented read-eval-print loop.
//!
//! One `Environment` is created per REPL session and shared across every
//! line read, so a `variable` bound on one line is visible on the next —
//! matching how a script file would see its own top-level bindings.

mod display;

use crate::evaluator::eval_program;
use crate::lexer::Lexer;
use crate::object::environment::Environment;
use crate::object::Object;
use crate::parser::Parser;
use display::{CYAN, RESET, print_parser_errors, print_welcome};
use std::io::{self, BufRead, Write};

const PROMPT: &str = ">>";
const EXIT_COMMAND: &str = "salir()";

pub fn start<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    print_welcome();

    let mut reader = input;
    let mut line = String::new();
    let env = Environment::new();

    loop {
        write!(output, "{}{}{} ", CYAN, PROMPT, RESET)?;
        output.flush()?;
        line.clear();

        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            writeln!(output)?;
            return Ok(());
        }

        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == EXIT_COMMAND {
            return Ok(());
        }

        let lexer = Lexer::new(trimmed.to_string());
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            log::warn!("{} errores de sintaxis en la linea", parser.errors().len());
            print_parser_errors(&mut output, parser.errors())?;
            continue;
        }

        let evaluated = eval_program(&program, &env);
        if let Object::Error(ref message) = evaluated {
            log::error!("error en tiempo de ejecucion: {}", message);
        }
        if !matches!(evaluated, Object::Null) {
            writeln!(output, "{}", evaluated)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn evaluates_and_persists_bindings_across_lines() {
        let input = b"variable x = 5;\nx + 1;\nsalir()\n".to_vec();
        let mut output = Vec::new();
        start(Cursor::new(input), &mut output).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains('6'));
    }

    #[test]
    fn prints_parser_errors_and_continues() {
        let input = b"variable x 5;\nx\n".to_vec();
        let mut output = Vec::new();
        start(Cursor::new(input), &mut output).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("errores de sintaxis"));
    }
}
