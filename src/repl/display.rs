//! Banner, prompt colors, and error rendering for the REPL.

use crate::parser::error::ParserError;
use colored::Colorize;
use std::io::{Result, Write};

pub const LOGO: &str = r#"
      ___           ___           ___
     /\  \         /\__\         /\  \
    /::\  \       /:/  /        /::\  \
   /:/\:\  \     /:/  /        /:/\:\  \
  /::\~\:\  \   /:/  /  ___   /::\~\:\  \
 /:/\:\ \:\__\ /:/__/  /\__\ /:/\:\ \:\__\
 \/__\:\/:/  / \:\  \ /:/  / \:\~\:\ \/__/
      \::/  /   \:\  /:/  /   \:\ \:\__\
      /:/  /     \:\/:/  /     \:\ \/__/
     /:/  /       \::/  /       \:\__\
     \/__/         \/__/         \/__/
"#;

pub const RESET: &str = "\x1b[0m";
pub const CYAN: &str = "\x1b[36m";
pub const GRAY: &str = "\x1b[90m";

pub fn print_welcome() {
    let username = users::get_current_username()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "desconocido".to_string());

    println!("{}", LOGO.cyan());
    println!("  {}\n", "Interprete del Lenguaje".cyan().bold());
    println!("{}", format!("Bienvenido, {}!", username).green().bold());
    println!(
        "{}\n",
        "Escribe tus expresiones. Para salir, escribe salir() o presiona Ctrl+D.".bright_black()
    );
}

pub fn print_parser_errors<W: Write>(output: &mut W, errors: &[ParserError]) -> Result<()> {
    writeln!(output, "{}", "Se encontraron errores de sintaxis:".red().bold())?;
    for error in errors {
        writeln!(output, "  {}{}{}", GRAY, error, RESET)?;
    }
    Ok(())
}
