use env_logger::Builder;
use monkey_lang::repl;
use std::io;

fn main() -> io::Result<()> {
    // RUST_LOG controls verbosity, e.g. RUST_LOG=debug or RUST_LOG=monkey_lang::parser=trace
    Builder::from_default_env().init();

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();

    repl::start(stdin, stdout)
}
