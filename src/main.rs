use std::io::{self, BufRead, Write};
use std::process;

use tracing_subscriber::EnvFilter;
use txkv::command::Session;

fn main() {
    if let Err(e) = run() {
        eprintln!("txkv: error: {e}");
        process::exit(1);
    }
}

/// Read commands from stdin until `END` or EOF. Responses go to stdout,
/// logs to stderr (`RUST_LOG`, default `warn`).
fn run() -> txkv::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let line = line?;
        match session.execute(&line) {
            None => break,
            Some(response) if response.is_empty() => {}
            Some(response) => {
                writeln!(out, "{response}")?;
                out.flush()?;
            }
        }
    }

    Ok(())
}
