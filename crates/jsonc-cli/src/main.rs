use clap::Parser;
use std::io::{self, Read, Write};

#[derive(Parser)]
#[command(name = "jsonc-strip")]
#[command(about = "Simple tool to strip comments from JSONC, yielding a plain-old JSON.")]
#[command(override_usage = "jsonc-strip < something.jsonc > something.json")]
#[command(version)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Install a stderr subscriber, only when `RUST_LOG` asks for one.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut input = Vec::new();
    io::stdin().lock().read_to_end(&mut input)?;
    tracing::debug!(bytes = input.len(), "read stdin");

    let output = jsonc::strip_comments(&input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&output)?;
    stdout.flush()?;
    Ok(())
}
