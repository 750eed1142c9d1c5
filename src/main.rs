use clap::Parser;
use std::process;

mod cli;

fn main() {
    // Initialize tracing (use RUST_LOG env var to control output)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Args::parse();

    match cli::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
