// notate: CLI entry point for the JI notation table.
//
// Prints the cents size and just-intonation note name of each ratio given on
// the command line.
//
// Usage:
//   cargo run -p ji_notation -- [RATIO ...] [--config PATH] [--precision N] [--json]
//
// RATIO is `n` or `n/d`. Without ratios a 5-limit major scale is shown.
// Set RUST_LOG=debug to see the prime commas as they are computed.

use ji_notation::NotationConfig;
use ji_notation::notation::Notator;
use ji_notation::table::{DEMO_RATIOS, notation_table, render_table};
use ji_ratio::Fraction;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Flags that take a value.
const VALUE_FLAGS: [&str; 2] = ["--config", "--precision"];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let precision: i32 = parse_flag(&args, "--precision").unwrap_or(2);
    let json = args.iter().any(|a| a == "--json");
    let config_path: Option<String> = parse_flag(&args, "--config");

    let config = match config_path {
        Some(path) => match NotationConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => NotationConfig::default(),
    };

    let mut inputs = positional_args(&args);
    if inputs.is_empty() {
        inputs = DEMO_RATIOS.iter().map(|s| s.to_string()).collect();
    }

    let mut ratios = Vec::with_capacity(inputs.len());
    for input in &inputs {
        match input.parse::<Fraction>() {
            Ok(ratio) => ratios.push(ratio),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    let notator = Notator::new(config);
    let rows = match notation_table(&notator, &ratios, precision) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&rows) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error writing JSON: {e}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", render_table(&rows, precision));
    }
}

/// Arguments that are neither flags nor flag values.
fn positional_args(args: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            iter.next();
        } else if !arg.starts_with("--") {
            out.push(arg.clone());
        }
    }
    out
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
