//! CLI tool for xlnav - replays a navigation script and outputs the viewport JSON
//!
//! Usage:
//!   xlnav_cli <script.json>              # Output JSON to stdout
//!   xlnav_cli <script.json> -o out.json  # Output JSON to file
//!
//! Set `RUST_LOG=xlnav=debug` to trace every applied command on stderr.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use tracing_subscriber::EnvFilter;
use xlnav::codec;
use xlnav::session::{run_script, Script};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: xlnav_cli <script.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read script
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let script: Script = match serde_json::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing script: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(commands = script.commands.len(), "running script");

    // Apply commands
    let viewport = match run_script(&script) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error applying navigation: {}", e);
            std::process::exit(1);
        }
    };

    // Serialize to JSON
    let json = match codec::viewport()
        .encode(&viewport)
        .and_then(|value| Ok(serde_json::to_string_pretty(&value)?))
    {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
