mod config;
mod engine;
mod io;
mod params;

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use engine::HtpEngine;
use io::{htp_failure, htp_success};

/// HTP front end for the rhex Hex engine.
#[derive(Parser, Debug)]
#[command(name = "rhex-htp", version, about)]
struct Args {
    /// Initial board size (edge length).
    #[arg(long, default_value_t = 11)]
    size: u8,

    /// Optional TOML configuration applied at startup.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut engine = HtpEngine::new(args.size)?;
    if let Some(path) = &args.config {
        let cfg = config::load(path)?;
        engine.apply_config(&cfg);
        info!("applied config from {}", path.display());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        // Everything after '#' is a comment.
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let first = parts.next().expect("non-empty line");
        // An all-digit first token is the optional command id.
        let (id, command) = if first.bytes().all(|b| b.is_ascii_digit()) {
            (Some(first), parts.next())
        } else {
            (None, Some(first))
        };
        let Some(command) = command else {
            htp_failure(id, "missing command");
            continue;
        };
        let argv: Vec<&str> = parts.collect();

        if command == "quit" {
            htp_success(id, "");
            break;
        }

        match engine.execute(command, &argv) {
            Ok(result) => htp_success(id, &result),
            Err(e) => htp_failure(id, &e.to_string()),
        }
    }

    Ok(())
}
