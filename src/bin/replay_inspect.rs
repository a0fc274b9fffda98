//! Replay Inspector - print a summary of a saved replay file
//!
//! Usage:
//!   cargo run --bin replay-inspect
//!   cargo run --bin replay-inspect -- saves/replay.json
//!
//! Without a path, inspects the replay file named by config/runner_settings.json.

use std::process::ExitCode;

use runner::{ReplayStore, RunnerSettings};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: replay-inspect [path]");
        return ExitCode::SUCCESS;
    }

    let store = match args.get(1) {
        Some(path) => ReplayStore::at_path(path),
        None => ReplayStore::from_settings(&RunnerSettings::load()),
    };

    println!("Replay file: {}", store.path().display());
    if !store.exists() {
        println!("No replay file found.");
        return ExitCode::SUCCESS;
    }

    match store.load() {
        Ok(track) => {
            println!("{}", track.format_summary());
            if !track.is_chronological() {
                println!("Warning: timestamps go backwards");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
