//! # snipz CLI
//!
//! The binary is thin: argument definitions live in `args.rs`, everything else in
//! `cli/`. This file only runs [`cli::run`] and maps failures to an exit code.

mod args;
mod cli;

use colored::Colorize;
use snipz::error::SnipzError;

fn main() {
    if let Err(e) = cli::run() {
        let message = match e {
            SnipzError::Api(message) => message,
            other => other.to_string(),
        };
        eprintln!("{} {}", "Error:".red(), message);
        std::process::exit(1);
    }
}
