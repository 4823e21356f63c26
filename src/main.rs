//! jsondoc-md - Command-line tool for generating Markdown API references.
//!
//! Reads one source file, collects the JSON descriptors placed in
//! `/* jsondoc ... */` comments and prints the rendered Markdown.
//!
//! # Usage
//!
//! ```bash
//! jsondoc-md [OPTIONS] <SOURCE_FILE>
//! ```
//!
//! # Examples
//!
//! Print the reference for a JavaScript library:
//! ```bash
//! jsondoc-md spiffs_image/timer.js > docs/timer.md
//! ```
//!
//! Validate descriptors in a pre-commit hook:
//! ```bash
//! jsondoc-md --check main/duk_fs.c
//! ```
//!
//! Any malformed descriptor prints its raw text to stderr and exits with
//! status 1 without writing any Markdown.

use clap::Parser;
use jsondoc_md::cli;
use jsondoc_md::error::Error;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match cli::CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version land here too and go to stdout
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Logs go to stderr; stdout carries only the Markdown
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .parse_default_env()
        .init();

    info!("jsondoc-md starting...");

    match cli::parse_args_from_parsed(args).and_then(cli::run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<Error>().and_then(Error::raw_buffer) {
                Some(raw) => {
                    eprintln!("{}", raw);
                    error!("{}", err);
                }
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
