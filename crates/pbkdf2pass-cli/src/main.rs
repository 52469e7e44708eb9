//! `pbkdf2pass`: encode and validate PBKDF2 password records from a shell.
//!
//! Secrets are always read from stdin so they never show up in process
//! listings or shell history.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

mod cli;
mod input;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pbkdf2pass_core::Codec;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

// ── Exit statuses ───────────────────────────────────────────────────

/// Command succeeded; for `validate`, the candidate matched.
const EXIT_OK: u8 = 0;

/// Exit status when a candidate does not match its record.
const EXIT_MISMATCH: u8 = 1;

/// Exit status for usage, I/O and record-parse errors.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let result = run(Cli::parse(), io::stdin().lock(), &mut io::stdout().lock());
    ExitCode::from(exit_status(result, &mut io::stderr().lock()))
}

/// Map the outcome of [`run`] to a process exit status, reporting any
/// error on `err`.
fn exit_status(result: Result<u8>, err: &mut impl Write) -> u8 {
    match result {
        Ok(status) => status,
        Err(e) => {
            // stderr is the last resort; nothing to do if it is gone too.
            let _ = writeln!(err, "error: {e:#}");
            EXIT_ERROR
        }
    }
}

/// Execute one command, reading secrets from `input` and printing results
/// to `out`. Returns the exit status for the non-error outcomes.
fn run(cli: Cli, input: impl BufRead, out: &mut impl Write) -> Result<u8> {
    let codec = Codec::standard();

    match cli.command {
        Command::Encode(args) => {
            let config = args.resolve_config()?;
            let secret = input::read_secret(input)?;
            let record = codec
                .encode(secret.as_slice(), &config)
                .context("encoding failed")?;
            tracing::info!(
                algorithm = record.algorithm(),
                iterations = record.iteration_count(),
                "secret encoded"
            );
            writeln!(out, "{record}")?;
            Ok(EXIT_OK)
        }
        Command::Validate { record } => {
            let record = codec
                .parse(record.trim())
                .context("stored record could not be parsed")?;
            let candidate = input::read_secret(input)?;
            let valid = codec.validate(&record, candidate.as_slice());
            writeln!(out, "{valid}")?;
            Ok(if valid { EXIT_OK } else { EXIT_MISMATCH })
        }
        Command::Algorithms => {
            for name in codec.registry().names() {
                writeln!(out, "{name}")?;
            }
            Ok(EXIT_OK)
        }
    }
}
