//! Command-line arguments and config-file merging.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pbkdf2pass_core::Config;

#[derive(Debug, Parser)]
#[command(name = "pbkdf2pass", version, about = "Salted PBKDF2 password records")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Hash the secret read from stdin and print its record.
    Encode(EncodeArgs),
    /// Check the secret read from stdin against a stored record.
    Validate {
        /// Record in `algorithm:iterations:salt:hash` form.
        record: String,
    },
    /// List the supported algorithm names.
    Algorithms,
}

#[derive(Debug, Default, Args)]
pub struct EncodeArgs {
    /// JSON file with `algorithm`, `iteration_count`, `hash_length`,
    /// `salt_length`. Flags override its values.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// PRF name; unknown names fall back to sha256.
    #[arg(long)]
    pub algorithm: Option<String>,

    #[arg(long, value_name = "N")]
    pub iterations: Option<u32>,

    /// Derived-key length in bytes.
    #[arg(long, value_name = "BYTES")]
    pub hash_length: Option<usize>,

    /// Generated salt length in bytes.
    #[arg(long, value_name = "BYTES")]
    pub salt_length: Option<usize>,
}

impl EncodeArgs {
    /// Config file (if any) with command-line flags layered on top.
    pub fn resolve_config(&self) -> Result<Config> {
        let base = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };
        Ok(self.apply(base))
    }

    fn apply(&self, mut config: Config) -> Config {
        if let Some(algorithm) = &self.algorithm {
            config.algorithm.clone_from(algorithm);
        }
        if let Some(iterations) = self.iterations {
            config.iteration_count = iterations;
        }
        if let Some(hash_length) = self.hash_length {
            config.hash_length = hash_length;
        }
        if let Some(salt_length) = self.salt_length {
            config.salt_length = salt_length;
        }
        config
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = serde_json::from_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}
