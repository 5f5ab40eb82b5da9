//! Command-line front end for the `jose-jwa` algorithms
//!
//! Wraps and unwraps content encryption keys with PBES2, and signs and
//! verifies messages with ECDSA. Binary values are exchanged as base64url,
//! except the CEK which is given and returned as hex.

pub mod commands;
pub mod error;
pub mod output;

use clap::{Parser, Subcommand};
use error::Result;
use jose_jwa::{AlgorithmRegistry, JwaConfig};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jose-cli",
    about = "PBES2 key wrapping and ECDSA signatures from the command line",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub debug: bool,

    /// JSON configuration file [default: built from JWA_* environment variables]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(long, global = true, default_value = "json")]
    pub format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported algorithms
    Algorithms,
    /// Generate a key pair for a signature algorithm
    GenerateKey {
        /// Algorithm name, e.g. ES256
        #[arg(long)]
        alg: String,
        /// Write the private JWK to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Wrap a content encryption key under a password
    Wrap {
        /// Algorithm name, e.g. PBES2-HS256+A128KW
        #[arg(long)]
        alg: String,
        /// Password
        #[arg(long, env = "JOSE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Content encryption key as hex
        #[arg(long)]
        cek_hex: String,
    },
    /// Unwrap a content encryption key with a password
    Unwrap {
        /// Algorithm name
        #[arg(long)]
        alg: String,
        /// Password
        #[arg(long, env = "JOSE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Protected header as JSON, including p2s and p2c
        #[arg(long)]
        header: String,
        /// Encrypted key as base64url
        #[arg(long)]
        encrypted_key: String,
    },
    /// Sign a message
    Sign {
        /// Algorithm name, e.g. ES256
        #[arg(long)]
        alg: String,
        /// Path to a private JWK file
        #[arg(long)]
        key: PathBuf,
        /// Message to sign
        #[arg(long)]
        message: String,
    },
    /// Verify a signature
    Verify {
        /// Algorithm name
        #[arg(long)]
        alg: String,
        /// Path to a JWK file (public parameters suffice)
        #[arg(long)]
        key: PathBuf,
        /// Signed message
        #[arg(long)]
        message: String,
        /// Signature as base64url
        #[arg(long)]
        signature: String,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Algorithms => "algorithms",
            Commands::GenerateKey { .. } => "generate-key",
            Commands::Wrap { .. } => "wrap",
            Commands::Unwrap { .. } => "unwrap",
            Commands::Sign { .. } => "sign",
            Commands::Verify { .. } => "verify",
        }
    }
}

/// Loads the configuration named by `--config`, or the environment defaults
pub fn load_config(cli: &Cli) -> Result<JwaConfig> {
    let config = match cli.config {
        Some(ref path) => JwaConfig::from_json_file(path)?,
        None => JwaConfig::from_env()?,
    };
    Ok(config)
}

/// Runs a command against `registry`, returning the JSON response
pub fn execute(command: &Commands, registry: &AlgorithmRegistry) -> Result<Value> {
    match command {
        Commands::Algorithms => to_value(commands::algorithms::list(registry)),
        Commands::GenerateKey { alg, output } => {
            to_value(commands::keys::generate(registry, alg, output.as_deref())?)
        }
        Commands::Wrap {
            alg,
            password,
            cek_hex,
        } => to_value(commands::wrap::wrap(registry, alg, password, cek_hex)?),
        Commands::Unwrap {
            alg,
            password,
            header,
            encrypted_key,
        } => to_value(commands::wrap::unwrap(
            registry,
            alg,
            password,
            header,
            encrypted_key,
        )?),
        Commands::Sign { alg, key, message } => {
            to_value(commands::signature::sign(registry, alg, key, message)?)
        }
        Commands::Verify {
            alg,
            key,
            message,
            signature,
        } => to_value(commands::signature::verify(
            registry, alg, key, message, signature,
        )?),
    }
}

fn to_value<T: Serialize>(response: T) -> Result<Value> {
    Ok(serde_json::to_value(response)?)
}
