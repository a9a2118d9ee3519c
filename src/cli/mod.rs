// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// ehr-crypto CLI
#[derive(Parser, Debug)]
#[command(name = "ehr-crypto")]
#[command(version)]
#[command(about = "Health-record envelope and sticker encryption tools", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an RSA key pair as PEM files
    Keygen(commands::KeygenArgs),

    /// Encrypt a file into a health-record envelope (JSON)
    Encrypt(commands::EncryptArgs),

    /// Decrypt a health-record envelope
    Decrypt(commands::DecryptArgs),

    /// Derive a sticker key and IV from PIN and code
    StickerKey(commands::StickerKeyArgs),

    /// Compute the access signature of a sticker
    AccessSignature(commands::AccessSignatureArgs),

    /// Compute the fingerprint secret of a PIN
    FingerprintSecret(commands::FingerprintSecretArgs),

    /// Create a certificate signing request
    Csr(commands::CsrArgs),

    /// Print version information
    Version,
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Keygen(args) => commands::keygen(args),
        Commands::Encrypt(args) => commands::encrypt(args),
        Commands::Decrypt(args) => commands::decrypt(args),
        Commands::StickerKey(args) => commands::sticker_key(args),
        Commands::AccessSignature(args) => commands::access_signature(args),
        Commands::FingerprintSecret(args) => commands::fingerprint_secret(args),
        Commands::Csr(args) => commands::csr(args),
        Commands::Version => commands::version(),
    }
}
