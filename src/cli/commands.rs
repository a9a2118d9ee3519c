// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::CryptoConfig;
use crate::crypto::{AsymmetricKey, KeyAccess, KeySize, RsaKey, RustCryptoProvider};
use crate::envelope::{EhrEncryption, EncryptedEnvelope, HybridVersion};
use crate::sticker::{EmergencyStickerEncryption, MedStickerEncryption, StickerVersion};
use crate::version;
use crate::x509::{create_csr, CsrAttributes};

/// Arguments for keygen command
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Modulus size in bits (2048 or 4096)
    #[arg(long, env = "RSA_KEY_BITS")]
    pub bits: Option<usize>,

    /// Directory for private.pem and public.pem
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Arguments for encrypt command
#[derive(Args, Debug)]
pub struct EncryptArgs {
    /// Recipient public key (PEM)
    #[arg(long)]
    pub public_key: PathBuf,

    /// File to encrypt
    #[arg(long)]
    pub input: PathBuf,

    /// Envelope output (JSON)
    #[arg(long)]
    pub output: PathBuf,

    /// Envelope version (gcmOAEP or cbcPKCS1)
    #[arg(long)]
    pub version: Option<HybridVersion>,
}

/// Arguments for decrypt command
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Recipient private key (PEM)
    #[arg(long)]
    pub private_key: PathBuf,

    /// Envelope input (JSON)
    #[arg(long)]
    pub input: PathBuf,

    /// Plaintext output
    #[arg(long)]
    pub output: PathBuf,
}

/// Arguments for sticker-key command
#[derive(Args, Debug)]
pub struct StickerKeyArgs {
    #[arg(long, env = "STICKER_PIN")]
    pub pin: String,

    #[arg(long)]
    pub code: String,

    /// Sticker version (adam, britney, charlie)
    #[arg(long, default_value = "britney")]
    pub version: StickerVersion,
}

/// Arguments for access-signature command
#[derive(Args, Debug)]
pub struct AccessSignatureArgs {
    #[command(flatten)]
    pub sticker: StickerKeyArgs,

    /// Salt appended to key and IV before hashing
    #[arg(long)]
    pub salt: String,
}

/// Arguments for fingerprint-secret command
#[derive(Args, Debug)]
pub struct FingerprintSecretArgs {
    #[arg(long, env = "STICKER_PIN")]
    pub pin: String,

    /// Use the emergency sticker derivation
    #[arg(long)]
    pub emergency: bool,
}

/// Arguments for csr command
#[derive(Args, Debug)]
pub struct CsrArgs {
    /// Private key (PEM) the request is signed with
    #[arg(long)]
    pub private_key: PathBuf,

    /// Request output (PEM)
    #[arg(long)]
    pub output: PathBuf,

    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub organization: Option<String>,

    #[arg(long)]
    pub organization_unit: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub uid: Option<String>,

    #[arg(long)]
    pub given_name: Option<String>,

    #[arg(long)]
    pub surname: Option<String>,
}

fn load_config() -> Result<CryptoConfig> {
    dotenv::dotenv().ok();
    CryptoConfig::from_env().context("Invalid encryption configuration")
}

fn read_key(path: &Path, access: KeyAccess) -> Result<RsaKey> {
    let pem = fs::read_to_string(path)
        .with_context(|| format!("Failed to read key file {}", path.display()))?;
    RsaKey::from_pem(&pem, access)
        .with_context(|| format!("Failed to load {} key from {}", access.as_str(), path.display()))
}

/// Generate an RSA key pair
pub fn keygen(args: KeygenArgs) -> Result<()> {
    let size = match args.bits {
        Some(bits) => KeySize::from_bits(bits)?,
        None => load_config()?.rsa_key_size,
    };

    info!(bits = size.bits(), "generating RSA key pair");
    let private = RsaKey::generate(size)?;
    let public = private.public_key()?;

    fs::create_dir_all(&args.out_dir)?;
    let private_path = args.out_dir.join("private.pem");
    let public_path = args.out_dir.join("public.pem");
    fs::write(&private_path, private.to_pem()?.as_bytes())?;
    fs::write(&public_path, public.to_pem()?.as_bytes())?;

    println!("🔑 Key pair generated ({} bits)", size.bits());
    println!("  Private key: {}", private_path.display());
    println!("  Public key:  {}", public_path.display());
    Ok(())
}

/// Encrypt a file into a health-record envelope
pub fn encrypt(args: EncryptArgs) -> Result<()> {
    let key = read_key(&args.public_key, KeyAccess::Public)?;
    let plaintext = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let version = match args.version {
        Some(version) => version,
        None => load_config()?.ehr_version,
    };
    let envelope = EhrEncryption::new()
        .with_version(version)
        .encrypt(&plaintext, &key)?;

    fs::write(&args.output, serde_json::to_vec_pretty(&envelope)?)?;
    println!(
        "🔒 Encrypted {} bytes with {} -> {}",
        plaintext.len(),
        version,
        args.output.display()
    );
    Ok(())
}

/// Decrypt a health-record envelope
pub fn decrypt(args: DecryptArgs) -> Result<()> {
    let key = read_key(&args.private_key, KeyAccess::Private)?;
    let json = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let envelope: EncryptedEnvelope =
        serde_json::from_slice(&json).context("Input is not an encrypted envelope")?;

    let plaintext = EhrEncryption::new().decrypt(&envelope, &key)?;
    fs::write(&args.output, &plaintext)?;
    println!(
        "🔓 Decrypted {} bytes ({}) -> {}",
        plaintext.len(),
        envelope.version,
        args.output.display()
    );
    Ok(())
}

/// Derive and print sticker key material
pub fn sticker_key(args: StickerKeyArgs) -> Result<()> {
    let attr = MedStickerEncryption::new().derive_key(
        args.pin.as_bytes(),
        args.code.as_bytes(),
        args.version,
    )?;

    println!("version: {}", attr.version());
    println!("key:     {}", STANDARD.encode(attr.key()));
    println!("iv:      {}", STANDARD.encode(attr.iv()));
    Ok(())
}

/// Print the access signature of a sticker
pub fn access_signature(args: AccessSignatureArgs) -> Result<()> {
    let sticker = MedStickerEncryption::new();
    let attr = sticker.derive_key(
        args.sticker.pin.as_bytes(),
        args.sticker.code.as_bytes(),
        args.sticker.version,
    )?;

    println!("{}", sticker.access_signature(&attr, args.salt.as_bytes()));
    Ok(())
}

/// Print the fingerprint secret of a PIN
pub fn fingerprint_secret(args: FingerprintSecretArgs) -> Result<()> {
    if args.pin.is_empty() {
        return Err(anyhow!("PIN must not be empty"));
    }

    let secret = if args.emergency {
        EmergencyStickerEncryption::<RustCryptoProvider>::default()
            .generate_fingerprint_secret(args.pin.as_bytes())?
    } else {
        MedStickerEncryption::new().generate_fingerprint_secret(&args.pin)?
    };

    println!("{}", secret);
    Ok(())
}

/// Write a certificate signing request for a private key
pub fn csr(args: CsrArgs) -> Result<()> {
    let key = read_key(&args.private_key, KeyAccess::Private)?;
    let attributes = CsrAttributes {
        country: args.country,
        state: args.state,
        location: args.location,
        organization: args.organization,
        organization_unit: args.organization_unit,
        email_address: args.email,
        unique_identifier: args.uid,
        given_name: args.given_name,
        surname: args.surname,
    };

    let request = create_csr(&key, Some(&attributes))?;
    fs::write(&args.output, request.as_bytes())?;
    println!("📝 Certificate signing request -> {}", args.output.display());
    Ok(())
}

/// Print version information
pub fn version() -> Result<()> {
    println!("{}", version::get_version_string());
    println!("{}", serde_json::to_string_pretty(&version::get_version_info())?);
    Ok(())
}
