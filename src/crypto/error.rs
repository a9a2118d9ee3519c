// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! Two tiers of errors live here:
//!
//! - **PublicError**: the opaque tier returned by envelope profiles. It only says
//!   whether encryption or decryption failed, so callers cannot build a padding
//!   or authentication oracle from the error value.
//! - **CryptoError**: the diagnostic tier used between primitives and the
//!   envelope engine. It carries the failing operation and reason so the engine
//!   can log it before collapsing it into a `PublicError`.
//!
//! ## Error Variants (CryptoError)
//!
//! - **InvalidKeyLength / InvalidIvLength**: symmetric material has the wrong size
//! - **AuthenticationFailed**: AES-GCM tag mismatch (wrong key or tampered data)
//! - **PaddingError**: AES-CBC PKCS#7 padding did not validate
//! - **AsymmetricFailed**: RSA encrypt/decrypt failed
//! - **UnsupportedPadding**: the key algorithm cannot do the requested padding
//! - **KeyDerivationFailed**: scrypt rejected its parameters
//! - **InvalidPayload**: a field of an encoded structure was malformed
//! - **Key**: a key handle was misused (see `KeyError`)

use thiserror::Error;

/// Opaque error returned at envelope boundaries
///
/// Every internal failure during encryption becomes `EncryptionFailed`,
/// every internal failure during decryption becomes `DecryptionFailed`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicError {
    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed")]
    DecryptionFailed,
}

/// Errors produced by asymmetric key handles
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// PEM text did not contain a recognised key block
    #[error("invalid PEM data")]
    InvalidPemData,

    /// DER bytes could not be turned into a key of the requested access
    #[error("failed to create key from DER: {0}")]
    CreatingKey(String),

    /// Operation requires a different access level than the key has
    #[error("operation requires a {required} key")]
    InvalidAccess { required: &'static str },

    /// Key size is not one of the supported sizes
    #[error("unsupported key size: {0} bits")]
    UnsupportedSize(usize),

    /// Export to a standard format failed
    #[error("failed to export key: {0}")]
    Export(String),

    /// Password-based key encryption was asked to use an empty password
    #[error("password must not be empty")]
    EmptyPassword,

    /// Encrypted PKCS#8 did not decrypt (wrong password or malformed block)
    #[error("failed to decrypt PKCS#8 private key")]
    Pkcs8Decryption,
}

/// Diagnostic error for primitive operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid key size: expected {expected} bytes, got {actual} bytes")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid IV size: expected {expected} bytes, got {actual} bytes")]
    InvalidIvLength { expected: usize, actual: usize },

    /// AES-GCM authentication tag verification failed
    #[error("Authentication failed during {operation}")]
    AuthenticationFailed { operation: String },

    /// AES-CBC padding was malformed after decryption
    #[error("Padding error during {operation}")]
    PaddingError { operation: String },

    /// RSA operation failed
    #[error("Asymmetric {operation} failed: {reason}")]
    AsymmetricFailed { operation: String, reason: String },

    /// Key algorithm does not support the requested padding
    #[error("Unsupported algorithm for provided key: {padding}")]
    UnsupportedPadding { padding: String },

    /// scrypt rejected its cost parameters or output length
    #[error("Key derivation failed: {reason}")]
    KeyDerivationFailed { reason: String },

    /// Field of an encoded structure was malformed
    #[error("Invalid payload field '{field}': {reason}")]
    InvalidPayload { field: String, reason: String },

    #[error(transparent)]
    Key(#[from] KeyError),
}

impl From<base64::DecodeError> for CryptoError {
    fn from(err: base64::DecodeError) -> Self {
        CryptoError::InvalidPayload {
            field: "base64_field".to_string(),
            reason: format!("base64 decode error: {}", err),
        }
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::InvalidPayload {
            field: "json".to_string(),
            reason: err.to_string(),
        }
    }
}
