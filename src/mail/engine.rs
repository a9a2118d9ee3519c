// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Low-level S/MIME engine contract
//!
//! CMS parsing, decryption and X.509 chain building live behind this trait.
//! The pipeline only orchestrates calls and maps failures.

use thiserror::Error;

use super::certificates::CaCertificates;

/// Opaque decryption failure reported by an engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("engine failure: {0}")]
pub struct EngineError(pub String);

/// Why an engine rejected a signature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyFailure {
    #[error("certificate chain verification failed")]
    CertificateVerification,

    #[error("content digest mismatch")]
    DigestMismatch,

    #[error("signer is not the sender")]
    SignerNotSender,

    #[error("invalid MIME type")]
    InvalidMimeType,

    #[error("{0}")]
    Other(String),
}

/// S/MIME decrypt/verify backend
pub trait SecureMailEngine: Send + Sync {
    /// Decrypt one enveloped layer with a PKCS#1 private key in PEM form
    fn decrypt(&self, blob: &str, private_key_pem: &str) -> Result<Vec<u8>, EngineError>;

    /// Verify a signed layer and return its content without the signature
    ///
    /// The signer certificate must belong to `sender_email` and chain to one
    /// of `trusted`.
    fn verify(
        &self,
        blob: &str,
        sender_email: &str,
        trusted: &CaCertificates,
    ) -> Result<Vec<u8>, VerifyFailure>;
}
