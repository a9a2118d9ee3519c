// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Secure-mail error types
//!
//! Unlike the envelope profiles, the mail pipeline reports precise reasons:
//! callers need to tell an untrusted signer from a corrupted message.

use thiserror::Error;

/// Failure of a single-layer operation or of the unwrap pipeline
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureMailError {
    /// A public key was supplied where decryption needs a private key
    #[error("private key required")]
    PrivateKeyRequired,

    /// Input is not valid UTF-8 text
    #[error("secure-mail data corrupted")]
    DataCorrupted,

    #[error("secure-mail decryption failed")]
    DecryptionFailed,

    /// Sender address missing or unusable
    #[error("sender email corrupted")]
    SenderEmailCorrupted,

    #[error("signature does not belong to sender")]
    SignatureDoesNotBelongToSender,

    /// Verified content is not valid UTF-8 text
    #[error("content corrupted after verification")]
    PostVerificationContentCorrupted,

    /// Signer chain does not lead to a trusted CA
    #[error("certificate verification failed")]
    CertificateVerificationFailed,

    #[error("digest verification failed")]
    DigestVerificationFailed,

    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid MIME type")]
    InvalidMimeType,

    /// Redundant header block between layers could not be removed
    #[error("failed to trim redundant header")]
    HeaderTrimFailed,
}

/// Sender address could not be extracted from a header
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SenderError {
    #[error("document has no header")]
    MissingHeader,

    #[error("header has no From field")]
    MissingFrom,

    #[error("From field has no valid address: {0}")]
    InvalidAddress(String),
}
