// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Single-layer secure-mail operations

use tracing::warn;

use super::certificates::CaCertificates;
use super::engine::{SecureMailEngine, VerifyFailure};
use super::error::SecureMailError;
use crate::crypto::{AsymmetricKey, KeyAccess};

/// Decrypt and verify one S/MIME layer through an engine
#[derive(Debug, Clone)]
pub struct SecureMail<E: SecureMailEngine> {
    engine: E,
}

impl<E: SecureMailEngine> SecureMail<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Decrypt an enveloped layer
    ///
    /// # Errors
    ///
    /// - `PrivateKeyRequired` before any engine call if `key` is public
    /// - `DataCorrupted` if `data` is not UTF-8
    /// - `DecryptionFailed` if the key cannot be exported or the engine fails
    pub fn decrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
    ) -> Result<Vec<u8>, SecureMailError> {
        if key.access() != KeyAccess::Private {
            return Err(SecureMailError::PrivateKeyRequired);
        }

        let blob = std::str::from_utf8(data).map_err(|_| SecureMailError::DataCorrupted)?;

        let key_pem = key.to_pem().map_err(|e| {
            warn!(error = %e, "private key export failed");
            SecureMailError::DecryptionFailed
        })?;

        self.engine.decrypt(blob, &key_pem).map_err(|e| {
            warn!(error = %e, "secure-mail decryption failed");
            SecureMailError::DecryptionFailed
        })
    }

    /// Verify a signed layer from `sender_email` and strip its signature
    ///
    /// # Errors
    ///
    /// - `DataCorrupted` if `data` is not UTF-8
    /// - `SenderEmailCorrupted` if `sender_email` is empty or contains NUL
    /// - the engine's verification failure, mapped one to one
    /// - `PostVerificationContentCorrupted` if the content is not UTF-8
    pub fn verify(
        &self,
        data: &[u8],
        sender_email: &str,
        trusted: &CaCertificates,
    ) -> Result<Vec<u8>, SecureMailError> {
        let blob = std::str::from_utf8(data).map_err(|_| SecureMailError::DataCorrupted)?;

        if sender_email.trim().is_empty() || sender_email.contains('\0') {
            return Err(SecureMailError::SenderEmailCorrupted);
        }

        let content = self
            .engine
            .verify(blob, sender_email, trusted)
            .map_err(|failure| {
                warn!(error = %failure, "secure-mail verification failed");
                map_verify_failure(failure)
            })?;

        if std::str::from_utf8(&content).is_err() {
            return Err(SecureMailError::PostVerificationContentCorrupted);
        }
        Ok(content)
    }
}

fn map_verify_failure(failure: VerifyFailure) -> SecureMailError {
    match failure {
        VerifyFailure::CertificateVerification => SecureMailError::CertificateVerificationFailed,
        VerifyFailure::DigestMismatch => SecureMailError::DigestVerificationFailed,
        VerifyFailure::SignerNotSender => SecureMailError::SignatureDoesNotBelongToSender,
        VerifyFailure::InvalidMimeType => SecureMailError::InvalidMimeType,
        VerifyFailure::Other(_) => SecureMailError::VerificationFailed,
    }
}
