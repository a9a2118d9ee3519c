// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Nested secure-mail unwrap
//!
//! Inbound gateway mail is encrypted and signed twice: once by the gateway and
//! once by the end user. Each layer is decrypted, then verified against the
//! sender declared in the header of the document that was just decrypted.
//!
//! ```text
//! DECRYPT_1 -> VERIFY_1 -> TRIM_HEADER -> DECRYPT_2 -> VERIFY_2 -> content
//! ```
//!
//! The first failing step ends the unwrap with its own error.

use tracing::debug;

use super::certificates::CaCertificates;
use super::engine::SecureMailEngine;
use super::error::SecureMailError;
use super::sender::{HeaderSenderExtractor, SenderExtractor};
use super::smime::SecureMail;
use crate::crypto::{AsymmetricKey, KeyAccess};

/// Number of nested layers in gateway mail
pub const NESTED_LAYERS: usize = 2;

/// Lines the decrypt step leaves in front of the inner layer
pub const REDUNDANT_HEADER_LINES: usize = 3;

/// One unwrapped layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailLayer {
    /// Verified content without signature
    pub bytes: Vec<u8>,
    /// 1-based layer index
    pub step: usize,
    /// Sender the signature was checked against
    pub sender: String,
}

/// Two-layer unwrap over a secure-mail engine
#[derive(Debug, Clone)]
pub struct UnwrapPipeline<E: SecureMailEngine, S: SenderExtractor = HeaderSenderExtractor> {
    mail: SecureMail<E>,
    extractor: S,
}

impl<E: SecureMailEngine> UnwrapPipeline<E> {
    pub fn new(engine: E) -> Self {
        Self::with_extractor(engine, HeaderSenderExtractor)
    }
}

impl<E: SecureMailEngine, S: SenderExtractor> UnwrapPipeline<E, S> {
    pub fn with_extractor(engine: E, extractor: S) -> Self {
        Self {
            mail: SecureMail::new(engine),
            extractor,
        }
    }

    pub fn secure_mail(&self) -> &SecureMail<E> {
        &self.mail
    }

    /// Unwrap both layers and return the inner mail content
    pub fn unwrap(
        &self,
        blob: &[u8],
        key: &dyn AsymmetricKey,
        trusted: &CaCertificates,
    ) -> Result<Vec<u8>, SecureMailError> {
        let mut layers = self.unwrap_layers(blob, key, trusted)?;
        layers
            .pop()
            .map(|layer| layer.bytes)
            .ok_or(SecureMailError::VerificationFailed)
    }

    /// Unwrap both layers, keeping each verified layer
    pub fn unwrap_layers(
        &self,
        blob: &[u8],
        key: &dyn AsymmetricKey,
        trusted: &CaCertificates,
    ) -> Result<Vec<MailLayer>, SecureMailError> {
        if key.access() != KeyAccess::Private {
            return Err(SecureMailError::PrivateKeyRequired);
        }

        let mut layers: Vec<MailLayer> = Vec::with_capacity(NESTED_LAYERS);
        let mut current = blob.to_vec();

        for step in 1..=NESTED_LAYERS {
            if step > 1 {
                debug!(step, "trimming redundant header");
                let previous = layers.last().map(|l| l.bytes.as_slice()).unwrap_or_default();
                current = trim_redundant_header(previous)?;
            }

            let layer = self.unwrap_layer(&current, step, key, trusted)?;
            layers.push(layer);
        }

        debug!(layers = layers.len(), "secure mail unwrapped");
        Ok(layers)
    }

    /// Decrypt one layer, then verify it against its declared sender
    pub fn unwrap_layer(
        &self,
        input: &[u8],
        step: usize,
        key: &dyn AsymmetricKey,
        trusted: &CaCertificates,
    ) -> Result<MailLayer, SecureMailError> {
        debug!(step, "decrypting layer");
        let decrypted = self.mail.decrypt(input, key)?;

        let document = std::str::from_utf8(input).map_err(|_| SecureMailError::DataCorrupted)?;
        let sender = self.extractor.extract_sender(document).map_err(|e| {
            debug!(step, error = %e, "sender extraction failed");
            SecureMailError::SenderEmailCorrupted
        })?;

        debug!(step, "verifying layer");
        let bytes = self.mail.verify(&decrypted, &sender, trusted)?;

        Ok(MailLayer {
            bytes,
            step,
            sender,
        })
    }
}

/// Drop the first three `\r\n`-separated lines
pub fn trim_redundant_header(content: &[u8]) -> Result<Vec<u8>, SecureMailError> {
    let text = std::str::from_utf8(content).map_err(|_| SecureMailError::HeaderTrimFailed)?;

    let lines: Vec<&str> = text.split("\r\n").collect();
    if lines.len() < REDUNDANT_HEADER_LINES {
        return Err(SecureMailError::HeaderTrimFailed);
    }
    Ok(lines[REDUNDANT_HEADER_LINES..].join("\r\n").into_bytes())
}
