// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generic end-to-end envelopes
//!
//! The caller chooses the version and carries it out of band. The wrapped key
//! travels as a separate "meta message" whose JSON fields hold the key and IV
//! base64-encoded twice.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;
use tracing::warn;

use super::codec::FieldEncoding;
use super::engine::{HybridEngine, OpenError};
use super::version::HybridVersion;
use crate::config::CryptoConfig;
use crate::crypto::{AsymmetricKey, PrimitiveProvider, PublicError, RustCryptoProvider};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum E2eeError {
    #[error("meta message is not valid base64")]
    InvalidMetaMessageBase64,

    #[error("meta message contents are invalid")]
    InvalidMetaMessageContents,

    #[error(transparent)]
    Opaque(#[from] PublicError),
}

/// Encrypted payload plus its meta message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct E2eeMessage {
    pub payload: Vec<u8>,
    /// base64 of the RSA-wrapped key material
    pub meta_message: String,
}

#[derive(Debug, Clone)]
pub struct E2ee<P: PrimitiveProvider = RustCryptoProvider> {
    engine: HybridEngine<P>,
    current: HybridVersion,
}

impl Default for E2ee {
    fn default() -> Self {
        Self::with_provider(RustCryptoProvider)
    }
}

impl E2ee {
    /// Profile whose default version is `config.e2ee_version`
    pub fn from_config(config: &CryptoConfig) -> Self {
        Self::default().with_version(config.e2ee_version)
    }
}

impl<P: PrimitiveProvider> E2ee<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            engine: HybridEngine::new(provider, FieldEncoding::Double),
            current: HybridVersion::default(),
        }
    }

    pub fn with_version(mut self, version: HybridVersion) -> Self {
        self.current = version;
        self
    }

    /// Version used by `encrypt_current`; the receiver must learn it out of band
    pub fn current_version(&self) -> HybridVersion {
        self.current
    }

    pub fn encrypt_current(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
    ) -> Result<E2eeMessage, E2eeError> {
        self.encrypt(data, key, self.current)
    }

    pub fn encrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
        version: HybridVersion,
    ) -> Result<E2eeMessage, E2eeError> {
        let envelope = self.engine.encrypt(data, key, version)?;
        Ok(E2eeMessage {
            payload: envelope.payload,
            meta_message: envelope.wrapped_key,
        })
    }

    /// # Errors
    ///
    /// - `InvalidMetaMessageBase64` if `meta_message` is not base64
    /// - `InvalidMetaMessageContents` if the unwrapped JSON is malformed
    /// - `Opaque(DecryptionFailed)` for key or payload failures
    pub fn decrypt(
        &self,
        data: &[u8],
        meta_message: &str,
        key: &dyn AsymmetricKey,
        version: HybridVersion,
    ) -> Result<Vec<u8>, E2eeError> {
        let wrapped = STANDARD
            .decode(meta_message)
            .map_err(|_| E2eeError::InvalidMetaMessageBase64)?;

        self.engine
            .open(&wrapped, data, key, version)
            .map_err(|e| {
                warn!(%version, error = %e, "e2ee decryption failed");
                match e {
                    OpenError::Contents(_) => E2eeError::InvalidMetaMessageContents,
                    _ => E2eeError::Opaque(PublicError::DecryptionFailed),
                }
            })
    }
}
