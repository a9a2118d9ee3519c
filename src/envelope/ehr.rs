// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Health-record envelopes
//!
//! New records are always written with the current version; older records are
//! read with whatever version their envelope carries.

use super::codec::FieldEncoding;
use super::engine::{EncryptedEnvelope, HybridEngine};
use super::version::HybridVersion;
use crate::config::CryptoConfig;
use crate::crypto::{AsymmetricKey, PrimitiveProvider, PublicError, RustCryptoProvider};

/// Health-record encryption profile
#[derive(Debug, Clone)]
pub struct EhrEncryption<P: PrimitiveProvider = RustCryptoProvider> {
    engine: HybridEngine<P>,
    current: HybridVersion,
}

/// On-device record storage uses the health-record profile unchanged
pub type LocalEncryption = EhrEncryption;

impl Default for EhrEncryption {
    fn default() -> Self {
        Self::new()
    }
}

impl EhrEncryption {
    pub fn new() -> Self {
        Self::with_provider(RustCryptoProvider)
    }

    /// Profile for on-device storage
    pub fn local() -> LocalEncryption {
        Self::new()
    }

    /// Profile writing `config.ehr_version`
    pub fn from_config(config: &CryptoConfig) -> Self {
        Self::new().with_version(config.ehr_version)
    }
}

impl<P: PrimitiveProvider> EhrEncryption<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            engine: HybridEngine::new(provider, FieldEncoding::Single),
            current: HybridVersion::default(),
        }
    }

    /// Override the version used for new envelopes
    pub fn with_version(mut self, version: HybridVersion) -> Self {
        self.current = version;
        self
    }

    pub fn current_version(&self) -> HybridVersion {
        self.current
    }

    /// Encrypt `data` for `key` with the current version
    ///
    /// # Errors
    ///
    /// `PublicError::EncryptionFailed`
    pub fn encrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
    ) -> Result<EncryptedEnvelope, PublicError> {
        self.engine.encrypt(data, key, self.current)
    }

    /// Decrypt with the version recorded in `envelope`
    ///
    /// # Errors
    ///
    /// `PublicError::DecryptionFailed`
    pub fn decrypt(
        &self,
        envelope: &EncryptedEnvelope,
        key: &dyn AsymmetricKey,
    ) -> Result<Vec<u8>, PublicError> {
        self.engine.decrypt(envelope, key)
    }
}
