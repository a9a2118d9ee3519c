// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hybrid Envelope Engine
//!
//! Encrypts a payload under a fresh AES-256 key and wraps that key (with its
//! IV) for a recipient's RSA public key.
//!
//! ## Flow
//!
//! ```text
//! encrypt: random key+iv -> AES(payload) -> codec(key, iv) -> RSA(codec) -> base64
//! decrypt: base64 -> RSA^-1 -> codec^-1 (lengths checked) -> AES^-1(payload)
//! ```
//!
//! ## Security Considerations
//!
//! - Key access is checked before the provider is touched
//! - Every failure leaves the engine as an opaque `PublicError`; the diagnostic
//!   cause is logged at `warn` without key material
//! - Block mode and padding come only from the envelope's version tag

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tracing::warn;
use zeroize::Zeroizing;

use super::attr::CipherAttr;
use super::codec::{self, FieldEncoding};
use super::version::HybridVersion;
use crate::crypto::asymmetric::require_access;
use crate::crypto::{
    AsymmetricKey, CryptoError, KeyAccess, KeyError, PrimitiveProvider, PublicError,
    RustCryptoProvider,
};

/// Output of a hybrid encryption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// base64 of the RSA-wrapped codec bytes
    pub wrapped_key: String,
    /// AES ciphertext (GCM tag appended)
    #[serde(with = "base64_bytes")]
    pub payload: Vec<u8>,
    pub version: HybridVersion,
}

/// Where an unwrap went wrong; profiles map these to their own taxonomy
#[derive(Debug)]
pub(crate) enum OpenError {
    Access(KeyError),
    Unwrap(CryptoError),
    Contents(CryptoError),
    Payload(CryptoError),
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenError::Access(e) => write!(f, "access: {}", e),
            OpenError::Unwrap(e) => write!(f, "key unwrap: {}", e),
            OpenError::Contents(e) => write!(f, "key contents: {}", e),
            OpenError::Payload(e) => write!(f, "payload: {}", e),
        }
    }
}

/// Versioned hybrid encryption over a primitive provider
#[derive(Debug, Clone)]
pub struct HybridEngine<P: PrimitiveProvider = RustCryptoProvider> {
    provider: P,
    encoding: FieldEncoding,
}

impl Default for HybridEngine<RustCryptoProvider> {
    fn default() -> Self {
        Self::new(RustCryptoProvider, FieldEncoding::Single)
    }
}

impl<P: PrimitiveProvider> HybridEngine<P> {
    pub fn new(provider: P, encoding: FieldEncoding) -> Self {
        Self { provider, encoding }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Encrypt `plaintext` for `recipient` under `version`
    ///
    /// # Errors
    ///
    /// `PublicError::EncryptionFailed` for any failure, including a non-public
    /// recipient key.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        recipient: &dyn AsymmetricKey,
        version: HybridVersion,
    ) -> Result<EncryptedEnvelope, PublicError> {
        if let Err(e) = require_access(recipient, KeyAccess::Public) {
            warn!(%version, error = %e, "envelope encryption rejected");
            return Err(PublicError::EncryptionFailed);
        }

        self.seal(plaintext, recipient, version).map_err(|e| {
            warn!(%version, error = %e, "envelope encryption failed");
            PublicError::EncryptionFailed
        })
    }

    /// Decrypt `envelope` with the recipient's private key
    ///
    /// # Errors
    ///
    /// `PublicError::DecryptionFailed` for any failure, including a non-private
    /// key, a tampered payload or a tampered wrapped key.
    pub fn decrypt(
        &self,
        envelope: &EncryptedEnvelope,
        recipient: &dyn AsymmetricKey,
    ) -> Result<Vec<u8>, PublicError> {
        let version = envelope.version;
        if let Err(e) = require_access(recipient, KeyAccess::Private) {
            warn!(%version, error = %e, "envelope decryption rejected");
            return Err(PublicError::DecryptionFailed);
        }

        let wrapped = STANDARD.decode(&envelope.wrapped_key).map_err(|e| {
            warn!(%version, error = %e, "wrapped key is not base64");
            PublicError::DecryptionFailed
        })?;

        self.open(&wrapped, &envelope.payload, recipient, version)
            .map_err(|e| {
                warn!(%version, error = %e, "envelope decryption failed");
                PublicError::DecryptionFailed
            })
    }

    fn seal(
        &self,
        plaintext: &[u8],
        recipient: &dyn AsymmetricKey,
        version: HybridVersion,
    ) -> Result<EncryptedEnvelope, CryptoError> {
        // 1+2. fresh key/iv, encrypt payload
        let output = self
            .provider
            .sym_encrypt(plaintext, None, None, version.block_mode())?;

        // 3. encode key material
        let attr = CipherAttr::new(&output.key, &output.iv, version)?;
        let encoded = codec::encode(&attr, self.encoding)?;

        // 4+5. wrap for the recipient
        let wrapped = self
            .provider
            .asym_encrypt(&encoded, recipient, version.padding())?;

        Ok(EncryptedEnvelope {
            wrapped_key: STANDARD.encode(wrapped),
            payload: output.ciphertext,
            version,
        })
    }

    /// Unwrap the key material and decrypt `payload`
    pub(crate) fn open(
        &self,
        wrapped: &[u8],
        payload: &[u8],
        recipient: &dyn AsymmetricKey,
        version: HybridVersion,
    ) -> Result<Vec<u8>, OpenError> {
        require_access(recipient, KeyAccess::Private).map_err(OpenError::Access)?;

        let encoded = Zeroizing::new(
            self.provider
                .asym_decrypt(wrapped, recipient, version.padding())
                .map_err(OpenError::Unwrap)?,
        );
        let attr = codec::decode(&encoded, version, self.encoding).map_err(OpenError::Contents)?;

        self.provider
            .sym_decrypt(payload, attr.key(), attr.iv(), version.block_mode())
            .map_err(OpenError::Payload)
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}
