// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Emergency sticker encryption
//!
//! Fixed charlie parameters over raw byte inputs. Unlike the medical sticker
//! profile, the fingerprint file is returned as raw bytes and the fingerprint
//! secret covers only the first half of the derivation.

use tracing::warn;
use zeroize::Zeroizing;

use super::fingerprint::{split_derived, to_fingerprint, FINGERPRINT_SECRET_SALT};
use super::version::{StickerVersion, CHARLIE_DERIVED_LEN};
use crate::crypto::{PrimitiveProvider, PublicError, RustCryptoProvider, AES_256_KEY_SIZE};

const VERSION: StickerVersion = StickerVersion::Charlie;

/// Key and fingerprint file, both 32 bytes
pub struct KeyFingerprintFilePair {
    pub key: Zeroizing<[u8; AES_256_KEY_SIZE]>,
    pub fingerprint_file: [u8; AES_256_KEY_SIZE],
}

impl std::fmt::Debug for KeyFingerprintFilePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyFingerprintFilePair")
            .field("key", &"[REDACTED]")
            .field("fingerprint_file", &hex::encode(self.fingerprint_file))
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmergencyStickerEncryption<P: PrimitiveProvider = RustCryptoProvider> {
    provider: P,
}

impl<P: PrimitiveProvider> EmergencyStickerEncryption<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// `"charlie:" + hex(first 32 bytes of scrypt(pin, FINGERPRINT_SECRET_SALT, 64))`
    pub fn generate_fingerprint_secret(&self, pin: &[u8]) -> Result<String, PublicError> {
        let derived = self.hash(pin, FINGERPRINT_SECRET_SALT.as_bytes())?;
        Ok(to_fingerprint(&derived[..AES_256_KEY_SIZE]))
    }

    /// scrypt(pin || secret, salt, 64) split into key and fingerprint file
    pub fn generate_key_and_fingerprint_file(
        &self,
        pin: &[u8],
        secret: &[u8],
        salt: &[u8],
    ) -> Result<KeyFingerprintFilePair, PublicError> {
        let mut combined = Zeroizing::new(Vec::with_capacity(pin.len() + secret.len()));
        combined.extend_from_slice(pin);
        combined.extend_from_slice(secret);

        let derived = self.hash(&combined, salt)?;
        let (key, fingerprint_file) = split_derived(&derived).map_err(|e| {
            warn!(error = %e, "emergency key split failed");
            PublicError::EncryptionFailed
        })?;
        Ok(KeyFingerprintFilePair {
            key,
            fingerprint_file,
        })
    }

    /// AES-256-GCM under a caller-held key and IV
    pub fn encrypt(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, PublicError> {
        self.provider
            .sym_encrypt(data, Some(key), Some(iv), VERSION.block_mode())
            .map(|output| output.ciphertext)
            .map_err(|e| {
                warn!(error = %e, "emergency sticker encryption failed");
                PublicError::EncryptionFailed
            })
    }

    pub fn decrypt(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, PublicError> {
        self.provider
            .sym_decrypt(data, key, iv, VERSION.block_mode())
            .map_err(|e| {
                warn!(error = %e, "emergency sticker decryption failed");
                PublicError::DecryptionFailed
            })
    }

    fn hash(&self, secret: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>, PublicError> {
        self.provider
            .kdf(secret, salt, VERSION.scrypt_params(), CHARLIE_DERIVED_LEN)
            .map_err(|e| {
                warn!(error = %e, "emergency sticker derivation failed");
                PublicError::EncryptionFailed
            })
    }
}
