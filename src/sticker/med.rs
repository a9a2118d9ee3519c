// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Medical ID Sticker Encryption
//!
//! Sticker data is encrypted under key material derived from the PIN and code
//! printed on the sticker, so it can be re-derived at scan time instead of
//! stored.
//!
//! ## Derivation
//!
//! ```text
//! key = scrypt(pin, salt = code, 32)
//! iv  = scrypt(key, salt = pin, 16)
//! ```
//!
//! with N = 16384, p = 1 and r taken from the version. Charlie stickers use a
//! backend secret and salt instead, see [`MedStickerEncryption::encrypt_charlie`].
//!
//! ## Security Considerations
//!
//! - Derivation is deterministic; no randomness is involved
//! - `access_signature` hashes derived material only, never the PIN
//! - Failures are returned as `PublicError`; causes are logged at `warn`

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::warn;
use zeroize::Zeroizing;

use super::fingerprint::{to_fingerprint, KeyFingerprintPair, FINGERPRINT_SECRET_SALT};
use super::version::{StickerVersion, CHARLIE_DERIVED_LEN};
use crate::config::CryptoConfig;
use crate::crypto::{
    CryptoError, PrimitiveProvider, PublicError, RustCryptoProvider, AES_256_KEY_SIZE, IV_SIZE,
};
use crate::envelope::CipherAttr;

/// Key material for a sticker, tagged with its sticker version
pub type StickerAttr = CipherAttr<StickerVersion>;

/// Encrypted sticker payload plus the attr needed to decrypt it
#[derive(Debug, Clone)]
pub struct EncryptedMedSticker {
    pub data: Vec<u8>,
    pub attr: StickerAttr,
}

/// Sticker encryption profile
#[derive(Debug, Clone)]
pub struct MedStickerEncryption<P: PrimitiveProvider = RustCryptoProvider> {
    provider: P,
    current: StickerVersion,
}

impl Default for MedStickerEncryption {
    fn default() -> Self {
        Self::with_provider(RustCryptoProvider)
    }
}

impl MedStickerEncryption {
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile writing `config.sticker_version`
    pub fn from_config(config: &CryptoConfig) -> Self {
        Self::new().with_version(config.sticker_version)
    }
}

impl<P: PrimitiveProvider> MedStickerEncryption<P> {
    pub fn with_provider(provider: P) -> Self {
        Self {
            provider,
            current: StickerVersion::Britney,
        }
    }

    /// Override the version used by `encrypt`
    pub fn with_version(mut self, version: StickerVersion) -> Self {
        self.current = version;
        self
    }

    pub fn current_version(&self) -> StickerVersion {
        self.current
    }

    /// Derive key and IV from `pin` and `code`
    ///
    /// Identical inputs always yield identical output.
    ///
    /// # Errors
    ///
    /// `PublicError::EncryptionFailed` if the KDF rejects its parameters.
    pub fn derive_key(
        &self,
        pin: &[u8],
        code: &[u8],
        version: StickerVersion,
    ) -> Result<StickerAttr, PublicError> {
        self.try_derive_key(pin, code, version).map_err(|e| {
            warn!(%version, error = %e, "sticker key derivation failed");
            PublicError::EncryptionFailed
        })
    }

    /// Encrypt `data` with key material derived for the current version
    pub fn encrypt(
        &self,
        data: &[u8],
        pin: &[u8],
        code: &[u8],
    ) -> Result<EncryptedMedSticker, PublicError> {
        let version = self.current;
        let attr = self.derive_key(pin, code, version)?;

        let output = self
            .provider
            .sym_encrypt(data, Some(attr.key()), Some(attr.iv()), version.block_mode())
            .map_err(|e| {
                warn!(%version, error = %e, "sticker encryption failed");
                PublicError::EncryptionFailed
            })?;

        Ok(EncryptedMedSticker {
            data: output.ciphertext,
            attr,
        })
    }

    /// Decrypt with the block mode of `attr.version()`
    pub fn decrypt(&self, data: &[u8], attr: &StickerAttr) -> Result<Vec<u8>, PublicError> {
        let version = *attr.version();
        self.provider
            .sym_decrypt(data, attr.key(), attr.iv(), version.block_mode())
            .map_err(|e| {
                warn!(%version, error = %e, "sticker decryption failed");
                PublicError::DecryptionFailed
            })
    }

    /// `"{version}-sha256:" + base64(sha256(key || iv || salt))`
    ///
    /// Lets a server authorize sticker access without seeing the key.
    pub fn access_signature(&self, attr: &StickerAttr, salt: &[u8]) -> String {
        let mut combined = Zeroizing::new(Vec::with_capacity(
            AES_256_KEY_SIZE + IV_SIZE + salt.len(),
        ));
        combined.extend_from_slice(attr.key());
        combined.extend_from_slice(attr.iv());
        combined.extend_from_slice(salt);

        let digest = self.provider.hash(&combined);
        format!("{}-sha256:{}", attr.version(), STANDARD.encode(digest))
    }

    /// `"charlie:" + hex(scrypt(pin, FINGERPRINT_SECRET_SALT, 64))`
    pub fn generate_fingerprint_secret(&self, pin: &str) -> Result<String, PublicError> {
        let derived = self
            .charlie_hash(pin.as_bytes(), FINGERPRINT_SECRET_SALT.as_bytes())
            .map_err(|e| {
                warn!(error = %e, "fingerprint secret derivation failed");
                PublicError::EncryptionFailed
            })?;
        Ok(to_fingerprint(&derived))
    }

    /// One scrypt(pin || secret, salt, 64) call, split into key and fingerprint
    pub fn generate_key_and_fingerprint(
        &self,
        pin: &str,
        secret: &str,
        salt: &str,
    ) -> Result<KeyFingerprintPair, PublicError> {
        self.try_key_and_fingerprint(pin, secret, salt)
            .map_err(|e| {
                warn!(error = %e, "key and fingerprint derivation failed");
                PublicError::EncryptionFailed
            })
    }

    /// Encrypt a charlie sticker with the key half of the derived pair
    pub fn encrypt_charlie(
        &self,
        pin: &str,
        secret: &str,
        salt: &str,
        iv: &[u8],
        data: &[u8],
    ) -> Result<EncryptedMedSticker, PublicError> {
        let version = StickerVersion::Charlie;
        let result = self
            .try_key_and_fingerprint(pin, secret, salt)
            .and_then(|pair| {
                let attr = CipherAttr::new(pair.key(), iv, version)?;
                let output = self.provider.sym_encrypt(
                    data,
                    Some(attr.key()),
                    Some(attr.iv()),
                    version.block_mode(),
                )?;
                Ok(EncryptedMedSticker {
                    data: output.ciphertext,
                    attr,
                })
            });

        result.map_err(|e| {
            warn!(%version, error = %e, "charlie encryption failed");
            PublicError::EncryptionFailed
        })
    }

    /// Inverse of [`Self::encrypt_charlie`]
    pub fn decrypt_charlie(
        &self,
        pin: &str,
        secret: &str,
        salt: &str,
        iv: &[u8],
        data: &[u8],
    ) -> Result<Vec<u8>, PublicError> {
        let version = StickerVersion::Charlie;
        let result = self
            .try_key_and_fingerprint(pin, secret, salt)
            .and_then(|pair| {
                self.provider
                    .sym_decrypt(data, pair.key(), iv, version.block_mode())
            });

        result.map_err(|e| {
            warn!(%version, error = %e, "charlie decryption failed");
            PublicError::DecryptionFailed
        })
    }

    fn try_derive_key(
        &self,
        pin: &[u8],
        code: &[u8],
        version: StickerVersion,
    ) -> Result<StickerAttr, CryptoError> {
        let params = version.scrypt_params();
        let key = self.provider.kdf(pin, code, params, AES_256_KEY_SIZE)?;
        let iv = self.provider.kdf(&key, pin, params, IV_SIZE)?;
        CipherAttr::new(&key, &iv, version)
    }

    fn try_key_and_fingerprint(
        &self,
        pin: &str,
        secret: &str,
        salt: &str,
    ) -> Result<KeyFingerprintPair, CryptoError> {
        let combined = Zeroizing::new(format!("{}{}", pin, secret));
        let derived = self.charlie_hash(combined.as_bytes(), salt.as_bytes())?;
        KeyFingerprintPair::from_derived(&derived)
    }

    fn charlie_hash(
        &self,
        secret: &[u8],
        salt: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.provider.kdf(
            secret,
            salt,
            StickerVersion::Charlie.scrypt_params(),
            CHARLIE_DERIVED_LEN,
        )
    }
}
