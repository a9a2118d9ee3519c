// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Symmetric key material with its version tag

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{CryptoError, AES_256_KEY_SIZE, IV_SIZE};

/// AES key + IV, tagged with the version that produced them
///
/// The version decides block mode, padding and KDF cost wherever the material
/// travels, so consumers never need out-of-band knowledge.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct CipherAttr<V> {
    key: [u8; AES_256_KEY_SIZE],
    iv: [u8; IV_SIZE],
    #[zeroize(skip)]
    version: V,
}

impl<V> CipherAttr<V> {
    /// Build from untrusted bytes, validating both lengths
    pub fn new(key: &[u8], iv: &[u8], version: V) -> Result<Self, CryptoError> {
        let key: [u8; AES_256_KEY_SIZE] =
            key.try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: AES_256_KEY_SIZE,
                    actual: key.len(),
                })?;
        let iv: [u8; IV_SIZE] = iv.try_into().map_err(|_| CryptoError::InvalidIvLength {
            expected: IV_SIZE,
            actual: iv.len(),
        })?;
        Ok(Self { key, iv, version })
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    pub fn version(&self) -> &V {
        &self.version
    }
}

impl<V: fmt::Debug> fmt::Debug for CipherAttr<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherAttr")
            .field("key", &"[REDACTED]")
            .field("iv", &hex::encode(self.iv))
            .field("version", &self.version)
            .finish()
    }
}
