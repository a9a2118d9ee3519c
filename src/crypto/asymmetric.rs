// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! RSA key transport
//!
//! Thin checked wrappers over `AsymmetricKey`: they enforce the access level
//! and padding support before the key backend is touched.

use super::error::{CryptoError, KeyError};
use super::key::{AsymmetricKey, KeyAccess};

/// Asymmetric padding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsymmetricPadding {
    /// RSAES-PKCS1-v1_5
    Pkcs1,
    /// RSAES-OAEP with SHA-256 and MGF1-SHA-256
    OaepSha256,
}

impl AsymmetricPadding {
    pub fn as_str(self) -> &'static str {
        match self {
            AsymmetricPadding::Pkcs1 => "rsaEncryptionPKCS1",
            AsymmetricPadding::OaepSha256 => "rsaEncryptionOAEPSHA256",
        }
    }
}

/// Encrypt `data` for the holder of `key`'s private half
///
/// # Errors
///
/// - `KeyError::InvalidAccess` if `key` is not a public key
/// - `UnsupportedPadding` if the key algorithm cannot use `padding`
/// - `AsymmetricFailed` for backend failures (e.g. message too long)
pub fn encrypt(
    data: &[u8],
    key: &dyn AsymmetricKey,
    padding: AsymmetricPadding,
) -> Result<Vec<u8>, CryptoError> {
    require_access(key, KeyAccess::Public)?;
    require_padding(key, padding)?;
    key.encrypt(data, padding)
}

/// Decrypt `data` with the private `key`
pub fn decrypt(
    data: &[u8],
    key: &dyn AsymmetricKey,
    padding: AsymmetricPadding,
) -> Result<Vec<u8>, CryptoError> {
    require_access(key, KeyAccess::Private)?;
    require_padding(key, padding)?;
    key.decrypt(data, padding)
}

pub(crate) fn require_access(key: &dyn AsymmetricKey, access: KeyAccess) -> Result<(), KeyError> {
    if key.access() != access {
        return Err(KeyError::InvalidAccess {
            required: access.as_str(),
        });
    }
    Ok(())
}

fn require_padding(key: &dyn AsymmetricKey, padding: AsymmetricPadding) -> Result<(), CryptoError> {
    if !key.supports(padding) {
        return Err(CryptoError::UnsupportedPadding {
            padding: padding.as_str().to_string(),
        });
    }
    Ok(())
}
