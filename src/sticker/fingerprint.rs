// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key/fingerprint derivation for charlie stickers
//!
//! ## Security Considerations
//!
//! The key and its fingerprint always come from the same 64-byte scrypt output,
//! split at the midpoint. Deriving them separately would let a stored
//! fingerprint drift from the key it identifies.

use std::fmt;

use zeroize::Zeroizing;

use super::version::{StickerVersion, CHARLIE_DERIVED_LEN};
use crate::crypto::{CryptoError, AES_256_KEY_SIZE};

/// Fixed salt for fingerprint-secret derivation
///
/// Every user shares it, so the fingerprint secret depends on the PIN alone.
/// Sticker matching relies on that determinism; see DESIGN.md before changing.
pub const FINGERPRINT_SECRET_SALT: &str = "5f1288159017d636c13c1c1b2835b8a871780bc2";

/// `"charlie:" + lowercase hex`
pub fn to_fingerprint(bytes: &[u8]) -> String {
    format!("{}:{}", StickerVersion::Charlie.as_str(), hex::encode(bytes))
}

/// Key and the fingerprint of its sibling half
pub struct KeyFingerprintPair {
    key: Zeroizing<[u8; AES_256_KEY_SIZE]>,
    fingerprint: String,
}

impl KeyFingerprintPair {
    /// Split a 64-byte derivation: first half is the key, second half the fingerprint
    pub fn from_derived(derived: &[u8]) -> Result<Self, CryptoError> {
        let (key, fingerprint_file) = split_derived(derived)?;
        Ok(Self {
            key,
            fingerprint: to_fingerprint(&fingerprint_file),
        })
    }

    pub fn key(&self) -> &[u8] {
        &self.key[..]
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl fmt::Debug for KeyFingerprintPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyFingerprintPair")
            .field("key", &"[REDACTED]")
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

/// Midpoint split shared by the sticker profiles
pub(crate) fn split_derived(
    derived: &[u8],
) -> Result<(Zeroizing<[u8; AES_256_KEY_SIZE]>, [u8; AES_256_KEY_SIZE]), CryptoError> {
    if derived.len() != CHARLIE_DERIVED_LEN {
        return Err(CryptoError::InvalidPayload {
            field: "derived".to_string(),
            reason: format!(
                "expected {} bytes, got {} bytes",
                CHARLIE_DERIVED_LEN,
                derived.len()
            ),
        });
    }
    let (first, second) = derived.split_at(AES_256_KEY_SIZE);

    let mut key = Zeroizing::new([0u8; AES_256_KEY_SIZE]);
    key.copy_from_slice(first);
    let mut fingerprint_file = [0u8; AES_256_KEY_SIZE];
    fingerprint_file.copy_from_slice(second);
    Ok((key, fingerprint_file))
}
