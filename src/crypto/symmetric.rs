// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-256 Symmetric Encryption
//!
//! Bulk payload encryption used by every envelope profile. Two block modes are
//! supported:
//!
//! - **GCM**: AES-256-GCM with a 16-byte IV, ciphertext and 16-byte tag combined
//!   (`[ciphertext | tag]`), no extra padding
//! - **CBC**: AES-256-CBC with PKCS#7 payload padding
//!
//! GCM runs with a 16-byte nonce; the initial counter block is derived through
//! GHASH rather than the 96-bit fast path.

use aes::Aes256;
use aes_gcm::{
    aead::{consts::U16, Aead, KeyInit},
    AesGcm, Nonce,
};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use super::error::CryptoError;

/// AES-256 key size in bytes
pub const AES_256_KEY_SIZE: usize = 32;

/// IV size in bytes for both block modes
pub const IV_SIZE: usize = 16;

/// AES-GCM authentication tag size in bytes
pub const TAG_SIZE: usize = 16;

type Aes256Gcm16 = AesGcm<Aes256, U16>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Block mode for AES-256
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockMode {
    Gcm,
    Cbc,
}

/// Output of a symmetric encryption: ciphertext plus the key and IV used
pub struct SymmetricOutput {
    pub ciphertext: Vec<u8>,
    pub key: Zeroizing<Vec<u8>>,
    pub iv: Vec<u8>,
}

impl std::fmt::Debug for SymmetricOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricOutput")
            .field("ciphertext_len", &self.ciphertext.len())
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Fill a buffer of `len` bytes from the OS RNG
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encrypt `plaintext` with AES-256 in the given block mode
///
/// A random key and IV are generated when `key` / `iv` are `None`.
///
/// # Errors
///
/// Returns error if a supplied key is not 32 bytes or a supplied IV is not
/// 16 bytes.
pub fn encrypt(
    plaintext: &[u8],
    key: Option<&[u8]>,
    iv: Option<&[u8]>,
    mode: BlockMode,
) -> Result<SymmetricOutput, CryptoError> {
    let key = Zeroizing::new(match key {
        Some(k) => k.to_vec(),
        None => random_bytes(AES_256_KEY_SIZE),
    });
    let iv = match iv {
        Some(v) => v.to_vec(),
        None => random_bytes(IV_SIZE),
    };
    validate_material(&key, &iv)?;

    let ciphertext = match mode {
        BlockMode::Gcm => {
            let cipher = Aes256Gcm16::new_from_slice(&key).map_err(|_| {
                CryptoError::InvalidKeyLength {
                    expected: AES_256_KEY_SIZE,
                    actual: key.len(),
                }
            })?;
            cipher
                .encrypt(Nonce::<U16>::from_slice(&iv), plaintext)
                .map_err(|_| CryptoError::AuthenticationFailed {
                    operation: "aes_gcm_encrypt".to_string(),
                })?
        }
        BlockMode::Cbc => Aes256CbcEnc::new_from_slices(&key, &iv)
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: AES_256_KEY_SIZE,
                actual: key.len(),
            })?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
    };

    Ok(SymmetricOutput {
        ciphertext,
        key,
        iv,
    })
}

/// Decrypt `ciphertext` with AES-256 in the given block mode
///
/// # Errors
///
/// - `AuthenticationFailed` if the GCM tag does not verify
/// - `PaddingError` if the CBC padding does not validate
/// - length errors for malformed key or IV
pub fn decrypt(
    ciphertext: &[u8],
    key: &[u8],
    iv: &[u8],
    mode: BlockMode,
) -> Result<Vec<u8>, CryptoError> {
    validate_material(key, iv)?;

    match mode {
        BlockMode::Gcm => {
            if ciphertext.len() < TAG_SIZE {
                return Err(CryptoError::InvalidPayload {
                    field: "ciphertext".to_string(),
                    reason: format!(
                        "too short: expected at least {} bytes for tag, got {}",
                        TAG_SIZE,
                        ciphertext.len()
                    ),
                });
            }
            let cipher = Aes256Gcm16::new_from_slice(key).map_err(|_| {
                CryptoError::InvalidKeyLength {
                    expected: AES_256_KEY_SIZE,
                    actual: key.len(),
                }
            })?;
            cipher
                .decrypt(Nonce::<U16>::from_slice(iv), ciphertext)
                .map_err(|_| CryptoError::AuthenticationFailed {
                    operation: "aes_gcm_decrypt".to_string(),
                })
        }
        BlockMode::Cbc => Aes256CbcDec::new_from_slices(key, iv)
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: AES_256_KEY_SIZE,
                actual: key.len(),
            })?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| CryptoError::PaddingError {
                operation: "aes_cbc_decrypt".to_string(),
            }),
    }
}

fn validate_material(key: &[u8], iv: &[u8]) -> Result<(), CryptoError> {
    if key.len() != AES_256_KEY_SIZE {
        return Err(CryptoError::InvalidKeyLength {
            expected: AES_256_KEY_SIZE,
            actual: key.len(),
        });
    }
    if iv.len() != IV_SIZE {
        return Err(CryptoError::InvalidIvLength {
            expected: IV_SIZE,
            actual: iv.len(),
        });
    }
    Ok(())
}
