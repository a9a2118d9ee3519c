// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! scrypt key derivation

use scrypt::{scrypt, Params};
use zeroize::Zeroizing;

use super::error::CryptoError;

/// scrypt cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// log2 of the CPU/memory cost N
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl ScryptParams {
    pub const fn new(log_n: u8, r: u32, p: u32) -> Self {
        Self { log_n, r, p }
    }

    /// The cost N itself
    pub fn n(&self) -> u64 {
        1u64 << self.log_n
    }
}

/// Derive `output_len` bytes from `passphrase` and `salt`
///
/// # Errors
///
/// Returns `KeyDerivationFailed` if scrypt rejects the parameters or the
/// output length.
pub fn derive(
    passphrase: &[u8],
    salt: &[u8],
    params: ScryptParams,
    output_len: usize,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let scrypt_params = Params::new(params.log_n, params.r, params.p, output_len).map_err(|e| {
        CryptoError::KeyDerivationFailed {
            reason: format!("invalid scrypt parameters: {}", e),
        }
    })?;

    let mut output = Zeroizing::new(vec![0u8; output_len]);
    scrypt(passphrase, salt, &scrypt_params, &mut output).map_err(|e| {
        CryptoError::KeyDerivationFailed {
            reason: format!("scrypt output: {}", e),
        }
    })?;
    Ok(output)
}
