// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PKCS#8 Key Containers
//!
//! Keys travel as PKCS#1 inside envelopes and mail, but key backups and some
//! integrations expect PKCS#8. These helpers take PEM text and return PEM text
//! (or a key handle) so callers never touch DER.
//!
//! ## Security Considerations
//!
//! - Password protection is PBES2 with scrypt and AES-256-CBC
//! - Empty passwords are refused before any key material is parsed
//! - Decryption failures do not say whether the password or the block was wrong

use zeroize::Zeroizing;

use super::error::KeyError;
use super::key::{KeyAccess, RsaKey};
use super::pem::PemFormat;

/// Re-armor a PKCS#1 key (`RSA PRIVATE KEY` / `RSA PUBLIC KEY`) as PKCS#8
pub fn convert_pkcs1_to_pkcs8(pem: &str) -> Result<Zeroizing<String>, KeyError> {
    let access = match PemFormat::detect(pem) {
        Some(PemFormat::PrivatePkcs1) => KeyAccess::Private,
        Some(PemFormat::PublicPkcs1) => KeyAccess::Public,
        _ => return Err(KeyError::InvalidPemData),
    };
    RsaKey::from_pem(pem, access)?.to_pkcs8_pem()
}

/// PKCS#8 PEM for raw PKCS#1 DER
pub fn convert_pkcs1_der_to_pkcs8(
    der: &[u8],
    access: KeyAccess,
) -> Result<Zeroizing<String>, KeyError> {
    RsaKey::from_der(der, access)?.to_pkcs8_pem()
}

/// Encrypt a private key PEM (PKCS#1 or PKCS#8) under `password`
pub fn encrypt(pem: &str, password: &str) -> Result<String, KeyError> {
    if password.is_empty() {
        return Err(KeyError::EmptyPassword);
    }
    RsaKey::from_pem(pem, KeyAccess::Private)?.to_encrypted_pkcs8_pem(password)
}

/// Decrypt an `ENCRYPTED PRIVATE KEY` block into a private key handle
pub fn decrypt(pem: &str, password: &str) -> Result<RsaKey, KeyError> {
    RsaKey::from_encrypted_pkcs8_pem(pem, password)
}
