// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Asymmetric Key Handles
//!
//! `AsymmetricKey` is the opaque handle every envelope profile and the
//! secure-mail pipeline work against. It exposes only the access level,
//! algorithm, size and the operations a key can perform; the backing library
//! stays behind the trait.
//!
//! ## Security Considerations
//!
//! - The access tag is fixed at construction and checked before every operation
//! - Private key material is never logged (`Debug` is redacted)
//! - Exported DER/PEM for private keys is returned in zeroizing buffers

use std::fmt;

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::asymmetric::AsymmetricPadding;
use super::error::{CryptoError, KeyError};
use super::pem::{der_to_pem, pem_to_der, PemFormat};

/// Access level of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAccess {
    Public,
    Private,
}

impl KeyAccess {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyAccess::Public => "public",
            KeyAccess::Private => "private",
        }
    }

    /// PEM block a key of this access is exported as
    pub fn pem_format(self) -> PemFormat {
        match self {
            KeyAccess::Public => PemFormat::PublicPkcs1,
            KeyAccess::Private => PemFormat::PrivatePkcs1,
        }
    }
}

/// Key algorithm tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
}

/// Supported RSA modulus sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeySize {
    /// Used for integrations
    Bits2048,
    #[default]
    Bits4096,
}

impl KeySize {
    pub fn bits(self) -> usize {
        match self {
            KeySize::Bits2048 => 2048,
            KeySize::Bits4096 => 4096,
        }
    }

    pub fn from_bits(bits: usize) -> Result<Self, KeyError> {
        match bits {
            2048 => Ok(KeySize::Bits2048),
            4096 => Ok(KeySize::Bits4096),
            other => Err(KeyError::UnsupportedSize(other)),
        }
    }
}

/// Opaque asymmetric key handle
pub trait AsymmetricKey: Send + Sync + fmt::Debug {
    fn access(&self) -> KeyAccess;

    fn algorithm(&self) -> KeyAlgorithm;

    fn size(&self) -> KeySize;

    /// Whether this key can encrypt/decrypt with `padding`
    fn supports(&self, padding: AsymmetricPadding) -> bool;

    fn encrypt(&self, data: &[u8], padding: AsymmetricPadding) -> Result<Vec<u8>, CryptoError>;

    fn decrypt(&self, data: &[u8], padding: AsymmetricPadding) -> Result<Vec<u8>, CryptoError>;

    /// PKCS#1 v1.5 SHA-256 signature; private keys only
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError>;

    /// PKCS#1 DER of this key
    fn to_der(&self) -> Result<Zeroizing<Vec<u8>>, KeyError>;

    /// PKCS#1 PEM of this key
    fn to_pem(&self) -> Result<Zeroizing<String>, KeyError> {
        let der = self.to_der()?;
        Ok(Zeroizing::new(der_to_pem(&der, self.access().pem_format())))
    }
}

#[derive(Clone)]
enum RsaInner {
    Public(RsaPublicKey),
    Private(RsaPrivateKey),
}

/// RSA key backed by the `rsa` crate
#[derive(Clone)]
pub struct RsaKey {
    inner: RsaInner,
    size: KeySize,
}

impl RsaKey {
    /// Generate a fresh private key
    pub fn generate(size: KeySize) -> Result<Self, KeyError> {
        let key = RsaPrivateKey::new(&mut OsRng, size.bits())
            .map_err(|e| KeyError::CreatingKey(e.to_string()))?;
        Ok(Self {
            inner: RsaInner::Private(key),
            size,
        })
    }

    /// Parse a key from DER
    ///
    /// Public keys are accepted as PKCS#1 or SubjectPublicKeyInfo, private keys as
    /// PKCS#1 or PKCS#8.
    pub fn from_der(der: &[u8], access: KeyAccess) -> Result<Self, KeyError> {
        let inner = match access {
            KeyAccess::Public => RsaPublicKey::from_pkcs1_der(der)
                .or_else(|_| RsaPublicKey::from_public_key_der(der))
                .map(RsaInner::Public)
                .map_err(|e| KeyError::CreatingKey(e.to_string()))?,
            KeyAccess::Private => RsaPrivateKey::from_pkcs1_der(der)
                .or_else(|_| RsaPrivateKey::from_pkcs8_der(der))
                .map(RsaInner::Private)
                .map_err(|e| KeyError::CreatingKey(e.to_string()))?,
        };
        let bits = match &inner {
            RsaInner::Public(k) => k.size() * 8,
            RsaInner::Private(k) => k.size() * 8,
        };
        let size = KeySize::from_bits(bits)?;
        Ok(Self { inner, size })
    }

    /// Parse a key from PEM (PKCS#1, or PKCS#8 `PUBLIC KEY` / `PRIVATE KEY`)
    pub fn from_pem(pem: &str, access: KeyAccess) -> Result<Self, KeyError> {
        let der = Zeroizing::new(pem_to_der(pem).ok_or(KeyError::InvalidPemData)?);
        Self::from_der(&der, access)
    }

    /// Decrypt a password-protected `ENCRYPTED PRIVATE KEY` block
    pub fn from_encrypted_pkcs8_pem(pem: &str, password: &str) -> Result<Self, KeyError> {
        let key = RsaPrivateKey::from_pkcs8_encrypted_pem(pem.trim(), password.as_bytes())
            .map_err(|_| KeyError::Pkcs8Decryption)?;
        let size = KeySize::from_bits(key.size() * 8)?;
        Ok(Self {
            inner: RsaInner::Private(key),
            size,
        })
    }

    /// PKCS#8 PEM of this key: `PRIVATE KEY` or `PUBLIC KEY`
    pub fn to_pkcs8_pem(&self) -> Result<Zeroizing<String>, KeyError> {
        match &self.inner {
            RsaInner::Public(k) => k
                .to_public_key_pem(LineEnding::LF)
                .map(Zeroizing::new)
                .map_err(|e| KeyError::Export(e.to_string())),
            RsaInner::Private(k) => k
                .to_pkcs8_pem(LineEnding::LF)
                .map_err(|e| KeyError::Export(e.to_string())),
        }
    }

    /// Password-protected PKCS#8 (PBES2: scrypt + AES-256-CBC)
    ///
    /// # Errors
    ///
    /// - `KeyError::EmptyPassword` for an empty password
    /// - `KeyError::InvalidAccess` for public keys
    pub fn to_encrypted_pkcs8_pem(&self, password: &str) -> Result<String, KeyError> {
        if password.is_empty() {
            return Err(KeyError::EmptyPassword);
        }
        let RsaInner::Private(key) = &self.inner else {
            return Err(KeyError::InvalidAccess {
                required: KeyAccess::Private.as_str(),
            });
        };
        key.to_pkcs8_encrypted_pem(OsRng, password.as_bytes(), LineEnding::LF)
            .map(|pem| pem.to_string())
            .map_err(|e| KeyError::Export(e.to_string()))
    }

    /// Derive the public key from a private key
    pub fn public_key(&self) -> Result<RsaKey, KeyError> {
        match &self.inner {
            RsaInner::Private(k) => Ok(RsaKey {
                inner: RsaInner::Public(k.to_public_key()),
                size: self.size,
            }),
            RsaInner::Public(_) => Err(KeyError::InvalidAccess {
                required: KeyAccess::Private.as_str(),
            }),
        }
    }

    fn rsa_public(&self) -> RsaPublicKey {
        match &self.inner {
            RsaInner::Public(k) => k.clone(),
            RsaInner::Private(k) => k.to_public_key(),
        }
    }
}

impl fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKey")
            .field("access", &self.access())
            .field("size", &self.size.bits())
            .finish_non_exhaustive()
    }
}

fn asym_failure(operation: &str, err: impl fmt::Display) -> CryptoError {
    CryptoError::AsymmetricFailed {
        operation: operation.to_string(),
        reason: err.to_string(),
    }
}

impl AsymmetricKey for RsaKey {
    fn access(&self) -> KeyAccess {
        match self.inner {
            RsaInner::Public(_) => KeyAccess::Public,
            RsaInner::Private(_) => KeyAccess::Private,
        }
    }

    fn algorithm(&self) -> KeyAlgorithm {
        KeyAlgorithm::Rsa
    }

    fn size(&self) -> KeySize {
        self.size
    }

    fn supports(&self, _padding: AsymmetricPadding) -> bool {
        true
    }

    fn encrypt(&self, data: &[u8], padding: AsymmetricPadding) -> Result<Vec<u8>, CryptoError> {
        let RsaInner::Public(key) = &self.inner else {
            return Err(KeyError::InvalidAccess {
                required: KeyAccess::Public.as_str(),
            }
            .into());
        };
        let mut rng = OsRng;
        match padding {
            AsymmetricPadding::Pkcs1 => key.encrypt(&mut rng, Pkcs1v15Encrypt, data),
            AsymmetricPadding::OaepSha256 => key.encrypt(&mut rng, Oaep::new::<Sha256>(), data),
        }
        .map_err(|e| asym_failure("encrypt", e))
    }

    fn decrypt(&self, data: &[u8], padding: AsymmetricPadding) -> Result<Vec<u8>, CryptoError> {
        let RsaInner::Private(key) = &self.inner else {
            return Err(KeyError::InvalidAccess {
                required: KeyAccess::Private.as_str(),
            }
            .into());
        };
        match padding {
            AsymmetricPadding::Pkcs1 => key.decrypt(Pkcs1v15Encrypt, data),
            AsymmetricPadding::OaepSha256 => key.decrypt(Oaep::new::<Sha256>(), data),
        }
        .map_err(|e| asym_failure("decrypt", e))
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let RsaInner::Private(key) = &self.inner else {
            return Err(KeyError::InvalidAccess {
                required: KeyAccess::Private.as_str(),
            }
            .into());
        };
        let signing_key = SigningKey::<Sha256>::new(key.clone());
        let signature = signing_key
            .try_sign(message)
            .map_err(|e| asym_failure("sign", e))?;
        Ok(signature.to_vec())
    }

    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        let verifying_key = VerifyingKey::<Sha256>::new(self.rsa_public());
        let signature =
            Signature::try_from(signature).map_err(|e| CryptoError::InvalidPayload {
                field: "signature".to_string(),
                reason: e.to_string(),
            })?;
        Ok(verifying_key.verify(message, &signature).is_ok())
    }

    fn to_der(&self) -> Result<Zeroizing<Vec<u8>>, KeyError> {
        match &self.inner {
            RsaInner::Public(k) => k
                .to_pkcs1_der()
                .map(|doc| Zeroizing::new(doc.as_bytes().to_vec()))
                .map_err(|e| KeyError::Export(e.to_string())),
            RsaInner::Private(k) => k
                .to_pkcs1_der()
                .map(|doc| Zeroizing::new(doc.as_bytes().to_vec()))
                .map_err(|e| KeyError::Export(e.to_string())),
        }
    }
}
