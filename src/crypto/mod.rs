// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Cryptographic Primitives
//!
//! Leaf layer shared by the envelope profiles and the secure-mail pipeline:
//!
//! - **Symmetric**: AES-256 in GCM (16-byte IV) and CBC/PKCS#7 modes
//! - **Asymmetric**: RSA key transport with PKCS#1 v1.5 or OAEP-SHA256 padding
//! - **Key**: opaque key handles with an immutable access tag
//! - **Hash**: SHA-256, one-shot and streamed
//! - **KDF**: scrypt with explicit cost parameters
//! - **PKCS#8**: PKCS#1 to PKCS#8 conversion and password-protected private keys
//! - **PEM**: armor handling for the five block types used on the platform
//!
//! ## Security Considerations
//!
//! - Access level is checked before any backend call
//! - Generated and derived key material lives in zeroizing buffers
//! - Primitive errors are diagnostic; public boundaries re-map them

pub mod asymmetric;
pub mod error;
pub mod hash;
pub mod kdf;
pub mod key;
pub mod pem;
pub mod pkcs8;
pub mod provider;
pub mod symmetric;

pub use asymmetric::AsymmetricPadding;
pub use error::{CryptoError, KeyError, PublicError};
pub use hash::{sha256, sha256_reader};
pub use kdf::ScryptParams;
pub use key::{AsymmetricKey, KeyAccess, KeyAlgorithm, KeySize, RsaKey};
pub use pem::{der_to_pem, pem_to_der, PemFormat};
pub use provider::{PrimitiveProvider, RustCryptoProvider};
pub use symmetric::{BlockMode, SymmetricOutput, AES_256_KEY_SIZE, IV_SIZE, TAG_SIZE};
