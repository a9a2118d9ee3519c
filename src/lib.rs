// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod mail;
pub mod sticker;
pub mod version;
pub mod x509;

// Re-export main types
pub use config::{ConfigError, CryptoConfig};
pub use crypto::{
    AsymmetricKey, CryptoError, KeyAccess, KeyError, KeySize, PrimitiveProvider, PublicError,
    RsaKey, RustCryptoProvider,
};
pub use envelope::{
    CipherAttr, E2ee, E2eeError, EhrEncryption, EncryptedEnvelope, HybridEngine, HybridVersion,
    LocalEncryption,
};
pub use mail::{
    CaCertificates, HeaderSenderExtractor, SecureMail, SecureMailEngine, SecureMailError,
    UnwrapPipeline,
};
pub use sticker::{EmergencyStickerEncryption, MedStickerEncryption, StickerVersion};
pub use x509::{create_csr, wrap_public_key, CsrAttributes, X509Error};
