// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sticker / QR Encryption
//!
//! Key material for stickers is derived with scrypt from low-entropy secrets
//! printed on the sticker, never generated and stored:
//!
//! - **MedStickerEncryption**: adam/britney/charlie medical ID stickers
//! - **EmergencyStickerEncryption**: charlie-only emergency stickers over raw bytes
//!
//! Charlie stickers additionally derive a public fingerprint that identifies
//! a key without revealing it.

pub mod emergency;
pub mod fingerprint;
pub mod med;
pub mod version;

pub use emergency::{EmergencyStickerEncryption, KeyFingerprintFilePair};
pub use fingerprint::{KeyFingerprintPair, FINGERPRINT_SECRET_SALT};
pub use med::{EncryptedMedSticker, MedStickerEncryption, StickerAttr};
pub use version::StickerVersion;
