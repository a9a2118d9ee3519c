// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hybrid Envelopes
//!
//! RSA-wrapped AES key material in versioned envelopes:
//!
//! - **HybridEngine**: the generic encrypt/decrypt flow
//! - **EhrEncryption**: health records, always written with the current version
//! - **E2ee**: caller-versioned messages with a separate meta message
//!
//! ## Security Considerations
//!
//! - Version tags are a closed set; unknown tags fail closed
//! - Profile boundaries only return opaque errors

pub mod attr;
pub mod codec;
pub mod e2ee;
pub mod ehr;
pub mod engine;
pub mod version;

pub use attr::CipherAttr;
pub use codec::FieldEncoding;
pub use e2ee::{E2ee, E2eeError, E2eeMessage};
pub use ehr::{EhrEncryption, LocalEncryption};
pub use engine::{EncryptedEnvelope, HybridEngine};
pub use version::{HybridVersion, VersionError};
