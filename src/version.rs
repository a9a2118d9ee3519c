// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for ehr-crypto

use crate::envelope::HybridVersion;
use crate::sticker::StickerVersion;

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Release date of this version
pub const BUILD_DATE: &str = "2025-11-03";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "hybrid-envelopes",
    "aes-256-gcm",
    "aes-256-cbc",
    "rsa-oaep-sha256",
    "rsa-pkcs1",
    "scrypt-stickers",
    "sticker-fingerprints",
    "emergency-stickers",
    "nested-smime-unwrap",
    "pkcs8-password-protection",
    "x509-csr",
];

/// Wire tags of the hybrid envelope versions this build can read
pub fn envelope_versions() -> Vec<&'static str> {
    HybridVersion::ALL.iter().map(|v| v.as_str()).collect()
}

/// Sticker versions this build can read
pub fn sticker_versions() -> Vec<&'static str> {
    StickerVersion::ALL.iter().map(|v| v.as_str()).collect()
}

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("ehr-crypto {} ({})", VERSION_NUMBER, BUILD_DATE)
}

/// Get full version info as JSON
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "date": BUILD_DATE,
        "features": FEATURES,
        "envelope_versions": envelope_versions(),
        "sticker_versions": sticker_versions(),
    })
}
