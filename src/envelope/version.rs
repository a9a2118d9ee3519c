// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hybrid envelope version table
//!
//! Each version maps to exactly one (block mode, padding) pair. New schemes are
//! added as new variants; an existing tag is never reused for other parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::crypto::{AsymmetricPadding, BlockMode};

/// Unknown or malformed version tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("unknown encryption version: {0}")]
    Unknown(String),
}

/// Hybrid (AES + RSA) envelope version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HybridVersion {
    /// AES-256-GCM payload, RSA-OAEP-SHA256 key transport
    #[default]
    GcmOaep,
    /// AES-256-CBC/PKCS#7 payload, RSA-PKCS#1 v1.5 key transport
    CbcPkcs1,
}

impl HybridVersion {
    pub const ALL: [HybridVersion; 2] = [HybridVersion::GcmOaep, HybridVersion::CbcPkcs1];

    pub fn block_mode(self) -> BlockMode {
        match self {
            HybridVersion::GcmOaep => BlockMode::Gcm,
            HybridVersion::CbcPkcs1 => BlockMode::Cbc,
        }
    }

    pub fn padding(self) -> AsymmetricPadding {
        match self {
            HybridVersion::GcmOaep => AsymmetricPadding::OaepSha256,
            HybridVersion::CbcPkcs1 => AsymmetricPadding::Pkcs1,
        }
    }

    /// Canonical wire tag
    pub fn as_str(self) -> &'static str {
        match self {
            HybridVersion::GcmOaep => "gcmOAEP",
            HybridVersion::CbcPkcs1 => "cbcPKCS1",
        }
    }
}

impl fmt::Display for HybridVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HybridVersion {
    type Err = VersionError;

    /// Unknown tags are rejected, never mapped to a default
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gcmOAEP" | "oeapgcm" => Ok(HybridVersion::GcmOaep),
            "cbcPKCS1" => Ok(HybridVersion::CbcPkcs1),
            other => Err(VersionError::Unknown(other.to_string())),
        }
    }
}

impl Serialize for HybridVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for HybridVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
