// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Sticker encryption versions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::{BlockMode, ScryptParams};
use crate::envelope::VersionError;

/// log2 of scrypt N (16384) for every sticker version
const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_P: u32 = 1;

/// Output length of the charlie derivation, split into two halves
pub const CHARLIE_DERIVED_LEN: usize = 64;

/// Sticker version; decides KDF cost and block mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StickerVersion {
    /// Legacy stickers: scrypt r = 8, AES-256-CBC
    Adam,
    /// scrypt r = 10, AES-256-GCM
    #[default]
    Britney,
    /// britney parameters with 64-byte derived output and fingerprints
    Charlie,
}

impl StickerVersion {
    pub const ALL: [StickerVersion; 3] = [
        StickerVersion::Adam,
        StickerVersion::Britney,
        StickerVersion::Charlie,
    ];

    pub fn scrypt_params(self) -> ScryptParams {
        let r = match self {
            StickerVersion::Adam => 8,
            StickerVersion::Britney | StickerVersion::Charlie => 10,
        };
        ScryptParams::new(SCRYPT_LOG_N, r, SCRYPT_P)
    }

    pub fn block_mode(self) -> BlockMode {
        match self {
            StickerVersion::Adam => BlockMode::Cbc,
            StickerVersion::Britney | StickerVersion::Charlie => BlockMode::Gcm,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StickerVersion::Adam => "adam",
            StickerVersion::Britney => "britney",
            StickerVersion::Charlie => "charlie",
        }
    }
}

impl fmt::Display for StickerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StickerVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adam" => Ok(StickerVersion::Adam),
            "britney" => Ok(StickerVersion::Britney),
            "charlie" => Ok(StickerVersion::Charlie),
            other => Err(VersionError::Unknown(other.to_string())),
        }
    }
}

impl Serialize for StickerVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StickerVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(serde::de::Error::custom)
    }
}
