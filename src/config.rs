// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for envelope and sticker encryption

use std::env;

use thiserror::Error;

use crate::crypto::KeySize;
use crate::envelope::HybridVersion;
use crate::sticker::StickerVersion;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Environment variable present but unparseable
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("{0}")]
    Unsupported(String),
}

/// Versions and key sizes used for newly produced data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoConfig {
    /// Version written by the health-record profile
    pub ehr_version: HybridVersion,
    /// Default version for end-to-end messages
    pub e2ee_version: HybridVersion,
    /// Version written by the sticker profile
    pub sticker_version: StickerVersion,
    /// RSA modulus size for generated keys
    pub rsa_key_size: KeySize,
}

impl CryptoConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults; set but unknown values are
    /// rejected rather than replaced.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            ehr_version: parse_var("EHR_ENCRYPTION_VERSION")?.unwrap_or(defaults.ehr_version),
            e2ee_version: parse_var("E2EE_ENCRYPTION_VERSION")?.unwrap_or(defaults.e2ee_version),
            sticker_version: parse_var("STICKER_ENCRYPTION_VERSION")?
                .unwrap_or(defaults.sticker_version),
            rsa_key_size: match env::var("RSA_KEY_BITS").ok() {
                Some(v) => v
                    .parse::<usize>()
                    .ok()
                    .and_then(|bits| KeySize::from_bits(bits).ok())
                    .ok_or(ConfigError::InvalidValue {
                        var: "RSA_KEY_BITS",
                        value: v,
                    })?,
                None => defaults.rsa_key_size,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        // charlie needs a backend secret per sticker
        if self.sticker_version == StickerVersion::Charlie {
            return Err(ConfigError::Unsupported(
                "charlie stickers cannot be produced from PIN and code alone".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            ehr_version: HybridVersion::GcmOaep,
            e2ee_version: HybridVersion::GcmOaep,
            sticker_version: StickerVersion::Britney,
            rsa_key_size: KeySize::Bits4096,
        }
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(None),
    }
}
