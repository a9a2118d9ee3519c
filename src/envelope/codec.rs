// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Envelope Codec
//!
//! The structure wrapped under RSA:
//!
//! ```text
//! {"base64EncodedKey":"<base64 key>","base64EncodedIV":"<base64 iv>"}
//! ```
//!
//! Field names and order are fixed; the same attr always encodes to the same
//! bytes. Generic end-to-end meta messages carry each field base64-encoded
//! twice (`FieldEncoding::Double`), health-record envelopes once.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use super::attr::CipherAttr;
use crate::crypto::CryptoError;

/// How key and IV bytes are represented inside the JSON fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    /// `base64(bytes)`
    Single,
    /// `base64(base64(bytes))`
    Double,
}

#[derive(Serialize, Deserialize)]
struct CipherAttrJson {
    #[serde(rename = "base64EncodedKey")]
    key: String,
    #[serde(rename = "base64EncodedIV")]
    iv: String,
}

impl FieldEncoding {
    fn encode(self, bytes: &[u8]) -> String {
        match self {
            FieldEncoding::Single => STANDARD.encode(bytes),
            FieldEncoding::Double => STANDARD.encode(STANDARD.encode(bytes)),
        }
    }

    fn decode(self, field: &str, text: &str) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        let invalid = |e: base64::DecodeError| CryptoError::InvalidPayload {
            field: field.to_string(),
            reason: format!("base64 decode error: {}", e),
        };
        let once = Zeroizing::new(STANDARD.decode(text).map_err(invalid)?);
        match self {
            FieldEncoding::Single => Ok(once),
            FieldEncoding::Double => {
                Ok(Zeroizing::new(STANDARD.decode(&*once).map_err(invalid)?))
            }
        }
    }
}

/// Serialize key and IV of `attr`
pub fn encode<V>(
    attr: &CipherAttr<V>,
    encoding: FieldEncoding,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let mut json = CipherAttrJson {
        key: encoding.encode(attr.key()),
        iv: encoding.encode(attr.iv()),
    };
    let bytes = serde_json::to_vec(&json);
    json.key.zeroize();
    Ok(Zeroizing::new(bytes?))
}

/// Parse key and IV, validating lengths, and tag them with `version`
pub fn decode<V>(
    bytes: &[u8],
    version: V,
    encoding: FieldEncoding,
) -> Result<CipherAttr<V>, CryptoError> {
    let mut json: CipherAttrJson = serde_json::from_slice(bytes)?;
    let key = encoding.decode("base64EncodedKey", &json.key);
    json.key.zeroize();
    let key = key?;
    let iv = encoding.decode("base64EncodedIV", &json.iv)?;
    CipherAttr::new(&key, &iv, version)
}
