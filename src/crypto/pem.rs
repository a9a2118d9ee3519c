// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PEM <-> DER conversion
//!
//! Only the five block types exchanged on the platform are recognised. No ASN.1
//! inspection happens here: the body between the armor lines is base64 and is
//! handed to the key backend as-is.

use base64::{engine::general_purpose::STANDARD, Engine};

/// Width of base64 body lines when writing PEM
const PEM_LINE_WIDTH: usize = 64;

/// PEM block types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PemFormat {
    PrivatePkcs1,
    PrivatePkcs8,
    PublicPkcs1,
    PublicPkcs8,
    Certificate,
}

impl PemFormat {
    pub const ALL: [PemFormat; 5] = [
        PemFormat::PrivatePkcs1,
        PemFormat::PrivatePkcs8,
        PemFormat::PublicPkcs1,
        PemFormat::PublicPkcs8,
        PemFormat::Certificate,
    ];

    fn label(self) -> &'static str {
        match self {
            PemFormat::PrivatePkcs1 => "RSA PRIVATE KEY",
            PemFormat::PrivatePkcs8 => "PRIVATE KEY",
            PemFormat::PublicPkcs1 => "RSA PUBLIC KEY",
            PemFormat::PublicPkcs8 => "PUBLIC KEY",
            PemFormat::Certificate => "CERTIFICATE",
        }
    }

    pub fn header(self) -> String {
        format!("-----BEGIN {}-----", self.label())
    }

    pub fn footer(self) -> String {
        format!("-----END {}-----", self.label())
    }

    /// Detect the block type from the first armor line of `pem`
    pub fn detect(pem: &str) -> Option<PemFormat> {
        let first = pem.lines().map(str::trim).find(|l| !l.is_empty())?;
        PemFormat::ALL.into_iter().find(|f| f.header() == first)
    }
}

/// Strip armor lines and decode the base64 body
///
/// Returns `None` when the body is not valid base64 or is empty.
pub fn pem_to_der(pem: &str) -> Option<Vec<u8>> {
    let armor: Vec<String> = PemFormat::ALL
        .iter()
        .flat_map(|f| [f.header(), f.footer()])
        .collect();

    let body: String = pem
        .lines()
        .map(str::trim)
        .filter(|line| !armor.iter().any(|a| a == line))
        .collect();

    if body.is_empty() {
        return None;
    }
    STANDARD.decode(body).ok()
}

/// Wrap DER bytes into a PEM block of the given format
pub fn der_to_pem(der: &[u8], format: PemFormat) -> String {
    let encoded = STANDARD.encode(der);
    let mut pem = format.header();
    pem.push('\n');
    for chunk in encoded.as_bytes().chunks(PEM_LINE_WIDTH) {
        // base64 output is ASCII
        pem.push_str(&String::from_utf8_lossy(chunk));
        pem.push('\n');
    }
    pem.push_str(&format.footer());
    pem.push('\n');
    pem
}
