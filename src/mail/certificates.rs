// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Trusted CA certificate set

use crate::crypto::PemFormat;

/// Trust anchors for signature verification, held as owned PEM buffers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaCertificates {
    certificates: Vec<Vec<u8>>,
}

impl CaCertificates {
    pub fn new(certificates: Vec<Vec<u8>>) -> Self {
        Self { certificates }
    }

    /// Split a PEM bundle into its certificate blocks
    ///
    /// Text outside `CERTIFICATE` blocks is ignored.
    pub fn from_pem_bundle(bundle: &str) -> Self {
        let header = PemFormat::Certificate.header();
        let footer = PemFormat::Certificate.footer();

        let mut certificates = Vec::new();
        let mut rest = bundle;
        while let Some(start) = rest.find(&header) {
            let block = &rest[start..];
            let Some(end) = block.find(&footer) else {
                break;
            };
            let end = end + footer.len();
            certificates.push(block[..end].as_bytes().to_vec());
            rest = &block[end..];
        }
        Self { certificates }
    }

    pub fn push(&mut self, certificate: Vec<u8>) {
        self.certificates.push(certificate);
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.certificates.iter().map(Vec::as_slice)
    }

    /// Certificates that are valid UTF-8, as text
    pub fn pem_strings(&self) -> impl Iterator<Item = &str> {
        self.iter().filter_map(|c| std::str::from_utf8(c).ok())
    }
}
