// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! X.509 Requests and Certificates
//!
//! - **CSR**: PKCS#10 certificate signing requests for platform key pairs
//! - **Certificate**: wrapping a bare public key in an X.509 certificate for
//!   consumers that only import keys from certificates
//!
//! DER is produced by `x509-cert`; nothing here parses ASN.1 by hand.

pub mod certificate;
pub mod csr;

pub use certificate::wrap_public_key;
pub use csr::{create_csr, CsrAttributes};

use thiserror::Error;

use crate::crypto::KeyError;

/// Errors from request and certificate building
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum X509Error {
    /// A signing request can only be created from a private key
    #[error("invalid key: a private key is required")]
    InvalidKey,

    /// Subject attribute cannot be encoded as its ASN.1 string type
    #[error("invalid subject attribute '{attribute}': {reason}")]
    InvalidAttribute {
        attribute: &'static str,
        reason: String,
    },

    /// Public key PEM is neither SubjectPublicKeyInfo nor PKCS#1
    #[error("unsupported public key PEM")]
    UnsupportedPublicKey,

    #[error("failed creating {what}: {reason}")]
    Build { what: &'static str, reason: String },

    #[error(transparent)]
    Key(#[from] KeyError),
}

impl X509Error {
    pub(crate) fn build(what: &'static str) -> impl Fn(x509_cert::builder::Error) -> Self {
        move |err| X509Error::Build {
            what,
            reason: err.to_string(),
        }
    }

    pub(crate) fn encoding(what: &'static str) -> impl Fn(x509_cert::der::Error) -> Self {
        move |err| X509Error::Build {
            what,
            reason: err.to_string(),
        }
    }
}
