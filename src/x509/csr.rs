// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! PKCS#10 certificate signing requests
//!
//! The request carries the key's public half, the subject built from
//! `CsrAttributes` and a SHA-256 RSA signature. Empty attributes are left out
//! of the subject.

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::{Signature, SigningKey};
use rsa::RsaPrivateKey;
use sha2::Sha256;
use tracing::debug;
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::builder::{Builder, RequestBuilder};
use x509_cert::der::asn1::{
    Ia5StringRef, ObjectIdentifier, PrintableStringRef, SetOfVec, Utf8StringRef,
};
use x509_cert::der::pem::LineEnding;
use x509_cert::der::{Any, EncodePem};
use x509_cert::name::{RdnSequence, RelativeDistinguishedName};

use super::X509Error;
use crate::crypto::{AsymmetricKey, KeyAccess, KeyError};

pub(crate) const COUNTRY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
pub(crate) const STATE: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
pub(crate) const LOCALITY: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
pub(crate) const ORGANIZATION: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
pub(crate) const ORGANIZATIONAL_UNIT: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.11");
pub(crate) const COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");
pub(crate) const EMAIL_ADDRESS: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.9.1");
pub(crate) const USER_ID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("0.9.2342.19200300.100.1.1");
pub(crate) const GIVEN_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.42");
pub(crate) const SURNAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.4");

/// ASN.1 string type an attribute value is encoded as
#[derive(Debug, Clone, Copy)]
pub(crate) enum DirectoryString {
    Printable,
    Ia5,
    Utf8,
}

/// One subject entry
pub(crate) struct SubjectEntry<'a> {
    pub name: &'static str,
    pub oid: ObjectIdentifier,
    pub kind: DirectoryString,
    pub value: &'a str,
}

/// Subject attributes of a signing request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrAttributes {
    pub country: Option<String>,
    pub state: Option<String>,
    pub location: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
    pub email_address: Option<String>,
    pub unique_identifier: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
}

impl CsrAttributes {
    fn entries(&self) -> Vec<SubjectEntry<'_>> {
        use DirectoryString::*;
        [
            ("C", COUNTRY, Printable, &self.country),
            ("ST", STATE, Utf8, &self.state),
            ("L", LOCALITY, Utf8, &self.location),
            ("O", ORGANIZATION, Utf8, &self.organization),
            ("OU", ORGANIZATIONAL_UNIT, Utf8, &self.organization_unit),
            ("emailAddress", EMAIL_ADDRESS, Ia5, &self.email_address),
            ("UID", USER_ID, Utf8, &self.unique_identifier),
            ("GN", GIVEN_NAME, Utf8, &self.given_name),
            ("SN", SURNAME, Utf8, &self.surname),
        ]
        .into_iter()
        .filter_map(|(name, oid, kind, value)| {
            let value = value.as_deref().filter(|v| !v.is_empty())?;
            Some(SubjectEntry {
                name,
                oid,
                kind,
                value,
            })
        })
        .collect()
    }

    /// Subject distinguished name, one RDN per present attribute
    pub fn to_name(&self) -> Result<RdnSequence, X509Error> {
        subject_name(&self.entries())
    }
}

pub(crate) fn subject_name(entries: &[SubjectEntry<'_>]) -> Result<RdnSequence, X509Error> {
    let rdns = entries
        .iter()
        .map(|entry| -> Result<RelativeDistinguishedName, X509Error> {
            let invalid = |err: x509_cert::der::Error| X509Error::InvalidAttribute {
                attribute: entry.name,
                reason: err.to_string(),
            };
            let value = match entry.kind {
                DirectoryString::Printable => {
                    Any::encode_from(&PrintableStringRef::new(entry.value).map_err(invalid)?)
                }
                DirectoryString::Ia5 => {
                    Any::encode_from(&Ia5StringRef::new(entry.value).map_err(invalid)?)
                }
                DirectoryString::Utf8 => {
                    Any::encode_from(&Utf8StringRef::new(entry.value).map_err(invalid)?)
                }
            }
            .map_err(invalid)?;

            let set = SetOfVec::try_from(vec![AttributeTypeAndValue {
                oid: entry.oid,
                value,
            }])
            .map_err(invalid)?;
            Ok(RelativeDistinguishedName(set))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RdnSequence(rdns))
}

/// Create a PEM `CERTIFICATE REQUEST` signed by `key`
///
/// # Errors
///
/// - `X509Error::InvalidKey` if `key` is not private; nothing else is touched
/// - `X509Error::InvalidAttribute` if an attribute cannot be encoded
///   (e.g. a non-printable country code)
pub fn create_csr(
    key: &dyn AsymmetricKey,
    attributes: Option<&CsrAttributes>,
) -> Result<String, X509Error> {
    if key.access() != KeyAccess::Private {
        return Err(X509Error::InvalidKey);
    }

    let subject = match attributes {
        Some(attributes) => attributes.to_name()?,
        None => RdnSequence(Vec::new()),
    };

    let der = key.to_der()?;
    let private = RsaPrivateKey::from_pkcs1_der(&der)
        .map_err(|e| KeyError::CreatingKey(e.to_string()))?;
    let signer = SigningKey::<Sha256>::new(private);

    let request = RequestBuilder::new(subject, &signer)
        .map_err(X509Error::build("certificate request"))?
        .build::<Signature>()
        .map_err(X509Error::build("certificate request"))?;

    debug!("Created certificate signing request");
    request
        .to_pem(LineEnding::LF)
        .map_err(X509Error::encoding("certificate request"))
}
