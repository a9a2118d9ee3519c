// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for wrapping public keys in certificates

use ehr_crypto::crypto::{pem_to_der, AsymmetricKey, KeyError};
use ehr_crypto::x509::{wrap_public_key, X509Error};
use x509_cert::der::asn1::ObjectIdentifier;
use x509_cert::der::{DecodePem, Encode};
use x509_cert::Certificate;

use crate::support::key_pair;

const EC_P256_PUBLIC_PEM: &str = "\
-----BEGIN PUBLIC KEY-----
MFkwEwYHKoZIzj0CAQYIKoZIzj0DAQcDQgAE+UmAlgMMaReYkeHrtjniWrdvuod/
y20QA+xx7Lp4t7N9cqRTU+rpFW+JMa9p/IWBXFniGua1wkcPuX7JD6KMFA==
-----END PUBLIC KEY-----
";

const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

fn parse(pem: &str) -> Certificate {
    assert!(pem.starts_with("-----BEGIN CERTIFICATE-----"));
    Certificate::from_pem(pem.as_bytes()).unwrap()
}

fn spki_der(certificate: &Certificate) -> Vec<u8> {
    certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .unwrap()
}

#[test]
fn test_wraps_pkcs8_rsa_public_key() {
    let (public, _) = key_pair();
    let pkcs8 = public.to_pkcs8_pem().unwrap();

    let certificate = parse(&wrap_public_key(&pkcs8).unwrap());
    assert_eq!(spki_der(&certificate), pem_to_der(&pkcs8).unwrap());
}

#[test]
fn test_wraps_pkcs1_rsa_public_key() {
    let (public, _) = key_pair();
    let pkcs1 = public.to_pem().unwrap();
    let pkcs8 = public.to_pkcs8_pem().unwrap();

    let certificate = parse(&wrap_public_key(&pkcs1).unwrap());
    assert_eq!(spki_der(&certificate), pem_to_der(&pkcs8).unwrap());
}

#[test]
fn test_wraps_ec_public_key() {
    let certificate = parse(&wrap_public_key(EC_P256_PUBLIC_PEM).unwrap());
    let spki = &certificate.tbs_certificate.subject_public_key_info;

    assert_eq!(spki.algorithm.oid, EC_PUBLIC_KEY_OID);
    assert_eq!(spki_der(&certificate), pem_to_der(EC_P256_PUBLIC_PEM).unwrap());
}

#[test]
fn test_placeholder_subject_and_one_year_validity() {
    let (public, _) = key_pair();
    let certificate = parse(&wrap_public_key(&public.to_pkcs8_pem().unwrap()).unwrap());
    let tbs = &certificate.tbs_certificate;

    let subject: Vec<(ObjectIdentifier, &[u8])> = tbs
        .subject
        .0
        .iter()
        .flat_map(|rdn| rdn.0.iter())
        .map(|atv| (atv.oid, atv.value.value()))
        .collect();
    assert_eq!(
        subject,
        [
            (ObjectIdentifier::new_unwrap("2.5.4.6"), &b"XX"[..]),
            (ObjectIdentifier::new_unwrap("2.5.4.10"), &b"XX"[..]),
            (ObjectIdentifier::new_unwrap("2.5.4.3"), &b"XX"[..]),
        ]
    );
    assert_eq!(tbs.issuer, tbs.subject);

    let not_before = tbs.validity.not_before.to_unix_duration();
    let not_after = tbs.validity.not_after.to_unix_duration();
    assert_eq!((not_after - not_before).as_secs(), 365 * 24 * 60 * 60);
}

#[test]
fn test_rejects_non_public_blocks() {
    let (_, private) = key_pair();
    assert_eq!(
        wrap_public_key(&private.to_pem().unwrap()),
        Err(X509Error::UnsupportedPublicKey)
    );
    assert_eq!(
        wrap_public_key("-----BEGIN PUBLIC KEY-----\n%%%\n-----END PUBLIC KEY-----"),
        Err(X509Error::Key(KeyError::InvalidPemData))
    );
    assert!(matches!(
        wrap_public_key("-----BEGIN RSA PUBLIC KEY-----\nMAA=\n-----END RSA PUBLIC KEY-----"),
        Err(X509Error::Key(KeyError::CreatingKey(_)))
    ));
}
