// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for single-layer decrypt and verify

use ehr_crypto::crypto::AsymmetricKey;
use ehr_crypto::mail::{EngineError, SecureMail, SecureMailError, VerifyFailure};

use super::fixture::{signed, trusted, MockEngine, ScriptedEngine, SENDER};
use crate::support::key_pair;

fn verify_failing_with(failure: VerifyFailure) -> Result<Vec<u8>, SecureMailError> {
    let mut engine = MockEngine::new();
    engine
        .expect_verify()
        .times(1)
        .returning(move |_, _, _| Err(failure.clone()));
    SecureMail::new(engine).verify(b"signed", SENDER, &trusted())
}

#[test]
fn test_verify_strips_signature() {
    let (_, private) = key_pair();
    let mail = SecureMail::new(ScriptedEngine::for_recipient(private));
    let document = signed(SENDER, "hello");

    assert_eq!(
        mail.verify(document.as_bytes(), SENDER, &trusted()).unwrap(),
        b"hello"
    );
}

#[test]
fn test_engine_failures_map_one_to_one() {
    assert_eq!(
        verify_failing_with(VerifyFailure::CertificateVerification),
        Err(SecureMailError::CertificateVerificationFailed)
    );
    assert_eq!(
        verify_failing_with(VerifyFailure::DigestMismatch),
        Err(SecureMailError::DigestVerificationFailed)
    );
    assert_eq!(
        verify_failing_with(VerifyFailure::SignerNotSender),
        Err(SecureMailError::SignatureDoesNotBelongToSender)
    );
    assert_eq!(
        verify_failing_with(VerifyFailure::InvalidMimeType),
        Err(SecureMailError::InvalidMimeType)
    );
    assert_eq!(
        verify_failing_with(VerifyFailure::Other("bad signature".to_string())),
        Err(SecureMailError::VerificationFailed)
    );
}

#[test]
fn test_tampered_content_fails_digest() {
    let (_, private) = key_pair();
    let mail = SecureMail::new(ScriptedEngine::for_recipient(private));
    let document = signed(SENDER, "dosage: 5mg").replace("5mg", "50mg");

    assert_eq!(
        mail.verify(document.as_bytes(), SENDER, &trusted()),
        Err(SecureMailError::DigestVerificationFailed)
    );
}

#[test]
fn test_binary_content_after_verify() {
    let mut engine = MockEngine::new();
    engine
        .expect_verify()
        .returning(|_, _, _| Ok(vec![0xc3, 0x28]));

    assert_eq!(
        SecureMail::new(engine).verify(b"signed", SENDER, &trusted()),
        Err(SecureMailError::PostVerificationContentCorrupted)
    );
}

#[test]
fn test_corrupted_sender_never_reaches_engine() {
    let mut engine = MockEngine::new();
    engine.expect_verify().never();
    let mail = SecureMail::new(engine);

    assert_eq!(
        mail.verify(b"signed", "", &trusted()),
        Err(SecureMailError::SenderEmailCorrupted)
    );
    assert_eq!(
        mail.verify(b"signed", "a@b.de\0c@d.de", &trusted()),
        Err(SecureMailError::SenderEmailCorrupted)
    );
}

#[test]
fn test_non_utf8_data() {
    let (_, private) = key_pair();
    let mut engine = MockEngine::new();
    engine.expect_decrypt().never();
    engine.expect_verify().never();
    let mail = SecureMail::new(engine);

    assert_eq!(
        mail.decrypt(&[0xff, 0xfe], private),
        Err(SecureMailError::DataCorrupted)
    );
    assert_eq!(
        mail.verify(&[0xff, 0xfe], SENDER, &trusted()),
        Err(SecureMailError::DataCorrupted)
    );
}

#[test]
fn test_decrypt_passes_private_pem() {
    let (public, private) = key_pair();
    let expected = private.to_pem().unwrap().to_string();
    let mut engine = MockEngine::new();
    engine
        .expect_decrypt()
        .withf(move |blob, pem| blob == "enveloped" && pem == expected)
        .times(1)
        .returning(|_, _| Ok(b"inner".to_vec()));
    let mail = SecureMail::new(engine);

    assert_eq!(mail.decrypt(b"enveloped", private).unwrap(), b"inner");
    assert_eq!(
        mail.decrypt(b"enveloped", public),
        Err(SecureMailError::PrivateKeyRequired)
    );
}

#[test]
fn test_engine_decrypt_error_is_decryption_failed() {
    let (_, private) = key_pair();
    let mut engine = MockEngine::new();
    engine
        .expect_decrypt()
        .returning(|_, _| Err(EngineError("no recipient info".to_string())));

    assert_eq!(
        SecureMail::new(engine).decrypt(b"enveloped", private),
        Err(SecureMailError::DecryptionFailed)
    );
}
