// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for the hybrid envelope engine

use base64::{engine::general_purpose::STANDARD, Engine};
use ehr_crypto::crypto::PublicError;
use ehr_crypto::envelope::{EncryptedEnvelope, HybridEngine, HybridVersion};

use crate::support::{key_pair, other_key_pair, PLAINTEXT};

#[test]
fn test_roundtrip_every_version() {
    let (public, private) = key_pair();
    let engine = HybridEngine::default();

    for version in HybridVersion::ALL {
        let envelope = engine
            .encrypt(PLAINTEXT.as_bytes(), public, version)
            .unwrap();
        assert_eq!(envelope.version, version);
        assert_ne!(envelope.payload, PLAINTEXT.as_bytes());

        let decrypted = engine.decrypt(&envelope, private).unwrap();
        assert_eq!(decrypted, PLAINTEXT.as_bytes());
    }
}

#[test]
fn test_empty_and_large_payloads() {
    let (public, private) = key_pair();
    let engine = HybridEngine::default();
    let large = vec![0x5au8; 1 << 20];

    for version in HybridVersion::ALL {
        for data in [&b""[..], &large[..]] {
            let envelope = engine.encrypt(data, public, version).unwrap();
            assert_eq!(engine.decrypt(&envelope, private).unwrap(), data);
        }
    }
}

#[test]
fn test_fresh_key_per_encryption() {
    let (public, _) = key_pair();
    let engine = HybridEngine::default();

    let first = engine
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::GcmOaep)
        .unwrap();
    let second = engine
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::GcmOaep)
        .unwrap();
    assert_ne!(first.wrapped_key, second.wrapped_key);
    assert_ne!(first.payload, second.payload);
}

#[test]
fn test_tampered_gcm_payload_fails() {
    let (public, private) = key_pair();
    let engine = HybridEngine::default();
    let mut envelope = engine
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::GcmOaep)
        .unwrap();

    envelope.payload[0] ^= 0x01;
    assert_eq!(
        engine.decrypt(&envelope, private),
        Err(PublicError::DecryptionFailed)
    );
}

#[test]
fn test_tampered_cbc_payload_never_yields_plaintext() {
    let (public, private) = key_pair();
    let engine = HybridEngine::default();
    let mut envelope = engine
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::CbcPkcs1)
        .unwrap();

    // CBC is unauthenticated: garbage or a padding error are both acceptable
    envelope.payload[0] ^= 0x01;
    match engine.decrypt(&envelope, private) {
        Ok(decrypted) => assert_ne!(decrypted, PLAINTEXT.as_bytes()),
        Err(e) => assert_eq!(e, PublicError::DecryptionFailed),
    }
}

#[test]
fn test_tampered_wrapped_key_fails() {
    let (public, private) = key_pair();
    let engine = HybridEngine::default();

    for version in HybridVersion::ALL {
        let mut envelope = engine
            .encrypt(PLAINTEXT.as_bytes(), public, version)
            .unwrap();
        let mut wrapped = STANDARD.decode(&envelope.wrapped_key).unwrap();
        let middle = wrapped.len() / 2;
        wrapped[middle] ^= 0xff;
        envelope.wrapped_key = STANDARD.encode(wrapped);

        assert_eq!(
            engine.decrypt(&envelope, private),
            Err(PublicError::DecryptionFailed)
        );
    }
}

#[test]
fn test_wrong_recipient_fails() {
    let (public, _) = key_pair();
    let (_, other_private) = other_key_pair();
    let engine = HybridEngine::default();

    for version in HybridVersion::ALL {
        let envelope = engine
            .encrypt(PLAINTEXT.as_bytes(), public, version)
            .unwrap();
        assert_eq!(
            engine.decrypt(&envelope, other_private),
            Err(PublicError::DecryptionFailed)
        );
    }
}

#[test]
fn test_retagged_version_fails() {
    let (public, private) = key_pair();
    let engine = HybridEngine::default();

    let cbc = engine
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::CbcPkcs1)
        .unwrap();
    let retagged = EncryptedEnvelope {
        version: HybridVersion::GcmOaep,
        ..cbc
    };
    assert_eq!(
        engine.decrypt(&retagged, private),
        Err(PublicError::DecryptionFailed)
    );

    let gcm = engine
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::GcmOaep)
        .unwrap();
    let retagged = EncryptedEnvelope {
        version: HybridVersion::CbcPkcs1,
        ..gcm
    };
    assert!(engine.decrypt(&retagged, private).is_err());
}

#[test]
fn test_unknown_version_tag_is_rejected() {
    let json = r#"{"wrapped_key":"AAAA","payload":"AAAA","version":"ctrRSA"}"#;
    assert!(serde_json::from_str::<EncryptedEnvelope>(json).is_err());

    let json = r#"{"wrapped_key":"AAAA","payload":"AAAA","version":"oeapgcm"}"#;
    let envelope: EncryptedEnvelope = serde_json::from_str(json).unwrap();
    assert_eq!(envelope.version, HybridVersion::GcmOaep);
}
