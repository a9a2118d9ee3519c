// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for charlie stickers and fingerprints

use ehr_crypto::crypto::PublicError;
use ehr_crypto::sticker::fingerprint::to_fingerprint;
use ehr_crypto::sticker::{MedStickerEncryption, StickerVersion};

const PIN: &str = "qmHuG263";
const SECRET: &str = "backendsecret";
const SALT: &str = "secondsalt";
const IV: [u8; 16] = [0x42; 16];

const CHARLIE_KEY_HEX: &str = "35b3d52522dedda3a1806cd7ab48253b85ca491b36493863118bcd7554dd8340";
const CHARLIE_FINGERPRINT: &str =
    "charlie:058ddcceb25b4c6e9ce0a8e146c966f6e52e519bcce324aa0b8b5c9e4d8955c3";

#[test]
fn test_fingerprint_secret_known_answer() {
    let secret = MedStickerEncryption::new()
        .generate_fingerprint_secret(PIN)
        .unwrap();
    assert_eq!(
        secret,
        "charlie:caa3a48d8781b2621c15b39a0608971cf57d37e4b5df18df1ac8f313d1d945dc\
         0aa01d146fb02cbff3035d4acbd1c16c8d59753dc2765d2c1011e627ea68330e"
    );
}

#[test]
fn test_fingerprint_secret_depends_on_pin_only() {
    let sticker = MedStickerEncryption::new();
    let first = sticker.generate_fingerprint_secret(PIN).unwrap();
    let again = sticker.generate_fingerprint_secret(PIN).unwrap();
    let other = sticker.generate_fingerprint_secret("qmHuG264").unwrap();

    assert_eq!(first, again);
    assert_ne!(first, other);
}

#[test]
fn test_key_and_fingerprint_known_answer() {
    let pair = MedStickerEncryption::new()
        .generate_key_and_fingerprint(PIN, SECRET, SALT)
        .unwrap();

    assert_eq!(hex::encode(pair.key()), CHARLIE_KEY_HEX);
    assert_eq!(pair.fingerprint(), CHARLIE_FINGERPRINT);
}

#[test]
fn test_fingerprint_is_not_the_key() {
    let pair = MedStickerEncryption::new()
        .generate_key_and_fingerprint(PIN, SECRET, SALT)
        .unwrap();

    // halves must not be swapped
    assert_ne!(pair.fingerprint(), to_fingerprint(pair.key()));
    assert!(!pair.fingerprint().contains(CHARLIE_KEY_HEX));
}

#[test]
fn test_charlie_roundtrip() {
    let sticker = MedStickerEncryption::new();
    let encrypted = sticker
        .encrypt_charlie(PIN, SECRET, SALT, &IV, b"emergency contact: 555-0100")
        .unwrap();

    assert_eq!(*encrypted.attr.version(), StickerVersion::Charlie);
    assert_eq!(hex::encode(encrypted.attr.key()), CHARLIE_KEY_HEX);
    assert_eq!(encrypted.attr.iv(), &IV[..]);

    let decrypted = sticker
        .decrypt_charlie(PIN, SECRET, SALT, &IV, &encrypted.data)
        .unwrap();
    assert_eq!(decrypted, b"emergency contact: 555-0100");

    // the attr alone is enough too
    assert_eq!(
        sticker.decrypt(&encrypted.data, &encrypted.attr).unwrap(),
        b"emergency contact: 555-0100"
    );
}

#[test]
fn test_charlie_wrong_secret_fails() {
    let sticker = MedStickerEncryption::new();
    let encrypted = sticker
        .encrypt_charlie(PIN, SECRET, SALT, &IV, b"data")
        .unwrap();

    assert_eq!(
        sticker.decrypt_charlie(PIN, "othersecret", SALT, &IV, &encrypted.data),
        Err(PublicError::DecryptionFailed)
    );
    assert_eq!(
        sticker.decrypt_charlie(PIN, SECRET, SALT, &[0x43; 16], &encrypted.data),
        Err(PublicError::DecryptionFailed)
    );
}

#[test]
fn test_charlie_rejects_bad_iv() {
    let sticker = MedStickerEncryption::new();
    assert_eq!(
        sticker
            .encrypt_charlie(PIN, SECRET, SALT, &[0u8; 8], b"data")
            .unwrap_err(),
        PublicError::EncryptionFailed
    );
    assert_eq!(
        sticker.decrypt_charlie(PIN, SECRET, SALT, &[0u8; 8], b"data"),
        Err(PublicError::DecryptionFailed)
    );
}
