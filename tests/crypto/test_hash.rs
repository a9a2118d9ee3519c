// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Tests for SHA-256, including streamed file digests

use ehr_crypto::crypto::hash::DEFAULT_BUFFER_SIZE;
use ehr_crypto::crypto::{sha256, PrimitiveProvider, RustCryptoProvider};
use std::fs::File;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_empty_input_vector() {
    assert_eq!(
        hex::encode(sha256(b"")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_file_digest_matches_in_memory() {
    let mut file = NamedTempFile::new().unwrap();
    let contents: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
    file.write_all(&contents).unwrap();

    let mut reader = File::open(file.path()).unwrap();
    let streamed = RustCryptoProvider
        .hash_reader(&mut reader, DEFAULT_BUFFER_SIZE)
        .unwrap();

    assert_eq!(streamed, sha256(&contents));
    assert_eq!(streamed, RustCryptoProvider.hash(&contents));
}
