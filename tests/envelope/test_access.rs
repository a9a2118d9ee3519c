// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Key access is enforced before any primitive runs

use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ehr_crypto::crypto::{
    asymmetric, AsymmetricKey, AsymmetricPadding, BlockMode, CryptoError, KeyAccess,
    KeyAlgorithm, KeyError, KeySize, PemFormat, PrimitiveProvider, PublicError,
    RustCryptoProvider, ScryptParams, SymmetricOutput,
};
use ehr_crypto::envelope::{
    E2ee, E2eeError, EhrEncryption, FieldEncoding, HybridEngine, HybridVersion,
};
use mockall::mock;
use zeroize::Zeroizing;

use crate::support::{key_pair, PLAINTEXT};

mock! {
    pub Key {}

    impl AsymmetricKey for Key {
        fn access(&self) -> KeyAccess;
        fn algorithm(&self) -> KeyAlgorithm;
        fn size(&self) -> KeySize;
        fn supports(&self, padding: AsymmetricPadding) -> bool;
        fn encrypt(&self, data: &[u8], padding: AsymmetricPadding) -> Result<Vec<u8>, CryptoError>;
        fn decrypt(&self, data: &[u8], padding: AsymmetricPadding) -> Result<Vec<u8>, CryptoError>;
        fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
        fn verify(&self, message: &[u8], signature: &[u8]) -> Result<bool, CryptoError>;
        fn to_der(&self) -> Result<Zeroizing<Vec<u8>>, KeyError>;
    }
}

impl std::fmt::Debug for MockKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MockKey")
    }
}

/// Key whose only permitted call is `access`
fn key_with_access(access: KeyAccess) -> MockKey {
    let mut key = MockKey::new();
    key.expect_access().return_const(access);
    key.expect_supports().never();
    key.expect_encrypt().never();
    key.expect_decrypt().never();
    key
}

/// Delegates to `RustCryptoProvider` and counts every call
#[derive(Clone, Default)]
struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

impl CountingProvider {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl PrimitiveProvider for CountingProvider {
    fn sym_encrypt(
        &self,
        plaintext: &[u8],
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        mode: BlockMode,
    ) -> Result<SymmetricOutput, CryptoError> {
        self.tick();
        RustCryptoProvider.sym_encrypt(plaintext, key, iv, mode)
    }

    fn sym_decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: BlockMode,
    ) -> Result<Vec<u8>, CryptoError> {
        self.tick();
        RustCryptoProvider.sym_decrypt(ciphertext, key, iv, mode)
    }

    fn asym_encrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
        padding: AsymmetricPadding,
    ) -> Result<Vec<u8>, CryptoError> {
        self.tick();
        RustCryptoProvider.asym_encrypt(data, key, padding)
    }

    fn asym_decrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
        padding: AsymmetricPadding,
    ) -> Result<Vec<u8>, CryptoError> {
        self.tick();
        RustCryptoProvider.asym_decrypt(data, key, padding)
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        self.tick();
        RustCryptoProvider.hash(data)
    }

    fn hash_reader(&self, reader: &mut dyn Read, buffer_size: usize) -> io::Result<[u8; 32]> {
        self.tick();
        RustCryptoProvider.hash_reader(reader, buffer_size)
    }

    fn kdf(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        params: ScryptParams,
        output_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        self.tick();
        RustCryptoProvider.kdf(passphrase, salt, params, output_len)
    }

    fn pem_to_der(&self, pem: &str) -> Option<Vec<u8>> {
        self.tick();
        RustCryptoProvider.pem_to_der(pem)
    }

    fn der_to_pem(&self, der: &[u8], format: PemFormat) -> String {
        self.tick();
        RustCryptoProvider.der_to_pem(der, format)
    }
}

#[test]
fn test_encrypt_with_private_key_touches_nothing() {
    let provider = CountingProvider::default();
    let engine = HybridEngine::new(provider.clone(), FieldEncoding::Single);
    let key = key_with_access(KeyAccess::Private);

    for version in HybridVersion::ALL {
        assert_eq!(
            engine.encrypt(PLAINTEXT.as_bytes(), &key, version),
            Err(PublicError::EncryptionFailed)
        );
    }
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_decrypt_with_public_key_touches_nothing() {
    let (public, _) = key_pair();
    let envelope = HybridEngine::default()
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::GcmOaep)
        .unwrap();

    let provider = CountingProvider::default();
    let ehr = EhrEncryption::with_provider(provider.clone());
    let key = key_with_access(KeyAccess::Public);

    assert_eq!(
        ehr.decrypt(&envelope, &key),
        Err(PublicError::DecryptionFailed)
    );
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_e2ee_decrypt_with_public_key_touches_nothing() {
    let (public, _) = key_pair();
    let message = E2ee::default()
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::CbcPkcs1)
        .unwrap();

    let provider = CountingProvider::default();
    let e2ee = E2ee::with_provider(provider.clone());
    let key = key_with_access(KeyAccess::Public);

    assert_eq!(
        e2ee.decrypt(
            &message.payload,
            &message.meta_message,
            &key,
            HybridVersion::CbcPkcs1
        ),
        Err(E2eeError::Opaque(PublicError::DecryptionFailed))
    );
    assert_eq!(provider.calls(), 0);
}

#[test]
fn test_counting_provider_sees_a_full_roundtrip() {
    let (public, private) = key_pair();
    let provider = CountingProvider::default();
    let engine = HybridEngine::new(provider.clone(), FieldEncoding::Single);

    let envelope = engine
        .encrypt(PLAINTEXT.as_bytes(), public, HybridVersion::GcmOaep)
        .unwrap();
    assert_eq!(provider.calls(), 2);

    engine.decrypt(&envelope, private).unwrap();
    assert_eq!(provider.calls(), 4);
}

#[test]
fn test_unsupported_padding_stops_before_the_key() {
    let mut key = MockKey::new();
    key.expect_access().return_const(KeyAccess::Public);
    key.expect_supports()
        .withf(|padding| *padding == AsymmetricPadding::OaepSha256)
        .return_const(false);
    key.expect_encrypt().never();

    assert_eq!(
        asymmetric::encrypt(b"wrapped key", &key, AsymmetricPadding::OaepSha256),
        Err(CryptoError::UnsupportedPadding {
            padding: "rsaEncryptionOAEPSHA256".to_string()
        })
    );
}
