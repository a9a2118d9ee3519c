// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Primitive Provider
//!
//! The set of stateless primitives the envelope engine is built on. The engine
//! is generic over this trait so alternative backends (platform keystores,
//! instrumented test doubles) can be swapped in without touching envelope
//! logic.

use super::asymmetric::{self, AsymmetricPadding};
use super::error::CryptoError;
use super::hash;
use super::kdf::{self, ScryptParams};
use super::key::AsymmetricKey;
use super::pem::{self, PemFormat};
use super::symmetric::{self, BlockMode, SymmetricOutput};
use std::io::{self, Read};
use zeroize::Zeroizing;

/// Stateless cryptographic primitives
pub trait PrimitiveProvider: Send + Sync {
    /// Encrypt with AES-256; key and IV are generated when omitted
    fn sym_encrypt(
        &self,
        plaintext: &[u8],
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        mode: BlockMode,
    ) -> Result<SymmetricOutput, CryptoError>;

    fn sym_decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: BlockMode,
    ) -> Result<Vec<u8>, CryptoError>;

    fn asym_encrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
        padding: AsymmetricPadding,
    ) -> Result<Vec<u8>, CryptoError>;

    fn asym_decrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
        padding: AsymmetricPadding,
    ) -> Result<Vec<u8>, CryptoError>;

    fn hash(&self, data: &[u8]) -> [u8; 32];

    /// SHA-256 over a stream, read in `buffer_size` chunks
    fn hash_reader(&self, reader: &mut dyn Read, buffer_size: usize) -> io::Result<[u8; 32]>;

    fn kdf(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        params: ScryptParams,
        output_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError>;

    fn pem_to_der(&self, pem: &str) -> Option<Vec<u8>>;

    fn der_to_pem(&self, der: &[u8], format: PemFormat) -> String;
}

/// Default provider on the RustCrypto stack
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoProvider;

impl PrimitiveProvider for RustCryptoProvider {
    fn sym_encrypt(
        &self,
        plaintext: &[u8],
        key: Option<&[u8]>,
        iv: Option<&[u8]>,
        mode: BlockMode,
    ) -> Result<SymmetricOutput, CryptoError> {
        symmetric::encrypt(plaintext, key, iv, mode)
    }

    fn sym_decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        mode: BlockMode,
    ) -> Result<Vec<u8>, CryptoError> {
        symmetric::decrypt(ciphertext, key, iv, mode)
    }

    fn asym_encrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
        padding: AsymmetricPadding,
    ) -> Result<Vec<u8>, CryptoError> {
        asymmetric::encrypt(data, key, padding)
    }

    fn asym_decrypt(
        &self,
        data: &[u8],
        key: &dyn AsymmetricKey,
        padding: AsymmetricPadding,
    ) -> Result<Vec<u8>, CryptoError> {
        asymmetric::decrypt(data, key, padding)
    }

    fn hash(&self, data: &[u8]) -> [u8; 32] {
        hash::sha256(data)
    }

    fn hash_reader(&self, reader: &mut dyn Read, buffer_size: usize) -> io::Result<[u8; 32]> {
        hash::sha256_reader(reader, buffer_size)
    }

    fn kdf(
        &self,
        passphrase: &[u8],
        salt: &[u8],
        params: ScryptParams,
        output_len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
        kdf::derive(passphrase, salt, params, output_len)
    }

    fn pem_to_der(&self, pem: &str) -> Option<Vec<u8>> {
        pem::pem_to_der(pem)
    }

    fn der_to_pem(&self, der: &[u8], format: PemFormat) -> String {
        pem::der_to_pem(der, format)
    }
}
