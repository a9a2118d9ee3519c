// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! SHA-256 digests

use std::io::{self, Read};

use sha2::{Digest, Sha256};

/// Default buffer size for streamed digests (1 MiB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// SHA-256 of `data`
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 of everything readable from `reader`, `buffer_size` bytes at a time
///
/// Lets large attachments be hashed without loading them into memory.
pub fn sha256_reader<R: Read>(mut reader: R, buffer_size: usize) -> io::Result<[u8; 32]> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; buffer_size.max(1)];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(hasher.finalize().into())
}
