// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Secure random sources and the token generator built on top of them.

use std::fmt::Debug;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::OsRng;
use rand::RngCore;

use crate::{Error, Result};

/// Alphabet used for nonces and generated identifiers.
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Bytes at or above this bound are rejected so every symbol is equally likely.
const ACCEPT_BOUND: u8 = (256 / TOKEN_ALPHABET.len() * TOKEN_ALPHABET.len()) as u8;

/// Refill attempts before a source is declared exhausted.
const MAX_ROUNDS: usize = 64;

/// SecureRandom provides the randomness used for nonces and identifiers.
///
/// Implementations used outside of tests must be cryptographically secure:
/// predictable nonces make digest tokens replayable.
pub trait SecureRandom: Debug + Send + Sync + 'static {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()>;
}

/// OsRandom reads from the operating system's secure random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| Error::unexpected("failed to read os random source").with_source(e))
    }
}

/// StaticRandom replays a fixed byte sequence, wrapping around at the end.
///
/// This is useful for testing. Never use it to sign real requests.
#[derive(Debug, Default)]
pub struct StaticRandom {
    bytes: Vec<u8>,
    cursor: AtomicUsize,
}

impl StaticRandom {
    /// Create a new StaticRandom replaying `bytes`.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl SecureRandom for StaticRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<()> {
        if self.bytes.is_empty() {
            return Err(Error::unexpected("static random source has no bytes"));
        }

        let start = self.cursor.fetch_add(dest.len(), Ordering::Relaxed);
        for (i, b) in dest.iter_mut().enumerate() {
            *b = self.bytes[(start + i) % self.bytes.len()];
        }
        Ok(())
    }
}

/// Generate a token of `len` symbols drawn uniformly from [`TOKEN_ALPHABET`].
pub fn random_token(rng: &dyn SecureRandom, len: usize) -> Result<String> {
    let mut token = String::with_capacity(len);
    let mut buf = vec![0u8; len];

    for _ in 0..MAX_ROUNDS {
        rng.fill_bytes(&mut buf)?;
        for b in buf.iter().copied().filter(|b| *b < ACCEPT_BOUND) {
            token.push(TOKEN_ALPHABET[b as usize % TOKEN_ALPHABET.len()] as char);
            if token.len() == len {
                return Ok(token);
            }
        }
        if token.len() == len {
            return Ok(token);
        }
    }

    Err(Error::unexpected(
        "random source exhausted while generating token",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_random_token() -> Result<()> {
        let token = random_token(&OsRandom, 16)?;
        assert_eq!(token.len(), 16);
        assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));

        // 36^16 possibilities, a collision here means the source is broken.
        assert_ne!(token, random_token(&OsRandom, 16)?);
        Ok(())
    }

    #[test]
    fn test_static_random_token() -> Result<()> {
        let rng = StaticRandom::new(vec![0, 1, 25, 26, 35, 36]);
        assert_eq!(random_token(&rng, 6)?, "ABZ09A");
        // The cursor moved on, so the next token starts at the wrapped position.
        assert_eq!(random_token(&rng, 3)?, "ABZ");
        Ok(())
    }

    #[test]
    fn test_rejects_biased_bytes() -> Result<()> {
        let rng = StaticRandom::new(vec![255, 252, 1]);
        assert_eq!(random_token(&rng, 2)?, "BB");
        Ok(())
    }

    #[test]
    fn test_exhausted_source() {
        let rng = StaticRandom::new(vec![255]);
        assert!(random_token(&rng, 4).is_err());
        assert!(random_token(&StaticRandom::default(), 4).is_err());
    }

    #[test]
    fn test_empty_token() -> Result<()> {
        assert_eq!(random_token(&OsRandom, 0)?, "");
        Ok(())
    }
}
