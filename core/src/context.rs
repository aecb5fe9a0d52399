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

use crate::random::{random_token, OsRandom, SecureRandom};
use crate::time::{self, DateTime};
use crate::{Error, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// Context provides the capabilities plugins rely on while building tokens.
///
/// ## Important
///
/// File reading has NO default implementation: an unconfigured context returns
/// errors when asked to read a file. Randomness defaults to [`OsRandom`] and
/// time defaults to the system clock; both can be replaced, which is how tests
/// get deterministic nonces and timestamps.
///
/// ## Example
///
/// ```
/// use wssec_core::{Context, OsRandom, SystemClock};
///
/// let ctx = Context::new()
///     .with_random(OsRandom)
///     .with_clock(SystemClock);
/// ```
#[derive(Clone)]
pub struct Context {
    fs: Arc<dyn FileRead>,
    rng: Arc<dyn SecureRandom>,
    clock: Arc<dyn Clock>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("fs", &self.fs)
            .field("rng", &self.rng)
            .field("clock", &self.clock)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context.
    ///
    /// File reading uses a no-op implementation until configured.
    pub fn new() -> Self {
        Self {
            fs: Arc::new(NoopFileRead),
            rng: Arc::new(OsRandom),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the file reader implementation.
    pub fn with_file_read(mut self, fs: impl FileRead) -> Self {
        self.fs = Arc::new(fs);
        self
    }

    /// Replace the random source.
    pub fn with_random(mut self, rng: impl SecureRandom) -> Self {
        self.rng = Arc::new(rng);
        self
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Read the file content entirely in `Vec<u8>`.
    #[inline]
    pub fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        self.fs.file_read(path)
    }

    /// Read the file content entirely in `String`.
    pub fn file_read_as_string(&self, path: &str) -> Result<String> {
        let bytes = self.file_read(path)?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    /// Current UTC time according to the configured clock.
    #[inline]
    pub fn now(&self) -> DateTime {
        self.clock.now()
    }

    /// Fill `dest` with bytes from the configured random source.
    #[inline]
    pub fn random_bytes(&self, dest: &mut [u8]) -> Result<()> {
        self.rng.fill_bytes(dest)
    }

    /// Generate a random `A-Z0-9` token of `len` characters.
    ///
    /// Used for nonces and per-call identifiers.
    pub fn random_token(&self, len: usize) -> Result<String> {
        random_token(self.rng.as_ref(), len)
    }
}

/// FileRead is used to read the file content entirely in `Vec<u8>`.
///
/// Plugins use it to load certificates and private keys.
pub trait FileRead: Debug + Send + Sync + 'static {
    /// Read the file content entirely in `Vec<u8>`.
    fn file_read(&self, path: &str) -> Result<Vec<u8>>;
}

/// Clock tells plugins what time it is.
pub trait Clock: Debug + Send + Sync + 'static {
    /// Current UTC time.
    fn now(&self) -> DateTime;
}

/// SystemClock reads the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime {
        time::now()
    }
}

/// FixedClock always returns the same instant.
///
/// This is useful for testing.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn now(&self) -> DateTime {
        self.0
    }
}

/// NoopFileRead is a no-op implementation that always returns an error.
///
/// This is used when no file reader is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFileRead;

impl FileRead for NoopFileRead {
    fn file_read(&self, _path: &str) -> Result<Vec<u8>> {
        Err(Error::unexpected(
            "file reading not supported: no file reader configured",
        ))
    }
}
