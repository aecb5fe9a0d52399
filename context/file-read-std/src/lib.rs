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

//! Blocking file reading implementation for wssec.
//!
//! This crate provides `StdFileRead`, a file reader that implements
//! the `FileRead` trait from `wssec_core` using `std::fs`.
//!
//! ## Overview
//!
//! Plugin hooks run synchronously on the caller's thread, so certificates and
//! private keys are read with plain blocking I/O. Reads only happen when a
//! plugin is constructed or a key is loaded for signing.
//!
//! ## Example
//!
//! ```no_run
//! use wssec_core::Context;
//! use wssec_file_read_std::StdFileRead;
//!
//! let ctx = Context::new().with_file_read(StdFileRead);
//!
//! match ctx.file_read("/path/to/certificate.pem") {
//!     Ok(content) => println!("Read {} bytes", content.len()),
//!     Err(e) => eprintln!("Failed to read file: {}", e),
//! }
//! ```

use wssec_core::{Error, FileRead, Result};

/// `std::fs` based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileRead;

impl FileRead for StdFileRead {
    fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        std::fs::read(path)
            .map_err(|e| Error::unexpected(format!("failed to read file {path}")).with_source(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wssec_core::Context;

    #[test]
    fn test_read_file() -> Result<()> {
        let mut f = tempfile::NamedTempFile::new()?;
        f.write_all(b"-----BEGIN CERTIFICATE-----\n")?;

        let ctx = Context::new().with_file_read(StdFileRead);
        let path = f.path().to_string_lossy().to_string();
        assert_eq!(
            ctx.file_read_as_string(&path)?,
            "-----BEGIN CERTIFICATE-----\n"
        );
        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let ctx = Context::new().with_file_read(StdFileRead);
        assert!(ctx.file_read("/definitely/not/here.pem").is_err());
    }
}
