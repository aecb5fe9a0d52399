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

use log::debug;

use wssec_core::{Context, Error, Result};

/// Certificate embedded in `wsse:BinarySecurityToken`.
///
/// Only the base64 body of the PEM file is kept: every line starting with
/// `---` is dropped, the remaining lines keep their line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    body: String,
}

impl Certificate {
    /// Load a PEM certificate through the context's file reader.
    pub fn load(ctx: &Context, path: &str) -> Result<Self> {
        let pem = ctx.file_read_as_string(path).map_err(|e| {
            Error::config_invalid(format!("failed to read certificate from {path}")).with_source(e)
        })?;

        let cert = Self::from_pem(&pem)?;
        debug!("loaded certificate from {path}");
        Ok(cert)
    }

    /// Build a certificate from PEM content.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let body: String = pem
            .split_inclusive('\n')
            .filter(|line| !line.starts_with("---"))
            .collect();

        if body.trim().is_empty() {
            return Err(Error::config_invalid("certificate contains no data"));
        }
        Ok(Self { body })
    }

    /// Certificate body without boundary lines.
    pub fn body(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wssec_core::ErrorKind;

    #[test]
    fn test_from_pem_strips_boundaries() -> Result<()> {
        let pem = "-----BEGIN CERTIFICATE-----\nMIIB\nAAAA\n-----END CERTIFICATE-----\n";
        assert_eq!(Certificate::from_pem(pem)?.body(), "MIIB\nAAAA\n");
        Ok(())
    }

    #[test]
    fn test_from_pem_without_data() {
        let pem = "-----BEGIN CERTIFICATE-----\n-----END CERTIFICATE-----\n";
        let err = Certificate::from_pem(pem).expect_err("empty certificate");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_load_without_file_reader() {
        let err = Certificate::load(&Context::new(), "/etc/wssec/cert.pem")
            .expect_err("noop file reader can't read");
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
