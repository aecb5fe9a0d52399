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

use std::fmt::{Debug, Formatter};

use serde::Deserialize;

use crate::IdPolicy;
use wssec_core::utils::Redact;

/// Config carries the settings of [`BinaryTokenSignature`](crate::BinaryTokenSignature).
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path of the PEM certificate sent as `wsse:BinarySecurityToken`. Required.
    pub certificate_path: Option<String>,
    /// Handle of the private key, a PEM path for [`RsaSha1Signer`](crate::RsaSha1Signer). Required.
    pub private_key: Option<String>,
    /// Password of an encrypted private key.
    pub key_password: Option<String>,
    /// CA certificate handed to the signer.
    pub ca_certificate: Option<String>,
    /// Identifiers used to reference the Body and the certificate.
    pub id_policy: IdPolicy,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set certificate_path
    pub fn with_certificate_path(mut self, certificate_path: impl Into<String>) -> Self {
        self.certificate_path = Some(certificate_path.into());
        self
    }

    /// Set private_key
    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = Some(private_key.into());
        self
    }

    /// Set key_password
    pub fn with_key_password(mut self, key_password: impl Into<String>) -> Self {
        self.key_password = Some(key_password.into());
        self
    }

    /// Set ca_certificate
    pub fn with_ca_certificate(mut self, ca_certificate: impl Into<String>) -> Self {
        self.ca_certificate = Some(ca_certificate.into());
        self
    }

    /// Set id_policy
    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("certificate_path", &self.certificate_path)
            .field("private_key", &Redact::from(&self.private_key))
            .field("key_password", &Redact::from(&self.key_password))
            .field("ca_certificate", &self.ca_certificate)
            .field("id_policy", &self.id_policy)
            .finish()
    }
}
