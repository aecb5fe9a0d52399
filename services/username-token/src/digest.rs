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

use crate::{Config, DigestCredential};
use wssec_core::time::{self, TimeDelta};
use wssec_core::utils::Redact;
use wssec_core::{Call, Context, Envelope, Plugin, Result};

/// UsernameDigestToken proves knowledge of the password with a per call digest.
///
/// Every call gets a fresh nonce and `wsu:Created` timestamp, so two calls
/// never carry the same digest. Header overrides are not consulted.
#[derive(Clone)]
pub struct UsernameDigestToken {
    username: String,
    password: String,
    drift: TimeDelta,
}

impl UsernameDigestToken {
    /// Create a new digest token plugin.
    ///
    /// `drift_seconds` is added to the current time when stamping
    /// `wsu:Created`, to make up for clock skew with the server.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        drift_seconds: i64,
    ) -> Result<Self> {
        Ok(Self {
            username: username.into(),
            password: password.into(),
            drift: time::drift(drift_seconds)?,
        })
    }

    /// Create the plugin from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (username, password) = config.credential()?;
        Self::new(username, password, config.drift_seconds)
    }

    /// Build the credential for one call.
    pub fn credential(&self, ctx: &Context) -> Result<DigestCredential> {
        DigestCredential::generate(ctx, &self.username, &self.password, self.drift)
    }
}

impl std::fmt::Debug for UsernameDigestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsernameDigestToken")
            .field("username", &self.username)
            .field("password", &Redact::from(&self.password))
            .field("drift", &self.drift)
            .finish()
    }
}

impl Plugin for UsernameDigestToken {
    fn preprocess(&self, ctx: &Context, envelope: &mut Envelope, call: &Call) -> Result<()> {
        let credential = self.credential(ctx)?;
        debug!(
            "call {} stamped with created {} nonce {}",
            call.method, credential.created, credential.nonce
        );

        envelope
            .header_mut(&call.soap_namespace)?
            .append(credential.to_element());
        Ok(())
    }
}
