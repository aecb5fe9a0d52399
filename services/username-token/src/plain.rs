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

use super::constants::*;
use crate::{Config, PlainCredential};
use wssec_core::xml::Value;
use wssec_core::{ns, Call, Context, Envelope, Plugin, Result};

/// UsernameToken sends the username and password in plaintext.
///
/// A `wsse:Security` header override supplied with the call replaces the
/// token built from the plugin's credential for that call only.
#[derive(Clone, Debug)]
pub struct UsernameToken {
    credential: PlainCredential,
}

impl UsernameToken {
    /// Create a new plaintext username token plugin.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential: PlainCredential::new(username, password),
        }
    }

    /// Create the plugin from config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (username, password) = config.credential()?;
        Ok(Self::new(username, password))
    }

    /// The credential this plugin sends.
    pub fn credential(&self) -> &PlainCredential {
        &self.credential
    }
}

impl Plugin for UsernameToken {
    fn preprocess(&self, _: &Context, envelope: &mut Envelope, call: &Call) -> Result<()> {
        let default;
        let value: &Value = match call.headers.get(SECURITY) {
            Some(v) => {
                debug!("call {} overrides {SECURITY}", call.method);
                v
            }
            None => {
                default = self.credential.to_value();
                &default
            }
        };

        envelope
            .header_mut(&call.soap_namespace)?
            .marshall(SECURITY, value)
            .set_attr(XMLNS_WSSE, ns::WSSE);
        Ok(())
    }
}
