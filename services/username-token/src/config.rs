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
use wssec_core::utils::Redact;
use wssec_core::{Error, Result};

/// Config carries the settings of a username token plugin.
///
/// ```
/// use wssec_username_token::Config;
///
/// let cfg = Config::new()
///     .with_username("alice")
///     .with_password("secret")
///     .with_drift_seconds(-30);
/// assert_eq!(cfg.drift_seconds, -30);
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Username placed in `wsse:Username`. Required.
    pub username: Option<String>,
    /// Password, sent as-is or digested. Required.
    pub password: Option<String>,
    /// Seconds added to the current time when stamping `wsu:Created`.
    ///
    /// Only used by the digest token.
    pub drift_seconds: i64,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set password
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set drift_seconds
    pub fn with_drift_seconds(mut self, drift_seconds: i64) -> Self {
        self.drift_seconds = drift_seconds;
        self
    }

    /// Return the configured `(username, password)` pair.
    pub(crate) fn credential(&self) -> Result<(&str, &str)> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| Error::config_invalid("username is required"))?;
        let password = self
            .password
            .as_deref()
            .ok_or_else(|| Error::config_invalid("password is required"))?;
        Ok((username, password))
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("password", &Redact::from(&self.password))
            .field("drift_seconds", &self.drift_seconds)
            .finish()
    }
}
