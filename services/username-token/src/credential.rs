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

use super::constants::*;
use wssec_core::hash::{base64_encode, sha1_concat};
use wssec_core::time::{add_drift, format_created, TimeDelta};
use wssec_core::utils::Redact;
use wssec_core::xml::{Element, Value};
use wssec_core::{ns, Context, Result};

/// Credential sent as-is in a `wsse:UsernameToken`.
#[derive(Clone, PartialEq, Eq)]
pub struct PlainCredential {
    /// Username.
    pub username: String,
    /// Password, transmitted in plaintext.
    pub password: String,
}

impl PlainCredential {
    /// Create a new plain credential.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Mapping value marshalled under `wsse:Security`.
    pub fn to_value(&self) -> Value {
        Value::map([(
            USERNAME_TOKEN,
            Value::map([
                (USERNAME, self.username.as_str()),
                (PASSWORD, self.password.as_str()),
            ]),
        )])
    }
}

impl Debug for PlainCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlainCredential")
            .field("username", &self.username)
            .field("password", &Redact::from(&self.password))
            .finish()
    }
}

/// Credential proving knowledge of the password without sending it.
///
/// Generated fresh for every call and never reused.
#[derive(Clone, PartialEq, Eq)]
pub struct DigestCredential {
    /// Username.
    pub username: String,
    /// `Base64(SHA1(nonce + created + password))`.
    pub password_digest: String,
    /// Base64 of the ASCII nonce.
    pub nonce: String,
    /// Creation time, e.g. `2022-03-01T08:12:34.000000Z`.
    pub created: String,
}

impl DigestCredential {
    /// Generate a credential from the context's clock and random source.
    pub fn generate(
        ctx: &Context,
        username: &str,
        password: &str,
        drift: TimeDelta,
    ) -> Result<Self> {
        let created = format_created(add_drift(ctx.now(), drift)?);
        let nonce = ctx.random_token(NONCE_LENGTH)?;

        Ok(Self {
            username: username.to_string(),
            password_digest: password_digest(nonce.as_bytes(), &created, password),
            nonce: base64_encode(nonce.as_bytes()),
            created,
        })
    }

    /// Build the complete `wsse:Security` element.
    pub fn to_element(&self) -> Element {
        let token = Element::new(USERNAME_TOKEN)
            .with_child(Element::new(USERNAME).with_text(self.username.as_str()))
            .with_child(Element::new(CREATED).with_text(self.created.as_str()))
            .with_child(
                Element::new(NONCE)
                    .with_attr(ENCODING_TYPE, ns::BASE64_BINARY)
                    .with_text(self.nonce.as_str()),
            )
            .with_child(
                Element::new(PASSWORD)
                    .with_attr(TYPE, ns::PASSWORD_DIGEST)
                    .with_text(self.password_digest.as_str()),
            );

        Element::new(SECURITY)
            .with_attr(XMLNS_WSSE, ns::WSSE)
            .with_attr(XMLNS_WSU, ns::WSU)
            .with_child(token)
    }
}

impl Debug for DigestCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestCredential")
            .field("username", &self.username)
            .field("password_digest", &Redact::from(&self.password_digest))
            .field("nonce", &self.nonce)
            .field("created", &self.created)
            .finish()
    }
}

/// Compute `Base64(SHA1(nonce || created || password))`.
///
/// `nonce` is the raw ASCII nonce, not its base64 form.
pub fn password_digest(nonce: &[u8], created: &str, password: &str) -> String {
    base64_encode(&sha1_concat(&[nonce, created.as_bytes(), password.as_bytes()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;
    use wssec_core::hash::base64_sha1;
    use wssec_core::time::{drift, parse_rfc3339};
    use wssec_core::{FixedClock, StaticRandom};

    #[test_case(b"ABCDEFGHIJKLMNOP", "2022-03-01T08:12:34.000000Z", "secret", "vP2u/f/k37ywVecrSpnPVi48OKo="; "alphabet nonce")]
    #[test_case(b"NONCE", "2022-03-01T08:12:34.000000Z", "secret", "R40JHICjvry/963D3AWMqNWNgPo="; "short nonce")]
    #[test_case(b"0123456789ABCDEF", "2024-05-06T07:09:09.000000Z", "пароль", "xDrX7Y2NUUA+olkzdIYYvT6odNs="; "utf-8 password")]
    fn test_password_digest(nonce: &[u8], created: &str, password: &str, expected: &str) {
        assert_eq!(password_digest(nonce, created, password), expected);
    }

    #[test]
    fn test_password_digest_is_case_sensitive() {
        let digest = password_digest(b"NONCE", "2022-03-01T08:12:34.000000Z", "secret");
        assert_eq!(digest, base64_sha1(b"NONCE2022-03-01T08:12:34.000000Zsecret"));
        assert_ne!(
            digest,
            password_digest(b"NONCE", "2022-03-01T08:12:34.000000Z", "Secret")
        );
    }

    #[test]
    fn test_generate_is_deterministic_with_fixed_sources() -> Result<()> {
        let now = parse_rfc3339("2022-03-01T08:12:34Z")?;
        // 'A'..'P' map to the first sixteen alphabet entries.
        let ctx = Context::new()
            .with_clock(FixedClock(now))
            .with_random(StaticRandom::new((0u8..16).collect::<Vec<_>>()));

        let cred = DigestCredential::generate(&ctx, "alice", "secret", drift(0)?)?;
        assert_eq!(cred.created, "2022-03-01T08:12:34.000000Z");
        assert_eq!(cred.nonce, base64_encode(b"ABCDEFGHIJKLMNOP"));
        assert_eq!(
            cred.password_digest,
            password_digest(b"ABCDEFGHIJKLMNOP", &cred.created, "secret")
        );
        Ok(())
    }

    #[test]
    fn test_generate_applies_drift() -> Result<()> {
        let now = parse_rfc3339("2022-03-01T08:12:34Z")?;
        let ctx = Context::new().with_clock(FixedClock(now));

        let cred = DigestCredential::generate(&ctx, "alice", "secret", drift(-34)?)?;
        assert_eq!(cred.created, "2022-03-01T08:12:00.000000Z");
        Ok(())
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let plain = PlainCredential::new("alice", "correct-horse-battery");
        let output = format!("{plain:?}");
        assert!(output.contains("alice"));
        assert!(!output.contains("correct-horse-battery"));
    }
}
