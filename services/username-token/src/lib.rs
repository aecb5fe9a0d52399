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

//! WS-Security username token plugins.
//!
//! - [`UsernameToken`] sends the password in plaintext.
//! - [`UsernameDigestToken`] sends `Base64(SHA1(nonce + created + password))`
//!   with a fresh nonce and timestamp for every call.
//!
//! ```
//! use wssec_core::{ns, Call, Context, Envelope, Pipeline, Result};
//! use wssec_username_token::UsernameDigestToken;
//!
//! # fn main() -> Result<()> {
//! let pipeline = Pipeline::new(Context::new())
//!     .with_plugin(UsernameDigestToken::new("alice", "secret", 0)?);
//!
//! let mut envelope = Envelope::new(ns::SOAP_11);
//! pipeline.prepare(&mut envelope, &Call::new("GetQuote", ns::SOAP_11))?;
//! assert!(envelope.to_xml()?.contains("<wsse:Nonce"));
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::{password_digest, DigestCredential, PlainCredential};

mod plain;
pub use plain::UsernameToken;

mod digest;
pub use digest::UsernameDigestToken;
