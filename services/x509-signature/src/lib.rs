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

//! X.509 binary security token with a detached RSA-SHA1 signature.
//!
//! [`BinaryTokenSignature`] signs the SOAP Body of every call and sends the
//! signing certificate along in a `wsse:BinarySecurityToken`. Signing is
//! delegated to a [`SignXml`](wssec_core::SignXml) implementation,
//! [`RsaSha1Signer`] by default.
//!
//! ```no_run
//! use wssec_core::{ns, Call, Context, Envelope, Pipeline, Result};
//! use wssec_file_read_std::StdFileRead;
//! use wssec_x509_signature::{BinaryTokenSignature, IdPolicy};
//!
//! # fn main() -> Result<()> {
//! let ctx = Context::new().with_file_read(StdFileRead);
//! let plugin = BinaryTokenSignature::new(&ctx, "/etc/wssec/cert.pem", "/etc/wssec/key.pem")?
//!     .with_key_password("secret")
//!     .with_id_policy(IdPolicy::PerCall);
//!
//! let pipeline = Pipeline::new(ctx).with_plugin(plugin);
//! let mut envelope = Envelope::new(ns::SOAP_11);
//! pipeline.prepare(&mut envelope, &Call::new("GetQuote", ns::SOAP_11))?;
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod certificate;
pub use certificate::Certificate;

mod ids;
pub use ids::{IdPolicy, ReferenceIds};

mod token;
pub use token::BinarySignature;

mod signer;
pub use signer::RsaSha1Signer;

mod binary_token;
pub use binary_token::BinaryTokenSignature;
