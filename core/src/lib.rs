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

//! Core components for securing SOAP calls with WS-Security.
//!
//! This crate provides the foundational types and traits for the wssec ecosystem.
//! It defines the abstractions token plugins are written against, plus the
//! small XML toolkit they need to build and sign headers.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading, randomness and time
//! - **Envelope**: The SOAP message handed to plugins, with access to its `Header` and `Body`
//! - **Traits**: Abstract interfaces for call plugins (`Plugin`) and XML signing (`SignXml`)
//! - **Pipeline**: The orchestrator that runs plugins around a call
//!
//! ## Example
//!
//! ```
//! use wssec_core::{ns, Call, Context, Envelope, Pipeline, Plugin, Result};
//!
//! // A plugin adding a custom header to every call.
//! #[derive(Debug)]
//! struct Trace;
//!
//! impl Plugin for Trace {
//!     fn preprocess(&self, _ctx: &Context, envelope: &mut Envelope, call: &Call) -> Result<()> {
//!         envelope
//!             .header_mut(&call.soap_namespace)?
//!             .add_text_child("t:Trace", call.method.as_str())
//!             .set_attr("xmlns:t", "urn:trace");
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let pipeline = Pipeline::new(Context::new()).with_plugin(Trace);
//!
//! let mut envelope = Envelope::new(ns::SOAP_11);
//! pipeline.prepare(&mut envelope, &Call::new("Echo", ns::SOAP_11))?;
//! assert!(envelope.to_xml()?.contains("<t:Trace xmlns:t=\"urn:trace\">Echo</t:Trace>"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! The crate also provides utility modules:
//!
//! - [`hash`]: Hashing and base64 helpers
//! - [`time`]: Time manipulation utilities
//! - [`utils`]: General utilities including data redaction
//! - [`xml`]: Element tree, namespace scopes and exclusive canonicalization

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod ns;
pub mod time;
pub mod utils;
pub mod xml;

mod error;
pub use error::{Error, ErrorKind, Result};
mod context;
pub use context::{Clock, Context, FileRead, FixedClock, NoopFileRead, SystemClock};
mod random;
pub use random::{random_token, OsRandom, SecureRandom, StaticRandom, TOKEN_ALPHABET};
mod envelope;
pub use envelope::Envelope;
mod call;
pub use call::{Call, HeaderOverrides};

mod api;
pub use api::{Plugin, SignXml, SigningContext, XmlSignature};
mod pipeline;
pub use pipeline::Pipeline;
