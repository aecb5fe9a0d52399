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

use crate::utils::Redact;
use crate::{Call, Context, Envelope, Result};
use std::fmt::{Debug, Formatter};

/// Plugin is the trait used by the call pipeline to secure SOAP calls.
///
/// A plugin is built once per client configuration and then invoked for every
/// call, possibly from several threads at once. Anything generated per call
/// (nonces, timestamps, signatures) must stay local to the hook invocation.
pub trait Plugin: Debug + Send + Sync + 'static {
    /// Mutate the outgoing envelope before it is sent.
    ///
    /// An error aborts the call before anything reaches the wire.
    fn preprocess(&self, ctx: &Context, envelope: &mut Envelope, call: &Call) -> Result<()>;

    /// Observe the parsed response after it was received.
    ///
    /// The default implementation inspects nothing and never fails. In
    /// particular, it does not mean the response is authentic.
    fn postprocess(&self, ctx: &Context, response: &Envelope, call: &Call) -> Result<()> {
        let _ = (ctx, response, call);
        Ok(())
    }
}

/// SigningContext is everything a [`SignXml`] implementation needs for one signature.
///
/// It only lives for the duration of a single `sign` call.
pub struct SigningContext<'a> {
    /// Serialized fragment to sign; carries every namespace it uses.
    pub fragment: &'a str,
    /// Reference URI pointing at the fragment, e.g. `#id-14`.
    pub reference_uri: &'a str,
    /// Handle of the private key, interpreted by the signer (a PEM path for
    /// the bundled RSA signer).
    pub private_key: &'a str,
    /// Password protecting the private key.
    pub key_password: Option<&'a str>,
    /// CA certificate accompanying the signing certificate.
    pub ca_certificate: Option<&'a str>,
}

impl Debug for SigningContext<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningContext")
            .field("fragment", &self.fragment)
            .field("reference_uri", &self.reference_uri)
            .field("private_key", &Redact::from(self.private_key))
            .field(
                "key_password",
                &Redact::from(self.key_password.unwrap_or_default()),
            )
            .field("ca_certificate", &self.ca_certificate)
            .finish()
    }
}

/// XmlSignature is the output of a detached signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlSignature {
    /// Serialized `ds:SignedInfo` element.
    pub signed_info: String,
    /// Base64 encoded `SignatureValue`.
    pub signature_value: String,
}

/// SignXml canonicalizes an XML fragment and signs it.
///
/// Implementations own the canonicalization and the RSA math; callers only
/// splice the returned parts into the message.
pub trait SignXml: Debug + Send + Sync + 'static {
    /// Produce a detached signature over `signing.fragment`.
    fn sign(&self, ctx: &Context, signing: &SigningContext<'_>) -> Result<XmlSignature>;
}
