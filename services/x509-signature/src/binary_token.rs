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

use std::sync::Arc;

use log::debug;

use super::constants::*;
use crate::{BinarySignature, Certificate, Config, IdPolicy, RsaSha1Signer};
use wssec_core::utils::Redact;
use wssec_core::xml::{Element, NamespaceScope};
use wssec_core::{ns, Call, Context, Envelope, Error, Plugin, Result, SignXml, SigningContext};

/// BinaryTokenSignature signs the Body and attaches the X.509 certificate.
///
/// For every call the Body gets a `wsu:Id`, the envelope's namespace
/// declarations are copied onto it, and the serialized Body is signed. The
/// certificate and the signature end up in a `wsse:Security` header.
///
/// Responses are not verified.
#[derive(Clone)]
pub struct BinaryTokenSignature {
    certificate: Certificate,
    private_key: String,
    key_password: Option<String>,
    ca_certificate: Option<String>,
    id_policy: IdPolicy,
    signer: Arc<dyn SignXml>,
}

impl BinaryTokenSignature {
    /// Create a new plugin signing with [`RsaSha1Signer`].
    ///
    /// The certificate is read right away; failing to read it is a
    /// configuration error.
    pub fn new(
        ctx: &Context,
        certificate_path: &str,
        private_key: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            certificate: Certificate::load(ctx, certificate_path)?,
            private_key: private_key.into(),
            key_password: None,
            ca_certificate: None,
            id_policy: IdPolicy::default(),
            signer: Arc::new(RsaSha1Signer::new()),
        })
    }

    /// Create the plugin from config.
    pub fn from_config(ctx: &Context, config: &Config) -> Result<Self> {
        let certificate_path = config
            .certificate_path
            .as_deref()
            .ok_or_else(|| Error::config_invalid("certificate_path is required"))?;
        let private_key = config
            .private_key
            .as_deref()
            .ok_or_else(|| Error::config_invalid("private_key is required"))?;

        let mut plugin =
            Self::new(ctx, certificate_path, private_key)?.with_id_policy(config.id_policy);
        plugin.key_password = config.key_password.clone();
        plugin.ca_certificate = config.ca_certificate.clone();
        Ok(plugin)
    }

    /// Set the password of the private key.
    pub fn with_key_password(mut self, key_password: impl Into<String>) -> Self {
        self.key_password = Some(key_password.into());
        self
    }

    /// Set the CA certificate handed to the signer.
    pub fn with_ca_certificate(mut self, ca_certificate: impl Into<String>) -> Self {
        self.ca_certificate = Some(ca_certificate.into());
        self
    }

    /// Set the identifier policy.
    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }

    /// Replace the signer.
    pub fn with_signer(mut self, signer: impl SignXml) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// The certificate sent with every call.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }
}

impl std::fmt::Debug for BinaryTokenSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinaryTokenSignature")
            .field("private_key", &Redact::from(&self.private_key))
            .field("key_password", &Redact::from(&self.key_password))
            .field("ca_certificate", &self.ca_certificate)
            .field("id_policy", &self.id_policy)
            .field("signer", &self.signer)
            .finish()
    }
}

impl Plugin for BinaryTokenSignature {
    fn preprocess(&self, ctx: &Context, envelope: &mut Envelope, call: &Call) -> Result<()> {
        let ids = self.id_policy.ids(ctx)?;
        let declarations = envelope.namespace_declarations();

        let body = envelope.body_mut(&call.soap_namespace)?;
        body.set_attr(WSU_ID, ids.body.as_str());
        body.set_attr(XMLNS_WSU, ns::WSU);
        for (name, uri) in declarations {
            if body.attr(&name).is_none() {
                body.set_attr(name, uri);
            }
        }

        let fragment = body.to_xml()?;
        check_fragment(&fragment, &ids.body)?;
        debug!("call {} signs fragment: {fragment}", call.method);

        let reference_uri = ids.body_uri();
        let signature = self.signer.sign(
            ctx,
            &SigningContext {
                fragment: &fragment,
                reference_uri: &reference_uri,
                private_key: &self.private_key,
                key_password: self.key_password.as_deref(),
                ca_certificate: self.ca_certificate.as_deref(),
            },
        )?;

        let token = BinarySignature {
            certificate: self.certificate.body().to_string(),
            signed_info: signature.signed_info,
            signature_value: signature.signature_value,
            ids,
        };
        let security = token.to_element()?;
        check_references(&security, &reference_uri)?;

        envelope
            .header_mut(&call.soap_namespace)?
            .append(security);
        Ok(())
    }
}

/// The serialized Body must stand on its own: every prefix declared and
/// the expected `wsu:Id` in place.
fn check_fragment(fragment: &str, id: &str) -> Result<()> {
    let body = Element::parse(fragment).map_err(|e| {
        Error::integrity_precondition("serialized Body is not well-formed").with_source(e)
    })?;

    let unbound = body.unbound_prefixes(&NamespaceScope::new());
    if !unbound.is_empty() {
        return Err(Error::integrity_precondition(format!(
            "serialized Body uses undeclared prefixes: {}",
            unbound.join(", ")
        )));
    }

    match body.attr(WSU_ID) {
        Some(v) if v == id => Ok(()),
        v => Err(Error::integrity_precondition(format!(
            "Body carries wsu:Id {v:?}, expected {id}"
        ))),
    }
}

/// Every reference in the returned SignedInfo must point at the Body.
fn check_references(security: &Element, reference_uri: &str) -> Result<()> {
    let mismatch = security
        .descendants()
        .into_iter()
        .filter(|e| e.name() == DS_REFERENCE)
        .filter_map(|e| e.attr(URI))
        .find(|uri| *uri != reference_uri);

    match mismatch {
        Some(uri) => Err(Error::integrity_precondition(format!(
            "SignedInfo references {uri}, expected {reference_uri}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wssec_core::ns::SOAP_11;
    use wssec_core::{ErrorKind, XmlSignature};

    #[derive(Debug)]
    struct Stub(&'static str);

    impl SignXml for Stub {
        fn sign(&self, _: &Context, signing: &SigningContext<'_>) -> Result<XmlSignature> {
            Ok(XmlSignature {
                signed_info: self.0.replace("{uri}", signing.reference_uri),
                signature_value: "QUJD".to_string(),
            })
        }
    }

    fn plugin(signer: Stub) -> Result<BinaryTokenSignature> {
        Ok(BinaryTokenSignature {
            certificate: Certificate::from_pem("MIIB\n")?,
            private_key: "key.pem".to_string(),
            key_password: None,
            ca_certificate: None,
            id_policy: IdPolicy::Fixed,
            signer: Arc::new(signer),
        })
    }

    #[test]
    fn test_check_fragment() {
        let body = "<s:Body xmlns:s=\"urn:s\" xmlns:wsu=\"urn:u\" wsu:Id=\"id-14\"/>";
        assert!(check_fragment(body, "id-14").is_ok());

        let err = check_fragment("<s:Body xmlns:wsu=\"urn:u\" wsu:Id=\"id-14\"/>", "id-14")
            .expect_err("s is unbound");
        assert_eq!(err.kind(), ErrorKind::IntegrityPrecondition);

        let err = check_fragment(body, "id-15").expect_err("id mismatch");
        assert_eq!(err.kind(), ErrorKind::IntegrityPrecondition);
    }

    #[test]
    fn test_reference_mismatch_aborts() -> Result<()> {
        let plugin = plugin(Stub(
            "<ds:SignedInfo><ds:Reference URI=\"#id-99\"/></ds:SignedInfo>",
        ))?;
        let mut env = Envelope::new(SOAP_11);
        let err = plugin
            .preprocess(&Context::new(), &mut env, &Call::new("Echo", SOAP_11))
            .expect_err("reference must match");
        assert_eq!(err.kind(), ErrorKind::IntegrityPrecondition);
        Ok(())
    }

    #[test]
    fn test_matching_reference() -> Result<()> {
        let plugin = plugin(Stub(
            "<ds:SignedInfo><ds:Reference URI=\"{uri}\"/></ds:SignedInfo>",
        ))?
        .with_id_policy(IdPolicy::PerCall);
        let mut env = Envelope::new(SOAP_11);
        plugin.preprocess(&Context::new(), &mut env, &Call::new("Echo", SOAP_11))?;

        let body_id = env
            .body(SOAP_11)?
            .attr(WSU_ID)
            .map(str::to_string)
            .expect("body id must be set");
        let xml = env.to_xml()?;
        assert!(xml.contains(&format!("URI=\"#{body_id}\"")));
        assert_eq!(xml.matches(FIXED_BODY_ID).count(), 0);
        Ok(())
    }

    #[test]
    fn test_missing_body() -> Result<()> {
        let plugin = plugin(Stub("<ds:SignedInfo/>"))?;
        let root = Element::new("soap:Envelope").with_attr("xmlns:soap", SOAP_11);
        let mut env = Envelope::from_element(root)?;

        let err = plugin
            .preprocess(&Context::new(), &mut env, &Call::new("Echo", SOAP_11))
            .expect_err("body is required");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        Ok(())
    }
}
