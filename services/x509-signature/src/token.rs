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

use super::constants::*;
use crate::ReferenceIds;
use wssec_core::xml::Element;
use wssec_core::{ns, Error, Result};

/// Everything the security header of a signed call is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySignature {
    /// Certificate body without PEM boundary lines.
    pub certificate: String,
    /// Serialized `ds:SignedInfo` returned by the signer.
    pub signed_info: String,
    /// Base64 signature value returned by the signer.
    pub signature_value: String,
    /// Identifiers tying the parts together.
    pub ids: ReferenceIds,
}

impl BinarySignature {
    /// Build the `wsse:Security` element.
    ///
    /// Element order and attributes follow the layout servers expect:
    ///
    /// ```xml
    /// <wsse:Security soapenv:mustUnderstand="1" xmlns:soapenv=".." xmlns:wsse="..">
    ///   <wsse:BinarySecurityToken EncodingType=".." ValueType=".." wsu:Id="CertId-.." xmlns:wsu="..">..</wsse:BinarySecurityToken>
    ///   <ds:Signature Id="Signature-13" xmlns:ds="..">
    ///     <ds:SignedInfo>..</ds:SignedInfo>
    ///     <ds:SignatureValue>..</ds:SignatureValue>
    ///     <ds:KeyInfo Id="KeyId-..">
    ///       <wsse:SecurityTokenReference wsu:Id="STRId-.." xmlns:wsu="..">
    ///         <wsse:Reference URI="#CertId-.." ValueType=".."/>
    ///       </wsse:SecurityTokenReference>
    ///     </ds:KeyInfo>
    ///   </ds:Signature>
    /// </wsse:Security>
    /// ```
    pub fn to_element(&self) -> Result<Element> {
        let signed_info = Element::parse(&self.signed_info).map_err(|e| {
            Error::signing_failed("signer returned malformed SignedInfo").with_source(e)
        })?;

        let token = Element::new(BINARY_SECURITY_TOKEN)
            .with_attr(ENCODING_TYPE, ns::BASE64_BINARY)
            .with_attr(VALUE_TYPE, ns::X509V3)
            .with_attr(WSU_ID, self.ids.certificate.as_str())
            .with_attr(XMLNS_WSU, ns::WSU)
            .with_text(self.certificate.as_str());

        let key_info = Element::new(KEY_INFO)
            .with_attr(ID, self.ids.key_info.as_str())
            .with_child(
                Element::new(SECURITY_TOKEN_REFERENCE)
                    .with_attr(WSU_ID, self.ids.token_reference.as_str())
                    .with_attr(XMLNS_WSU, ns::WSU)
                    .with_child(
                        Element::new(REFERENCE)
                            .with_attr(URI, self.ids.certificate_uri())
                            .with_attr(VALUE_TYPE, ns::X509V3),
                    ),
            );

        let signature = Element::new(SIGNATURE)
            .with_attr(ID, self.ids.signature.as_str())
            .with_attr(XMLNS_DS, ns::DSIG)
            .with_child(signed_info)
            .with_child(Element::new(SIGNATURE_VALUE).with_text(self.signature_value.as_str()))
            .with_child(key_info);

        Ok(Element::new(SECURITY)
            .with_attr(MUST_UNDERSTAND, "1")
            .with_attr(XMLNS_SOAPENV, ns::SOAP_11)
            .with_attr(XMLNS_WSSE, ns::WSSE)
            .with_child(token)
            .with_child(signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wssec_core::ErrorKind;

    fn signature(signed_info: &str) -> BinarySignature {
        BinarySignature {
            certificate: "MIIB\n".to_string(),
            signed_info: signed_info.to_string(),
            signature_value: "QUJD".to_string(),
            ids: ReferenceIds::fixed(),
        }
    }

    #[test]
    fn test_to_element_order() -> Result<()> {
        let security = signature("<ds:SignedInfo/>").to_element()?;

        let names: Vec<_> = security.descendants().into_iter().map(Element::name).collect();
        assert_eq!(
            names,
            vec![
                BINARY_SECURITY_TOKEN,
                SIGNATURE,
                SIGNED_INFO,
                SIGNATURE_VALUE,
                KEY_INFO,
                SECURITY_TOKEN_REFERENCE,
                REFERENCE,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_malformed_signed_info() {
        let err = signature("<ds:SignedInfo>")
            .to_element()
            .expect_err("unclosed SignedInfo");
        assert_eq!(err.kind(), ErrorKind::SigningFailed);
    }
}
