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

use serde::Deserialize;

use super::constants::*;
use wssec_core::{Context, Result};

/// IdPolicy decides which identifiers tie the signature to the Body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Use the same well known identifiers for every call (`id-14`, ...).
    ///
    /// Some servers only accept these.
    #[default]
    Fixed,
    /// Draw fresh identifiers for every call.
    PerCall,
}

impl IdPolicy {
    /// Identifiers for one call.
    pub fn ids(&self, ctx: &Context) -> Result<ReferenceIds> {
        match self {
            IdPolicy::Fixed => Ok(ReferenceIds::fixed()),
            IdPolicy::PerCall => ReferenceIds::generate(ctx),
        }
    }
}

/// Identifiers of one signed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceIds {
    /// `wsu:Id` of Body, referenced by SignedInfo.
    pub body: String,
    /// `wsu:Id` of the BinarySecurityToken.
    pub certificate: String,
    /// `Id` of ds:Signature.
    pub signature: String,
    /// `Id` of ds:KeyInfo.
    pub key_info: String,
    /// `wsu:Id` of the SecurityTokenReference.
    pub token_reference: String,
}

impl ReferenceIds {
    /// The well known identifiers.
    pub fn fixed() -> Self {
        Self {
            body: FIXED_BODY_ID.to_string(),
            certificate: FIXED_CERTIFICATE_ID.to_string(),
            signature: FIXED_SIGNATURE_ID.to_string(),
            key_info: FIXED_KEY_INFO_ID.to_string(),
            token_reference: FIXED_TOKEN_REFERENCE_ID.to_string(),
        }
    }

    /// Fresh identifiers from the context's random source.
    pub fn generate(ctx: &Context) -> Result<Self> {
        let id = |prefix: &str| -> Result<String> {
            Ok(format!("{prefix}-{}", ctx.random_token(GENERATED_ID_LENGTH)?))
        };

        Ok(Self {
            body: id("id")?,
            certificate: id("CertId")?,
            signature: id("Signature")?,
            key_info: id("KeyId")?,
            token_reference: id("STRId")?,
        })
    }

    /// Reference URI of the Body, e.g. `#id-14`.
    pub fn body_uri(&self) -> String {
        format!("#{}", self.body)
    }

    /// Reference URI of the certificate.
    pub fn certificate_uri(&self) -> String {
        format!("#{}", self.certificate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fixed_ids() -> Result<()> {
        let ids = IdPolicy::default().ids(&Context::new())?;
        assert_eq!(ids.body_uri(), "#id-14");
        assert_eq!(
            ids.certificate_uri(),
            "#CertId-45851B081998E431E8132880700036719"
        );
        Ok(())
    }

    #[test]
    fn test_per_call_ids() -> Result<()> {
        let ctx = Context::new();
        let first = IdPolicy::PerCall.ids(&ctx)?;
        let second = IdPolicy::PerCall.ids(&ctx)?;
        assert_ne!(first, second);

        let all: HashSet<_> = [
            &first.body,
            &first.certificate,
            &first.signature,
            &first.key_info,
            &first.token_reference,
        ]
        .into_iter()
        .collect();
        assert_eq!(all.len(), 5);
        assert!(first.body.starts_with("id-"));
        assert_eq!(first.body.len(), "id-".len() + GENERATED_ID_LENGTH);
        Ok(())
    }

    #[test]
    fn test_deserialize() -> anyhow::Result<()> {
        let policy: IdPolicy = serde_json::from_str("\"per_call\"")?;
        assert_eq!(policy, IdPolicy::PerCall);
        Ok(())
    }
}
