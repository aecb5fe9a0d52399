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

// Element names of the security header.
pub const SECURITY: &str = "wsse:Security";
pub const BINARY_SECURITY_TOKEN: &str = "wsse:BinarySecurityToken";
pub const SECURITY_TOKEN_REFERENCE: &str = "wsse:SecurityTokenReference";
pub const REFERENCE: &str = "wsse:Reference";
pub const SIGNATURE: &str = "ds:Signature";
pub const SIGNATURE_VALUE: &str = "ds:SignatureValue";
pub const KEY_INFO: &str = "ds:KeyInfo";

// Element names of SignedInfo.
pub const SIGNED_INFO: &str = "ds:SignedInfo";
pub const CANONICALIZATION_METHOD: &str = "ds:CanonicalizationMethod";
pub const SIGNATURE_METHOD: &str = "ds:SignatureMethod";
pub const DS_REFERENCE: &str = "ds:Reference";
pub const TRANSFORMS: &str = "ds:Transforms";
pub const TRANSFORM: &str = "ds:Transform";
pub const DIGEST_METHOD: &str = "ds:DigestMethod";
pub const DIGEST_VALUE: &str = "ds:DigestValue";

// Attributes.
pub const WSU_ID: &str = "wsu:Id";
pub const ID: &str = "Id";
pub const URI: &str = "URI";
pub const ALGORITHM: &str = "Algorithm";
pub const ENCODING_TYPE: &str = "EncodingType";
pub const VALUE_TYPE: &str = "ValueType";
pub const MUST_UNDERSTAND: &str = "soapenv:mustUnderstand";
pub const XMLNS_SOAPENV: &str = "xmlns:soapenv";
pub const XMLNS_WSSE: &str = "xmlns:wsse";
pub const XMLNS_WSU: &str = "xmlns:wsu";
pub const XMLNS_DS: &str = "xmlns:ds";

// Algorithms.
pub const RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
pub const SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";

// Identifiers used by `IdPolicy::Fixed`.
pub const FIXED_BODY_ID: &str = "id-14";
pub const FIXED_CERTIFICATE_ID: &str = "CertId-45851B081998E431E8132880700036719";
pub const FIXED_SIGNATURE_ID: &str = "Signature-13";
pub const FIXED_KEY_INFO_ID: &str = "KeyId-45851B081998E431E8132880700036720";
pub const FIXED_TOKEN_REFERENCE_ID: &str = "STRId-45851B081998E431E8132880700036821";

/// Symbols drawn for every identifier under `IdPolicy::PerCall`.
pub const GENERATED_ID_LENGTH: usize = 32;
