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

// Element names used by UsernameToken headers.
pub const SECURITY: &str = "wsse:Security";
pub const USERNAME_TOKEN: &str = "wsse:UsernameToken";
pub const USERNAME: &str = "wsse:Username";
pub const PASSWORD: &str = "wsse:Password";
pub const NONCE: &str = "wsse:Nonce";
pub const CREATED: &str = "wsu:Created";

// Attributes.
pub const XMLNS_WSSE: &str = "xmlns:wsse";
pub const XMLNS_WSU: &str = "xmlns:wsu";
pub const ENCODING_TYPE: &str = "EncodingType";
pub const TYPE: &str = "Type";

/// Length of the ASCII nonce before base64 encoding.
pub const NONCE_LENGTH: usize = 16;
