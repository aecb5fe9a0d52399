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

//! Minimal namespace-aware XML tree used to build and sign SOAP headers.
//!
//! This is not a general purpose DOM: it keeps qualified names as written,
//! treats namespace declarations as attributes and only knows the one
//! canonicalization algorithm detached signatures here rely on.

mod element;
pub use element::{Element, Node, Value};

mod namespace;
pub use namespace::{is_namespace_declaration, split_qname, NamespaceScope, XML_NS};

pub mod c14n;
