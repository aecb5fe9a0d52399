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

use crate::xml::Value;

/// HeaderOverrides are header values supplied by the caller for one call.
///
/// Keys are qualified element names such as `wsse:Security`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverrides {
    entries: Vec<(String, Value)>,
}

impl HeaderOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get the value supplied for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    /// Whether no override was supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Call carries the metadata of one outgoing SOAP call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Name of the remote method.
    pub method: String,
    /// SOAP envelope namespace used by this call.
    pub soap_namespace: String,
    /// Header values supplied by the caller.
    pub headers: HeaderOverrides,
}

impl Call {
    /// Create call metadata without header overrides.
    pub fn new(method: impl Into<String>, soap_namespace: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            soap_namespace: soap_namespace.into(),
            headers: HeaderOverrides::new(),
        }
    }

    /// Add a header override and return the call.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns::SOAP_11;

    #[test]
    fn test_last_writer_wins() {
        let call = Call::new("Echo", SOAP_11)
            .with_header("wsse:Security", "first")
            .with_header("tns:Trace", "on")
            .with_header("wsse:Security", "second");

        assert_eq!(
            call.headers.get("wsse:Security"),
            Some(&Value::Text("second".to_string()))
        );
        let names: Vec<_> = call.headers.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["wsse:Security", "tns:Trace"]);
        assert!(Call::new("Echo", SOAP_11).headers.is_empty());
    }
}
