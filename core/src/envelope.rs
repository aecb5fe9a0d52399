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

use crate::xml::{Element, NamespaceScope, Node};
use crate::{Error, Result};

/// Envelope is a SOAP envelope owned by the host.
///
/// Plugins get temporary access to it while a call is being prepared or
/// inspected and must not keep references past the hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    root: Element,
}

impl Envelope {
    /// Create an empty envelope with a Header and a Body.
    ///
    /// The SOAP namespace is bound to the `soap` prefix.
    pub fn new(soap_ns: &str) -> Self {
        let root = Element::new("soap:Envelope")
            .with_attr("xmlns:soap", soap_ns)
            .with_child(Element::new("soap:Header"))
            .with_child(Element::new("soap:Body"));
        Self { root }
    }

    /// Parse an envelope from XML.
    pub fn parse(xml: &str) -> Result<Self> {
        Self::from_element(Element::parse(xml)?)
    }

    /// Wrap an existing element tree.
    pub fn from_element(root: Element) -> Result<Self> {
        if root.local_name() != "Envelope" {
            return Err(Error::request_invalid(format!(
                "expected an Envelope root element, got <{}>",
                root.name()
            )));
        }
        Ok(Self { root })
    }

    /// The root `Envelope` element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Consume the envelope and return its root element.
    pub fn into_element(self) -> Element {
        self.root
    }

    /// Namespace declarations carried by the root element as `(attribute, uri)`,
    /// e.g. `("xmlns:tns", "urn:x")`.
    pub fn namespace_declarations(&self) -> Vec<(String, String)> {
        self.root
            .attributes()
            .filter(|(k, _)| crate::xml::is_namespace_declaration(k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Namespaces in scope at the root element.
    pub fn scope(&self) -> NamespaceScope {
        NamespaceScope::new().enter(&self.root)
    }

    /// Find the section `name` (`Header` or `Body`) in namespace `ns`.
    pub fn section(&self, name: &str, ns: &str) -> Option<&Element> {
        let idx = self.section_index(name, ns)?;
        match &self.root.children()[idx] {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }

    /// Find the section `name` in namespace `ns` for modification.
    pub fn section_mut(&mut self, name: &str, ns: &str) -> Option<&mut Element> {
        let idx = self.section_index(name, ns)?;
        let pos = self.element_position(idx);
        self.root.elements_mut().nth(pos)
    }

    /// The Body section.
    pub fn body(&self, ns: &str) -> Result<&Element> {
        self.section("Body", ns)
            .ok_or_else(|| Error::request_invalid(format!("envelope has no Body in '{ns}'")))
    }

    /// The Body section for modification.
    pub fn body_mut(&mut self, ns: &str) -> Result<&mut Element> {
        self.section_mut("Body", ns)
            .ok_or_else(|| Error::request_invalid(format!("envelope has no Body in '{ns}'")))
    }

    /// The Header section, created in front of Body when missing.
    pub fn header_mut(&mut self, ns: &str) -> Result<&mut Element> {
        if self.section_index("Header", ns).is_none() {
            let scope = self.scope();
            let prefix = scope.prefix_for(ns).ok_or_else(|| {
                Error::request_invalid(format!("envelope does not declare namespace '{ns}'"))
            })?;
            let name = if prefix.is_empty() {
                "Header".to_string()
            } else {
                format!("{prefix}:Header")
            };
            let at = self.section_index("Body", ns).unwrap_or(0);
            self.root.insert(at, Element::new(name));
        }

        self.section_mut("Header", ns)
            .ok_or_else(|| Error::unexpected("header must exist after insertion"))
    }

    /// Serialize the whole envelope.
    pub fn to_xml(&self) -> Result<String> {
        self.root.to_xml()
    }

    /// Index among all root children of the matching section.
    fn section_index(&self, name: &str, ns: &str) -> Option<usize> {
        let scope = self.scope();
        self.root
            .children()
            .iter()
            .position(|node| match node {
                Node::Element(e) => {
                    e.local_name() == name
                        && scope.enter(e).resolve(e.prefix().unwrap_or("")) == Some(ns)
                }
                Node::Text(_) => false,
            })
    }

    /// Convert an index among all children into an index among element children.
    fn element_position(&self, idx: usize) -> usize {
        self.root.children()[..idx]
            .iter()
            .filter(|node| matches!(node, Node::Element(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ns::{SOAP_11, SOAP_12};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_envelope() -> Result<()> {
        let env = Envelope::new(SOAP_11);
        assert_eq!(
            env.to_xml()?,
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Header/><soap:Body/></soap:Envelope>"#
        );
        assert!(env.section("Body", SOAP_11).is_some());
        assert!(env.section("Body", SOAP_12).is_none());
        Ok(())
    }

    #[test]
    fn test_header_is_created_before_body() -> Result<()> {
        let mut env = Envelope::parse(
            "<env:Envelope xmlns:env=\"http://www.w3.org/2003/05/soap-envelope\">\n  <env:Body><Ping/></env:Body>\n</env:Envelope>",
        )?;
        env.header_mut(SOAP_12)?.add_child("h:Trace");

        let names: Vec<_> = env.root().elements().map(Element::name).collect();
        assert_eq!(names, vec!["env:Header", "env:Body"]);
        assert_eq!(
            env.section("Header", SOAP_12).map(|h| h.elements().count()),
            Some(1)
        );
        Ok(())
    }

    #[test]
    fn test_section_mut_skips_text_nodes() -> Result<()> {
        let mut env = Envelope::parse(
            "<s:Envelope xmlns:s=\"http://schemas.xmlsoap.org/soap/envelope/\">\n <s:Header/>\n <s:Body/>\n</s:Envelope>",
        )?;
        env.body_mut(SOAP_11)?.set_attr("marked", "yes");
        assert_eq!(env.body(SOAP_11)?.attr("marked"), Some("yes"));
        Ok(())
    }

    #[test]
    fn test_default_namespace_sections() -> Result<()> {
        let mut env = Envelope::parse(
            r#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope/"><Body/></Envelope>"#,
        )?;
        env.header_mut(SOAP_11)?;
        assert_eq!(
            env.to_xml()?,
            r#"<Envelope xmlns="http://schemas.xmlsoap.org/soap/envelope/"><Header/><Body/></Envelope>"#
        );
        Ok(())
    }

    #[test]
    fn test_invalid_envelopes() {
        assert!(Envelope::parse("<Body/>").is_err());

        let mut env = Envelope::parse("<soap:Envelope xmlns:soap=\"urn:other\"/>")
            .expect("envelope must parse");
        assert!(env.body_mut(SOAP_11).is_err());
        assert!(env.header_mut(SOAP_11).is_err());
    }

    #[test]
    fn test_namespace_declarations() -> Result<()> {
        let env = Envelope::parse(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:tns="urn:x" version="1"><soap:Body/></soap:Envelope>"#,
        )?;
        assert_eq!(
            env.namespace_declarations(),
            vec![
                ("xmlns:soap".to_string(), SOAP_11.to_string()),
                ("xmlns:tns".to_string(), "urn:x".to_string()),
            ]
        );
        Ok(())
    }
}
