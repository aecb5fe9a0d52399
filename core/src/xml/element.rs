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

use std::borrow::Cow;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::namespace::{is_namespace_declaration, split_qname, NamespaceScope};
use crate::{Error, Result};

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Character data, already unescaped.
    Text(String),
}

/// Value is the mapping structure a host hands to [`Element::marshall`].
///
/// It mirrors how SOAP clients describe header content: either plain text or
/// an ordered list of named children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Text content.
    Text(String),
    /// Ordered child elements.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Build a mapping value from `(name, value)` pairs.
    pub fn map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Element is a namespace-aware XML element.
///
/// Names are kept qualified (`wsse:Security`) and namespace declarations are
/// ordinary `xmlns`/`xmlns:*` attributes, so a tree serializes back exactly as
/// it was built. Use [`NamespaceScope`] to resolve prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute and return the element.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Append a child element and return the element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append text and return the element.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text.into());
        self
    }

    /// Qualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix of the qualified name, if any.
    pub fn prefix(&self) -> Option<&str> {
        split_qname(&self.name).0
    }

    /// Local part of the qualified name.
    pub fn local_name(&self) -> &str {
        split_qname(&self.name).1
    }

    /// Get an attribute by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute.
    ///
    /// An existing attribute keeps its position, a new one is appended.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Iterate over attributes in document order, namespace declarations included.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over the namespaces declared on this element as `(prefix, uri)`.
    ///
    /// The default namespace is reported with an empty prefix.
    pub fn namespace_declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes().filter_map(|(k, v)| {
            if k == "xmlns" {
                Some(("", v))
            } else {
                k.strip_prefix("xmlns:").map(|prefix| (prefix, v))
            }
        })
    }

    /// All children in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Mutable child elements in document order.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given qualified name.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// All descendant elements (not including `self`) in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        for child in self.elements() {
            out.push(child);
            out.extend(child.descendants());
        }
        out
    }

    /// Concatenated text of the direct children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Replace all children with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.clear();
        self.push_text(text.into());
        self
    }

    /// Append a new empty child element and return it.
    pub fn add_child(&mut self, name: impl Into<String>) -> &mut Element {
        self.append(Element::new(name))
    }

    /// Append a new child element holding `text` and return it.
    pub fn add_text_child(
        &mut self,
        name: impl Into<String>,
        text: impl Into<String>,
    ) -> &mut Element {
        self.append(Element::new(name).with_text(text))
    }

    /// Import an existing subtree as the last child and return it.
    ///
    /// Namespace declarations carried by the subtree are kept as they are.
    pub fn append(&mut self, child: Element) -> &mut Element {
        let idx = self.children.len();
        self.insert(idx, child)
    }

    /// Insert a subtree at `index` among all children and return it.
    pub fn insert(&mut self, index: usize, child: Element) -> &mut Element {
        self.children.insert(index, Node::Element(child));
        match &mut self.children[index] {
            Node::Element(e) => e,
            Node::Text(_) => unreachable!("element was just inserted"),
        }
    }

    /// Marshall a mapping value into a new child named `name` and return it.
    ///
    /// `Value::Text` becomes the child's text, `Value::Map` becomes nested
    /// children in order. Names are used verbatim, prefixes included.
    pub fn marshall(&mut self, name: impl Into<String>, value: &Value) -> &mut Element {
        let child = self.add_child(name);
        match value {
            Value::Text(text) => {
                if !text.is_empty() {
                    child.set_text(text.as_str());
                }
            }
            Value::Map(entries) => {
                for (k, v) in entries {
                    child.marshall(k.as_str(), v);
                }
            }
        }
        child
    }

    /// Prefixes used by this subtree that are not bound by `scope` or by the
    /// subtree's own declarations, sorted and deduplicated.
    pub fn unbound_prefixes(&self, scope: &NamespaceScope) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_unbound(scope, &mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_unbound(&self, parent: &NamespaceScope, out: &mut Vec<String>) {
        let scope = parent.enter(self);
        let used = self.prefix().into_iter().chain(
            self.attributes()
                .filter(|(k, _)| !is_namespace_declaration(k))
                .filter_map(|(k, _)| split_qname(k).0),
        );
        for prefix in used {
            if scope.resolve(prefix).is_none() {
                out.push(prefix.to_string());
            }
        }
        for child in self.elements() {
            child.collect_unbound(&scope, out);
        }
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(Node::Text(t)) => t.push_str(&text),
            _ => self.children.push(Node::Text(text)),
        }
    }

    /// Parse a standalone XML document or fragment.
    ///
    /// Declarations, comments and processing instructions are dropped.
    /// Documents carrying a DOCTYPE are rejected. Prefixes are not resolved
    /// here, so fragments may use prefixes declared by their future parent.
    ///
    /// Line breaks are normalized to `\n` and literal whitespace in attribute
    /// values to spaces, as an XML processor does. Character references such
    /// as `&#xD;` are kept.
    pub fn parse(xml: &str) -> Result<Element> {
        let xml = normalize_line_endings(xml);
        let mut reader = Reader::from_str(&xml);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| Error::request_invalid("failed to parse xml").with_source(e))?;
            match event {
                Event::Start(e) => stack.push(start_element(&e)?),
                Event::Empty(e) => {
                    let element = start_element(&e)?;
                    close_element(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::request_invalid("unexpected closing tag"))?;
                    close_element(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|e| {
                        Error::request_invalid("failed to unescape xml text").with_source(e)
                    })?;
                    push_document_text(&mut stack, text)?;
                }
                Event::CData(e) => {
                    let text = utf8(&e.into_inner())?;
                    push_document_text(&mut stack, Cow::Owned(text))?;
                }
                Event::DocType(_) => {
                    return Err(Error::request_invalid("DOCTYPE is not allowed"));
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) => {}
                Event::Eof => break,
            }
        }

        if !stack.is_empty() {
            return Err(Error::request_invalid("xml ended with unclosed elements"));
        }
        root.ok_or_else(|| Error::request_invalid("xml has no root element"))
    }

    /// Serialize this element (and its subtree) into a UTF-8 string.
    ///
    /// No XML declaration is written.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (k, v) in &self.attributes {
            start.push_attribute((k.as_str(), v.as_str()));
        }

        if self.children.is_empty() {
            return writer.write_event(Event::Empty(start)).map_err(write_error);
        }

        writer.write_event(Event::Start(start)).map_err(write_error)?;
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(writer)?,
                Node::Text(t) => writer
                    .write_event(Event::Text(BytesText::new(t)))
                    .map_err(write_error)?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(write_error)
    }
}

fn write_error(e: impl Into<anyhow::Error>) -> Error {
    Error::unexpected("failed to write xml").with_source(e)
}

fn normalize_line_endings(xml: &str) -> Cow<'_, str> {
    if xml.contains('\r') {
        Cow::Owned(xml.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(xml)
    }
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| Error::request_invalid("xml is not valid utf-8").with_source(e))
}

fn start_element(e: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(utf8(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr =
            attr.map_err(|e| Error::request_invalid("malformed xml attribute").with_source(e))?;
        // Whitespace is replaced before unescaping so references survive.
        let raw = utf8(&attr.value)?.replace(['\t', '\n'], " ");
        let value = unescape(&raw)
            .map_err(|e| Error::request_invalid("failed to unescape attribute").with_source(e))?;
        element.set_attr(utf8(attr.key.as_ref())?, value.into_owned());
    }
    Ok(element)
}

fn close_element(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(Error::request_invalid("xml has more than one root element")),
    }
}

fn push_document_text(stack: &mut [Element], text: Cow<'_, str>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_text(text.into_owned());
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(Error::request_invalid("text outside of the root element")),
    }
}
