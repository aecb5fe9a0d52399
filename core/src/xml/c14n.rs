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

//! Exclusive XML canonicalization (exc-c14n, comments omitted).
//!
//! - [Exclusive XML Canonicalization Version 1.0](https://www.w3.org/TR/xml-exc-c14n/)

use std::collections::BTreeSet;

use log::debug;

use super::namespace::{is_namespace_declaration, split_qname, NamespaceScope, XML_NS};
use super::{Element, Node};
use crate::{Error, Result};

/// Algorithm URI of exclusive canonicalization without comments.
pub const EXC_C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";

/// Canonicalize `element` as an apex node.
///
/// `inherited` holds the namespaces in scope at the element's position in its
/// document. Prefixes used by the subtree but bound nowhere are reported as
/// an integrity precondition failure, never silently dropped.
pub fn canonicalize(element: &Element, inherited: &NamespaceScope) -> Result<String> {
    let mut out = String::new();
    write_element(element, inherited, &NamespaceScope::new(), &mut out)?;
    debug!("canonicalized <{}>: {} bytes", element.name(), out.len());
    Ok(out)
}

fn write_element(
    element: &Element,
    parent: &NamespaceScope,
    rendered: &NamespaceScope,
    out: &mut String,
) -> Result<()> {
    let scope = parent.enter(element);

    // Visibly utilized prefixes, sorted with the default namespace first.
    let mut used = BTreeSet::new();
    used.insert(element.prefix().unwrap_or(""));
    for (name, _) in element.attributes() {
        if is_namespace_declaration(name) {
            continue;
        }
        if let (Some(prefix), _) = split_qname(name) {
            if prefix != "xml" {
                used.insert(prefix);
            }
        }
    }

    let mut now_rendered = rendered.clone();
    let mut declarations = Vec::new();
    for prefix in used {
        match scope.resolve(prefix) {
            Some(uri) => {
                if rendered.binding(prefix) != Some(uri) {
                    declarations.push((prefix, uri));
                    now_rendered.bind(prefix, uri);
                }
            }
            None if prefix.is_empty() => {
                if rendered.resolve("").is_some() {
                    declarations.push(("", ""));
                    now_rendered.bind("", "");
                }
            }
            None => {
                return Err(Error::integrity_precondition(format!(
                    "namespace prefix '{prefix}' used by <{}> is not declared",
                    element.name()
                )));
            }
        }
    }

    let mut attributes = Vec::new();
    for (name, value) in element.attributes() {
        if is_namespace_declaration(name) {
            continue;
        }
        let (prefix, local) = split_qname(name);
        let uri = match prefix {
            None => "",
            Some("xml") => XML_NS,
            Some(p) => scope.resolve(p).unwrap_or_default(),
        };
        attributes.push((uri, local, name, value));
    }
    attributes.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

    out.push('<');
    out.push_str(element.name());
    for (prefix, uri) in declarations {
        if prefix.is_empty() {
            out.push_str(" xmlns=\"");
        } else {
            out.push_str(" xmlns:");
            out.push_str(prefix);
            out.push_str("=\"");
        }
        escape_attr(uri, out);
        out.push('"');
    }
    for (_, _, name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        escape_attr(value, out);
        out.push('"');
    }
    out.push('>');

    for child in element.children() {
        match child {
            Node::Element(e) => write_element(e, &scope, &now_rendered, out)?,
            Node::Text(t) => escape_text(t, out),
        }
    }

    out.push_str("</");
    out.push_str(element.name());
    out.push('>');
    Ok(())
}

fn escape_text(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
}

fn escape_attr(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c => out.push(c),
        }
    }
}
