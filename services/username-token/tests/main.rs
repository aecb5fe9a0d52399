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

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;
use wssec_core::hash::{base64_decode, base64_encode};
use wssec_core::time::parse_rfc3339;
use wssec_core::xml::{Element, Value};
use wssec_core::{ns, Call, Context, Envelope, FixedClock, Pipeline, Plugin, Result, StaticRandom};
use wssec_username_token::{password_digest, Config, UsernameDigestToken, UsernameToken};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn security_header(env: &Envelope, soap_ns: &str) -> Element {
    env.section("Header", soap_ns)
        .and_then(|h| h.find("wsse:Security"))
        .cloned()
        .expect("wsse:Security must exist")
}

fn token_text(security: &Element, name: &str) -> String {
    security
        .find("wsse:UsernameToken")
        .and_then(|t| t.find(name))
        .map(Element::text)
        .unwrap_or_else(|| panic!("{name} must exist"))
}

#[test]
fn test_plaintext_token() -> Result<()> {
    init();

    let pipeline = Pipeline::new(Context::new()).with_plugin(UsernameToken::new("alice", "s3cret"));
    let mut env = Envelope::new(ns::SOAP_11);
    pipeline.prepare(&mut env, &Call::new("GetQuote", ns::SOAP_11))?;

    let security = security_header(&env, ns::SOAP_11);
    assert_eq!(security.attr("xmlns:wsse"), Some(ns::WSSE));
    let tokens: Vec<_> = security
        .elements()
        .filter(|e| e.name() == "wsse:UsernameToken")
        .collect();
    assert_eq!(tokens.len(), 1);

    let token = tokens[0];
    assert_eq!(token_text(&security, "wsse:Username"), "alice");
    assert_eq!(token_text(&security, "wsse:Password"), "s3cret");
    assert!(token.find("wsu:Created").is_none());
    assert!(token.find("wsse:Nonce").is_none());
    assert_eq!(token.find("wsse:Password").and_then(|p| p.attr("Type")), None);
    Ok(())
}

#[test]
fn test_header_override_replaces_token() -> Result<()> {
    init();

    let plugin = UsernameToken::new("alice", "s3cret");
    let pipeline = Pipeline::new(Context::new()).with_plugin(plugin.clone());
    let replacement = Value::map([(
        "wsse:UsernameToken",
        Value::map([("wsse:Username", "bob"), ("wsse:Password", "hunter2")]),
    )]);
    let call = Call::new("GetQuote", ns::SOAP_11).with_header("wsse:Security", replacement);

    let mut env = Envelope::new(ns::SOAP_11);
    pipeline.prepare(&mut env, &call)?;
    let security = security_header(&env, ns::SOAP_11);
    assert_eq!(token_text(&security, "wsse:Username"), "bob");
    assert_eq!(token_text(&security, "wsse:Password"), "hunter2");
    assert_eq!(security.descendants().len(), 3);

    // The next call without override is back to the plugin's credential.
    let mut env = Envelope::new(ns::SOAP_11);
    pipeline.prepare(&mut env, &Call::new("GetQuote", ns::SOAP_11))?;
    assert_eq!(token_text(&security_header(&env, ns::SOAP_11), "wsse:Username"), "alice");
    Ok(())
}

#[test]
fn test_digest_matches_recipe() -> Result<()> {
    init();

    let plugin = UsernameDigestToken::new("alice", "s3cret", 0)?;
    let mut env = Envelope::new(ns::SOAP_11);
    plugin_prepare(&plugin, Context::new(), &mut env)?;

    let security = security_header(&env, ns::SOAP_11);
    assert_eq!(security.attr("xmlns:wsu"), Some(ns::WSU));

    let nonce = String::from_utf8(base64_decode(&token_text(&security, "wsse:Nonce"))?)?;
    assert_eq!(nonce.len(), 16);
    assert!(nonce
        .bytes()
        .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));

    let created = token_text(&security, "wsu:Created");
    assert!(created.ends_with('Z'));
    assert_eq!(
        token_text(&security, "wsse:Password"),
        password_digest(nonce.as_bytes(), &created, "s3cret")
    );
    Ok(())
}

fn plugin_prepare(plugin: &UsernameDigestToken, ctx: Context, env: &mut Envelope) -> Result<()> {
    Pipeline::new(ctx)
        .with_plugin(plugin.clone())
        .prepare(env, &Call::new("GetQuote", ns::SOAP_11))
}

#[test]
fn test_created_applies_drift() -> Result<()> {
    init();

    for drift in [-300, 0, 45] {
        let plugin = UsernameDigestToken::from_config(
            &Config::new()
                .with_username("alice")
                .with_password("s3cret")
                .with_drift_seconds(drift),
        )?;
        let before = wssec_core::time::now();
        let mut env = Envelope::new(ns::SOAP_11);
        plugin_prepare(&plugin, Context::new(), &mut env)?;

        let created = parse_rfc3339(&token_text(&security_header(&env, ns::SOAP_11), "wsu:Created"))?;
        let offset = (created - before).num_seconds() - drift;
        assert!(offset.abs() <= 2, "created {created} is off by {offset}s");
    }
    Ok(())
}

#[test]
fn test_fixed_sources_are_deterministic() -> Result<()> {
    init();

    let now = parse_rfc3339("2024-05-06T07:08:09Z")?;
    let ctx = Context::new()
        .with_clock(FixedClock(now))
        .with_random(StaticRandom::new(b"wssec".to_vec()));
    let plugin = UsernameDigestToken::new("alice", "s3cret", 60)?;

    let mut env = Envelope::new(ns::SOAP_11);
    plugin_prepare(&plugin, ctx, &mut env)?;
    let security = security_header(&env, ns::SOAP_11);

    assert_eq!(token_text(&security, "wsu:Created"), "2024-05-06T07:09:09.000000Z");
    let nonce = String::from_utf8(base64_decode(&token_text(&security, "wsse:Nonce"))?)?;
    assert_eq!(
        token_text(&security, "wsse:Password"),
        password_digest(nonce.as_bytes(), "2024-05-06T07:09:09.000000Z", "s3cret")
    );
    assert_eq!(token_text(&security, "wsse:Nonce"), base64_encode(nonce.as_bytes()));
    Ok(())
}

#[test]
fn test_calls_never_repeat_nonce() -> Result<()> {
    init();

    let pipeline = Pipeline::new(Context::new())
        .with_plugin(UsernameDigestToken::new("alice", "s3cret", 0)?);
    let mut nonces = HashSet::new();
    let mut digests = HashSet::new();
    for _ in 0..2 {
        let mut env = Envelope::new(ns::SOAP_11);
        pipeline.prepare(&mut env, &Call::new("GetQuote", ns::SOAP_11))?;
        let security = security_header(&env, ns::SOAP_11);
        nonces.insert(token_text(&security, "wsse:Nonce"));
        digests.insert(token_text(&security, "wsse:Password"));
    }

    assert_eq!(nonces.len(), 2);
    assert_eq!(digests.len(), 2);
    Ok(())
}

#[test]
fn test_shared_plugin_across_threads() -> Result<()> {
    init();

    let plugin = Arc::new(UsernameDigestToken::new("alice", "s3cret", 0)?);
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Pipeline::new(Context::new()).with_shared_plugin(plugin.clone());
            thread::spawn(move || -> Result<(String, String)> {
                let mut env = Envelope::new(ns::SOAP_11);
                pipeline.prepare(&mut env, &Call::new("GetQuote", ns::SOAP_11))?;
                let security = security_header(&env, ns::SOAP_11);
                Ok((
                    token_text(&security, "wsse:Nonce"),
                    token_text(&security, "wsse:Password"),
                ))
            })
        })
        .collect();

    let mut nonces = HashSet::new();
    let mut digests = HashSet::new();
    for handle in handles {
        let (nonce, digest) = handle.join().expect("thread must not panic")?;
        nonces.insert(nonce);
        digests.insert(digest);
    }
    assert_eq!(nonces.len(), 8);
    assert_eq!(digests.len(), 8);
    Ok(())
}

#[test]
fn test_postprocess_never_fails() -> Result<()> {
    init();

    let ctx = Context::new();
    let call = Call::new("GetQuote", ns::SOAP_11);
    let fault = Envelope::parse(&format!(
        "<soap:Envelope xmlns:soap=\"{}\"><soap:Body><soap:Fault>\
         <faultcode>soap:Server</faultcode><faultstring>boom</faultstring>\
         </soap:Fault></soap:Body></soap:Envelope>",
        ns::SOAP_11
    ))?;
    let empty = Envelope::new(ns::SOAP_12);

    let plain = UsernameToken::new("alice", "s3cret");
    let digest = UsernameDigestToken::new("alice", "s3cret", 0)?;
    for response in [&fault, &empty] {
        plain.postprocess(&ctx, response, &call)?;
        digest.postprocess(&ctx, response, &call)?;
    }

    Pipeline::new(ctx)
        .with_plugin(plain)
        .with_plugin(digest)
        .inspect(&fault, &call)?;
    Ok(())
}
