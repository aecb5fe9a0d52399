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

use wssec_core::time::{add_drift, drift, format_created};
use wssec_core::xml::Element;
use wssec_core::{ns, Call, Context, Envelope, Pipeline, Plugin, Result};

// A plugin stamping every call with a `wsu:Timestamp` valid for five minutes.
#[derive(Debug)]
struct Timestamp {
    ttl_seconds: i64,
}

impl Plugin for Timestamp {
    fn preprocess(&self, ctx: &Context, envelope: &mut Envelope, call: &Call) -> Result<()> {
        let now = ctx.now();
        let expires = add_drift(now, drift(self.ttl_seconds)?)?;

        let timestamp = Element::new("wsu:Timestamp")
            .with_attr("xmlns:wsu", ns::WSU)
            .with_child(Element::new("wsu:Created").with_text(format_created(now)))
            .with_child(Element::new("wsu:Expires").with_text(format_created(expires)));

        envelope
            .header_mut(&call.soap_namespace)?
            .add_child("wsse:Security")
            .set_attr("xmlns:wsse", ns::WSSE)
            .append(timestamp);
        Ok(())
    }
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let pipeline = Pipeline::new(Context::new()).with_plugin(Timestamp { ttl_seconds: 300 });

    let mut envelope = Envelope::parse(&format!(
        "<soap:Envelope xmlns:soap=\"{}\"><soap:Body><Ping xmlns=\"urn:ping\"/></soap:Body></soap:Envelope>",
        ns::SOAP_12
    ))?;
    pipeline.prepare(&mut envelope, &Call::new("Ping", ns::SOAP_12))?;

    println!("{}", envelope.to_xml()?);
    Ok(())
}
