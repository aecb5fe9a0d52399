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

use crate::{Call, Context, Envelope, Plugin, Result};
use log::debug;
use std::sync::Arc;

/// Pipeline runs plugins around a SOAP call.
///
/// Plugins are applied in the order they were added. They are never merged:
/// a caller wanting a digest token and a signature chains both plugins.
#[derive(Clone, Debug)]
pub struct Pipeline {
    ctx: Context,
    plugins: Vec<Arc<dyn Plugin>>,
}

impl Pipeline {
    /// Create a pipeline without plugins.
    pub fn new(ctx: Context) -> Self {
        Self {
            ctx,
            plugins: Vec::new(),
        }
    }

    /// Append a plugin.
    pub fn with_plugin(mut self, plugin: impl Plugin) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Append a plugin that is shared with other pipelines.
    pub fn with_shared_plugin(mut self, plugin: Arc<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// The context handed to every plugin.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run every preprocess hook on the outgoing envelope.
    ///
    /// Stops at the first failing plugin; the envelope must not be sent then.
    pub fn prepare(&self, envelope: &mut Envelope, call: &Call) -> Result<()> {
        for plugin in &self.plugins {
            debug!("preprocess call {} with {:?}", call.method, plugin);
            plugin.preprocess(&self.ctx, envelope, call)?;
        }
        Ok(())
    }

    /// Run every postprocess hook on the received response.
    pub fn inspect(&self, response: &Envelope, call: &Call) -> Result<()> {
        for plugin in &self.plugins {
            debug!("postprocess call {} with {:?}", call.method, plugin);
            plugin.postprocess(&self.ctx, response, call)?;
        }
        Ok(())
    }
}
