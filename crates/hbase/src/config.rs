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

use crate::error::Error::IllegalArgument;
use crate::error::Result;
use crate::metadata::ColumnFamilyDefaults;
use crate::rpc::CallContext;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone, Default, Deserialize, Serialize)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Deadline, in milliseconds, of contexts created by `new_context`
    #[arg(long)]
    #[serde(default)]
    pub call_timeout_ms: Option<u64>,

    /// Column family default override as KEY=VALUE, may be repeated
    #[arg(long = "cf-default", value_name = "KEY=VALUE")]
    #[serde(default)]
    pub cf_defaults: Vec<String>,

    /// JSON file of column family default overrides
    #[arg(long)]
    #[serde(default)]
    pub cf_defaults_file: Option<PathBuf>,
}

impl Config {
    /// HBase's stock defaults, then the file overrides, then the
    /// `KEY=VALUE` overrides.
    pub fn column_family_defaults(&self) -> Result<ColumnFamilyDefaults> {
        let mut builder = ColumnFamilyDefaults::builder().hbase_defaults();
        if let Some(path) = &self.cf_defaults_file {
            builder = builder.json_bytes(&std::fs::read(path)?)?;
        }
        for entry in &self.cf_defaults {
            let (key, value) = entry.split_once('=').ok_or_else(|| {
                IllegalArgument(format!(
                    "column family default '{entry}' is not of the form KEY=VALUE"
                ))
            })?;
            builder = builder.attribute(key.trim(), value.trim());
        }
        builder.build()
    }

    pub fn new_context(&self) -> CallContext {
        match self.call_timeout_ms {
            Some(ms) => CallContext::with_timeout(Duration::from_millis(ms)),
            None => CallContext::background(),
        }
    }
}
