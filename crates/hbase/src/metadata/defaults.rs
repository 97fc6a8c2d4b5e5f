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

use crate::error::Error::{IllegalArgument, JsonSerdeError};
use crate::error::Result;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Column family attribute defaults of a stock HBase installation.
pub const HBASE_DEFAULT_ATTRIBUTES: [(&str, &str); 11] = [
    ("BLOOMFILTER", "ROW"),
    ("VERSIONS", "3"),
    ("IN_MEMORY", "false"),
    ("KEEP_DELETED_CELLS", "false"),
    ("DATA_BLOCK_ENCODING", "FAST_DIFF"),
    ("TTL", "2147483647"),
    ("COMPRESSION", "NONE"),
    ("MIN_VERSIONS", "0"),
    ("BLOCKCACHE", "true"),
    ("BLOCKSIZE", "65536"),
    ("REPLICATION_SCOPE", "0"),
];

/// The closed set of column family attributes a [`ModifyTable`] call can
/// express, each with the value used when the caller leaves it out.
///
/// Immutable once built. Clones share the same table.
///
/// [`ModifyTable`]: crate::rpc::message::ModifyTable
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFamilyDefaults {
    attributes: Arc<HashMap<String, String>>,
}

#[derive(Debug, Default)]
pub struct ColumnFamilyDefaultsBuilder {
    attributes: HashMap<String, String>,
}

impl ColumnFamilyDefaults {
    pub fn builder() -> ColumnFamilyDefaultsBuilder {
        ColumnFamilyDefaultsBuilder::default()
    }

    /// The defaults HBase itself applies to a new column family.
    pub fn hbase() -> Self {
        ColumnFamilyDefaults {
            attributes: Arc::new(
                HBASE_DEFAULT_ATTRIBUTES
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for ColumnFamilyDefaults {
    fn default() -> Self {
        Self::hbase()
    }
}

impl ColumnFamilyDefaultsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from [`HBASE_DEFAULT_ATTRIBUTES`]; later calls override.
    pub fn hbase_defaults(mut self) -> Self {
        for (k, v) in HBASE_DEFAULT_ATTRIBUTES {
            self.attributes.insert(k.to_string(), v.to_string());
        }
        self
    }

    pub fn attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn attributes(mut self, attributes: HashMap<String, String>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Layers the attributes of a JSON document written by
    /// [`ColumnFamilyDefaults::to_json_bytes`] over the current ones.
    pub fn json_bytes(self, bytes: &[u8]) -> Result<Self> {
        let node: Value = serde_json::from_slice(bytes)
            .map_err(|e| JsonSerdeError(format!("Failed to parse JSON: {e}")))?;
        let Some(attributes_node) = node.get(ColumnFamilyDefaults::ATTRIBUTES_NAME) else {
            return Ok(self);
        };
        let obj = attributes_node
            .as_object()
            .ok_or_else(|| JsonSerdeError("attributes should be an object".to_string()))?;

        let mut attributes = HashMap::with_capacity(obj.len());
        for (key, value) in obj {
            let value = value.as_str().ok_or_else(|| {
                JsonSerdeError(format!("value of attribute {key} should be a string"))
            })?;
            attributes.insert(key.clone(), value.to_owned());
        }
        Ok(self.attributes(attributes))
    }

    pub fn build(self) -> Result<ColumnFamilyDefaults> {
        if self.attributes.keys().any(|k| k.trim().is_empty()) {
            return Err(IllegalArgument(
                "column family attribute keys must not be blank".to_string(),
            ));
        }
        Ok(ColumnFamilyDefaults {
            attributes: Arc::new(self.attributes),
        })
    }
}

impl ColumnFamilyDefaults {
    const ATTRIBUTES_NAME: &'static str = "attributes";
    const VERSION_KEY: &'static str = "version";
    const VERSION: u32 = 1;

    /// Reads `{"version": 1, "attributes": {"KEY": "VALUE", ..}}` and layers
    /// the attributes over `base`.
    pub fn from_json_bytes(base: ColumnFamilyDefaultsBuilder, bytes: &[u8]) -> Result<Self> {
        base.json_bytes(bytes)?.build()
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut obj = serde_json::Map::new();
        obj.insert(Self::VERSION_KEY.to_string(), json!(Self::VERSION));
        obj.insert(
            Self::ATTRIBUTES_NAME.to_string(),
            json!(self.attributes.as_ref()),
        );
        serde_json::to_vec(&Value::Object(obj))
            .map_err(|e| JsonSerdeError(format!("Failed to serialize to JSON: {e}")))
    }
}
