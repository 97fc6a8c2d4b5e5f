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
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

pub const DEFAULT_NAMESPACE: &str = "default";
pub const SYSTEM_NAMESPACE: &str = "hbase";
const NAMESPACE_DELIMITER: char = ':';

/// Family name to attribute key to attribute value.
pub type FamilyAttributes = HashMap<String, HashMap<String, String>>;

/// Identifies a table by namespace and qualifier.
///
/// Both parts are reference counted, so clones share the underlying bytes.
/// An empty namespace addresses the default namespace, and compares and
/// hashes equal to an explicit `default`.
#[derive(Debug, Clone)]
pub struct TableName {
    namespace: Bytes,
    qualifier: Bytes,
}

impl TableName {
    pub fn new(namespace: impl Into<Bytes>, qualifier: impl Into<Bytes>) -> Self {
        TableName {
            namespace: namespace.into(),
            qualifier: qualifier.into(),
        }
    }

    /// A table in the default namespace.
    pub fn of(qualifier: impl Into<Bytes>) -> Self {
        Self::new(Bytes::new(), qualifier)
    }

    pub fn namespace(&self) -> &Bytes {
        &self.namespace
    }

    pub fn qualifier(&self) -> &Bytes {
        &self.qualifier
    }

    pub fn is_default_namespace(&self) -> bool {
        self.namespace.is_empty() || self.namespace.as_ref() == DEFAULT_NAMESPACE.as_bytes()
    }

    pub fn is_system_table(&self) -> bool {
        self.namespace.as_ref() == SYSTEM_NAMESPACE.as_bytes()
    }

    fn normalized_namespace(&self) -> &[u8] {
        if self.is_default_namespace() {
            &b""[..]
        } else {
            self.namespace.as_ref()
        }
    }
}

impl PartialEq for TableName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized_namespace() == other.normalized_namespace()
            && self.qualifier == other.qualifier
    }
}

impl Eq for TableName {}

impl Hash for TableName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized_namespace().hash(state);
        self.qualifier.hash(state);
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qualifier = String::from_utf8_lossy(&self.qualifier);
        if self.is_default_namespace() {
            write!(f, "{qualifier}")
        } else {
            let namespace = String::from_utf8_lossy(&self.namespace);
            write!(f, "{namespace}{NAMESPACE_DELIMITER}{qualifier}")
        }
    }
}

impl FromStr for TableName {
    type Err = crate::error::Error;

    /// Parses `qualifier` or `namespace:qualifier`.
    fn from_str(s: &str) -> Result<Self> {
        let (namespace, qualifier) = match s.split_once(NAMESPACE_DELIMITER) {
            Some((namespace, qualifier)) => (namespace, qualifier),
            None => ("", s),
        };
        if qualifier.is_empty() {
            return Err(IllegalArgument(format!(
                "table name '{s}' has an empty qualifier"
            )));
        }
        if qualifier.contains(NAMESPACE_DELIMITER) {
            return Err(IllegalArgument(format!(
                "table name '{s}' has more than one namespace delimiter"
            )));
        }
        Ok(TableName::new(
            Bytes::copy_from_slice(namespace.as_bytes()),
            Bytes::copy_from_slice(qualifier.as_bytes()),
        ))
    }
}

/// Decoded table schema: the table name and every column family with its
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDescriptor {
    table_name: TableName,
    families: FamilyAttributes,
}

impl TableDescriptor {
    pub fn new(table_name: TableName, families: FamilyAttributes) -> Self {
        TableDescriptor {
            table_name,
            families,
        }
    }

    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }

    pub fn families(&self) -> &FamilyAttributes {
        &self.families
    }

    pub fn family(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.families.get(name)
    }
}
