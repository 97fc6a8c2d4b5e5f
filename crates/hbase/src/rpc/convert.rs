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
use crate::metadata::{FamilyAttributes, TableDescriptor, TableName};
use crate::proto::{BytesBytesPair, ColumnFamilySchema, TableSchema};
use crate::proto;
use std::collections::HashMap;

pub fn to_pb_table_name(table_name: &TableName) -> proto::TableName {
    proto::TableName {
        namespace: table_name.namespace().clone(),
        qualifier: table_name.qualifier().clone(),
    }
}

pub fn from_pb_table_name(pb_table_name: &proto::TableName) -> TableName {
    TableName::new(
        pb_table_name.namespace.clone(),
        pb_table_name.qualifier.clone(),
    )
}

/// One schema per family, attributes in map iteration order.
pub fn to_pb_column_families(families: &FamilyAttributes) -> Vec<ColumnFamilySchema> {
    families
        .iter()
        .map(|(family, attrs)| ColumnFamilySchema {
            name: family.as_bytes().to_vec(),
            attributes: attrs
                .iter()
                .map(|(k, v)| BytesBytesPair {
                    first: k.as_bytes().to_vec(),
                    second: v.as_bytes().to_vec(),
                })
                .collect(),
            configuration: vec![],
        })
        .collect()
}

pub fn from_pb_table_schema(pb_table_schema: &TableSchema) -> Result<TableDescriptor> {
    let table_name = pb_table_schema
        .table_name
        .as_ref()
        .ok_or_else(|| IllegalArgument("table schema without a table name".to_string()))?;

    let mut families = HashMap::with_capacity(pb_table_schema.column_families.len());
    for family in &pb_table_schema.column_families {
        let attributes = family
            .attributes
            .iter()
            .map(|pair| {
                (
                    String::from_utf8_lossy(&pair.first).into_owned(),
                    String::from_utf8_lossy(&pair.second).into_owned(),
                )
            })
            .collect();
        families.insert(String::from_utf8_lossy(&family.name).into_owned(), attributes);
    }
    Ok(TableDescriptor::new(from_pb_table_name(table_name), families))
}
