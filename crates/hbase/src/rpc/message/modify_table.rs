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

use crate::metadata::{ColumnFamilyDefaults, FamilyAttributes, TableName};
use crate::proto;
use crate::proto::ModifyTableResponse;
use crate::rpc::context::CallContext;
use crate::rpc::convert::{to_pb_column_families, to_pb_table_name};
use crate::rpc::message::{CallBase, Nonce, NonceCall, RequestBody, TypedOption};

use std::collections::HashMap;
use tracing::debug;

/// Rewrites the column family attributes of an existing table.
#[derive(Debug)]
pub struct ModifyTable {
    base: CallBase,
    table_name: TableName,
    families: FamilyAttributes,
    nonce: Option<Nonce>,
}

impl ModifyTable {
    /// `families` maps a family name to the attributes to set on it. Every
    /// attribute known to `defaults` and missing from a family is filled with
    /// its default; attributes `defaults` does not know are dropped.
    pub fn new(
        ctx: CallContext,
        table_name: &TableName,
        families: &FamilyAttributes,
        defaults: &ColumnFamilyDefaults,
        options: Vec<TypedOption<ModifyTable>>,
    ) -> Self {
        let mut call = ModifyTable {
            base: CallBase::new(Self::NAME, table_name.qualifier().clone(), ctx),
            table_name: table_name.clone(),
            families: FamilyAttributes::new(),
            nonce: None,
        };
        for option in options {
            option(&mut call);
        }
        call.families = reconcile_families(families, defaults);
        call
    }

    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }

    /// Families after reconciliation with the defaults.
    pub fn families(&self) -> &FamilyAttributes {
        &self.families
    }
}

/// For each family, every key of `defaults` with the family's own value when
/// it sets one.
pub fn reconcile_families(
    families: &FamilyAttributes,
    defaults: &ColumnFamilyDefaults,
) -> FamilyAttributes {
    families
        .iter()
        .map(|(family, attrs)| {
            for key in attrs.keys().filter(|k| !defaults.contains(k)) {
                debug!(%family, attribute = %key, "dropping attribute without a default");
            }
            let mut reconciled = HashMap::with_capacity(defaults.len());
            for (key, default) in defaults.iter() {
                let value = attrs.get(key).map_or(default, String::as_str);
                reconciled.insert(key.to_string(), value.to_string());
            }
            (family.clone(), reconciled)
        })
        .collect()
}

impl RequestBody for ModifyTable {
    type RequestMessage = proto::ModifyTableRequest;

    type ResponseBody = ModifyTableResponse;

    const NAME: &'static str = "ModifyTable";

    fn call_base(&self) -> &CallBase {
        &self.base
    }

    fn to_request(&self) -> proto::ModifyTableRequest {
        let table_name = to_pb_table_name(&self.table_name);
        proto::ModifyTableRequest {
            table_name: table_name.clone(),
            table_schema: proto::TableSchema {
                table_name: Some(table_name),
                column_families: to_pb_column_families(&self.families),
                ..Default::default()
            },
            nonce_group: self.nonce.map(|n| n.group),
            nonce: self.nonce.map(|n| n.nonce),
        }
    }
}

impl NonceCall for ModifyTable {
    fn nonce_mut(&mut self) -> &mut Option<Nonce> {
        &mut self.nonce
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::convert::from_pb_table_schema;
    use crate::rpc::message::{Call, downcast_message, with_nonce};
    use proptest::prelude::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn small_defaults() -> ColumnFamilyDefaults {
        ColumnFamilyDefaults::builder()
            .attribute("TTL", "FOREVER")
            .attribute("VERSIONS", "1")
            .build()
            .unwrap()
    }

    #[test]
    fn test_reconcile_with_overrides() {
        let families = FamilyAttributes::from([("cf1".to_string(), attrs(&[("TTL", "60")]))]);
        let call = ModifyTable::new(
            CallContext::background(),
            &TableName::of("t1"),
            &families,
            &small_defaults(),
            vec![],
        );
        assert_eq!(call.name(), "ModifyTable");
        assert_eq!(call.table().as_ref(), b"t1");
        assert_eq!(
            call.families().get("cf1"),
            Some(&attrs(&[("TTL", "60"), ("VERSIONS", "1")]))
        );
    }

    #[test]
    fn test_unknown_attributes_are_dropped() {
        let families = FamilyAttributes::from([(
            "cf1".to_string(),
            attrs(&[("VERSIONS", "5"), ("OWNER", "bob")]),
        )]);
        let reconciled = reconcile_families(&families, &small_defaults());
        assert_eq!(
            reconciled.get("cf1"),
            Some(&attrs(&[("TTL", "FOREVER"), ("VERSIONS", "5")]))
        );
    }

    #[test]
    fn test_family_without_attributes_gets_hbase_defaults() {
        let families = FamilyAttributes::from([("cf1".to_string(), HashMap::new())]);
        let defaults = ColumnFamilyDefaults::hbase();
        let reconciled = reconcile_families(&families, &defaults);
        let cf1 = &reconciled["cf1"];
        assert_eq!(cf1.len(), defaults.len());
        for (key, value) in defaults.iter() {
            assert_eq!(cf1[key], value);
        }
    }

    #[test]
    fn test_modify_table_request() {
        let families = FamilyAttributes::from([
            ("cf1".to_string(), attrs(&[("TTL", "60")])),
            ("cf2".to_string(), HashMap::new()),
        ]);
        let table = TableName::new("ns", "t1");
        let call = ModifyTable::new(
            CallContext::background(),
            &table,
            &families,
            &small_defaults(),
            vec![with_nonce(1, 2)],
        );

        let req: proto::ModifyTableRequest = downcast_message(call.to_proto()).unwrap();
        assert_eq!(req.table_name.qualifier.as_ref(), b"t1");
        assert_eq!(req.table_schema.table_name.as_ref(), Some(&req.table_name));
        assert_eq!(req.table_schema.column_families.len(), 2);
        for family in &req.table_schema.column_families {
            assert_eq!(family.attributes.len(), 2);
        }
        assert_eq!(req.nonce_group, Some(1));
        assert_eq!(req.nonce, Some(2));

        let descriptor = from_pb_table_schema(&req.table_schema).unwrap();
        assert_eq!(descriptor.table_name(), &table);
        assert_eq!(descriptor.families(), call.families());
    }

    #[test]
    fn test_to_proto_is_repeatable() {
        let families = FamilyAttributes::from([("cf1".to_string(), attrs(&[("TTL", "60")]))]);
        let call = ModifyTable::new(
            CallContext::background(),
            &TableName::of("t1"),
            &families,
            &small_defaults(),
            vec![],
        );
        let first: proto::ModifyTableRequest = downcast_message(call.to_proto()).unwrap();
        let second: proto::ModifyTableRequest = downcast_message(call.to_proto()).unwrap();
        // attribute order follows map iteration, compare decoded form
        assert_eq!(
            from_pb_table_schema(&first.table_schema).unwrap(),
            from_pb_table_schema(&second.table_schema).unwrap()
        );
        assert_eq!(first.table_name, second.table_name);
    }

    #[test]
    fn test_new_response_is_fresh() {
        let call = ModifyTable::new(
            CallContext::background(),
            &TableName::of("t1"),
            &FamilyAttributes::new(),
            &small_defaults(),
            vec![],
        );
        let a = call.new_response();
        let b = call.new_response();
        assert!(a.as_any().is::<ModifyTableResponse>());
        assert!(!std::ptr::addr_eq(a.as_any(), b.as_any()));
    }

    proptest! {
        #[test]
        fn reconciled_families_hold_exactly_the_default_keys(
            families in prop::collection::hash_map(
                "[a-z]{1,4}",
                prop::collection::hash_map(
                    prop_oneof!["TTL", "VERSIONS", "[A-Z_]{1,8}"],
                    "[a-z0-9]{0,6}",
                    0..6,
                ),
                0..4,
            )
        ) {
            let defaults = small_defaults();
            let reconciled = reconcile_families(&families, &defaults);
            prop_assert_eq!(reconciled.len(), families.len());
            for (family, attrs) in &families {
                let out = &reconciled[family];
                prop_assert_eq!(out.len(), defaults.len());
                for (key, default) in defaults.iter() {
                    let expected = attrs.get(key).map_or(default, String::as_str);
                    prop_assert_eq!(out[key].as_str(), expected);
                }
            }
        }
    }
}
