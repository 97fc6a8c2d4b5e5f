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

use crate::error::Result;
use crate::metadata::TableName;
use crate::proto;
use crate::proto::{GetTableDescriptorsResponse, GetTableNamesResponse};
use crate::rpc::context::CallContext;
use crate::rpc::convert::to_pb_table_name;
use crate::rpc::message::{CallBase, CallOption, RequestBody, apply_options};

use bytes::Bytes;

pub const MATCH_ALL_REGEX: &str = ".*";

/// Which tables a listing call matches. By default every user table in every
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFilter {
    pub regex: String,
    pub include_sys_tables: bool,
    pub namespace: String,
}

impl Default for ListFilter {
    fn default() -> Self {
        ListFilter {
            regex: MATCH_ALL_REGEX.to_string(),
            include_sys_tables: false,
            namespace: String::new(),
        }
    }
}

/// Lists table names (`GetTableNames`).
#[derive(Debug)]
pub struct ListTableNames {
    base: CallBase,
    filter: ListFilter,
}

/// Lists full table schemas (`GetTableDescriptors`), optionally restricted
/// to an explicit set of tables.
#[derive(Debug)]
pub struct ListTableSchemas {
    base: CallBase,
    filter: ListFilter,
    table_names: Vec<TableName>,
}

impl ListTableNames {
    /// Use [`list_regex`], [`list_namespace`] and [`list_sys_tables`] to
    /// narrow the listing.
    pub fn new(ctx: CallContext, options: &[CallOption]) -> Result<Self> {
        let mut call = ListTableNames {
            base: CallBase::new(Self::NAME, Bytes::new(), ctx),
            filter: ListFilter::default(),
        };
        apply_options(&mut call, options)?;
        Ok(call)
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }
}

impl ListTableSchemas {
    /// Use [`list_regex_schemas`], [`list_namespace_schemas`] and
    /// [`list_sys_tables_schemas`] to narrow the listing.
    pub fn new(
        ctx: CallContext,
        table_names: Vec<TableName>,
        options: &[CallOption],
    ) -> Result<Self> {
        let mut call = ListTableSchemas {
            base: CallBase::new(Self::NAME, Bytes::new(), ctx),
            filter: ListFilter::default(),
            table_names,
        };
        apply_options(&mut call, options)?;
        Ok(call)
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    pub fn table_names(&self) -> &[TableName] {
        &self.table_names
    }
}

pub fn list_regex(regex: &str) -> CallOption {
    let regex = regex.to_string();
    CallOption::new("ListRegex", move |call: &mut ListTableNames| {
        call.filter.regex = regex.clone()
    })
}

pub fn list_namespace(namespace: &str) -> CallOption {
    let namespace = namespace.to_string();
    CallOption::new("ListNamespace", move |call: &mut ListTableNames| {
        call.filter.namespace = namespace.clone()
    })
}

pub fn list_sys_tables(include: bool) -> CallOption {
    CallOption::new("ListSysTables", move |call: &mut ListTableNames| {
        call.filter.include_sys_tables = include
    })
}

pub fn list_regex_schemas(regex: &str) -> CallOption {
    let regex = regex.to_string();
    CallOption::new("ListRegexSchemas", move |call: &mut ListTableSchemas| {
        call.filter.regex = regex.clone()
    })
}

pub fn list_namespace_schemas(namespace: &str) -> CallOption {
    let namespace = namespace.to_string();
    CallOption::new("ListNamespaceSchemas", move |call: &mut ListTableSchemas| {
        call.filter.namespace = namespace.clone()
    })
}

pub fn list_sys_tables_schemas(include: bool) -> CallOption {
    CallOption::new("ListSysTablesSchemas", move |call: &mut ListTableSchemas| {
        call.filter.include_sys_tables = include
    })
}

impl RequestBody for ListTableNames {
    type RequestMessage = proto::GetTableNamesRequest;

    type ResponseBody = GetTableNamesResponse;

    const NAME: &'static str = "GetTableNames";

    fn call_base(&self) -> &CallBase {
        &self.base
    }

    fn to_request(&self) -> proto::GetTableNamesRequest {
        proto::GetTableNamesRequest {
            regex: Some(self.filter.regex.clone()),
            include_sys_tables: Some(self.filter.include_sys_tables),
            namespace: Some(self.filter.namespace.clone()),
        }
    }
}

impl RequestBody for ListTableSchemas {
    type RequestMessage = proto::GetTableDescriptorsRequest;

    type ResponseBody = GetTableDescriptorsResponse;

    const NAME: &'static str = "GetTableDescriptors";

    fn call_base(&self) -> &CallBase {
        &self.base
    }

    fn to_request(&self) -> proto::GetTableDescriptorsRequest {
        proto::GetTableDescriptorsRequest {
            table_names: self.table_names.iter().map(to_pb_table_name).collect(),
            regex: Some(self.filter.regex.clone()),
            include_sys_tables: Some(self.filter.include_sys_tables),
            namespace: Some(self.filter.namespace.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rpc::message::{Call, downcast_message};

    #[test]
    fn test_default_filters() {
        let names = ListTableNames::new(CallContext::background(), &[]).unwrap();
        assert_eq!(names.filter(), &ListFilter::default());
        assert_eq!(names.filter().regex, ".*");
        assert!(!names.filter().include_sys_tables);
        assert_eq!(names.filter().namespace, "");

        let schemas = ListTableSchemas::new(CallContext::background(), vec![], &[]).unwrap();
        assert_eq!(schemas.filter(), &ListFilter::default());
    }

    #[test]
    fn test_list_table_names_request() {
        let call =
            ListTableNames::new(CallContext::background(), &[list_regex("^user_")]).unwrap();
        assert_eq!(call.name(), "GetTableNames");
        assert!(call.table().is_empty());

        let req: proto::GetTableNamesRequest = downcast_message(call.to_proto()).unwrap();
        assert_eq!(req.regex.as_deref(), Some("^user_"));
        assert_eq!(req.include_sys_tables, Some(false));
        assert_eq!(req.namespace.as_deref(), Some(""));
    }

    #[test]
    fn test_later_options_win() {
        let call = ListTableNames::new(
            CallContext::background(),
            &[
                list_namespace("a"),
                list_sys_tables(true),
                list_namespace("b"),
            ],
        )
        .unwrap();
        assert_eq!(call.filter().namespace, "b");
        assert!(call.filter().include_sys_tables);
    }

    #[test]
    fn test_list_table_schemas_request() {
        let tables = vec![TableName::of("t1"), TableName::new("ns", "t2")];
        let call = ListTableSchemas::new(
            CallContext::background(),
            tables,
            &[list_namespace_schemas("ns"), list_sys_tables_schemas(true)],
        )
        .unwrap();
        assert_eq!(call.name(), "GetTableDescriptors");

        let req: proto::GetTableDescriptorsRequest = downcast_message(call.to_proto()).unwrap();
        assert_eq!(req.regex.as_deref(), Some(".*"));
        assert_eq!(req.include_sys_tables, Some(true));
        assert_eq!(req.namespace.as_deref(), Some("ns"));
        assert_eq!(req.table_names.len(), 2);
        assert_eq!(req.table_names[1].namespace.as_ref(), b"ns");
        assert_eq!(req.table_names[1].qualifier.as_ref(), b"t2");
    }

    #[test]
    fn test_names_option_rejected_by_schemas() {
        let err = ListTableSchemas::new(CallContext::background(), vec![], &[list_regex("x")])
            .unwrap_err();
        match err {
            Error::IncompatibleOption {
                option,
                expected,
                call,
            } => {
                assert_eq!(option, "ListRegex");
                assert_eq!(expected, "GetTableNames");
                assert_eq!(call, "GetTableDescriptors");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_schemas_option_rejected_by_names() {
        for option in [
            list_regex_schemas("x"),
            list_namespace_schemas("ns"),
            list_sys_tables_schemas(true),
        ] {
            let err = ListTableNames::new(CallContext::background(), &[option]).unwrap_err();
            assert!(matches!(err, Error::IncompatibleOption { .. }));
        }
    }

    #[test]
    fn test_rejected_option_leaves_filter_untouched() {
        let mut call = ListTableSchemas::new(CallContext::background(), vec![], &[]).unwrap();
        assert!(list_regex("x").apply(&mut call).is_err());
        assert!(list_namespace("ns").apply(&mut call).is_err());
        assert!(list_sys_tables(true).apply(&mut call).is_err());
        assert_eq!(call.filter(), &ListFilter::default());

        let mut call = ListTableNames::new(CallContext::background(), &[]).unwrap();
        assert!(list_regex_schemas("x").apply(&mut call).is_err());
        assert_eq!(call.filter(), &ListFilter::default());
    }

    #[test]
    fn test_options_are_reusable() {
        let options = [list_regex("^a"), list_namespace("ns")];
        let first = ListTableNames::new(CallContext::background(), &options).unwrap();
        let second = ListTableNames::new(CallContext::background(), &options).unwrap();
        assert_eq!(first.filter(), second.filter());
    }

    #[test]
    fn test_to_proto_is_repeatable() {
        let call = ListTableSchemas::new(
            CallContext::background(),
            vec![TableName::of("t1")],
            &[list_regex_schemas("^t")],
        )
        .unwrap();
        let first: proto::GetTableDescriptorsRequest = downcast_message(call.to_proto()).unwrap();
        let second: proto::GetTableDescriptorsRequest = downcast_message(call.to_proto()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_new_response_shapes() {
        let names = ListTableNames::new(CallContext::background(), &[]).unwrap();
        let schemas = ListTableSchemas::new(CallContext::background(), vec![], &[]).unwrap();
        let a = names.new_response();
        let b = names.new_response();
        assert!(a.as_any().is::<GetTableNamesResponse>());
        assert!(!std::ptr::addr_eq(a.as_any(), b.as_any()));
        assert!(schemas.new_response().as_any().is::<GetTableDescriptorsResponse>());
    }
}
