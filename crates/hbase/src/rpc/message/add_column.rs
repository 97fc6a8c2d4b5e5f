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

use crate::metadata::TableName;
use crate::proto;
use crate::proto::AddColumnResponse;
use crate::rpc::context::CallContext;
use crate::rpc::convert::to_pb_table_name;
use crate::rpc::message::{CallBase, Nonce, NonceCall, RequestBody, TypedOption};

use bytes::Bytes;

/// Adds one column family to an existing table.
#[derive(Debug)]
pub struct AddColumn {
    base: CallBase,
    table_name: TableName,
    cf_name: Bytes,
    nonce: Option<Nonce>,
}

impl AddColumn {
    pub fn new(
        ctx: CallContext,
        table_name: &TableName,
        cf_name: impl Into<Bytes>,
        options: Vec<TypedOption<AddColumn>>,
    ) -> Self {
        let mut call = AddColumn {
            base: CallBase::new(Self::NAME, table_name.qualifier().clone(), ctx),
            table_name: table_name.clone(),
            cf_name: cf_name.into(),
            nonce: None,
        };
        for option in options {
            option(&mut call);
        }
        call
    }

    pub fn table_name(&self) -> &TableName {
        &self.table_name
    }

    pub fn cf_name(&self) -> &Bytes {
        &self.cf_name
    }
}

impl RequestBody for AddColumn {
    type RequestMessage = proto::AddColumnRequest;

    type ResponseBody = AddColumnResponse;

    const NAME: &'static str = "AddColumn";

    fn call_base(&self) -> &CallBase {
        &self.base
    }

    fn to_request(&self) -> proto::AddColumnRequest {
        proto::AddColumnRequest {
            table_name: to_pb_table_name(&self.table_name),
            column_families: proto::ColumnFamilySchema {
                name: self.cf_name.to_vec(),
                ..Default::default()
            },
            nonce_group: self.nonce.map(|n| n.group),
            nonce: self.nonce.map(|n| n.nonce),
        }
    }
}

impl NonceCall for AddColumn {
    fn nonce_mut(&mut self) -> &mut Option<Nonce> {
        &mut self.nonce
    }
}
