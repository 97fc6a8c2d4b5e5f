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

use crate::config::Config;
use crate::error::Error::UnexpectedResponse;
use crate::error::Result;
use crate::metadata::{ColumnFamilyDefaults, FamilyAttributes, TableDescriptor, TableName};
use crate::rpc::{
    AddColumn, Call, CallOption, ListTableNames, ListTableSchemas, ModifyTable, RequestBody,
    downcast_message, from_pb_table_name, from_pb_table_schema,
};
use std::future::Future;
use std::sync::Arc;
use tracing::trace;

/// Sends calls to the cluster on behalf of [`HBaseAdmin`].
///
/// An implementation delivers each call's outcome with [`Call::complete`].
/// Dropping a call without completing it, or calling
/// [`CallBase::abandon`](crate::rpc::CallBase::abandon), fails the caller
/// with `ResultChannelClosed`.
/// It must watch the call's context and may stop working on it once the
/// context is done.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, call: Arc<dyn Call>) -> impl Future<Output = ()> + Send;
}

pub struct HBaseAdmin<D> {
    dispatcher: Arc<D>,
    config: Config,
    cf_defaults: ColumnFamilyDefaults,
}

impl<D: Dispatcher> HBaseAdmin<D> {
    pub fn new(dispatcher: Arc<D>, config: Config) -> Result<Self> {
        let cf_defaults = config.column_family_defaults()?;
        Ok(HBaseAdmin {
            dispatcher,
            config,
            cf_defaults,
        })
    }

    pub fn cf_defaults(&self) -> &ColumnFamilyDefaults {
        &self.cf_defaults
    }

    pub async fn add_column(&self, table_name: &TableName, cf_name: &str) -> Result<()> {
        let call = AddColumn::new(
            self.config.new_context(),
            table_name,
            cf_name.as_bytes().to_vec(),
            vec![],
        );
        let _response = self.send(call).await?;
        Ok(())
    }

    pub async fn list_table_names(&self, options: &[CallOption]) -> Result<Vec<TableName>> {
        let call = ListTableNames::new(self.config.new_context(), options)?;
        let response = self.send(call).await?;
        Ok(response
            .table_names
            .iter()
            .map(from_pb_table_name)
            .collect())
    }

    pub async fn list_table_schemas(
        &self,
        table_names: Vec<TableName>,
        options: &[CallOption],
    ) -> Result<Vec<TableDescriptor>> {
        let call = ListTableSchemas::new(self.config.new_context(), table_names, options)?;
        let response = self.send(call).await?;
        response
            .table_schema
            .iter()
            .map(from_pb_table_schema)
            .collect()
    }

    /// Families missing an attribute get the admin's column family default.
    pub async fn modify_table(
        &self,
        table_name: &TableName,
        families: &FamilyAttributes,
    ) -> Result<()> {
        let call = ModifyTable::new(
            self.config.new_context(),
            table_name,
            families,
            &self.cf_defaults,
            vec![],
        );
        let _response = self.send(call).await?;
        Ok(())
    }

    async fn send<T: RequestBody>(&self, call: T) -> Result<T::ResponseBody> {
        let call = Arc::new(call);
        let pending = call.base().pending_result()?;
        trace!(call = T::NAME, "dispatching");
        // the dispatcher holds the only handle, dropping it closes the channel
        self.dispatcher.dispatch(call).await;
        let response = pending.wait().await?;
        downcast_message::<T::ResponseBody>(response).ok_or(UnexpectedResponse {
            call: T::NAME,
            expected: std::any::type_name::<T::ResponseBody>(),
        })
    }
}
