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

use clap::Parser;
use hbase::client::{Dispatcher, HBaseAdmin};
use hbase::config::Config;
use hbase::error::Result;
use hbase::metadata::{FamilyAttributes, TableName};
use hbase::rpc::{Call, list_regex, list_regex_schemas};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prints every request it is handed and answers with an empty response, so
/// the calls can be inspected without a cluster.
struct PrintingDispatcher;

impl Dispatcher for PrintingDispatcher {
    async fn dispatch(&self, call: Arc<dyn Call>) {
        let request = call.to_proto();
        println!(
            "{} on '{}' ({} bytes):\n  {:?}",
            call.name(),
            String::from_utf8_lossy(call.table()),
            request.wire_len(),
            request
        );
        call.complete(Ok(call.new_response()));
    }
}

#[tokio::main]
pub async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::parse();
    let admin = HBaseAdmin::new(Arc::new(PrintingDispatcher), config)?;
    info!(
        defaults = admin.cf_defaults().len(),
        "column family defaults loaded"
    );

    let table_name: TableName = "default:rust_test".parse()?;

    admin.add_column(&table_name, "cf1").await?;

    let families = FamilyAttributes::from([(
        "cf1".to_string(),
        HashMap::from([
            ("TTL".to_string(), "3600".to_string()),
            ("VERSIONS".to_string(), "5".to_string()),
        ]),
    )]);
    admin.modify_table(&table_name, &families).await?;

    let names = admin.list_table_names(&[list_regex("^rust_")]).await?;
    println!("Found {} tables", names.len());

    let schemas = admin
        .list_table_schemas(vec![table_name.clone()], &[list_regex_schemas("^rust_")])
        .await?;
    println!("Found {} schemas", schemas.len());

    // options are checked against the call they are applied to
    if let Err(e) = admin.list_table_names(&[list_regex_schemas("^rust_")]).await {
        println!("Rejected as expected: {e}");
    }

    Ok(())
}
