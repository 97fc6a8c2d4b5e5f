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

//! Construction of HBase master admin calls.
//!
//! Every call implements [`rpc::Call`]: it names its RPC method, builds its
//! request message on demand and hands out empty response messages to decode
//! into. A dispatcher, which lives outside this crate, sends the request and
//! delivers the outcome through the call's single-use result channel.

pub mod client;
pub mod config;
pub mod error;
pub mod metadata;
pub mod proto;
pub mod rpc;

pub use error::{Error, Result};
