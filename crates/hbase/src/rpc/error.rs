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

use thiserror::Error;

/// Failures produced on the dispatch side and delivered through a call's
/// result channel. This crate never raises them itself.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RpcError {
    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("remote exception {class_name}: {message}")]
    RemoteException { class_name: String, message: String },

    #[error("Cannot decode response: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("IO Error: {0}")]
    IO(#[from] std::io::Error),
}
