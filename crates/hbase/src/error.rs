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

use crate::rpc::RpcError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An option built for one call type was applied to another.
    #[error("{option} option can only be used with {expected}, not {call}")]
    IncompatibleOption {
        option: &'static str,
        expected: &'static str,
        call: &'static str,
    },

    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    #[error("Json serde error: {0}")]
    JsonSerdeError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} call was cancelled")]
    Cancelled(&'static str),

    #[error("{0} call deadline exceeded")]
    DeadlineExceeded(&'static str),

    #[error("{0} call was dropped without a result")]
    ResultChannelClosed(&'static str),

    #[error("result of {0} call was already taken")]
    ResultAlreadyTaken(&'static str),

    #[error("{call} call got an unexpected response, expected {expected}")]
    UnexpectedResponse {
        call: &'static str,
        expected: &'static str,
    },

    #[error(transparent)]
    RpcError(#[from] RpcError),
}
