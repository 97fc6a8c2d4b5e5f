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

//! Protobuf messages of the HBase master admin protocol (`HBase.proto` and
//! `Master.proto`), restricted to the calls this crate builds. Field numbers
//! and labels follow the proto2 definitions shipped with HBase.

/// Table name. The namespace is empty for tables in the default namespace.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TableName {
    #[prost(bytes = "bytes", required, tag = "1")]
    pub namespace: ::prost::bytes::Bytes,
    #[prost(bytes = "bytes", required, tag = "2")]
    pub qualifier: ::prost::bytes::Bytes,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct BytesBytesPair {
    #[prost(bytes = "vec", required, tag = "1")]
    pub first: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes = "vec", required, tag = "2")]
    pub second: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct NameStringPair {
    #[prost(string, required, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, required, tag = "2")]
    pub value: ::prost::alloc::string::String,
}

/// Column family schema: a name plus the family's attributes and
/// configuration overrides.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ColumnFamilySchema {
    #[prost(bytes = "vec", required, tag = "1")]
    pub name: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub attributes: ::prost::alloc::vec::Vec<BytesBytesPair>,
    #[prost(message, repeated, tag = "3")]
    pub configuration: ::prost::alloc::vec::Vec<NameStringPair>,
}

/// Table schema: table name, table attributes and its column families.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TableSchema {
    #[prost(message, optional, tag = "1")]
    pub table_name: ::core::option::Option<TableName>,
    #[prost(message, repeated, tag = "2")]
    pub attributes: ::prost::alloc::vec::Vec<BytesBytesPair>,
    #[prost(message, repeated, tag = "3")]
    pub column_families: ::prost::alloc::vec::Vec<ColumnFamilySchema>,
    #[prost(message, repeated, tag = "4")]
    pub configuration: ::prost::alloc::vec::Vec<NameStringPair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddColumnRequest {
    #[prost(message, required, tag = "1")]
    pub table_name: TableName,
    #[prost(message, required, tag = "2")]
    pub column_families: ColumnFamilySchema,
    #[prost(uint64, optional, tag = "3", default = "0")]
    pub nonce_group: ::core::option::Option<u64>,
    #[prost(uint64, optional, tag = "4", default = "0")]
    pub nonce: ::core::option::Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AddColumnResponse {
    #[prost(uint64, optional, tag = "1")]
    pub proc_id: ::core::option::Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModifyTableRequest {
    #[prost(message, required, tag = "1")]
    pub table_name: TableName,
    #[prost(message, required, tag = "2")]
    pub table_schema: TableSchema,
    #[prost(uint64, optional, tag = "3", default = "0")]
    pub nonce_group: ::core::option::Option<u64>,
    #[prost(uint64, optional, tag = "4", default = "0")]
    pub nonce: ::core::option::Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ModifyTableResponse {
    #[prost(uint64, optional, tag = "1")]
    pub proc_id: ::core::option::Option<u64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTableNamesRequest {
    #[prost(string, optional, tag = "1")]
    pub regex: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bool, optional, tag = "2", default = "false")]
    pub include_sys_tables: ::core::option::Option<bool>,
    #[prost(string, optional, tag = "3")]
    pub namespace: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTableNamesResponse {
    #[prost(message, repeated, tag = "1")]
    pub table_names: ::prost::alloc::vec::Vec<TableName>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTableDescriptorsRequest {
    #[prost(message, repeated, tag = "1")]
    pub table_names: ::prost::alloc::vec::Vec<TableName>,
    #[prost(string, optional, tag = "2")]
    pub regex: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bool, optional, tag = "3", default = "false")]
    pub include_sys_tables: ::core::option::Option<bool>,
    #[prost(string, optional, tag = "4")]
    pub namespace: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetTableDescriptorsResponse {
    #[prost(message, repeated, tag = "1")]
    pub table_schema: ::prost::alloc::vec::Vec<TableSchema>,
}
