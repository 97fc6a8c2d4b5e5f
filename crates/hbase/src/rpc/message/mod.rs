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

use crate::error::Error::{
    Cancelled, DeadlineExceeded, IncompatibleOption, ResultAlreadyTaken, ResultChannelClosed,
};
use crate::error::Result;
use crate::rpc::context::{CallContext, ContextDone};
use crate::rpc::error::RpcError;
use bytes::Bytes;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::{debug, warn};

mod add_column;
mod list_tables;
mod modify_table;

pub use add_column::*;
pub use list_tables::*;
pub use modify_table::*;

/// What a dispatcher delivers into a call's result channel.
pub type RpcResult = std::result::Result<Box<dyn WireMessage>, RpcError>;

/// Object safe view of a protobuf message, so a dispatcher can encode
/// requests and decode responses without knowing their concrete types.
pub trait WireMessage: fmt::Debug + Send + Sync + 'static {
    fn encode_to_bytes(&self) -> Bytes;

    fn wire_len(&self) -> usize;

    fn merge_from_slice(&mut self, buf: &[u8]) -> std::result::Result<(), prost::DecodeError>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<M> WireMessage for M
where
    M: prost::Message + Default + 'static,
{
    fn encode_to_bytes(&self) -> Bytes {
        Bytes::from(prost::Message::encode_to_vec(self))
    }

    fn wire_len(&self) -> usize {
        prost::Message::encoded_len(self)
    }

    fn merge_from_slice(&mut self, buf: &[u8]) -> std::result::Result<(), prost::DecodeError> {
        prost::Message::merge(self, buf)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Recovers the concrete message behind a [`WireMessage`].
pub fn downcast_message<T: WireMessage>(message: Box<dyn WireMessage>) -> Option<T> {
    message.into_any().downcast::<T>().ok().map(|m| *m)
}

/// Typed side of a call: its RPC name, request and response messages.
pub trait RequestBody: Send + Sync + 'static {
    type RequestMessage: WireMessage;

    type ResponseBody: WireMessage + Default;

    /// RPC method name used for routing on the wire.
    const NAME: &'static str;

    fn call_base(&self) -> &CallBase;

    fn to_request(&self) -> Self::RequestMessage;
}

/// The contract a dispatcher relies on to send any call.
pub trait Call: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn base(&self) -> &CallBase;

    /// A fresh request message built from the call's current state.
    fn to_proto(&self) -> Box<dyn WireMessage>;

    /// A new, empty message to decode this call's response into.
    fn new_response(&self) -> Box<dyn WireMessage>;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn table(&self) -> &Bytes {
        self.base().table()
    }

    fn context(&self) -> &CallContext {
        self.base().context()
    }

    /// Delivers the outcome of the call. Only the first delivery is kept.
    fn complete(&self, result: RpcResult) -> bool {
        self.base().complete(result)
    }
}

impl<T: RequestBody> Call for T {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn base(&self) -> &CallBase {
        self.call_base()
    }

    fn to_proto(&self) -> Box<dyn WireMessage> {
        Box::new(self.to_request())
    }

    fn new_response(&self) -> Box<dyn WireMessage> {
        Box::new(T::ResponseBody::default())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// State shared by every call: the table it targets, its execution context
/// and a single-use result channel.
pub struct CallBase {
    name: &'static str,
    table: Bytes,
    ctx: CallContext,
    result_tx: Mutex<Option<oneshot::Sender<RpcResult>>>,
    result_rx: Mutex<Option<oneshot::Receiver<RpcResult>>>,
}

impl CallBase {
    pub fn new(name: &'static str, table: Bytes, ctx: CallContext) -> Self {
        let (tx, rx) = oneshot::channel();
        CallBase {
            name,
            table,
            ctx,
            result_tx: Mutex::new(Some(tx)),
            result_rx: Mutex::new(Some(rx)),
        }
    }

    /// Qualifier of the target table, empty for calls not bound to one.
    pub fn table(&self) -> &Bytes {
        &self.table
    }

    pub fn context(&self) -> &CallContext {
        &self.ctx
    }

    pub fn complete(&self, result: RpcResult) -> bool {
        let Some(tx) = self.result_tx.lock().take() else {
            warn!(call = self.name, "result already delivered, dropping new one");
            return false;
        };
        if tx.send(result).is_err() {
            debug!(call = self.name, "caller stopped waiting for result");
            return false;
        }
        true
    }

    /// Gives up on delivering a result; a waiting caller sees
    /// [`ResultChannelClosed`].
    pub fn abandon(&self) {
        self.result_tx.lock().take();
    }

    /// Takes the receiving end of the result channel. The call keeps only
    /// the sender, so once every handle to the call is dropped without a
    /// delivery the returned [`PendingResult`] resolves to
    /// [`ResultChannelClosed`].
    pub fn pending_result(&self) -> Result<PendingResult> {
        let rx = self
            .result_rx
            .lock()
            .take()
            .ok_or(ResultAlreadyTaken(self.name))?;
        Ok(PendingResult {
            name: self.name,
            ctx: self.ctx.clone(),
            rx,
        })
    }

    /// Waits for the delivered result, bounded by the call's context.
    pub async fn result(&self) -> Result<Box<dyn WireMessage>> {
        self.pending_result()?.wait().await
    }
}

/// Receiving end of a call's result channel, detached from the call.
#[derive(Debug)]
pub struct PendingResult {
    name: &'static str,
    ctx: CallContext,
    rx: oneshot::Receiver<RpcResult>,
}

impl PendingResult {
    pub async fn wait(self) -> Result<Box<dyn WireMessage>> {
        let PendingResult { name, ctx, rx } = self;
        tokio::select! {
            biased;
            delivered = rx => match delivered {
                Ok(result) => Ok(result?),
                Err(_) => Err(ResultChannelClosed(name)),
            },
            done = ctx.done() => {
                debug!(call = name, ?done, "stopped waiting for result");
                match done {
                    ContextDone::Cancelled => Err(Cancelled(name)),
                    ContextDone::DeadlineExceeded => Err(DeadlineExceeded(name)),
                }
            }
        }
    }
}

impl fmt::Debug for CallBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallBase")
            .field("name", &self.name)
            .field("table", &self.table)
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}

/// Optional parameter applied to a call after construction. The option
/// checks that the call is of the type it was built for before touching it.
#[derive(Clone)]
pub struct CallOption {
    name: &'static str,
    apply: Arc<dyn Fn(&mut dyn Call) -> Result<()> + Send + Sync>,
}

impl CallOption {
    pub fn new<T, F>(name: &'static str, f: F) -> Self
    where
        T: RequestBody,
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        CallOption {
            name,
            apply: Arc::new(move |call: &mut dyn Call| {
                f(narrow::<T>(call, name)?);
                Ok(())
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, call: &mut dyn Call) -> Result<()> {
        (self.apply)(call)
    }
}

impl fmt::Debug for CallOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallOption").field(&self.name).finish()
    }
}

/// Applies `options` in order, stopping at the first one that does not fit.
pub fn apply_options(call: &mut dyn Call, options: &[CallOption]) -> Result<()> {
    for option in options {
        option.apply(call)?;
    }
    Ok(())
}

fn narrow<'a, T: RequestBody>(call: &'a mut dyn Call, option: &'static str) -> Result<&'a mut T> {
    let name = call.name();
    call.as_any_mut().downcast_mut::<T>().ok_or_else(|| {
        debug!(option, call = name, expected = T::NAME, "rejecting option");
        IncompatibleOption {
            option,
            expected: T::NAME,
            call: name,
        }
    })
}

/// Option that cannot fail, applied to a concrete call type.
pub type TypedOption<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Idempotency token carried by schema changing calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nonce {
    pub group: u64,
    pub nonce: u64,
}

pub trait NonceCall: RequestBody {
    fn nonce_mut(&mut self) -> &mut Option<Nonce>;
}

pub fn with_nonce<T: NonceCall>(group: u64, nonce: u64) -> TypedOption<T> {
    Box::new(move |call: &mut T| *call.nonce_mut() = Some(Nonce { group, nonce }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::metadata::TableName;
    use crate::proto::{AddColumnResponse, GetTableNamesResponse, TableName as PbTableName};
    use std::time::Duration;

    fn names_response(qualifier: &'static str) -> Box<dyn WireMessage> {
        Box::new(GetTableNamesResponse {
            table_names: vec![PbTableName {
                namespace: Bytes::new(),
                qualifier: Bytes::from_static(qualifier.as_bytes()),
            }],
        })
    }

    #[test]
    fn test_names_are_fixed_and_distinct() {
        let ctx = CallContext::background;
        let table = TableName::of("t1");
        let families = crate::metadata::FamilyAttributes::from([(
            "cf1".to_string(),
            std::collections::HashMap::from([("TTL".to_string(), "60".to_string())]),
        )]);
        let calls: Vec<Box<dyn Call>> = vec![
            Box::new(AddColumn::new(ctx(), &table, "cf", vec![])),
            Box::new(AddColumn::new(
                ctx(),
                &TableName::new("ns", "t2"),
                "cf2",
                vec![with_nonce(1, 2)],
            )),
            Box::new(ListTableNames::new(ctx(), &[]).unwrap()),
            Box::new(
                ListTableNames::new(
                    ctx(),
                    &[list_regex("^a"), list_namespace("ns"), list_sys_tables(true)],
                )
                .unwrap(),
            ),
            Box::new(ListTableSchemas::new(ctx(), vec![], &[]).unwrap()),
            Box::new(
                ListTableSchemas::new(
                    ctx(),
                    vec![table.clone()],
                    &[list_regex_schemas("^b"), list_sys_tables_schemas(true)],
                )
                .unwrap(),
            ),
            Box::new(ModifyTable::new(
                ctx(),
                &table,
                &Default::default(),
                &Default::default(),
                vec![],
            )),
            Box::new(ModifyTable::new(
                CallContext::with_timeout(Duration::from_secs(1)),
                &table,
                &families,
                &Default::default(),
                vec![with_nonce(3, 4)],
            )),
        ];
        let names: Vec<&str> = calls.iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "AddColumn",
                "AddColumn",
                "GetTableNames",
                "GetTableNames",
                "GetTableDescriptors",
                "GetTableDescriptors",
                "ModifyTable",
                "ModifyTable",
            ]
        );
    }

    #[tokio::test]
    async fn test_dropped_call_closes_pending_result() {
        let call = ListTableNames::new(CallContext::background(), &[]).unwrap();
        let pending = call.base().pending_result().unwrap();
        drop(call);
        assert!(matches!(
            pending.wait().await,
            Err(Error::ResultChannelClosed("GetTableNames"))
        ));
    }

    #[tokio::test]
    async fn test_pending_result_taken_once() {
        let call = ListTableNames::new(CallContext::background(), &[]).unwrap();
        let pending = call.base().pending_result().unwrap();
        assert!(matches!(
            call.base().result().await,
            Err(Error::ResultAlreadyTaken("GetTableNames"))
        ));
        assert!(call.complete(Ok(names_response("t1"))));
        assert!(pending.wait().await.is_ok());
    }

    #[tokio::test]
    async fn test_result_is_delivered_once() {
        let call = ListTableNames::new(CallContext::background(), &[]).unwrap();
        assert!(call.complete(Ok(names_response("t1"))));
        assert!(!call.complete(Ok(names_response("t2"))));

        let result = call.base().result().await.unwrap();
        let response: GetTableNamesResponse = downcast_message(result).unwrap();
        assert_eq!(response.table_names[0].qualifier.as_ref(), b"t1");

        assert!(matches!(
            call.base().result().await,
            Err(Error::ResultAlreadyTaken("GetTableNames"))
        ));
    }

    #[tokio::test]
    async fn test_dispatch_error_is_returned() {
        let call = ListTableNames::new(CallContext::background(), &[]).unwrap();
        call.complete(Err(RpcError::ConnectionError("refused".to_string())));
        assert!(matches!(
            call.base().result().await,
            Err(Error::RpcError(RpcError::ConnectionError(_)))
        ));
    }

    #[tokio::test]
    async fn test_cancel_stops_waiting() {
        let ctx = CallContext::background();
        let call = Arc::new(ListTableNames::new(ctx.clone(), &[]).unwrap());
        let waiter = call.clone();
        let handle = tokio::spawn(async move { waiter.base().result().await });
        ctx.cancel();
        assert!(matches!(
            handle.await.unwrap(),
            Err(Error::Cancelled("GetTableNames"))
        ));
        // the receiver is gone, a late result is refused
        assert!(!call.complete(Ok(names_response("t1"))));
    }

    #[tokio::test]
    async fn test_deadline_stops_waiting() {
        let ctx = CallContext::with_timeout(Duration::from_millis(10));
        let call = ListTableSchemas::new(ctx, vec![], &[]).unwrap();
        assert!(matches!(
            call.base().result().await,
            Err(Error::DeadlineExceeded("GetTableDescriptors"))
        ));
    }

    #[tokio::test]
    async fn test_delivered_result_wins_over_cancel() {
        let ctx = CallContext::background();
        let call = ListTableNames::new(ctx.clone(), &[]).unwrap();
        call.complete(Ok(names_response("t1")));
        ctx.cancel();
        assert!(call.base().result().await.is_ok());
    }

    #[test]
    fn test_apply_options_stops_at_first_mismatch() {
        let mut call = ListTableNames::new(CallContext::background(), &[]).unwrap();
        let err = apply_options(
            &mut call,
            &[list_regex("^a"), list_regex_schemas("^b"), list_regex("^c")],
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ListRegexSchemas option can only be used with GetTableDescriptors, not GetTableNames"
        );
        assert_eq!(call.filter().regex, "^a");
    }

    #[test]
    fn test_wire_message_encoding() {
        let message = names_response("t1");
        let bytes = message.encode_to_bytes();
        assert_eq!(bytes.len(), message.wire_len());

        let mut decoded = GetTableNamesResponse::default();
        decoded.merge_from_slice(&bytes).unwrap();
        assert_eq!(decoded.table_names[0].qualifier.as_ref(), b"t1");
        assert!(downcast_message::<AddColumnResponse>(message).is_none());
    }

    #[test]
    fn test_option_debug_names_option() {
        assert_eq!(
            format!("{:?}", list_sys_tables(true)),
            "CallOption(\"ListSysTables\")"
        );
        assert_eq!(list_namespace("ns").name(), "ListNamespace");
    }
}
