//! JSON-RPC envelope types.
//!
//! Requests carry the method in the body together with a fresh call id:
//!
//! ```text
//! {"jsonrpc": "2.2", "method": "CmfTask.list", "callid": "<uuid v7>", "kwargs": {...}}
//! ```
//!
//! Responses always come back with HTTP 200 for domain errors, so the body
//! must be checked for an `error` object before `result` is looked at.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::Meta;
use crate::query::Kwargs;

/// Protocol version tag expected by the server.
pub const JSONRPC_VERSION: &str = "2.2";

/// An outbound RPC call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version (always [`JSONRPC_VERSION`]).
    pub jsonrpc: String,
    /// Remote method, `<Entity>.<verb>`.
    pub method: String,
    /// Unique per-call identifier.
    pub callid: String,
    /// Keyword arguments.
    pub kwargs: Kwargs,
}

impl RpcRequest {
    /// Create a request with a freshly generated call id.
    pub fn new(method: impl Into<String>, kwargs: Kwargs) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            callid: new_call_id(),
            kwargs,
        }
    }

    /// Serialize to the wire format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(Error::Encode)
    }
}

/// Generate a time-ordered call identifier.
pub fn new_call_id() -> String {
    Uuid::now_v7().to_string()
}

/// Error object returned inside a 200 body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    /// Error code.
    pub code: i64,
    /// Error message.
    pub message: String,
}

impl From<RpcError> for Error {
    fn from(e: RpcError) -> Self {
        Error::Rpc {
            code: e.code,
            message: e.message,
        }
    }
}

/// Raw response envelope, before `result` is interpreted.
#[derive(Debug, Clone, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    jsonrpc: Option<String>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
    #[serde(default)]
    meta: Option<Value>,
}

/// A successful response.
#[derive(Debug, Clone)]
pub struct RpcResponse<T> {
    /// Protocol version echoed by the server.
    pub jsonrpc: Option<String>,
    /// Decoded result.
    pub result: T,
    /// Class metadata, unless `no_meta` was requested.
    pub meta: Option<Meta>,
}

impl<T> RpcResponse<T> {
    /// Map the result, keeping the metadata.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RpcResponse<U> {
        RpcResponse {
            jsonrpc: self.jsonrpc,
            result: f(self.result),
            meta: self.meta,
        }
    }
}

/// Classify a 200 body and decode its result.
///
/// An `error` object wins over everything else; only when it is absent is
/// `result` (and `meta`) decoded into the target types. A missing `result`
/// decodes as JSON `null`.
pub fn decode_response<T: DeserializeOwned>(body: &[u8]) -> Result<RpcResponse<T>> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(Error::Decode)?;

    if let Some(error) = envelope.error {
        return Err(error.into());
    }

    let result = serde_json::from_value(envelope.result.unwrap_or(Value::Null))
        .map_err(Error::Decode)?;
    // meta is advisory; a shape we cannot model does not fail the call
    let meta = match envelope.meta {
        Some(Value::Null) | None => None,
        Some(meta) => match serde_json::from_value(meta) {
            Ok(meta) => Some(meta),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring undecodable response meta");
                None
            }
        },
    };

    Ok(RpcResponse {
        jsonrpc: envelope.jsonrpc,
        result,
        meta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Predicate;
    use crate::query::QueryBuilder;
    use std::collections::HashSet;

    #[test]
    fn test_request_serialization() {
        let req = RpcRequest::new("CmfTask.list", Kwargs::new());
        let json = String::from_utf8(req.to_bytes().unwrap()).unwrap();
        assert!(json.contains("\"jsonrpc\":\"2.2\""));
        assert!(json.contains("\"method\":\"CmfTask.list\""));
        assert!(json.contains("\"callid\":"));
        assert!(json.contains("\"kwargs\":{}"));
    }

    #[test]
    fn test_request_roundtrip() {
        let kwargs = QueryBuilder::new()
            .select(["id"])
            .from("CmfTask")
            .filter(Predicate::eq("code", "A-1"))
            .limit(1)
            .to_kwargs();
        let req = RpcRequest::new("CmfTask.list", kwargs.clone());
        let back: RpcRequest = serde_json::from_slice(&req.to_bytes().unwrap()).unwrap();

        assert_eq!(back.method, "CmfTask.list");
        assert_eq!(back.kwargs, kwargs);
        assert_eq!(back.callid, req.callid);
        assert!(Uuid::parse_str(&back.callid).is_ok());
    }

    #[test]
    fn test_call_ids_unique() {
        let ids: HashSet<String> = (0..1000)
            .map(|_| RpcRequest::new("X.list", Kwargs::new()).callid)
            .collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| !id.is_empty()));
    }

    #[test]
    fn test_decode_success() {
        let body = br#"{"jsonrpc":"2.2","result":[{"id":"a"},{"id":"b"}]}"#;
        let resp: RpcResponse<Vec<Value>> = decode_response(body).unwrap();
        assert_eq!(resp.result.len(), 2);
        assert_eq!(resp.jsonrpc.as_deref(), Some("2.2"));
        assert!(resp.meta.is_none());
    }

    #[test]
    fn test_decode_error_wins() {
        let body = br#"{"jsonrpc":"2.2","error":{"code":-32000,"message":"Task not found"}}"#;
        let err = decode_response::<Vec<Value>>(body).unwrap_err();
        match err {
            Error::Rpc { code, message } => {
                assert_eq!(code, -32000);
                assert_eq!(message, "Task not found");
            }
            other => panic!("expected Rpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_even_with_result() {
        // error takes precedence even if a result is also present
        let body = br#"{"result":[1,2],"error":{"code":1,"message":"denied"}}"#;
        assert!(decode_response::<Vec<i64>>(body).unwrap_err().is_rpc());
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode_response::<Value>(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_result_type_mismatch() {
        let err = decode_response::<Vec<Value>>(br#"{"result":42}"#).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_decode_missing_result_is_null() {
        let resp: RpcResponse<Option<Value>> = decode_response(br#"{"jsonrpc":"2.2"}"#).unwrap();
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_decode_odd_meta_is_dropped() {
        let resp: RpcResponse<i64> = decode_response(br#"{"result":1,"meta":{"total":5}}"#).unwrap();
        assert_eq!(resp.result, 1);
        assert!(resp.meta.is_none());
    }

    #[test]
    fn test_decode_meta() {
        let body = br#"{"result":1,"meta":{"CmfTask":{"class_name":"CmfTask","fields":{"name":{"caption":"Name"}}}}}"#;
        let resp: RpcResponse<i64> = decode_response(body).unwrap();
        let meta = resp.meta.unwrap();
        let class = meta.class("CmfTask").unwrap();
        assert_eq!(class.class_name.as_deref(), Some("CmfTask"));
        assert_eq!(class.fields["name"].caption.as_deref(), Some("Name"));
    }
}
