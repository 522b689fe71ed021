//! Outcome classification
//!
//! Terminal classification of a completed call. Three failure classes and one
//! success class:
//!
//! - `CallSetupFailure`: the transport could not be invoked at all
//! - `TransportFailure`: the transport completed with a non-success status
//! - `BusinessFailure`: HTTP success, but the body's embedded application
//!   status signals failure (passed through unmodified)
//! - `BusinessSuccess`: the only class that yields a payload to the caller
//!
//! All failures share the uniform `{status, statusInfo: {message, detail}}`
//! shape so callers handle every rejection the same way.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::transport::{DispatchError, TransportResponse};

/// Application status code for calls the transport could not even dispatch.
/// Deliberately outside the HTTP status space.
pub const STATUS_CALL_SETUP_FAILED: i64 = 600;

/// Application status code for completed calls with a non-success HTTP status.
pub const STATUS_TRANSPORT_FAILED: i64 = 601;

/// HTTP success range. 304 counts as success to support conditional caching
/// responses.
pub fn is_http_success(status_code: u16) -> bool {
    (200..=299).contains(&status_code) || status_code == 304
}

/// Human-readable failure description plus machine-readable detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub message: String,
    pub detail: Value,
}

/// The uniform failure shape carried by every rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailStatus {
    pub status: i64,
    pub status_info: StatusInfo,
}

impl FailStatus {
    pub fn call_setup_failed(err: &DispatchError) -> Self {
        Self {
            status: STATUS_CALL_SETUP_FAILED,
            status_info: StatusInfo {
                message: "Request could not be sent".to_string(),
                detail: json!({ "errMsg": err.err_msg }),
            },
        }
    }

    pub fn transport_failed(status_code: u16) -> Self {
        Self {
            status: STATUS_TRANSPORT_FAILED,
            status_info: StatusInfo {
                message: "Request failed".to_string(),
                detail: json!({ "statusCode": status_code }),
            },
        }
    }

    pub fn to_value(&self) -> Value {
        // FailStatus serialization cannot fail: it is a plain struct of
        // strings, integers and an already-built Value.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Classification of a completed transport response.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// HTTP success and embedded status absent or zero; `data` is the
    /// extracted payload field.
    BusinessSuccess { data: Value },

    /// HTTP success but embedded status non-zero. The whole body is the
    /// authoritative error object and passes through unmodified.
    BusinessFailure { status: i64, error: Value },

    /// Non-success HTTP status.
    TransportFailure(FailStatus),
}

/// Classify a completed response.
///
/// The embedded business status is read from the body's `status` field;
/// absence and zero both mean success, anything else is authoritative and
/// not remapped.
pub fn classify_response(response: &TransportResponse) -> Classified {
    if !is_http_success(response.status_code) {
        return Classified::TransportFailure(FailStatus::transport_failed(response.status_code));
    }

    let embedded_status = response
        .body
        .get("status")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    if embedded_status == 0 {
        let data = response.body.get("data").cloned().unwrap_or(Value::Null);
        Classified::BusinessSuccess { data }
    } else {
        Classified::BusinessFailure {
            status: embedded_status,
            error: response.body.clone(),
        }
    }
}

/// Classify a dispatch-level failure (the transport never produced a status).
pub fn classify_dispatch_error(err: &DispatchError) -> FailStatus {
    FailStatus::call_setup_failed(err)
}

/// Successful completion of `send`.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// The call produced a business-success payload. `response` is `None`
    /// when the value was served from cache without a dispatch.
    Resolved {
        data: Value,
        response: Option<TransportResponse>,
    },

    /// An identical call was already in flight and this one was dropped.
    /// An explicit variant rather than a never-completing future, so callers
    /// can distinguish suppression without leaking pending state.
    Suppressed,
}

/// Rejection carried back to the caller; `data` is the uniform failure shape
/// for transport/setup failures and the raw embedded error object for
/// business failures.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestFailure {
    pub status: i64,
    pub data: Value,
    pub response: Option<TransportResponse>,
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request failed with status {}", self.status)
    }
}

impl std::error::Error for RequestFailure {}

impl RequestFailure {
    /// Failure message for user-facing surfaces, read from the error object.
    pub fn message(&self) -> &str {
        self.data
            .get("statusInfo")
            .and_then(|info| info.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("Request failed")
    }
}
