use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Body of a venue response, kept verbatim for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    /// Parse a raw body as JSON, falling back to the raw text.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => write!(f, "{value}"),
            ResponseBody::Text(text) => f.write_str(text),
            ResponseBody::Empty => f.write_str("<empty>"),
        }
    }
}

/// Local precondition that must hold before an action is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    Terms,
    BuilderApproval,
}

impl fmt::Display for GuardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuardKind::Terms => f.write_str("terms"),
            GuardKind::BuilderApproval => f.write_str("builder_approval"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} guard failed: {message}")]
pub struct GuardError {
    pub kind: GuardKind,
    pub message: String,
    pub detail: Option<Value>,
}

/// Coarse classification used to dispatch on an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad caller input, raised before any network or signing call.
    Validation,
    /// Unknown symbol, dex or spot pair after consulting venue metadata.
    Resolution,
    /// Venue transport failure or rejection.
    Api,
    /// Local precondition (terms, builder approval) not satisfied.
    Guard,
    /// Hashing or signature failure.
    Signing,
    /// Missing or malformed configuration.
    Config,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

/// Main SDK error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// Non-finite input, decimal overflow, or a value truncated to zero.
    #[error("Numeric error: {0}")]
    Numeric(String),

    #[error("Unknown asset symbol: {0}")]
    UnknownAsset(String),

    #[error("Unknown perp dex: {0}")]
    UnknownDex(String),

    #[error("Unknown asset {asset} on perp dex {dex}")]
    UnknownDexAsset { dex: String, asset: String },

    #[error("Unknown spot symbol: {0}")]
    UnknownSpotSymbol(String),

    /// Non-2xx response, malformed body, `status != "ok"`, or per-order failures.
    #[error("Hyperliquid API error{}: {}", status_suffix(.status), .message)]
    Api {
        message: String,
        status: Option<u16>,
        body: ResponseBody,
    },

    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Json error: {0}")]
    Json(String),

    #[error("Rmp encode error: {0}")]
    Rmp(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } | Error::Numeric(_) => ErrorKind::Validation,
            Error::UnknownAsset(_)
            | Error::UnknownDex(_)
            | Error::UnknownDexAsset { .. }
            | Error::UnknownSpotSymbol(_) => ErrorKind::Resolution,
            Error::Api { .. } => ErrorKind::Api,
            Error::Guard(_) => ErrorKind::Guard,
            Error::Signing(_) | Error::Rmp(_) => ErrorKind::Signing,
            Error::Config(_) | Error::Json(_) => ErrorKind::Config,
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Error::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn api(message: impl Into<String>, status: Option<u16>, body: ResponseBody) -> Self {
        Error::Api {
            message: message.into(),
            status,
            body,
        }
    }

    pub fn guard(kind: GuardKind, message: impl Into<String>, detail: Option<Value>) -> Self {
        Error::Guard(GuardError {
            kind,
            message: message.into(),
            detail,
        })
    }

    pub fn signing(msg: impl Into<String>) -> Self {
        Error::Signing(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Raw response body, when the error came back from the venue.
    pub fn response_body(&self) -> Option<&ResponseBody> {
        match self {
            Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}
