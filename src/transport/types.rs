//! Transport-level types and error definitions.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use url::Url;

/// HTTP method for an MMS transaction. Sending a PDU is a write; retrieving
/// one is a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    /// Whether this method carries a request body.
    pub fn is_write(&self) -> bool {
        matches!(self, Method::Post)
    }

    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully assembled MMS HTTP request, ready for the network handle.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Resolved endpoint URL (macros substituted, scheme applied).
    pub url: Url,
    pub method: Method,
    /// Header name/value pairs in send order.
    pub headers: Vec<(String, String)>,
    /// PDU payload; present only for write methods.
    pub body: Option<Bytes>,
    /// Bound on the whole connect+read exchange.
    pub timeout: Duration,
}

/// Raw response from one MMS HTTP exchange.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the success class.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure of one MMS transaction.
///
/// The variants are exhaustive so callers branch explicitly: a status
/// failure feeds their own per-code policy, a transport failure gets their
/// network backoff, and a voluntary disconnect means "retry immediately".
#[derive(Debug, Error)]
pub enum TransportError {
    /// The MMSC answered outside the success class.
    #[error("HTTP status {status}")]
    Status { status: u16 },

    /// Connect/write/read failed and no disconnect was requested.
    #[error("transport failure: {0}")]
    Transport(#[from] std::io::Error),

    /// The connection was torn down by `disconnect_all_url_connections`.
    /// Not a network failure; the caller should retry without backoff.
    #[error("connection voluntarily disconnected")]
    VoluntaryDisconnect,

    /// The macro-resolved URL template did not parse.
    #[error("invalid MMS endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
