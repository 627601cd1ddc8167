//! The network seam and its production implementation.
//!
//! The transport never dials sockets itself: it goes through the
//! caller-supplied [`NetworkHandle`], which performs one full HTTP exchange.
//! Production hands in [`ReqwestNetwork`]; tests hand in blocking or failing
//! exchanges to drive the cancellation and failure paths.

use std::io;

use async_trait::async_trait;

use crate::transport::types::{HttpRequest, HttpResponse, Method};

/// One-shot HTTP exchange over a specific network.
///
/// Errors are surfaced as `io::Error` because that is all the socket layer
/// can say; attributing a close to a voluntary disconnect is the transport's
/// job, not the network's.
#[async_trait]
pub trait NetworkHandle: Send + Sync {
    /// Perform the exchange: connect, write the request, read the full
    /// response. Implementations must honor `request.timeout`.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, io::Error>;
}

/// Production network handle backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestNetwork {
    client: reqwest::Client,
}

impl ReqwestNetwork {
    /// Create a handle with a default client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a handle around a preconfigured client, e.g. one bound to a
    /// specific local interface.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkHandle for ReqwestNetwork {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, io::Error> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self
            .client
            .request(method, request.url.clone())
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(into_io_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(into_io_error)?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn into_io_error(err: reqwest::Error) -> io::Error {
    if err.is_timeout() {
        io::Error::new(io::ErrorKind::TimedOut, err)
    } else if err.is_connect() {
        io::Error::new(io::ErrorKind::ConnectionRefused, err)
    } else {
        io::Error::other(err)
    }
}
