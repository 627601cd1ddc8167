//! MMS HTTP client.
//!
//! # Responsibilities
//! - Execute one MMS transaction against a carrier endpoint
//! - Resolve identity macros in the URL template and extra headers
//! - Assemble the MMS header set from the subscription's config record
//! - Track the live connection so a concurrent disconnect can reach it
//! - Classify failures: HTTP status vs. transport vs. voluntary disconnect

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use url::Url;
use uuid::Uuid;

use crate::config::schema::MmsConfig;
use crate::telephony::{SubscriptionId, SubscriptionSource, Telephony};
use crate::transport::connection::ConnectionRegistry;
use crate::transport::macros::{resolve_macros, MacroContext};
use crate::transport::network::NetworkHandle;
use crate::transport::types::{HttpRequest, Method, TransportError, TransportResult};

const HEADER_ACCEPT: &str = "Accept";
const HEADER_ACCEPT_LANGUAGE: &str = "Accept-Language";
const HEADER_USER_AGENT: &str = "User-Agent";
const HEADER_CONTENT_TYPE: &str = "Content-Type";

const HEADER_VALUE_ACCEPT: &str = "*/*, application/vnd.wap.mms-message, application/vnd.wap.sic";
const HEADER_VALUE_ACCEPT_LANGUAGE: &str = "en-US";
const HEADER_VALUE_CONTENT_TYPE: &str = "application/vnd.wap.mms-message";
const HEADER_VALUE_CONTENT_TYPE_WITH_CHARSET: &str =
    "application/vnd.wap.mms-message; charset=utf-8";

/// Client for a single carrier's MMS endpoints over one network.
///
/// All collaborators are injected: the network handle decides which link the
/// bytes travel, the telephony accessors feed macro resolution. One client
/// serves any number of concurrent transactions; each `execute` call tracks
/// its own connection.
pub struct MmsHttpClient {
    network: Arc<dyn NetworkHandle>,
    telephony: Arc<dyn Telephony>,
    subscriptions: Arc<dyn SubscriptionSource>,
    connections: ConnectionRegistry,
}

impl MmsHttpClient {
    /// Create a client over the supplied network and identity accessors.
    pub fn new(
        network: Arc<dyn NetworkHandle>,
        telephony: Arc<dyn Telephony>,
        subscriptions: Arc<dyn SubscriptionSource>,
    ) -> Self {
        Self {
            network,
            telephony,
            subscriptions,
            connections: ConnectionRegistry::new(),
        }
    }

    /// Execute one MMS transaction.
    ///
    /// Resolves `##MACRO##` tokens in `url_template`, assembles the MMS
    /// header set from `config`, performs the exchange, and returns the raw
    /// response payload. `body` is sent only for write methods. A
    /// `timeout_ms` of 0 falls back to `config.http_socket_timeout`. An
    /// empty `request_id` gets a generated one.
    ///
    /// No retry happens here; every failure is reported upward with enough
    /// type information for the caller's own policy, and a concurrent
    /// [`disconnect_all_url_connections`](Self::disconnect_all_url_connections)
    /// surfaces as [`TransportError::VoluntaryDisconnect`], never as a
    /// transport failure.
    #[allow(clippy::too_many_arguments)]
    pub async fn execute(
        &self,
        url_template: &str,
        body: &[u8],
        method: Method,
        use_ssl: bool,
        user_agent: &str,
        timeout_ms: u64,
        config: &MmsConfig,
        sub_id: SubscriptionId,
        request_id: &str,
    ) -> TransportResult<Bytes> {
        let ctx = MacroContext::new(sub_id, config, self.telephony.as_ref(), self.subscriptions.as_ref());

        let resolved = resolve_macros(url_template, &ctx);
        let url = qualify_url(&resolved, use_ssl)?;

        let request_id = if request_id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            request_id.to_string()
        };

        let timeout = if timeout_ms == 0 {
            Duration::from_millis(config.http_socket_timeout.max(0) as u64)
        } else {
            Duration::from_millis(timeout_ms)
        };

        let request = HttpRequest {
            url: url.clone(),
            method,
            headers: build_headers(method, user_agent, config, &ctx),
            body: method.is_write().then(|| Bytes::copy_from_slice(body)),
            timeout,
        };

        let handle = self.connections.register(&request_id);
        // MMSC URLs can embed subscriber numbers; log the host only.
        tracing::info!(
            request_id = %request_id,
            connection = %handle.id(),
            host = url.host_str().unwrap_or("-"),
            method = %method,
            sub_id = %sub_id,
            "executing mms http request"
        );

        let result = tokio::select! {
            biased;
            _ = handle.cancelled() => {
                tracing::info!(request_id = %request_id, "connection torn down by disconnect request");
                Err(TransportError::VoluntaryDisconnect)
            }
            sent = self.network.send(request) => match sent {
                Ok(response) if response.is_success() => {
                    tracing::info!(
                        request_id = %request_id,
                        status = response.status,
                        bytes = response.body.len(),
                        "mms http request complete"
                    );
                    Ok(response.body)
                }
                Ok(response) => {
                    tracing::warn!(request_id = %request_id, status = response.status, "mms http status failure");
                    Err(TransportError::Status { status: response.status })
                }
                // A forced close surfaces from the socket layer as a plain
                // I/O error; the handle's flag tells the two cases apart.
                Err(err) if handle.is_cancelled() => {
                    tracing::info!(request_id = %request_id, error = %err, "socket closed by disconnect request");
                    Err(TransportError::VoluntaryDisconnect)
                }
                Err(err) => {
                    tracing::warn!(request_id = %request_id, error = %err, "mms http transport failure");
                    Err(TransportError::Transport(err))
                }
            }
        };

        self.connections.deregister(handle.id());
        result
    }

    /// Forcibly close every connection currently in flight.
    ///
    /// Callable from any task at any time, e.g. by a watchdog reacting to a
    /// network-loss signal. Each affected `execute` call fails with
    /// [`TransportError::VoluntaryDisconnect`] so its caller retries
    /// immediately instead of applying network backoff.
    pub fn disconnect_all_url_connections(&self) {
        self.connections.disconnect_all();
    }

    /// Number of connections currently in flight.
    pub fn open_connections(&self) -> usize {
        self.connections.len()
    }
}

impl std::fmt::Debug for MmsHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MmsHttpClient")
            .field("open_connections", &self.connections.len())
            .finish()
    }
}

/// Apply the SSL toggle to a resolved URL template and parse it.
///
/// Carrier templates usually omit the scheme; `use_ssl` decides it then. A
/// template that does carry an explicit scheme wins over the toggle.
fn qualify_url(resolved: &str, use_ssl: bool) -> TransportResult<Url> {
    let candidate = if resolved.contains("://") {
        resolved.to_string()
    } else {
        let scheme = if use_ssl { "https" } else { "http" };
        format!("{scheme}://{resolved}")
    };
    Url::parse(&candidate).map_err(|e| TransportError::InvalidUrl {
        url: candidate,
        reason: e.to_string(),
    })
}

/// Assemble the MMS header set for one request.
fn build_headers(
    method: Method,
    user_agent: &str,
    config: &MmsConfig,
    ctx: &MacroContext<'_>,
) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    headers.push((HEADER_ACCEPT.to_string(), HEADER_VALUE_ACCEPT.to_string()));
    headers.push((
        HEADER_ACCEPT_LANGUAGE.to_string(),
        HEADER_VALUE_ACCEPT_LANGUAGE.to_string(),
    ));

    let user_agent = if user_agent.is_empty() {
        &config.user_agent
    } else {
        user_agent
    };
    if !user_agent.is_empty() {
        headers.push((HEADER_USER_AGENT.to_string(), user_agent.to_string()));
    }

    if !config.ua_prof_url.is_empty() {
        let tag = if config.ua_prof_tag_name.is_empty() {
            "x-wap-profile"
        } else {
            &config.ua_prof_tag_name
        };
        headers.push((tag.to_string(), config.ua_prof_url.clone()));
    }

    headers.extend(parse_http_params(&config.http_params, ctx));

    if method.is_write() {
        let content_type = if config.support_http_charset_header {
            HEADER_VALUE_CONTENT_TYPE_WITH_CHARSET
        } else {
            HEADER_VALUE_CONTENT_TYPE
        };
        headers.push((HEADER_CONTENT_TYPE.to_string(), content_type.to_string()));
    }

    headers
}

/// Parse carrier-provisioned extra headers.
///
/// The provider encodes them as `Name: Value|Name: Value`; values may carry
/// `##MACRO##` tokens. Entries without a name/value separator are skipped.
fn parse_http_params(http_params: &str, ctx: &MacroContext<'_>) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for pair in http_params.split('|') {
        if pair.trim().is_empty() {
            continue;
        }
        let Some((name, value)) = pair.split_once(':') else {
            tracing::warn!(entry = pair, "malformed httpParams entry, skipping");
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            tracing::warn!(entry = pair, "malformed httpParams entry, skipping");
            continue;
        }
        headers.push((name.to_string(), resolve_macros(value, ctx)));
    }
    headers
}
