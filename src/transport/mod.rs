//! MMS HTTP transport subsystem.
//!
//! # Data Flow
//! ```text
//! execute(url template, pdu, config, sub id)
//!     → macros.rs (##LINE1## substitution via telephony accessors)
//!     → client.rs (header assembly, connection registration)
//!     → network.rs (one HTTP exchange over the injected network handle)
//!     → classified result: payload | status | transport | disconnect
//!
//! disconnect_all_url_connections()   (any task, any time)
//!     → connection.rs (flag + wake every registered connection)
//!     → each in-flight execute fails with VoluntaryDisconnect
//! ```
//!
//! # Design Decisions
//! - The network is a seam: production uses reqwest, tests inject blocking
//!   or failing exchanges
//! - A forced close is attributed via an explicit per-connection flag, so
//!   callers can retry immediately without mistaking it for link failure
//! - No retry logic lives here; the transport reports, the caller decides

pub mod client;
pub mod connection;
pub mod macros;
pub mod network;
pub mod types;

pub use client::MmsHttpClient;
pub use connection::{ConnectionHandle, ConnectionId, ConnectionRegistry};
pub use macros::{resolve_macro, resolve_macros, MacroContext};
pub use network::{NetworkHandle, ReqwestNetwork};
pub use types::{HttpRequest, HttpResponse, Method, TransportError, TransportResult};
