//! Carrier MMS configuration and HTTP transport.
//!
//! The two pieces an MMS sender/receiver needs between the message layer
//! and the carrier: per-subscription config, cached for fast concurrent
//! lookup and rebuilt without blocking readers, and an HTTP transport that
//! runs one MMS transaction over a flaky cellular link and can be cut loose
//! from the outside.
//!
//! # Architecture Overview
//!
//! ```text
//!   reload event             ┌────────────────────────────────────────────┐
//!   ──────────────────────────▶ config                                    │
//!                             │   SubscriptionSource                      │
//!                             │     → CarrierConfigSource                 │
//!                             │     → filter_bundle → atomic table swap   │
//!   get(sub_id)               │                                           │
//!   ◀────────── copy ─────────┤   ConfigCache                             │
//!                             └────────────────────────────────────────────┘
//!
//!   execute(template, pdu)    ┌────────────────────────────────────────────┐
//!   ──────────────────────────▶ transport                                  │
//!                             │   macros (##LINE1##) → headers → network   │
//!                             │   connection registry ◀── disconnect_all ──┼── watchdog
//!   payload | failure         │                                            │
//!   ◀─────────────────────────┤   MmsHttpClient                            │
//!                             └────────────────────────────────────────────┘
//! ```
//!
//! The caller owns retry policy, scheduling, and persistence; this crate
//! reports exactly what happened and nothing more.

// Core subsystems
pub mod config;
pub mod telephony;
pub mod transport;

pub use config::{ConfigCache, ConfigError, MmsConfig};
pub use telephony::SubscriptionId;
pub use transport::{Method, MmsHttpClient, ReqwestNetwork, TransportError};
