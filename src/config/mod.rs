//! Carrier configuration subsystem.
//!
//! # Data Flow
//! ```text
//! carrier config provider (raw key/value bundle per subscription)
//!     → bundle.rs (typed accessors with defaults)
//!     → schema.rs (projection to the fixed MMS key set)
//!     → cache.rs (subscription-keyed table, atomic swap on reload)
//!     → copies handed to MMS transactions
//! ```
//!
//! # Design Decisions
//! - Records are immutable once filtered; changes arrive via full reload
//! - Every MMS key has a default so a sparse provider bundle still yields a
//!   complete record
//! - Reload never blocks readers; the swap is the only synchronized step

pub mod bundle;
pub mod cache;
pub mod schema;

pub use bundle::CarrierBundle;
pub use cache::{ConfigCache, ConfigError, ConfigTable};
pub use schema::{filter_bundle, MmsConfig};
