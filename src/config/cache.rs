//! Subscription-keyed MMS config cache.
//!
//! # Data Flow
//! ```text
//! reload request (caller event / channel)
//!     → SubscriptionSource (active subscription list)
//!     → CarrierConfigSource (raw bundle per subscription)
//!     → filter_bundle (projection to the MMS key set)
//!     → scratch table, built entirely off-cache
//!     → atomic swap of Arc<ConfigTable>
//!
//! get(sub_id) → load table pointer → clone record
//! ```
//!
//! # Design Decisions
//! - The live table is only reached through an `ArcSwap` pointer, so readers
//!   never wait on provider latency and never observe a half-built table
//! - A reload that finds no active subscriptions leaves the previous table in
//!   place; stale config is usable, an empty cache is not
//! - Records handed out are copies; callers may mutate them freely

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::bundle::CarrierBundle;
use crate::config::schema::{filter_bundle, MmsConfig};
use crate::telephony::{CarrierConfigSource, SubscriptionId, SubscriptionSource};

/// The live mapping from subscription to its filtered config record.
pub type ConfigTable = HashMap<SubscriptionId, MmsConfig>;

/// Errors that can occur while rebuilding the config table.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The subscription list was empty or unavailable; the previous table
    /// was kept. Transient — the caller should retry the reload later.
    #[error("no active subscriptions, keeping previous config table")]
    NoActiveSubscriptions,
}

/// Cached MMS configuration for every active subscription.
///
/// Owned by whatever composes the system and shared via `Arc`; all
/// collaborators are injected at construction time.
pub struct ConfigCache {
    /// Live table pointer. Swapped wholesale on a successful reload.
    table: ArcSwap<ConfigTable>,
    subscriptions: Arc<dyn SubscriptionSource>,
    carrier_configs: Arc<dyn CarrierConfigSource>,
}

impl ConfigCache {
    /// Create a cache with an empty table. `get` returns `None` for every
    /// subscription until the first successful [`reload`](Self::reload).
    pub fn new(
        subscriptions: Arc<dyn SubscriptionSource>,
        carrier_configs: Arc<dyn CarrierConfigSource>,
    ) -> Self {
        Self {
            table: ArcSwap::from_pointee(ConfigTable::new()),
            subscriptions,
            carrier_configs,
        }
    }

    /// The MMS config for a subscription, if the cache has one.
    ///
    /// Returns a copy, so mutating the result never affects the cache.
    /// `None` means "not loaded yet" — the id may appear after the next
    /// reload — and is not a permanent condition.
    pub fn get(&self, sub_id: SubscriptionId) -> Option<MmsConfig> {
        let record = self.table.load().get(&sub_id).cloned();
        if record.is_none() {
            tracing::debug!(sub_id = %sub_id, "no mms config for subscription");
        }
        record
    }

    /// Project a raw provider bundle down to an MMS config record.
    ///
    /// Independent of cache state; exposed so provider responses can be
    /// normalized uniformly wherever they are obtained.
    pub fn filter_bundle(bundle: &CarrierBundle) -> MmsConfig {
        filter_bundle(bundle)
    }

    /// Rebuild the whole table from the current provider state.
    ///
    /// The new table is assembled in a scratch map and swapped in only once
    /// every subscription has been fetched, so concurrent readers see either
    /// the fully-previous or fully-new table. Safe to call concurrently with
    /// itself: each invocation rebuilds from scratch and the last swap wins.
    pub async fn reload(&self) -> Result<(), ConfigError> {
        let subs = self.subscriptions.active_subscription_ids();
        if subs.is_empty() {
            tracing::error!("failed to load mms config: empty active subscription list");
            return Err(ConfigError::NoActiveSubscriptions);
        }

        let mut scratch = ConfigTable::with_capacity(subs.len());
        for sub_id in subs {
            let record = match self.carrier_configs.config_for_sub(sub_id).await {
                Some(bundle) => filter_bundle(&bundle),
                None => {
                    tracing::warn!(sub_id = %sub_id, "carrier returned no bundle, using defaults");
                    MmsConfig::default()
                }
            };
            scratch.insert(sub_id, record);
        }

        tracing::info!(subscriptions = scratch.len(), "mms config table reloaded");
        self.table.store(Arc::new(scratch));
        Ok(())
    }

    /// Run [`reload`](Self::reload) on a background task.
    ///
    /// The trigger itself never blocks; the returned handle resolves with
    /// the reload outcome for callers that want completion visibility.
    pub fn spawn_reload(self: Arc<Self>) -> JoinHandle<Result<(), ConfigError>> {
        tokio::spawn(async move { self.reload().await })
    }

    /// Drive reloads from an explicit "reload requested" channel.
    ///
    /// The external layer decides when config may have changed (SIM swap,
    /// carrier config update) and sends a unit event; this task owns running
    /// the reloads. A failed reload is logged and absorbed — the previous
    /// table stays usable until the next event. The task ends when every
    /// sender is dropped.
    pub fn spawn_reload_listener(self: Arc<Self>, mut reload_rx: mpsc::UnboundedReceiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move {
            while reload_rx.recv().await.is_some() {
                if let Err(e) = self.reload().await {
                    tracing::error!(error = %e, "mms config reload failed");
                }
            }
            tracing::debug!("reload channel closed, stopping config reload listener");
        })
    }
}

impl std::fmt::Debug for ConfigCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigCache")
            .field("subscriptions", &self.table.load().len())
            .finish()
    }
}
