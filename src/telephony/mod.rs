//! Telephony collaborator seams.
//!
//! # Responsibilities
//! - Identify SIMs/subscriptions with a strongly typed handle
//! - Define the injected accessors for device and carrier state
//!
//! # Design Decisions
//! - Everything here is a trait: the crate never talks to a platform
//!   telephony stack directly, so hosts and tests inject their own impls
//! - The split mirrors the platform services the data comes from: device
//!   line state, the subscription registry, and the carrier config provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::bundle::CarrierBundle;

/// Subscription ID type for strong typing.
///
/// A subscription loosely corresponds to one SIM; the value is stable for
/// the lifetime of the cache and supplied by the caller on every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub i32);

impl From<i32> for SubscriptionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<SubscriptionId> for i32 {
    fn from(id: SubscriptionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Device-reported line state, scoped per subscription.
pub trait Telephony: Send + Sync {
    /// The device's own line number for the subscription, if the modem
    /// reports one. An empty string is treated the same as absent.
    fn line1_number(&self, sub_id: SubscriptionId) -> Option<String>;
}

/// The subscription registry: which subscriptions are active, and the
/// carrier-provisioned phone number for each.
pub trait SubscriptionSource: Send + Sync {
    /// IDs of all currently active subscriptions. Empty when the SIMs have
    /// not been set up yet.
    fn active_subscription_ids(&self) -> Vec<SubscriptionId>;

    /// Carrier-provisioned phone number for the subscription, if known.
    fn phone_number(&self, sub_id: SubscriptionId) -> Option<String>;
}

/// The carrier configuration provider.
///
/// Returns the raw per-subscription key/value bundle, which contains MMS
/// settings mixed with unrelated carrier settings. The cache filters it down
/// to the MMS key set.
#[async_trait]
pub trait CarrierConfigSource: Send + Sync {
    /// Fetch the raw config bundle for one subscription. `None` means the
    /// provider has nothing for this subscription (yet).
    async fn config_for_sub(&self, sub_id: SubscriptionId) -> Option<CarrierBundle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_id_conversion() {
        let sub_id = SubscriptionId::from(1);
        assert_eq!(sub_id.0, 1);
        assert_eq!(i32::from(sub_id), 1);
        assert_eq!(sub_id.to_string(), "sub-1");
    }
}
