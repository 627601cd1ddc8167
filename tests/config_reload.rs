//! Reload scenarios for the config cache.
//!
//! Readers keep running while the table is rebuilt; they must only ever see
//! records from a single reload pass, and a reload that cannot run must not
//! cost them the table they already have.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use mms_transport::config::bundle::{keys, CarrierBundle};
use mms_transport::telephony::{CarrierConfigSource, SubscriptionId, SubscriptionSource};
use mms_transport::{ConfigCache, ConfigError};

struct TwoSims {
    empty: AtomicBool,
}

impl TwoSims {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            empty: AtomicBool::new(false),
        })
    }
}

impl SubscriptionSource for TwoSims {
    fn active_subscription_ids(&self) -> Vec<SubscriptionId> {
        if self.empty.load(Ordering::SeqCst) {
            Vec::new()
        } else {
            vec![SubscriptionId(1), SubscriptionId(2)]
        }
    }

    fn phone_number(&self, _sub_id: SubscriptionId) -> Option<String> {
        None
    }
}

/// Provider whose bundles stamp the current version into two string fields
/// of every record, so a mixed-pass record would be detectable.
struct VersionedProvider {
    version: AtomicU32,
}

impl VersionedProvider {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            version: AtomicU32::new(1),
        })
    }

    fn bump(&self) -> u32 {
        self.version.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl CarrierConfigSource for VersionedProvider {
    async fn config_for_sub(&self, _sub_id: SubscriptionId) -> Option<CarrierBundle> {
        let version = self.version.load(Ordering::SeqCst);
        let stamp = format!("v{version}");
        let mut bundle = CarrierBundle::new();
        bundle.put_str(keys::USER_AGENT, &stamp);
        bundle.put_str(keys::UA_PROF_URL, &stamp);
        Some(bundle)
    }
}

fn cache(sims: &Arc<TwoSims>, provider: &Arc<VersionedProvider>) -> Arc<ConfigCache> {
    Arc::new(ConfigCache::new(
        Arc::clone(sims) as Arc<dyn SubscriptionSource>,
        Arc::clone(provider) as Arc<dyn CarrierConfigSource>,
    ))
}

#[tokio::test]
async fn reload_replaces_the_whole_table() {
    let sims = TwoSims::new();
    let provider = VersionedProvider::new();
    let cache = cache(&sims, &provider);

    cache.reload().await.unwrap();
    assert_eq!(cache.get(SubscriptionId(1)).unwrap().user_agent, "v1");
    assert_eq!(cache.get(SubscriptionId(2)).unwrap().user_agent, "v1");

    provider.bump();
    cache.reload().await.unwrap();
    // Both entries move together; no record of the old pass survives.
    assert_eq!(cache.get(SubscriptionId(1)).unwrap().user_agent, "v2");
    assert_eq!(cache.get(SubscriptionId(2)).unwrap().user_agent, "v2");
}

#[tokio::test]
async fn readers_see_single_pass_records_during_reload_storm() {
    let sims = TwoSims::new();
    let provider = VersionedProvider::new();
    let cache = cache(&sims, &provider);
    cache.reload().await.unwrap();

    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let cache = Arc::clone(&cache);
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            while !stop.load(Ordering::SeqCst) {
                for sub in [SubscriptionId(1), SubscriptionId(2)] {
                    let record = cache.get(sub).expect("record present after first reload");
                    // Both stamped fields were written by the same pass.
                    assert_eq!(record.user_agent, record.ua_prof_url);
                }
                tokio::task::yield_now().await;
            }
        })
    };

    for _ in 0..20 {
        provider.bump();
        let mut reloads = Vec::new();
        for _ in 0..4 {
            reloads.push(Arc::clone(&cache).spawn_reload());
        }
        for reload in reloads {
            reload.await.unwrap().unwrap();
        }
    }

    stop.store(true, Ordering::SeqCst);
    reader.await.unwrap();

    let final_record = cache.get(SubscriptionId(1)).unwrap();
    assert_eq!(final_record.user_agent, "v21");
}

#[tokio::test]
async fn aborted_reload_keeps_previous_table_intact() {
    let sims = TwoSims::new();
    let provider = VersionedProvider::new();
    let cache = cache(&sims, &provider);

    cache.reload().await.unwrap();

    sims.empty.store(true, Ordering::SeqCst);
    let err = cache.reload().await.unwrap_err();
    assert!(matches!(err, ConfigError::NoActiveSubscriptions));

    assert_eq!(cache.get(SubscriptionId(1)).unwrap().user_agent, "v1");
    assert_eq!(cache.get(SubscriptionId(2)).unwrap().user_agent, "v1");
}

#[tokio::test]
async fn reload_before_first_success_leaves_cache_empty() {
    let sims = TwoSims::new();
    sims.empty.store(true, Ordering::SeqCst);
    let provider = VersionedProvider::new();
    let cache = cache(&sims, &provider);

    assert!(cache.reload().await.is_err());
    assert!(cache.get(SubscriptionId(1)).is_none());
}
