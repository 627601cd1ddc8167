//! Live-connection tracking and forced disconnect.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Register every in-flight MMS connection so an external caller can
//!   tear all of them down at once
//! - Tag each handle with a cancellation flag so a subsequent socket error
//!   can be attributed to the disconnect rather than to the network

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Notify;

/// Global atomic counter for connection IDs.
/// Relaxed ordering is sufficient since we only need uniqueness.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for one connection opened by a single `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mms-conn-{}", self.0)
    }
}

/// One tracked in-flight connection.
///
/// Created when `execute` opens a connection, removed from the registry on
/// every exit path, never reused. The cancellation flag is set before the
/// wakeup so the owning `execute` call can attribute a socket error to the
/// disconnect explicitly instead of sniffing error messages.
#[derive(Debug)]
pub struct ConnectionHandle {
    id: ConnectionId,
    request_id: String,
    cancelled: AtomicBool,
    notify: Notify,
}

impl ConnectionHandle {
    fn new(request_id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
            request_id: request_id.to_string(),
            cancelled: AtomicBool::new(false),
            notify: Notify::new(),
        })
    }

    /// This connection's ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// The transaction request ID this connection belongs to.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Request this connection's close. Sets the flag first so the owner
    /// observes it no matter which way its exchange resolves.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Whether a disconnect has been requested for this connection.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once a disconnect has been requested. A single `execute`
    /// call awaits this; `notify_one` stores a permit, so a cancel that
    /// lands before the await still wakes it.
    pub async fn cancelled(&self) {
        if self.is_cancelled() {
            return;
        }
        self.notify.notified().await;
    }
}

/// Registry of every connection currently opened by the transport.
///
/// Its lock is independent of the config cache; no lock spans both.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<DashMap<ConnectionId, Arc<ConnectionHandle>>>,
}

impl ConnectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new connection for the given transaction.
    pub fn register(&self, request_id: &str) -> Arc<ConnectionHandle> {
        let handle = ConnectionHandle::new(request_id);
        self.inner.insert(handle.id(), Arc::clone(&handle));
        tracing::trace!(connection = %handle.id(), request_id = %request_id, "connection registered");
        handle
    }

    /// Stop tracking a connection. No-op if a disconnect already drained it.
    pub fn deregister(&self, id: ConnectionId) {
        self.inner.remove(&id);
        tracing::trace!(connection = %id, "connection deregistered");
    }

    /// Request the close of every connection registered right now and drop
    /// them from the registry. Connections registered while this runs are
    /// left for the next call.
    pub fn disconnect_all(&self) {
        let handles: Vec<Arc<ConnectionHandle>> =
            self.inner.iter().map(|entry| Arc::clone(entry.value())).collect();
        if handles.is_empty() {
            tracing::debug!("disconnect requested with no connections in flight");
            return;
        }
        tracing::info!(connections = handles.len(), "disconnecting all url connections");
        for handle in handles {
            handle.cancel();
            self.inner.remove(&handle.id());
        }
    }

    /// Number of connections currently tracked.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no connections are tracked.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_id_unique() {
        let id1 = ConnectionId::new();
        let id2 = ConnectionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn registry_tracks_and_drops() {
        let registry = ConnectionRegistry::new();
        assert!(registry.is_empty());

        let h1 = registry.register("req-1");
        let h2 = registry.register("req-2");
        assert_eq!(registry.len(), 2);
        assert_eq!(h1.request_id(), "req-1");

        registry.deregister(h1.id());
        assert_eq!(registry.len(), 1);

        registry.deregister(h2.id());
        assert!(registry.is_empty());
    }

    #[test]
    fn disconnect_all_cancels_and_drains() {
        let registry = ConnectionRegistry::new();
        let h1 = registry.register("req-1");
        let h2 = registry.register("req-2");

        registry.disconnect_all();

        assert!(h1.is_cancelled());
        assert!(h2.is_cancelled());
        assert!(registry.is_empty());
    }

    #[test]
    fn disconnect_all_on_empty_registry_is_noop() {
        let registry = ConnectionRegistry::new();
        registry.disconnect_all();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn cancel_before_wait_still_wakes() {
        let registry = ConnectionRegistry::new();
        let handle = registry.register("req-1");

        handle.cancel();
        // Must resolve immediately; the permit was stored by notify_one.
        handle.cancelled().await;
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn cancel_wakes_a_waiting_owner() {
        let registry = ConnectionRegistry::new();
        let handle = registry.register("req-1");
        let waiter = Arc::clone(&handle);

        let task = tokio::spawn(async move {
            waiter.cancelled().await;
            waiter.is_cancelled()
        });

        // Give the task a chance to start waiting.
        tokio::task::yield_now().await;
        registry.disconnect_all();

        assert!(task.await.unwrap());
    }
}
