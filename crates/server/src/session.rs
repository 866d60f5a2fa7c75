// SSE sessions keyed by id

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use t212_mcp::protocol::JsonRpcResponse;
use tokio::sync::mpsc;

type Sessions = HashMap<String, mpsc::UnboundedSender<JsonRpcResponse>>;

/// Open SSE sessions. Responses for a session are pushed to its event stream.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Sessions>>,
}

impl SessionStore {
    /// Register a new session. The session lives until the guard is dropped.
    pub fn open(&self) -> (SessionGuard, mpsc::UnboundedReceiver<JsonRpcResponse>) {
        let id = uuid::Uuid::new_v4().to_string();
        let (tx, rx) = mpsc::unbounded_channel();
        self.write().insert(id.clone(), tx);
        tracing::info!(session_id = %id, "SSE session opened");

        let guard = SessionGuard {
            id,
            store: self.clone(),
        };
        (guard, rx)
    }

    /// Sender for an open session
    pub fn sender(&self, id: &str) -> Option<mpsc::UnboundedSender<JsonRpcResponse>> {
        self.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn remove(&self, id: &str) {
        if self.write().remove(id).is_some() {
            tracing::info!(session_id = %id, "SSE session closed");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Sessions> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Sessions> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

/// Removes its session from the store when dropped.
pub struct SessionGuard {
    id: String,
    store: SessionStore,
}

impl SessionGuard {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.store.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let store = SessionStore::default();
        let (guard, _rx) = store.open();
        let id = guard.id().to_string();

        assert_eq!(store.len(), 1);
        assert!(store.sender(&id).is_some());
        assert!(store.sender("missing").is_none());

        drop(guard);
        assert!(store.is_empty());
        assert!(store.sender(&id).is_none());
    }

    #[test]
    fn test_sessions_are_distinct() {
        let store = SessionStore::default();
        let (a, _rx_a) = store.open();
        let (b, _rx_b) = store.open();

        assert_ne!(a.id(), b.id());
        assert_eq!(store.len(), 2);
    }
}
