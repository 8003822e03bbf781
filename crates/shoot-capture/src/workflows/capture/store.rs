use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use super::domain::SessionId;

/// Durable storage for encoded sessions. Implementations store payloads
/// verbatim; decoding is the service's concern.
pub trait SessionStore: Send + Sync {
    fn load(&self, id: &SessionId) -> Result<Option<String>, StoreError>;
    fn save(&self, id: &SessionId, encoded: String) -> Result<(), StoreError>;
    fn list_ids(&self) -> Result<Vec<SessionId>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by the API service and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemorySessionStore {
    records: Arc<Mutex<BTreeMap<SessionId, String>>>,
}

impl InMemorySessionStore {
    fn records(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<SessionId, String>>, StoreError> {
        self.records
            .lock()
            .map_err(|_| StoreError::Unavailable("session store mutex poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<String>, StoreError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn save(&self, id: &SessionId, encoded: String) -> Result<(), StoreError> {
        self.records()?.insert(id.clone(), encoded);
        Ok(())
    }

    fn list_ids(&self) -> Result<Vec<SessionId>, StoreError> {
        Ok(self.records()?.keys().cloned().collect())
    }
}
