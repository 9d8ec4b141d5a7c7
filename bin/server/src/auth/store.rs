//! In-memory session store.
//!
//! Sessions are ephemeral and process-local: one entry per browser, created
//! on the first login attempt and removed on logout, expiry, or process
//! restart. This map is the only shared mutable state in the server; all
//! request handling besides it is stateless.

use campus_hub_platform_access::{Session, SessionId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Store for active sessions, keyed by the cookie-delivered session ID.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl SessionStore {
    /// Creates an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces a session.
    pub async fn insert(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session);
    }

    /// Finds a session by ID.
    pub async fn find(&self, id: &SessionId) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(id).cloned()
    }

    /// Deletes a session by ID (logout). Returns true if one was removed.
    pub async fn delete(&self, id: &SessionId) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(id).is_some()
    }

    /// Deletes expired sessions, returning how many were removed.
    pub async fn delete_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.is_valid());
        before - sessions.len()
    }

    /// Returns the number of live entries (expired ones included until the
    /// next cleanup).
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Returns true if no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
