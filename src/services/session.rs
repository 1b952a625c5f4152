use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Age after which an unanswered session is dropped
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// One open conversation: the user has started and not yet received a venue
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: i64,
    pub started_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.started_at)
            .to_std()
            .is_ok_and(|age| age >= ttl)
    }
}

/// Per-user sessions keyed by user id
///
/// A session is created on first contact and removed once a single
/// request/recommendation exchange has completed. Sessions older than the
/// TTL count as closed and are pruned whenever a new one starts.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Opens a session, replacing any existing one for the same user
    pub async fn start(&self, user_id: i64) -> Session {
        let now = Utc::now();
        let session = Session {
            user_id,
            started_at: now,
        };

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, open| !open.is_expired(now, self.ttl));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "Expired sessions dropped");
        }
        sessions.insert(user_id, session.clone());

        tracing::info!(user_id, "Session started");
        session
    }

    pub async fn is_active(&self, user_id: i64) -> bool {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .is_some_and(|session| !session.is_expired(Utc::now(), self.ttl))
    }

    /// Closes the session; returns whether one was open
    pub async fn finish(&self, user_id: i64) -> bool {
        let removed = self.sessions.write().await.remove(&user_id).is_some();
        if removed {
            tracing::debug!(user_id, "Session finished");
        }
        removed
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_finish() {
        let store = SessionStore::new();
        assert!(!store.is_active(1).await);

        let session = store.start(1).await;
        assert_eq!(session.user_id, 1);
        assert!(store.is_active(1).await);

        assert!(store.finish(1).await);
        assert!(!store.is_active(1).await);
        assert!(!store.finish(1).await);
    }

    #[tokio::test]
    async fn test_restart_replaces_session() {
        let store = SessionStore::new();
        store.start(7).await;
        store.start(7).await;
        assert_eq!(store.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_users_are_independent() {
        let store = SessionStore::new();
        store.start(1).await;
        store.start(2).await;

        store.finish(1).await;

        assert!(!store.is_active(1).await);
        assert!(store.is_active(2).await);
    }

    #[tokio::test]
    async fn test_expired_sessions_close_and_get_pruned() {
        let store = SessionStore::with_ttl(Duration::from_millis(30));
        store.start(1).await;
        assert!(store.is_active(1).await);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(!store.is_active(1).await);
        assert_eq!(store.active_count().await, 1);

        store.start(2).await;
        assert_eq!(store.active_count().await, 1);
        assert!(store.is_active(2).await);
        assert!(!store.finish(1).await);
    }
}
