//! In-memory session registry with per-session mutual exclusion.
//!
//! Mutating actions take a session with [`SessionRegistry::acquire`], which never
//! waits: a session that already has a call in flight is reported busy.
//! Sessions untouched for longer than the configured idle window are evicted by
//! a background sweep; a session with a call in flight is never evicted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::chat::session::ConversationSession;
use crate::errors::AppError;

pub type SessionHandle = Arc<Mutex<ConversationSession>>;

/// Sweeps never run more often than this.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(30);

struct Entry {
    handle: SessionHandle,
    last_used: Instant,
}

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Entry>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self) -> ConversationSession {
        let session = ConversationSession::new();
        self.sessions.write().insert(
            session.id(),
            Entry {
                handle: Arc::new(Mutex::new(session.clone())),
                last_used: Instant::now(),
            },
        );
        session
    }

    /// Looks a session up and marks it as used.
    pub fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        let mut sessions = self.sessions.write();
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        entry.last_used = Instant::now();
        Ok(entry.handle.clone())
    }

    /// Exclusive access for one chat/generate/upload action, or `Busy` if another
    /// action on the same session has not finished.
    pub fn acquire(&self, id: Uuid) -> Result<OwnedMutexGuard<ConversationSession>, AppError> {
        self.get(id)?.try_lock_owned().map_err(|_| AppError::Busy)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// Drops sessions idle for at least `max_idle`. Returns how many were removed.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.duration_since(entry.last_used) < max_idle || entry.handle.try_lock().is_err()
        });
        before - sessions.len()
    }

    /// Runs [`Self::evict_idle`] periodically for the life of the process.
    pub fn spawn_eviction(&self, max_idle: Duration) -> JoinHandle<()> {
        let registry = self.clone();
        let period = (max_idle / 4).max(MIN_SWEEP_INTERVAL);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                let evicted = registry.evict_idle(max_idle);
                if evicted > 0 {
                    info!("Evicted {evicted} idle sessions, {} remain", registry.len());
                }
            }
        })
    }
}
