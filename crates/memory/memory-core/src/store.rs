//! Per-session conversation buffers.
//!
//! Each session id maps to its own [`ConversationBuffer`] behind an async mutex. Callers lock the
//! buffer for the whole read-history / call-model / record sequence so turns of one session never
//! interleave, while different sessions proceed independently.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::buffer::{ConversationBuffer, DEFAULT_WINDOW};

/// Session used when the caller does not name one; all such callers share it.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Shared handle to one session's buffer.
pub type SessionHandle = Arc<Mutex<ConversationBuffer>>;

struct SessionEntry {
    buffer: SessionHandle,
    last_used: DateTime<Utc>,
}

/// Map from session id to conversation buffer, created on first use and evicted when idle.
pub struct ConversationStore {
    sessions: Mutex<HashMap<String, SessionEntry>>,
    window: usize,
    idle_ttl: Duration,
}

impl ConversationStore {
    /// Creates a store whose buffers keep `window` turns and whose sessions expire after `idle_ttl`.
    pub fn new(window: usize, idle_ttl: std::time::Duration) -> Self {
        let idle_ttl = Duration::from_std(idle_ttl).unwrap_or_else(|_| Duration::days(36_500));
        Self {
            sessions: Mutex::new(HashMap::new()),
            window,
            idle_ttl,
        }
    }

    /// Window (K) applied to every buffer created by this store.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Returns the buffer for `session_id`, creating it if needed. Idle sessions are swept first.
    pub async fn session(&self, session_id: &str) -> SessionHandle {
        self.session_at(session_id, Utc::now()).await
    }

    async fn session_at(&self, session_id: &str, now: DateTime<Utc>) -> SessionHandle {
        let mut sessions = self.sessions.lock().await;
        Self::evict_idle(&mut sessions, self.idle_ttl, now);
        let window = self.window;
        let entry = sessions.entry(session_id.to_string()).or_insert_with(|| {
            info!(session_id = %session_id, window = window, "Creating conversation buffer");
            SessionEntry {
                buffer: Arc::new(Mutex::new(ConversationBuffer::new(window))),
                last_used: now,
            }
        });
        entry.last_used = now;
        Arc::clone(&entry.buffer)
    }

    /// Returns the buffer for `session_id` if it exists, without creating it or refreshing its
    /// idle timer.
    pub async fn peek(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions
            .lock()
            .await
            .get(session_id)
            .map(|entry| Arc::clone(&entry.buffer))
    }

    /// Drops sessions idle for longer than the TTL. Returns how many were removed.
    pub async fn sweep_idle(&self) -> usize {
        self.sweep_idle_at(Utc::now()).await
    }

    async fn sweep_idle_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        Self::evict_idle(&mut sessions, self.idle_ttl, now)
    }

    /// Buffers still referenced outside the map belong to an in-flight turn and are kept.
    fn evict_idle(
        sessions: &mut HashMap<String, SessionEntry>,
        idle_ttl: Duration,
        now: DateTime<Utc>,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let idle = now.signed_duration_since(entry.last_used);
            let keep = idle <= idle_ttl || Arc::strong_count(&entry.buffer) > 1;
            if !keep {
                debug!(session_id = %id, idle_secs = idle.num_seconds(), "Evicting idle session");
            }
            keep
        });
        before - sessions.len()
    }

    /// Removes a session explicitly. Returns true if it existed.
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.lock().await.remove(session_id).is_some()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, std::time::Duration::from_secs(3600))
    }
}
