use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use tokio::sync::Mutex as AsyncMutex;

use super::ConversationSession;

/// Session used by callers that do not identify themselves.
pub(crate) const DEFAULT_SESSION_ID: &str = "default";

#[derive(Debug, Clone)]
pub(crate) struct SessionSettings {
    pub(crate) persona: String,
    pub(crate) default_model: String,
    pub(crate) max_turns: Option<usize>,
    pub(crate) max_sessions: usize,
    pub(crate) idle_timeout: Duration,
}

struct SessionEntry {
    session: Arc<AsyncMutex<ConversationSession>>,
    last_access: Instant,
}

impl SessionEntry {
    /// A caller still holds the session or is running a turn on it.
    fn is_busy(&self) -> bool {
        Arc::strong_count(&self.session) > 1 || self.session.try_lock().is_err()
    }
}

/// Conversation sessions keyed by client supplied id.
///
/// Sessions are created on first use. Sessions idle for longer than the configured timeout are
/// dropped on the next lookup, and the least recently used one makes room when the store is full.
/// Sessions still in use are never dropped, so the store may briefly exceed its limit.
/// The map lock is only held for bookkeeping; a turn locks just its own session.
pub(crate) struct SessionStore {
    settings: SessionSettings,
    sessions: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionStore {
    pub(crate) fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn session(&self, id: &str) -> Arc<AsyncMutex<ConversationSession>> {
        self.session_at(id, Instant::now())
    }

    pub(crate) fn remove(&self, id: &str) -> bool {
        self.lock().remove(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    fn session_at(&self, id: &str, now: Instant) -> Arc<AsyncMutex<ConversationSession>> {
        let mut sessions = self.lock();

        let idle_timeout = self.settings.idle_timeout;
        sessions.retain(|key, entry| {
            let keep = entry.is_busy()
                || now.saturating_duration_since(entry.last_access) <= idle_timeout;
            if !keep {
                log::debug!("Dropping idle session {key}");
            }
            keep
        });

        if let Some(entry) = sessions.get_mut(id) {
            entry.last_access = now;
            return entry.session.clone();
        }

        while sessions.len() >= self.settings.max_sessions.max(1) {
            let Some(oldest) = sessions
                .iter()
                .filter(|(_, entry)| !entry.is_busy())
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone())
            else {
                log::debug!("Session limit reached but every session is in use");
                break;
            };
            log::debug!("Session limit reached, dropping {oldest}");
            sessions.remove(&oldest);
        }

        let SessionSettings {
            persona,
            default_model,
            max_turns,
            ..
        } = &self.settings;
        let session = Arc::new(AsyncMutex::new(ConversationSession::new(
            persona,
            default_model,
            *max_turns,
        )));
        sessions.insert(
            id.to_string(),
            SessionEntry {
                session: session.clone(),
                last_access: now,
            },
        );
        log::debug!("Created session {id}");
        session
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
