//! Session Manager
//!
//! Registry of live sessions keyed by session id. Nothing is persisted:
//! a session ends when it is explicitly ended or reaped after idling.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use phoneframe_navigation::Location;

use crate::error::SessionError;
use crate::session::Session;
use crate::Result;

/// Values every new session is seeded with
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Default start location
    pub start: Location,
    /// Device preset selected for new sessions
    pub default_device: String,
    /// Frame monitor retry budget
    pub retry_budget: u32,
    /// Sessions idle this long are reaped
    pub idle_timeout: Duration,
}

pub struct SessionManager {
    /// Live sessions
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    settings: SessionSettings,
}

impl SessionManager {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            settings,
        }
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Create a new session seeded with the start location
    pub fn create_session(&self) -> Session {
        let session = Session::new(
            self.settings.start.clone(),
            self.settings.default_device.clone(),
            self.settings.retry_budget,
        );

        self.sessions
            .write()
            .insert(session.id.clone(), session.clone());

        tracing::info!(
            session_id = %session.id,
            start = %session.current().url,
            "Created new session"
        );

        session
    }

    /// Return the session for `session_id`, or a fresh one if it is
    /// missing or unknown. The flag is true when a session was created.
    pub fn resume_or_create(&self, session_id: Option<&str>) -> (Session, bool) {
        if let Some(id) = session_id {
            if let Ok(session) = self.get_session(id) {
                return (session, false);
            }
            tracing::debug!(session_id = %id, "Unknown session, starting a new one");
        }

        (self.create_session(), true)
    }

    pub fn get_session(&self, session_id: &str) -> Result<Session> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Apply one transition to a session under the registry lock
    pub fn with_session<F, T>(&self, session_id: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> Result<T>,
    {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        f(session)
    }

    /// End a session and drop its state
    pub fn end_session(&self, session_id: &str) -> Result<()> {
        self.sessions
            .write()
            .remove(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        tracing::info!(session_id = %session_id, "Ended session");

        Ok(())
    }

    /// Drop every session idle at `now`. Returns how many were dropped.
    pub fn reap_idle(&self, now: DateTime<Utc>) -> usize {
        let timeout = self.settings.idle_timeout;
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now, timeout));
        let reaped = before - sessions.len();

        if reaped > 0 {
            tracing::info!(reaped, remaining = sessions.len(), "Reaped idle sessions");
        }

        reaped
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            settings: self.settings.clone(),
        }
    }
}
