//! Server-side session store
//!
//! Sessions live in memory, keyed by an opaque id carried in the session cookie.
//! Each one holds the CSRF token for the browser and, once logged in, the admin
//! identity.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use mbh_shared::constants::DEFAULT_SESSION_TTL_SECONDS;

use crate::csrf::generate_csrf_token;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found")]
    NotFound,
    #[error("Session expired")]
    Expired,
}

/// Admin identity stored in the session after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub csrf_token: String,
    pub user: Option<SessionUser>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn new(ttl: Duration) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            csrf_token: generate_csrf_token(),
            user: None,
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl: Duration::seconds(ttl_seconds.max(1)),
        }
    }

    /// Start an anonymous session.
    pub fn create(&self) -> Session {
        let session = Session::new(self.ttl);
        self.sessions.insert(session.id.clone(), session.clone());
        session
    }

    pub fn get(&self, id: &str) -> Result<Session, SessionError> {
        let session = self
            .sessions
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or(SessionError::NotFound)?;

        if session.is_expired() {
            self.sessions.remove(id);
            return Err(SessionError::Expired);
        }
        Ok(session)
    }

    /// Slide the expiry forward and return the refreshed session.
    pub fn touch(&self, id: &str) -> Result<Session, SessionError> {
        let mut entry = self.sessions.get_mut(id).ok_or(SessionError::NotFound)?;
        if entry.is_expired() {
            drop(entry);
            self.sessions.remove(id);
            return Err(SessionError::Expired);
        }
        entry.expires_at = Utc::now() + self.ttl;
        Ok(entry.value().clone())
    }

    /// Attach an admin to the session under a fresh id. The old id stops working.
    pub fn login(&self, id: &str, user: SessionUser) -> Result<Session, SessionError> {
        let (_, previous) = self.sessions.remove(id).ok_or(SessionError::NotFound)?;
        if previous.is_expired() {
            return Err(SessionError::Expired);
        }

        let mut session = Session::new(self.ttl);
        session.user = Some(user);
        self.sessions.insert(session.id.clone(), session.clone());
        debug!(old = %previous.id, new = %session.id, "Session rotated on login");
        Ok(session)
    }

    pub fn destroy(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drop every expired session, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        let now = Utc::now();
        self.sessions.retain(|_, session| session.expires_at > now);
        before.saturating_sub(self.sessions.len())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL_SECONDS)
    }
}
