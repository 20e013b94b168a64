//! crates/cocktail_core/src/session.rs
//!
//! Client-side session state: the logged-in user's id and access token.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<String>,
    pub user_token: Option<String>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some() && self.user_token.is_some()
    }
}

/// A shared handle to one client's session.
///
/// Clones share the same state. Each client instance creates its own store,
/// so separate instances never see each other's credentials. There is no
/// expiry: a token is considered valid until the remote rejects it.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_user_id(&self, id: impl Into<String>) {
        self.write().user_id = Some(id.into());
    }

    pub fn user_id(&self) -> Option<String> {
        self.read().user_id.clone()
    }

    pub fn set_user_token(&self, token: impl Into<String>) {
        self.write().user_token = Some(token.into());
    }

    pub fn user_token(&self) -> Option<String> {
        self.read().user_token.clone()
    }

    /// Stores both halves of a login under a single lock.
    pub fn set_credentials(&self, id: impl Into<String>, token: impl Into<String>) {
        let mut session = self.write();
        session.user_id = Some(id.into());
        session.user_token = Some(token.into());
    }

    /// The `(user_id, token)` pair, if logged in.
    pub fn credentials(&self) -> Option<(String, String)> {
        let session = self.read();
        match (&session.user_id, &session.user_token) {
            (Some(id), Some(token)) => Some((id.clone(), token.clone())),
            _ => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_logged_in()
    }

    pub fn clear(&self) {
        *self.write() = Session::default();
    }

    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }
}
