//! Session collaborator: opaque user identity plus the sign-out teardown.
//!
//! # Responsibility
//! - Own the `user` record in the shared durable store.
//! - Clear all durable records on sign-out, the only path that tears down
//!   the repository's persisted state.
//!
//! # Invariants
//! - Holds no credentials; the profile is opaque identity data.
//! - Sign-out removes `user`, `tasks`, and `categories` together, so the
//!   next hydration starts from first-run defaults.

use std::error::Error;
use std::fmt::{Display, Formatter};

use log::info;
use serde::{Deserialize, Serialize};

use crate::store::{PersistentStore, StoreError, KEY_CATEGORIES, KEY_TASKS, KEY_USER};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    Store(StoreError),
    Codec(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "user record encoding failed: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Opaque user identity as persisted under the `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Thin accessor over the shared store for the session records.
pub struct SessionStore<'s, S: PersistentStore> {
    store: &'s S,
}

impl<'s, S: PersistentStore> SessionStore<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    /// Returns the persisted user profile, or `None` when signed out.
    pub fn load_user(&self) -> SessionResult<Option<UserProfile>> {
        match self.store.get(KEY_USER)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    pub fn save_user(&self, profile: &UserProfile) -> SessionResult<()> {
        let bytes = serde_json::to_vec(profile)?;
        self.store.set(KEY_USER, &bytes)?;
        Ok(())
    }

    /// Session reset: removes the user record and both entity collections
    /// from durable storage.
    pub fn sign_out(&self) -> SessionResult<()> {
        self.store.remove(KEY_USER)?;
        self.store.remove(KEY_TASKS)?;
        self.store.remove(KEY_CATEGORIES)?;
        info!("event=sign_out module=session status=ok");
        Ok(())
    }
}
