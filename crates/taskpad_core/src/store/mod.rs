//! Durable key/value persistence facade.
//!
//! # Responsibility
//! - Define the byte-oriented store contract the repository writes through.
//! - Provide the crate's reference backends (in-memory map, one file per
//!   key on disk).
//!
//! # Invariants
//! - The store deals in opaque blobs; record encoding stays in the
//!   repository layer.
//! - A write either replaces the whole value under a key or fails; partial
//!   values are never observable.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable record key for the task collection.
pub const KEY_TASKS: &str = "tasks";
/// Durable record key for the category collection.
pub const KEY_CATEGORIES: &str = "categories";
/// Durable record key for the session collaborator's user profile.
pub const KEY_USER: &str = "user";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure surfaced by a store backend.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    /// Key contains characters the backend cannot represent.
    InvalidKey(String),
    /// Backend-specific failure that is not an I/O error.
    Backend(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid store key `{key}`"),
            Self::Backend(message) => write!(f, "store backend failure: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InvalidKey(_) => None,
            Self::Backend(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Durable key/value byte store consumed by the repository and session
/// collaborator.
///
/// Methods take `&self` so the composition root can keep its own handle
/// alongside the repository's borrow; implementations use interior
/// mutability or the filesystem. Last-writer-wins semantics are assumed.
pub trait PersistentStore {
    /// Returns the blob stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    /// Replaces the blob stored under `key`.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}
