//! Persistent key-value storage for session data
//!
//! The session layer keeps exactly two entries: the raw bearer token and the
//! JSON-serialized summary of the logged-in user. Stores are synchronous and
//! shared between the API client and the session manager.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::ClientResult;

/// Key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// Key holding the serialized `UserSummary`
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Synchronous string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&self, key: &str) -> ClientResult<()>;
}
