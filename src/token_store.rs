//! Read-only access to the ambient credential store.
//!
//! The bearer token lives in a key-value store owned by someone else: a
//! persistent file written by the login flow, a flag on the command line, or
//! nothing at all. The fetcher only ever asks for one key and treats every
//! failure to read it as "no token".

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// A key-value store that may or may not hold a credential.
pub trait TokenStore: Send + Sync {
    /// Look up `key`, returning `None` when it is missing or unreadable.
    fn get_item(&self, key: &str) -> Option<String>;
}

/// A store for environments with no storage facility at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl TokenStore for UnavailableStore {
    fn get_item(&self, _key: &str) -> Option<String> {
        None
    }
}

/// An in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a store holding a single entry.
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.items.insert(key.into(), value.into());
        store
    }
}

impl TokenStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }
}

/// A store backed by a JSON object on disk, e.g. `{"token": "..."}`.
///
/// The file is read on every lookup so a token refreshed by another process
/// is picked up. Non-string values are ignored.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileStore {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn get_item(&self, key: &str) -> Option<String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "Token store unavailable; continuing without token");
                return None;
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map.get(key).and_then(Value::as_str).map(str::to_owned),
            Ok(_) => {
                debug!("Token store is not a JSON object; continuing without token");
                None
            }
            Err(e) => {
                debug!(error = %e, "Token store is not valid JSON; continuing without token");
                None
            }
        }
    }
}

/// Read `key` from `store`, treating an empty value as absent.
pub fn read_token(store: &dyn TokenStore, key: &str) -> Option<String> {
    store.get_item(key).filter(|token| !token.is_empty())
}
