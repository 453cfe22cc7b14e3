//! Asynchronous key-value storage port used by the workspace and widget
//! persistence layers.
//!
//! The backing store is an external collaborator (browser extension storage,
//! a settings daemon, ...). The domain only requires string-keyed whole-value
//! reads and writes of JSON-serializable records. A missing key is `Ok(None)`,
//! never an error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage backend rejected access to key '{key}': {message}")]
    Backend { key: String, message: String },

    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to deserialize value for key '{key}': {source}")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw storage backend. Implementations must write each record as a whole
/// value; the domain never issues partial updates.
#[async_trait]
pub trait StorageService: Send + Sync {
    async fn get_raw(&self, key: &str) -> Result<Option<Value>, StorageError>;
    async fn set_raw(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Typed facade over a [`StorageService`] backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn StorageService>,
}

impl Storage {
    pub fn new(backend: Arc<dyn StorageService>) -> Self {
        Self { backend }
    }

    /// Reads and deserializes the value stored under `key`, or `None` when
    /// the key is absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get_raw(key).await? {
            Some(value) => serde_json::from_value(value).map(Some).map_err(|source| {
                StorageError::Deserialization {
                    key: key.to_string(),
                    source,
                }
            }),
            None => Ok(None),
        }
    }

    /// Serializes `value` and writes it under `key`, replacing any previous
    /// value as a whole.
    pub async fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let value = serde_json::to_value(value).map_err(|source| StorageError::Serialization {
            key: key.to_string(),
            source,
        })?;
        debug!("Writing storage key '{}'", key);
        self.backend.set_raw(key, value).await
    }
}

/// In-memory storage backend.
///
/// Serves as the reference implementation of [`StorageService`] and as the
/// test double throughout the crate. Read and write failures can be injected
/// to exercise error paths.
#[derive(Default)]
pub struct InMemoryStorageService {
    entries: RwLock<HashMap<String, Value>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seeds a raw value, bypassing failure injection. Intended for tests
    /// that prepare pre-existing storage contents.
    pub async fn seed(&self, key: &str, value: Value) {
        self.entries.write().await.insert(key.to_string(), value);
    }
}

#[async_trait]
impl StorageService for InMemoryStorageService {
    async fn get_raw(&self, key: &str) -> Result<Option<Value>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend {
                key: key.to_string(),
                message: "injected read failure".to_string(),
            });
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: Value) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend {
                key: key.to_string(),
                message: "injected write failure".to_string(),
            });
        }
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}
