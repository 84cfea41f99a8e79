//! Persistence gateway: one named JSON record per key.
//!
//! `save` replaces whatever was stored under the key (last write wins).
//! `load` treats a failed read, or a value that no longer parses, as
//! "no data" so callers cold-start instead of failing.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::Database;
use crate::error::StorageError;

/// Storage key holding the shopping list.
pub const SHOPPING_LIST_KEY: &str = "shopping-list";

/// Storage key holding the countdown state.
pub const COUNTDOWN_KEY: &str = "taskly-countdown";

/// Durable key-value substrate for serialized records.
pub trait PersistenceGateway {
    /// Store the raw serialized value under `key`.
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Fetch the raw serialized value, `None` if never saved.
    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Serialize `value` as JSON and store it under `key`.
    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|e| StorageError::Malformed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save_raw(key, &json)
    }

    /// Load and deserialize the record under `key`.
    ///
    /// Read failures and malformed values are logged and reported as absent.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.load_raw(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "read failed, starting from empty state");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored value is malformed, ignoring it");
                None
            }
        }
    }
}

impl PersistenceGateway for Database {
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.kv_set(key, value)?)
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.kv_get(key)?)
    }
}

/// In-process gateway with no durability.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistenceGateway for MemoryGateway {
    fn save_raw(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StorageError::QueryFailed("memory gateway poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|_| StorageError::QueryFailed("memory gateway poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn load_missing_key_is_absent() {
        let gw = MemoryGateway::new();
        assert!(gw.load::<Sample>("missing").is_none());
    }

    #[test]
    fn save_then_load_restores_shape() {
        let gw = MemoryGateway::new();
        let value = Sample {
            name: "coffee".into(),
            count: 2,
        };
        gw.save("sample", &value).unwrap();
        assert_eq!(gw.load::<Sample>("sample"), Some(value));
    }

    #[test]
    fn malformed_value_reads_as_absent() {
        let gw = MemoryGateway::new();
        gw.save_raw("sample", "{not json").unwrap();
        assert!(gw.load::<Sample>("sample").is_none());
    }

    #[test]
    fn database_gateway_replaces_prior_value() {
        let db = Database::open_memory().unwrap();
        db.save("n", &1u32).unwrap();
        db.save("n", &2u32).unwrap();
        assert_eq!(db.load::<u32>("n"), Some(2));
    }
}
