//! Mapping context threaded through a mapping call tree
//!
//! A [`MappingContext`] is an opaque key/value bag the caller fills before a
//! mapping call. Every nested call made while resolving that call receives the
//! same context. When the caller supplies none, the process-wide frozen
//! instance returned by [`MappingContext::shared`] is used instead.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

static SHARED: MappingContext = MappingContext {
    entries: BTreeMap::new(),
    frozen: true,
};

/// Key/value data available to mapping functions
///
/// Values are stored as JSON values, so any `Serialize` type can be set and
/// any `DeserializeOwned` type can be requested back.
#[derive(Debug, Clone, Default)]
pub struct MappingContext {
    entries: BTreeMap<String, serde_json::Value>,
    frozen: bool,
}

impl MappingContext {
    /// Create an empty, writable context
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared frozen context used when a caller supplies none
    pub fn shared() -> &'static MappingContext {
        &SHARED
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Store a value under `key`, replacing any previous value
    pub fn set<V: Serialize>(&mut self, key: impl Into<String>, value: V) -> Result<()> {
        let key = key.into();
        if self.frozen {
            return Err(Error::ContextFrozen { key });
        }
        let value = serde_json::to_value(value)?;
        self.entries.insert(key, value);
        Ok(())
    }

    /// Builder-style [`set`](Self::set)
    pub fn with<V: Serialize>(mut self, key: impl Into<String>, value: V) -> Result<Self> {
        self.set(key, value)?;
        Ok(self)
    }

    /// Read the value under `key` as `V`
    ///
    /// Returns `None` if the key is absent or the stored value does not have
    /// the requested shape.
    pub fn try_get<V: DeserializeOwned>(&self, key: &str) -> Option<V> {
        let value = self.entries.get(key)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Get the raw stored value
    pub fn get_raw(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// An independent copy of the current entries
    pub fn snapshot(&self) -> BTreeMap<String, serde_json::Value> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Window {
        days: u32,
        label: String,
    }

    #[test]
    fn test_set_and_try_get() {
        let mut context = MappingContext::new();
        context.set("DateFormat", "%d/%m/%Y").unwrap();
        context.set("Retries", 3u8).unwrap();

        assert_eq!(context.try_get::<String>("DateFormat").as_deref(), Some("%d/%m/%Y"));
        assert_eq!(context.try_get::<u8>("Retries"), Some(3));
        assert_eq!(context.try_get::<String>("missing"), None);
    }

    #[test]
    fn test_try_get_wrong_shape() {
        let context = MappingContext::new().with("Retries", 3).unwrap();
        assert_eq!(context.try_get::<String>("Retries"), None);
        assert_eq!(context.try_get::<Window>("Retries"), None);
    }

    #[test]
    fn test_structured_values() {
        let window = Window {
            days: 14,
            label: "two weeks".to_string(),
        };
        let context = MappingContext::new().with("Window", &window).unwrap();
        assert_eq!(context.try_get::<Window>("Window"), Some(window));
    }

    #[test]
    fn test_shared_context_is_frozen() {
        let shared = MappingContext::shared();
        assert!(shared.is_frozen());
        assert!(shared.is_empty());

        let mut copy = shared.clone();
        let err = copy.set("key", 1).unwrap_err();
        assert!(matches!(err, Error::ContextFrozen { ref key } if key == "key"));
        assert!(copy.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut context = MappingContext::new();
        context.set("Currency", "USD").unwrap();

        let snapshot = context.snapshot();
        context.set("Currency", "EUR").unwrap();
        context.set("Locale", "en-GB").unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["Currency"], serde_json::json!("USD"));
        assert_eq!(context.get_raw("Currency"), Some(&serde_json::json!("EUR")));
        assert!(context.contains_key("Locale"));
    }
}
