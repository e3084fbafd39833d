//! Dynamically typed argument carrier
//!
//! A [`Bundle`] is a string-keyed map of arbitrary values, used to pass
//! navigation arguments and event context payloads across the backend
//! boundary. Retrieval is typed: asking for the wrong type is reported as an
//! error rather than a panic.

use std::any::{type_name, Any};

use rustc_hash::FxHashMap;

use crate::error::BundleError;

/// String-keyed map of dynamically typed values
#[derive(Default)]
pub struct Bundle {
    data: FxHashMap<String, Box<dyn Any + Send>>,
}

impl Bundle {
    pub fn new() -> Self {
        Self {
            data: FxHashMap::default(),
        }
    }

    /// Store a value under `key`, replacing any previous value
    pub fn insert<T: Any + Send>(&mut self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), Box::new(value));
    }

    /// Builder-style insert
    pub fn with<T: Any + Send>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Typed retrieval. Fails if the key is absent or the stored value is of
    /// a different type.
    pub fn get<T: Any>(&self, key: &str) -> Result<&T, BundleError> {
        let value = self.data.get(key).ok_or_else(|| BundleError::Missing {
            key: key.to_string(),
        })?;
        value.downcast_ref::<T>().ok_or_else(|| BundleError::WrongType {
            key: key.to_string(),
            requested: type_name::<T>(),
        })
    }

    /// Lenient typed retrieval: `None` on absence or type mismatch
    pub fn opt<T: Any>(&self, key: &str) -> Option<&T> {
        self.data.get(key)?.downcast_ref()
    }

    /// Remove and drop the value stored under `key`
    pub fn remove(&mut self, key: &str) -> bool {
        self.data.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut bundle = Bundle::new();
        bundle.insert("title", "settings".to_string());
        bundle.insert("index", 3u32);

        assert_eq!(bundle.get::<String>("title").unwrap(), "settings");
        assert_eq!(*bundle.get::<u32>("index").unwrap(), 3);
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn test_missing_key() {
        let bundle = Bundle::new();
        assert_eq!(
            bundle.get::<u32>("absent"),
            Err(BundleError::Missing {
                key: "absent".to_string()
            })
        );
    }

    #[test]
    fn test_wrong_type() {
        let bundle = Bundle::new().with("index", 3u32);

        let error = bundle.get::<String>("index").unwrap_err();
        assert!(matches!(error, BundleError::WrongType { .. }));
        assert!(bundle.opt::<String>("index").is_none());
        assert_eq!(bundle.opt::<u32>("index"), Some(&3));
    }

    #[test]
    fn test_insert_replaces() {
        let mut bundle = Bundle::new();
        bundle.insert("value", 1u32);
        bundle.insert("value", "one".to_string());

        assert_eq!(bundle.get::<String>("value").unwrap(), "one");
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut bundle = Bundle::new().with("value", 1u32);
        assert!(bundle.remove("value"));
        assert!(!bundle.remove("value"));
        assert!(bundle.is_empty());
    }
}
