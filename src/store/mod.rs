//! Namespaced persistence facade shared by every tool.
//!
//! Keys are composed as `root:namespace:key`, so prefix scans
//! (`clear_namespace`, `export_namespace`) are exact and two tools can
//! never collide. Values are stored as JSON text. Reads never fail: a
//! missing or malformed value falls back to whatever the caller supplied.
//! Writes are best-effort: a failing substrate drops the write with a
//! warning rather than surfacing an error to the edit that triggered it.

mod backend;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend, StoreError};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_ROOT_NAMESPACE: &str = "roadmap";

/// Payload written when a value cannot be serialized, so the write slot is
/// occupied by something parseable instead of silently vanishing.
const SERIALIZE_FAILED_SENTINEL: &str = r#"{"error":"serialize_failed"}"#;

/// Handle over a key-value substrate, scoped to one root namespace.
///
/// Tools hold clones of the handle; all clones observe each other's
/// writes immediately.
#[derive(Clone)]
pub struct StoreHandle {
    backend: Arc<dyn KeyValueBackend>,
    root: String,
}

impl StoreHandle {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self::with_root(backend, DEFAULT_ROOT_NAMESPACE)
    }

    pub fn with_root(backend: Arc<dyn KeyValueBackend>, root: impl Into<String>) -> Self {
        Self {
            backend,
            root: root.into(),
        }
    }

    fn composed(&self, namespace: &str, key: &str) -> String {
        format!("{}:{}:{}", self.root, namespace, key)
    }

    fn namespace_prefix(&self, namespace: &str) -> String {
        format!("{}:{}:", self.root, namespace)
    }

    /// Read a value, falling back on a missing or malformed entry.
    pub fn get<T: DeserializeOwned>(&self, namespace: &str, key: &str, fallback: T) -> T {
        match self.backend.read(&self.composed(namespace, key)) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or(fallback),
            None => fallback,
        }
    }

    /// Write a value synchronously. Serialization failure degrades to a
    /// sentinel payload and substrate failure drops the write; neither
    /// surfaces to the caller.
    pub fn set<T: Serialize>(&self, namespace: &str, key: &str, value: &T) {
        let payload = match serde_json::to_string(value) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(namespace, key, %err, "storing sentinel for unserializable value");
                SERIALIZE_FAILED_SENTINEL.to_string()
            }
        };

        if let Err(err) = self.backend.write(&self.composed(namespace, key), &payload) {
            warn!(namespace, key, %err, "dropping failed store write");
        }
    }

    pub fn remove(&self, namespace: &str, key: &str) {
        if let Err(err) = self.backend.delete(&self.composed(namespace, key)) {
            warn!(namespace, key, %err, "dropping failed store removal");
        }
    }

    /// Remove every key under a namespace, leaving other namespaces
    /// untouched.
    pub fn clear_namespace(&self, namespace: &str) {
        let prefix = self.namespace_prefix(namespace);
        for key in self.backend.keys() {
            if key.starts_with(&prefix) {
                if let Err(err) = self.backend.delete(&key) {
                    warn!(namespace, key, %err, "dropping failed store removal");
                }
            }
        }
    }

    /// Export all keys within a namespace as parsed JSON values.
    /// Malformed entries export as `null` rather than aborting the scan.
    pub fn export_namespace(&self, namespace: &str) -> BTreeMap<String, Value> {
        let prefix = self.namespace_prefix(namespace);
        let mut out = BTreeMap::new();
        for key in self.backend.keys() {
            if let Some(short_key) = key.strip_prefix(&prefix) {
                let value = self
                    .backend
                    .read(&key)
                    .and_then(|raw| serde_json::from_str(&raw).ok())
                    .unwrap_or(Value::Null);
                out.insert(short_key.to_string(), value);
            }
        }
        out
    }

    /// Export every namespace under this handle's root.
    pub fn export_all(&self) -> BTreeMap<String, BTreeMap<String, Value>> {
        let root_prefix = format!("{}:", self.root);
        let mut out: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();
        for key in self.backend.keys() {
            let Some(rest) = key.strip_prefix(&root_prefix) else {
                continue;
            };
            let Some((namespace, short_key)) = rest.split_once(':') else {
                continue;
            };
            let value = self
                .backend
                .read(&key)
                .and_then(|raw| serde_json::from_str(&raw).ok())
                .unwrap_or(Value::Null);
            out.entry(namespace.to_string())
                .or_default()
                .insert(short_key.to_string(), value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn memory_store() -> (StoreHandle, MemoryBackend) {
        let backend = MemoryBackend::default();
        (StoreHandle::new(Arc::new(backend.clone())), backend)
    }

    #[test]
    fn set_then_get_round_trips() {
        let (store, _) = memory_store();
        store.set("matrix", "rows", &vec![1, 2, 3]);
        let restored: Vec<i32> = store.get("matrix", "rows", Vec::new());
        assert_eq!(restored, vec![1, 2, 3]);
    }

    #[test]
    fn get_falls_back_on_malformed_payload() {
        let (store, backend) = memory_store();
        backend
            .write("roadmap:aps:last", "{not json")
            .expect("memory write");
        let restored: Vec<String> = store.get("aps", "last", vec!["fallback".to_string()]);
        assert_eq!(restored, vec!["fallback".to_string()]);
    }

    #[test]
    fn unserializable_value_degrades_to_sentinel() {
        let (store, backend) = memory_store();
        store.set("aps", "last", &f64::NAN);
        let raw = backend.read("roadmap:aps:last").expect("sentinel stored");
        assert_eq!(raw, SERIALIZE_FAILED_SENTINEL);
    }

    #[test]
    fn clear_namespace_leaves_other_namespaces_intact() {
        let (store, _) = memory_store();
        store.set("matrix", "rows", &json!([]));
        store.set("matrix", "draft", &json!("x"));
        store.set("planner", "grid", &json!({}));

        store.clear_namespace("matrix");

        assert!(store.export_namespace("matrix").is_empty());
        assert_eq!(store.export_namespace("planner").len(), 1);
    }

    #[test]
    fn export_all_groups_by_namespace() {
        let (store, _) = memory_store();
        store.set("matrix", "rows", &json!([1]));
        store.set("wizard", "answers", &json!({"citizenship": true}));

        let exported = store.export_all();
        assert_eq!(exported.len(), 2);
        assert_eq!(exported["matrix"]["rows"], json!([1]));
        assert_eq!(exported["wizard"]["answers"]["citizenship"], json!(true));
    }

    #[test]
    fn keys_with_colons_survive_namespace_export() {
        let (store, _) = memory_store();
        store.set("planner", "0:3", &json!("Math revision"));
        let exported = store.export_namespace("planner");
        assert_eq!(exported["0:3"], json!("Math revision"));
    }
}
