use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Key of "which graph, with which options, is on screen".
///
/// Camera state is cached per identity; two layouts compare equal exactly when their keys do.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutIdentity(String);

impl LayoutIdentity {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Builds the cache key for a topology and its active options.
    ///
    /// Object keys are sorted at every depth, so equal options always serialize to the same key
    /// regardless of insertion order.
    pub fn for_topology(topology_id: &str, options: &BTreeMap<String, Value>) -> Self {
        let options: BTreeMap<&str, Value> = options
            .iter()
            .map(|(k, v)| (k.as_str(), canonical(v)))
            .collect();
        let path = ("zoomCache", topology_id, options);
        match serde_json::to_string(&path) {
            Ok(key) => Self(key),
            // Only reachable with non-string map keys inside `options`, which `Value` cannot hold.
            Err(_) => Self(format!("zoomCache/{topology_id}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rebuilds `value` with every object's keys in sorted order.
fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonical(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

impl fmt::Display for LayoutIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayoutIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LayoutIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}
