use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bag of recipient data used to fill placeholders and derive greeting names.
///
/// Records produced by the delimited-text parser hold flat string values; records supplied
/// as JSON may nest objects and arrays, which are reachable through dot paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientRecord(Map<String, Value>);

impl RecipientRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builds a flat record from `(key, value)` string pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (k, v) in pairs {
            let v: String = v.into();
            record.insert(k, v);
        }
        record
    }

    /// Returns the stringified top-level field, or `None` when absent or `null`.
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(stringify)
    }

    /// Resolves a dot path such as `person.firstName`.
    ///
    /// Each segment must name a present key of the current object (or a valid index of the
    /// current array). Any missing segment, a scalar intermediate, or a final `null` yields
    /// `None`. Segments are trimmed and empty segments ignored. A nested object resolves to
    /// its compact JSON text; an array to its comma-joined elements.
    pub fn lookup(&self, path: &str) -> Option<String> {
        let mut parts = path.split('.').map(str::trim).filter(|p| !p.is_empty());
        let first = parts.next()?;
        let mut cur = self.0.get(first)?;
        for part in parts {
            cur = match cur {
                Value::Object(map) => map.get(part)?,
                Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        stringify(cur)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Map<String, Value>> for RecipientRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| stringify(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
