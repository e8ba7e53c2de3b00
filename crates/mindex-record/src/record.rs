use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::key::{keys, EntryKey};
use crate::kind::RecordType;
use crate::value::{FieldValue, Value};

/// An index record: a type plus named field values.
///
/// Known fields always hold a value of their declared kind. Typed insertion
/// through [`EntryKey`] guarantees this for records built in code, and
/// deserialization rejects a known field carrying the wrong kind. Unknown
/// field names are kept as-is and ignored by the codec.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    #[serde(rename = "type")]
    record_type: RecordType,
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record of the given type.
    pub fn new(record_type: RecordType) -> Self {
        Self {
            record_type,
            fields: BTreeMap::new(),
        }
    }

    pub fn record_type(&self) -> RecordType {
        self.record_type
    }

    /// Look up a field. Returns `None` when the field is unset.
    pub fn get<T: FieldValue>(&self, key: &EntryKey<T>) -> Option<&T> {
        self.fields.get(key.name()).and_then(T::from_value)
    }

    /// Set a field, returning the previous value if any.
    pub fn put<T: FieldValue>(&mut self, key: &EntryKey<T>, value: T) -> Option<Value> {
        self.fields.insert(key.name().to_string(), value.into_value())
    }

    /// Builder-style [`put`](Self::put).
    pub fn with<T: FieldValue>(mut self, key: &EntryKey<T>, value: impl Into<T>) -> Self {
        self.put(key, value.into());
        self
    }

    /// Unset a field, returning its value if it was set.
    pub fn remove<T: FieldValue>(&mut self, key: &EntryKey<T>) -> Option<Value> {
        self.fields.remove(key.name())
    }

    pub fn contains<T: FieldValue>(&self, key: &EntryKey<T>) -> bool {
        self.get(key).is_some()
    }

    /// All set fields, ordered by name.
    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names of the identity fields (group id, artifact id, version) that an
    /// artifact record lacks. Always empty for non-artifact records.
    pub fn missing_identity(&self) -> Vec<&'static str> {
        if !self.record_type.is_artifact() {
            return Vec::new();
        }
        [keys::GROUP_ID, keys::ARTIFACT_ID, keys::VERSION]
            .into_iter()
            .filter(|key| !self.contains(key))
            .map(|key| key.name())
            .collect()
    }
}

#[derive(Deserialize)]
struct RawRecord {
    #[serde(rename = "type")]
    record_type: RecordType,
    #[serde(default)]
    fields: BTreeMap<String, Value>,
}

impl TryFrom<RawRecord> for Record {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        for (name, value) in &raw.fields {
            let declared = keys::VOCABULARY.iter().find(|(known, _)| known == name);
            if let Some((field, expected)) = declared {
                if value.kind() != *expected {
                    return Err(RecordError::TypeMismatch {
                        field: *field,
                        expected: expected.as_str(),
                    });
                }
            }
        }
        Ok(Self {
            record_type: raw.record_type,
            fields: raw.fields,
        })
    }
}
