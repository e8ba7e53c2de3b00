use std::fmt;

use serde::{Deserialize, Serialize};

/// A single record field value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Long(i64),
    String(String),
    StringArray(Vec<String>),
}

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Long(_) => ValueKind::Long,
            Self::String(_) => ValueKind::String,
            Self::StringArray(_) => ValueKind::StringArray,
        }
    }
}

/// The value type a field is declared with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Long,
    String,
    StringArray,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::Long => "long",
            Self::String => "string",
            Self::StringArray => "string array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Rust type that can be stored as a record field value.
pub trait FieldValue: Sized {
    /// The matching [`ValueKind`].
    const KIND: ValueKind;

    /// Wrap into a [`Value`].
    fn into_value(self) -> Value;

    /// Borrow the inner value if `value` is of this kind.
    fn from_value(value: &Value) -> Option<&Self>;
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::String;

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl FieldValue for i64 {
    const KIND: ValueKind = ValueKind::Long;

    fn into_value(self) -> Value {
        Value::Long(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Long(n) => Some(n),
            _ => None,
        }
    }
}

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FieldValue for Vec<String> {
    const KIND: ValueKind = ValueKind::StringArray;

    fn into_value(self) -> Value {
        Value::StringArray(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::StringArray(items) => Some(items),
            _ => None,
        }
    }
}
