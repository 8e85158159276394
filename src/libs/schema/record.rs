use super::field::ID;
use super::kind::RecordKind;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Field map of a record as submitted for validation.
pub type Fields = Map<String, Value>;

/// A record that passed every check for its kind.
///
/// Only the validator builds these, so holding one proves the fields were
/// checked against some snapshot. The fields are exactly those submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRecord {
    kind: RecordKind,
    fields: Fields,
}

impl ValidatedRecord {
    pub(super) fn new(kind: RecordKind, fields: Fields) -> Self {
        Self { kind, fields }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|v| !v.is_null())
    }

    /// Id of user, task list and label records.
    pub fn uuid(&self) -> Option<Uuid> {
        self.get(ID).and_then(Value::as_str).and_then(|s| Uuid::parse_str(s).ok())
    }

    /// Deserializes the fields into a typed model.
    pub fn to_model<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(Value::Object(self.fields.clone()))
    }
}
