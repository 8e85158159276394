use crate::libs::schema::RecordKind;
use thiserror::Error;

/// Store failures that are not validation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: String },

    /// Delete refused under the restrict policy.
    #[error("{kind} {id} still has {dependents} dependent record(s)")]
    HasDependents { kind: RecordKind, id: String, dependents: usize },
}

impl StoreError {
    pub fn not_found(kind: RecordKind, id: impl ToString) -> Self {
        StoreError::NotFound { kind, id: id.to_string() }
    }
}
