//! Schema validation for user, task list, task and label records.
//!
//! Replaces a database-side JSON schema with explicit checks. A candidate
//! record is a JSON object; [`validate`] either accepts it as a
//! [`ValidatedRecord`] or returns the first [`ValidationError`] found.
//! Reference and uniqueness checks read a [`Snapshot`] of existing records;
//! validation itself keeps no state and has no side effects.
//!
//! ## Usage
//!
//! ```rust
//! use todo_guard::libs::schema::{validate, MemorySnapshot, RecordKind, ValidationError};
//! use serde_json::json;
//!
//! let mut snapshot = MemorySnapshot::new();
//! let alice = json!({
//!     "id": "6f1c8a3e-2b7d-4e0a-9d55-1c2b3a4d5e6f",
//!     "username": "alice",
//!     "email": "a@example.com",
//!     "password": "longenough1",
//!     "createdAt": "2024-01-01T00:00:00Z",
//! });
//! let record = validate(RecordKind::User, alice.as_object().unwrap(), &snapshot).unwrap();
//! snapshot.insert(&record);
//!
//! let twin = json!({
//!     "id": "0b9e7c1d-5a4f-4c3b-8e2d-7f6a5b4c3d2e",
//!     "username": "alice",
//!     "email": "b@example.com",
//!     "password": "longenough1",
//!     "createdAt": "2024-01-01T00:00:00Z",
//! });
//! let err = validate(RecordKind::User, twin.as_object().unwrap(), &snapshot).unwrap_err();
//! assert!(matches!(err, ValidationError::UniquenessViolation { .. }));
//! ```

pub mod error;
pub mod field;
pub mod kind;
pub mod record;
pub mod snapshot;
pub mod validator;

pub use error::{LookupError, Rule, ValidationError};
pub use field::{FieldSpec, FieldType, Pattern, ValueType};
pub use kind::RecordKind;
pub use record::{Fields, ValidatedRecord};
pub use snapshot::{MemorySnapshot, Snapshot};
pub use validator::{validate, validate_update};
