use super::field::{FieldType, Pattern, ValueType};
use std::fmt;
use thiserror::Error;

/// Constraint a field value broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    Pattern(Pattern),
    /// Field is not declared for the record kind.
    UnknownField,
    /// Timestamp is earlier than the named field.
    NotBefore(&'static str),
    /// Field may not change after creation.
    Immutable,
    /// Timestamp moved backwards.
    Monotonic,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::MinLength(len) => write!(f, "min_length({})", len),
            Rule::MaxLength(len) => write!(f, "max_length({})", len),
            Rule::Pattern(pattern) => write!(f, "pattern {}", pattern.source()),
            Rule::UnknownField => write!(f, "unknown_field"),
            Rule::NotBefore(other) => write!(f, "not_before({})", other),
            Rule::Immutable => write!(f, "immutable"),
            Rule::Monotonic => write!(f, "monotonic"),
        }
    }
}

/// Failure of a snapshot lookup. Not a property of the candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("snapshot lookup failed: {0}")]
pub struct LookupError(pub String);

impl LookupError {
    pub fn new(err: impl fmt::Display) -> Self {
        Self(err.to_string())
    }
}

/// Why a candidate record was rejected.
///
/// The first five variants describe the record; `Lookup` reports that the
/// snapshot could not answer and the record was neither accepted nor rejected
/// on its merits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("field '{field}' expected {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: FieldType,
        actual: ValueType,
    },

    #[error("field '{field}' violates {rule}")]
    ConstraintViolation { field: String, rule: Rule },

    #[error("field '{field}' references missing record {referenced_id}")]
    DanglingReference { field: String, referenced_id: String },

    #[error("{field} '{value}' is already taken")]
    UniquenessViolation { field: String, value: String },

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl ValidationError {
    /// Field the error is about, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::MissingField(field) => Some(field),
            ValidationError::TypeMismatch { field, .. }
            | ValidationError::ConstraintViolation { field, .. }
            | ValidationError::DanglingReference { field, .. }
            | ValidationError::UniquenessViolation { field, .. } => Some(field),
            ValidationError::Lookup(_) => None,
        }
    }

    pub(super) fn constraint(field: &str, rule: Rule) -> Self {
        ValidationError::ConstraintViolation {
            field: field.to_string(),
            rule,
        }
    }
}
