//! Field declarations for the four record kinds.
//!
//! Each record kind owns a static table of [`FieldSpec`] entries. The table is
//! the single source of truth for required fields, value types, string bounds,
//! patterns, references and uniqueness; the validator walks it phase by phase.

use super::kind::RecordKind;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// Expected type of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Integer,
    Boolean,
    /// RFC 3339 timestamp carried as a JSON string.
    Date,
    /// Own id of a user, task list or label: a UUID string.
    Uuid,
    /// Id of another record carried as a JSON string. Only UUIDs can resolve.
    ReferenceId,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Uuid => "uuid",
            FieldType::ReferenceId => "reference-id",
        };
        write!(f, "{}", name)
    }
}

/// Observed type of a JSON value, reported in type mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl ValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(n) if n.is_i64() => ValueType::Integer,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Array => "array",
            ValueType::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// Named string patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Username,
    Email,
}

static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

impl Pattern {
    pub fn source(self) -> &'static str {
        match self {
            Pattern::Username => r"^[a-zA-Z0-9_.-]+$",
            Pattern::Email => r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$",
        }
    }

    pub fn is_match(self, value: &str) -> bool {
        let cell = match self {
            Pattern::Username => &USERNAME_REGEX,
            Pattern::Email => &EMAIL_REGEX,
        };
        cell.get_or_init(|| Regex::new(self.source()).expect("field pattern must compile")).is_match(value)
    }
}

/// Declaration of a single field of a record kind.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub pattern: Option<Pattern>,
    pub references: Option<RecordKind>,
    pub unique: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            min_len: None,
            max_len: None,
            pattern: None,
            references: None,
            unique: false,
        }
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub const fn min_len(self, len: usize) -> Self {
        Self { min_len: Some(len), ..self }
    }

    pub const fn max_len(self, len: usize) -> Self {
        Self { max_len: Some(len), ..self }
    }

    pub const fn pattern(self, pattern: Pattern) -> Self {
        Self {
            pattern: Some(pattern),
            ..self
        }
    }

    pub const fn references(self, kind: RecordKind) -> Self {
        Self {
            ty: FieldType::ReferenceId,
            references: Some(kind),
            ..self
        }
    }

    pub const fn unique(self) -> Self {
        Self { unique: true, ..self }
    }
}

pub const ID: &str = "id";
pub const CREATED_AT: &str = "createdAt";
pub const UPDATED_AT: &str = "updatedAt";

pub(super) const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(ID, FieldType::Uuid).required(),
    FieldSpec::new("username", FieldType::String)
        .required()
        .min_len(1)
        .max_len(50)
        .pattern(Pattern::Username)
        .unique(),
    FieldSpec::new("email", FieldType::String)
        .required()
        .max_len(255)
        .pattern(Pattern::Email)
        .unique(),
    FieldSpec::new("password", FieldType::String).required().min_len(8),
    FieldSpec::new(CREATED_AT, FieldType::Date).required(),
    FieldSpec::new(UPDATED_AT, FieldType::Date),
];

pub(super) const TASK_LIST_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(ID, FieldType::Uuid).required(),
    FieldSpec::new("title", FieldType::String).required().max_len(255),
    FieldSpec::new("description", FieldType::String),
    FieldSpec::new("userId", FieldType::ReferenceId).required().references(RecordKind::User),
    FieldSpec::new(CREATED_AT, FieldType::Date).required(),
    FieldSpec::new(UPDATED_AT, FieldType::Date),
];

pub(super) const TASK_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(ID, FieldType::Integer).required(),
    FieldSpec::new("userId", FieldType::ReferenceId).required().references(RecordKind::User),
    FieldSpec::new("taskListId", FieldType::ReferenceId)
        .required()
        .references(RecordKind::TaskList),
    FieldSpec::new("title", FieldType::String).required().max_len(255),
    FieldSpec::new("description", FieldType::String),
    FieldSpec::new("dueDate", FieldType::Date),
    FieldSpec::new("completed", FieldType::Boolean),
    FieldSpec::new(CREATED_AT, FieldType::Date).required(),
    FieldSpec::new(UPDATED_AT, FieldType::Date),
];

pub(super) const LABEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new(ID, FieldType::Uuid).required(),
    FieldSpec::new("name", FieldType::String).required().max_len(255),
    FieldSpec::new("color", FieldType::String).max_len(255),
    FieldSpec::new("userId", FieldType::ReferenceId).required().references(RecordKind::User),
    FieldSpec::new(CREATED_AT, FieldType::Date).required(),
    FieldSpec::new(UPDATED_AT, FieldType::Date),
];
