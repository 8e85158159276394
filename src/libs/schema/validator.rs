//! Fail-fast record validation.
//!
//! Checks run in five phases: required fields, types, constraints,
//! references, uniqueness. Each phase walks the field table of the record kind
//! in declaration order and the first failure ends validation. Updates run the
//! same phases over the merged record but only for the fields the patch
//! touches.

use super::error::{Rule, ValidationError};
use super::field::{FieldSpec, FieldType, ValueType, CREATED_AT, ID, UPDATED_AT};
use super::kind::RecordKind;
use super::record::{Fields, ValidatedRecord};
use super::snapshot::Snapshot;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use uuid::Uuid;

type Outcome = Result<(), ValidationError>;

/// Validates a full record for insertion.
pub fn validate<S>(kind: RecordKind, candidate: &Fields, snapshot: &S) -> Result<ValidatedRecord, ValidationError>
where
    S: Snapshot + ?Sized,
{
    Check {
        kind,
        record: candidate,
        scope: Scope::All,
        previous: None,
    }
    .run(snapshot)?;

    Ok(ValidatedRecord::new(kind, candidate.clone()))
}

/// Validates a partial update of `current`.
///
/// A `null` in the patch unsets the field. Only touched fields are checked;
/// reference and uniqueness lookups happen only when those fields change
/// hands. `id` and `createdAt` cannot change and `updatedAt` cannot move
/// backwards.
pub fn validate_update<S>(kind: RecordKind, current: &Fields, patch: &Fields, snapshot: &S) -> Result<ValidatedRecord, ValidationError>
where
    S: Snapshot + ?Sized,
{
    let merged = merge(current, patch);

    Check {
        kind,
        record: &merged,
        scope: Scope::Touched(patch),
        previous: Some(current),
    }
    .run(snapshot)?;

    Ok(ValidatedRecord::new(kind, merged))
}

fn merge(current: &Fields, patch: &Fields) -> Fields {
    let mut merged = current.clone();
    for (name, value) in patch {
        if value.is_null() {
            merged.remove(name);
        } else {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}

enum Scope<'a> {
    All,
    Touched(&'a Fields),
}

impl Scope<'_> {
    fn includes(&self, name: &str) -> bool {
        match self {
            Scope::All => true,
            Scope::Touched(patch) => patch.contains_key(name),
        }
    }
}

struct Check<'a> {
    kind: RecordKind,
    record: &'a Fields,
    scope: Scope<'a>,
    previous: Option<&'a Fields>,
}

impl Check<'_> {
    fn run<S: Snapshot + ?Sized>(&self, snapshot: &S) -> Outcome {
        self.required()?;
        self.types()?;
        self.constraints()?;
        self.references(snapshot)?;
        self.uniqueness(snapshot)
    }

    fn specs(&self) -> impl Iterator<Item = &'static FieldSpec> + '_ {
        self.kind.fields().iter().filter(move |spec| self.scope.includes(spec.name))
    }

    fn value(&self, name: &str) -> Option<&Value> {
        present(self.record, name)
    }

    fn required(&self) -> Outcome {
        for spec in self.specs().filter(|spec| spec.required) {
            if self.value(spec.name).is_none() {
                return Err(ValidationError::MissingField(spec.name.to_string()));
            }
        }
        Ok(())
    }

    fn types(&self) -> Outcome {
        for spec in self.specs() {
            let Some(value) = self.value(spec.name) else {
                continue;
            };
            if !type_matches(spec.ty, value) {
                return Err(ValidationError::TypeMismatch {
                    field: spec.name.to_string(),
                    expected: spec.ty,
                    actual: ValueType::of(value),
                });
            }
        }
        Ok(())
    }

    fn constraints(&self) -> Outcome {
        for name in self.record.keys() {
            if self.scope.includes(name) && self.kind.field(name).is_none() {
                return Err(ValidationError::constraint(name, Rule::UnknownField));
            }
        }

        if let Some(previous) = self.previous {
            for name in [ID, CREATED_AT] {
                if self.scope.includes(name) && present(previous, name) != self.value(name) {
                    return Err(ValidationError::constraint(name, Rule::Immutable));
                }
            }
        }

        for spec in self.specs().filter(|spec| spec.ty == FieldType::String) {
            let Some(text) = self.value(spec.name).and_then(Value::as_str) else {
                continue;
            };
            let len = text.chars().count();
            if let Some(min) = spec.min_len.filter(|min| len < *min) {
                return Err(ValidationError::constraint(spec.name, Rule::MinLength(min)));
            }
            if let Some(max) = spec.max_len.filter(|max| len > *max) {
                return Err(ValidationError::constraint(spec.name, Rule::MaxLength(max)));
            }
            if let Some(pattern) = spec.pattern.filter(|pattern| !pattern.is_match(text)) {
                return Err(ValidationError::constraint(spec.name, Rule::Pattern(pattern)));
            }
        }

        self.timestamps()
    }

    fn timestamps(&self) -> Outcome {
        if !self.scope.includes(CREATED_AT) && !self.scope.includes(UPDATED_AT) {
            return Ok(());
        }

        let Some(updated) = date(self.record, UPDATED_AT) else {
            return Ok(());
        };
        if date(self.record, CREATED_AT).is_some_and(|created| updated < created) {
            return Err(ValidationError::constraint(UPDATED_AT, Rule::NotBefore(CREATED_AT)));
        }

        if let Some(previous) = self.previous.filter(|_| self.scope.includes(UPDATED_AT)) {
            let last = date(previous, UPDATED_AT).or_else(|| date(previous, CREATED_AT));
            if last.is_some_and(|last| updated < last) {
                return Err(ValidationError::constraint(UPDATED_AT, Rule::Monotonic));
            }
        }
        Ok(())
    }

    fn references<S: Snapshot + ?Sized>(&self, snapshot: &S) -> Outcome {
        for spec in self.specs() {
            let Some(target) = spec.references else {
                continue;
            };
            let Some(raw) = self.value(spec.name).and_then(Value::as_str) else {
                continue;
            };
            let resolves = match Uuid::parse_str(raw) {
                Ok(id) => snapshot.exists(target, &id)?,
                Err(_) => false,
            };
            if !resolves {
                return Err(ValidationError::DanglingReference {
                    field: spec.name.to_string(),
                    referenced_id: raw.to_string(),
                });
            }
        }
        Ok(())
    }

    fn uniqueness<S: Snapshot + ?Sized>(&self, snapshot: &S) -> Outcome {
        let own_id = self.value(ID).and_then(Value::as_str).and_then(|s| Uuid::parse_str(s).ok());

        for spec in self.specs().filter(|spec| spec.unique) {
            let Some(value) = self.value(spec.name).and_then(Value::as_str) else {
                continue;
            };
            match snapshot.find_unique(self.kind, spec.name, value)? {
                Some(owner) if Some(owner) != own_id => {
                    return Err(ValidationError::UniquenessViolation {
                        field: spec.name.to_string(),
                        value: value.to_string(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn present<'a>(fields: &'a Fields, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|v| !v.is_null())
}

fn date(fields: &Fields, name: &str) -> Option<DateTime<FixedOffset>> {
    present(fields, name).and_then(Value::as_str).and_then(|s| DateTime::parse_from_rfc3339(s).ok())
}

fn type_matches(ty: FieldType, value: &Value) -> bool {
    match ty {
        FieldType::String => value.is_string(),
        FieldType::Integer => ValueType::of(value) == ValueType::Integer,
        FieldType::Boolean => value.is_boolean(),
        FieldType::Date => value.as_str().is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
        FieldType::Uuid => value.as_str().is_some_and(|s| Uuid::parse_str(s).is_ok()),
        FieldType::ReferenceId => value.is_string(),
    }
}
