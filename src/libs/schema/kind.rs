use super::field::{FieldSpec, LABEL_FIELDS, TASK_FIELDS, TASK_LIST_FIELDS, USER_FIELDS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four kinds of records the store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordKind {
    User,
    TaskList,
    Task,
    Label,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [RecordKind::User, RecordKind::TaskList, RecordKind::Task, RecordKind::Label];

    /// Field declarations in check order.
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            RecordKind::User => USER_FIELDS,
            RecordKind::TaskList => TASK_LIST_FIELDS,
            RecordKind::Task => TASK_FIELDS,
            RecordKind::Label => LABEL_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Backing SQLite table.
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::User => "users",
            RecordKind::TaskList => "task_lists",
            RecordKind::Task => "tasks",
            RecordKind::Label => "labels",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::User => "user",
            RecordKind::TaskList => "task list",
            RecordKind::Task => "task",
            RecordKind::Label => "label",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "user" | "users" => Ok(RecordKind::User),
            "tasklist" | "tasklists" | "list" => Ok(RecordKind::TaskList),
            "task" | "tasks" => Ok(RecordKind::Task),
            "label" | "labels" => Ok(RecordKind::Label),
            _ => Err(format!("unknown record kind '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_aliases() {
        assert_eq!("task-list".parse::<RecordKind>().unwrap(), RecordKind::TaskList);
        assert_eq!("taskLists".parse::<RecordKind>().unwrap(), RecordKind::TaskList);
        assert_eq!("USER".parse::<RecordKind>().unwrap(), RecordKind::User);
        assert!("project".parse::<RecordKind>().is_err());
    }

    #[test]
    fn every_kind_declares_id_and_created_at_as_required() {
        for kind in RecordKind::ALL {
            for name in ["id", "createdAt"] {
                let spec = kind.field(name).unwrap();
                assert!(spec.required, "{} of {} should be required", name, kind);
            }
        }
    }
}
