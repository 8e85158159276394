//! Text for every [`Message`]. All user-facing wording lives here.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === USER MESSAGES ===
            Message::UserCreated(username) => format!("User '{}' created", username),
            Message::UserUpdated(username) => format!("User '{}' updated", username),
            Message::UserDeleted(username) => format!("User '{}' deleted", username),
            Message::UserNotFound(key) => format!("User '{}' not found", key),
            Message::NoUsersFound => "No users found".to_string(),
            Message::UsersHeader => "Users".to_string(),
            Message::ConfirmDeleteUser(username) => format!("Delete user '{}'?", username),
            Message::PasswordAccepted(username) => format!("Password for '{}' is correct", username),
            Message::PasswordRejected(username) => format!("Wrong username or password for '{}'", username),
            Message::PromptPassword => "Password".to_string(),
            Message::PromptPasswordConfirm => "Repeat password".to_string(),
            Message::PasswordMismatch => "Passwords do not match".to_string(),

            // === TASK LIST MESSAGES ===
            Message::TaskListCreated(title, id) => format!("Task list '{}' created with id {}", title, id),
            Message::TaskListUpdated(title) => format!("Task list '{}' updated", title),
            Message::TaskListDeleted(id) => format!("Task list {} deleted", id),
            Message::TaskListNotFound(id) => format!("Task list {} not found", id),
            Message::NoTaskListsFound => "No task lists found".to_string(),
            Message::TaskListsHeader => "Task lists".to_string(),
            Message::ConfirmDeleteTaskList(title) => format!("Delete task list '{}'?", title),

            // === TASK MESSAGES ===
            Message::TaskCreated(id, title) => format!("Task #{} '{}' created", id, title),
            Message::TaskUpdated(id) => format!("Task #{} updated", id),
            Message::TaskCompleted(id) => format!("Task #{} marked as completed", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskNotFound(id) => format!("Task #{} not found", id),
            Message::NoTasksFound => "No tasks found".to_string(),
            Message::TasksHeader => "Tasks".to_string(),
            Message::ConfirmDeleteTask(id) => format!("Delete task #{}?", id),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected YYYY-MM-DD", value),

            // === LABEL MESSAGES ===
            Message::LabelCreated(name, id) => format!("Label '{}' created with id {}", name, id),
            Message::LabelUpdated(name) => format!("Label '{}' updated", name),
            Message::LabelDeleted(id) => format!("Label {} deleted", id),
            Message::LabelNotFound(id) => format!("Label {} not found", id),
            Message::NoLabelsFound => "No labels found".to_string(),
            Message::LabelsHeader => "Labels".to_string(),
            Message::ConfirmDeleteLabel(name) => format!("Delete label '{}'?", name),

            // === VALIDATION MESSAGES ===
            Message::RecordAccepted(kind) => format!("Valid {} record", kind),
            Message::RecordRejected(kind, reason) => format!("Invalid {} record: {}", kind, reason),
            Message::RecordNotAnObject(path) => format!("{} does not contain a JSON object", path),

            // === GENERAL MESSAGES ===
            Message::NothingToUpdate => "Nothing to update, pass at least one field".to_string(),
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleStore => "Store settings".to_string(),
            Message::PromptDeletePolicy => "What should deleting a record with children do".to_string(),
            Message::PromptBusyTimeout => "Database lock timeout (milliseconds)".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Current database version: {}", version),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs to be updated".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => {
                format!("  v{}: {} (applied: {})", version, name, applied_at)
            }
        };
        write!(f, "{}", text)
    }
}
