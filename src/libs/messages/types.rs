/// Every user-facing line the application prints.
#[derive(Debug, Clone)]
pub enum Message {
    // === USER MESSAGES ===
    UserCreated(String), // username
    UserUpdated(String), // username
    UserDeleted(String), // username
    UserNotFound(String),
    NoUsersFound,
    UsersHeader,
    ConfirmDeleteUser(String),
    PasswordAccepted(String),
    PasswordRejected(String),
    PromptPassword,
    PromptPasswordConfirm,
    PasswordMismatch,

    // === TASK LIST MESSAGES ===
    TaskListCreated(String, String), // title, id
    TaskListUpdated(String),         // title
    TaskListDeleted(String),         // id
    TaskListNotFound(String),
    NoTaskListsFound,
    TaskListsHeader,
    ConfirmDeleteTaskList(String),

    // === TASK MESSAGES ===
    TaskCreated(i64, String), // id, title
    TaskUpdated(i64),
    TaskCompleted(i64),
    TaskDeleted(i64),
    TaskNotFound(i64),
    NoTasksFound,
    TasksHeader,
    ConfirmDeleteTask(i64),
    InvalidDueDate(String),

    // === LABEL MESSAGES ===
    LabelCreated(String, String), // name, id
    LabelUpdated(String),         // name
    LabelDeleted(String),         // id
    LabelNotFound(String),
    NoLabelsFound,
    LabelsHeader,
    ConfirmDeleteLabel(String),

    // === VALIDATION MESSAGES ===
    RecordAccepted(String),         // kind
    RecordRejected(String, String), // kind, reason
    RecordNotAnObject(String),      // path

    // === GENERAL MESSAGES ===
    NothingToUpdate,
    OperationCancelled,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleStore,
    PromptDeletePolicy,
    PromptBusyTimeout,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationHistoryEntry(u32, String, String), // version, name, applied at
}
