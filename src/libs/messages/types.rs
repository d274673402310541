use crate::libs::task::Status;

/// Every piece of user-facing text the application prints.
///
/// Variants are grouped by the area that emits them. The text itself lives
/// in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(i64),
    TaskStatusChanged(i64, Status),
    TaskNotFoundWithId(i64),
    TaskTitleEmpty,
    TaskCreateFailed,
    TaskUpdateFailed,
    TaskDeleteFailed,
    TaskStatusUpdateFailed,
    TasksHeader,
    TasksFilteredHeader(Status),
    NoTasksYet,
    NoTasksInCategory,
    NoChangesDetected,
    ConfirmDeleteTask(String),
    EditingTask(i64),

    // === BOARD MESSAGES ===
    DataLoadFailed,
    StatsHeader,
    StatsTotal,
    StatsTodo,
    StatsInProgress,
    StatsDone,

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskPriority,
    PromptTaskStatus,
    PromptDatabaseUrl,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError(String),
    ConfigSaveError(String),

    // === GENERAL MESSAGES ===
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
