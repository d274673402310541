//! Display implementation for taskdeck messages.
//!
//! All message text is defined here, in one place, so commands, the board
//! and the error types never hand-format user-facing strings themselves.
//!
//! Write-path failures carry no internal detail: the user sees
//! "Failed to create task", and the underlying error goes to the log.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created successfully", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated successfully", title),
            Message::TaskDeleted(id) => format!("Task #{} deleted successfully", id),
            Message::TaskStatusChanged(id, status) => format!("Task #{} is now {}", id, status.label()),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TaskTitleEmpty => "Task title must not be empty".to_string(),
            Message::TaskCreateFailed => "Failed to create task".to_string(),
            Message::TaskUpdateFailed => "Failed to update task".to_string(),
            Message::TaskDeleteFailed => "Failed to delete task".to_string(),
            Message::TaskStatusUpdateFailed => "Failed to update task status".to_string(),
            Message::TasksHeader => "Tasks:".to_string(),
            Message::TasksFilteredHeader(status) => format!("Tasks ({}):", status.label()),
            Message::NoTasksYet => "No tasks yet. Create one with `taskdeck add <title>`!".to_string(),
            Message::NoTasksInCategory => "No tasks in this category".to_string(),
            Message::NoChangesDetected => "No changes detected.".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Are you sure you want to delete '{}'?", title),
            Message::EditingTask(id) => format!("Editing task #{}", id),

            // === BOARD MESSAGES ===
            Message::DataLoadFailed => "Failed to load data, please try again".to_string(),
            Message::StatsHeader => "Overview".to_string(),
            Message::StatsTotal => "All tasks".to_string(),
            Message::StatsTodo => "To do".to_string(),
            Message::StatsInProgress => "In progress".to_string(),
            Message::StatsDone => "Done".to_string(),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description (leave empty for none)".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptTaskStatus => "Status".to_string(),
            Message::PromptDatabaseUrl => "Database URL (leave empty for the default location)".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),
            Message::ConfigSaveError(error) => format!("Failed to save configuration: {}", error),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
