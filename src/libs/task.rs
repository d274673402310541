//! Task data model.
//!
//! A [`Task`] is the only entity taskdeck stores. [`Priority`] and
//! [`Status`] are closed enums whose lowercase spelling (`in_progress` for
//! the middle status) is used in the database, in JSON output and on the
//! command line alike.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string is not one of the enumerated spellings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Advisory importance label. Has no effect on ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// Workflow stage of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    #[value(name = "in_progress", alias = "in-progress")]
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in_progress",
            Status::Done => "done",
        }
    }

    /// Human-readable name used in tables and messages.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "to do",
            Status::InProgress => "in progress",
            Status::Done => "done",
        }
    }

    /// The status a task moves to when its status is cycled:
    /// todo → in_progress → done → todo.
    pub fn next(self) -> Status {
        match self {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Todo,
        }
    }
}

macro_rules! impl_text_enum {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL.into_iter().find(|v| v.as_str() == s).ok_or_else(|| ParseEnumError {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }

        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

impl_text_enum!(Priority, "priority");
impl_text_enum!(Status, "status");

/// A persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a task. Unset priority and status fall back to
/// `medium` and `todo`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}

/// Partial update. `None` leaves a field untouched.
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.priority.is_none() && self.status.is_none()
    }

    /// Drops every field that already equals the task's current value.
    pub fn changes_against(mut self, task: &Task) -> Self {
        if self.title.as_deref() == Some(task.title.as_str()) {
            self.title = None;
        }
        if self.description.as_ref() == Some(&task.description) {
            self.description = None;
        }
        if self.priority == Some(task.priority) {
            self.priority = None;
        }
        if self.status == Some(task.status) {
            self.status = None;
        }
        self
    }
}

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: u64,
    pub todo: u64,
    pub in_progress: u64,
    pub done: u64,
}

/// Client-side status filter applied to a listed sequence of tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == *status,
        }
    }

    /// Keeps the matching tasks in their original relative order.
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|t| self.matches(t)).collect()
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "in-progress" => Ok(StatusFilter::Only(Status::InProgress)),
            other => other.parse().map(StatusFilter::Only).map_err(|_| ParseEnumError {
                kind: "filter",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

/// Trims a title and returns `None` when nothing is left.
pub fn normalize_title(title: &str) -> Option<String> {
    let trimmed = title.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, status: Status) -> Task {
        let now = Utc::now();
        Task {
            id,
            title: format!("Task {}", id),
            description: None,
            priority: Priority::Medium,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_cycle_returns_to_start() {
        for start in Status::ALL {
            assert_eq!(start.next().next().next(), start);
        }
        assert_eq!(Status::Todo.next(), Status::InProgress);
        assert_eq!(Status::InProgress.next(), Status::Done);
        assert_eq!(Status::Done.next(), Status::Todo);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert!("In_Progress".parse::<Status>().is_err());
        assert_eq!(Status::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Status::default(), Status::Todo);
    }

    #[test]
    fn test_filter_preserves_order() {
        let tasks = vec![task(5, Status::Done), task(4, Status::Todo), task(3, Status::Done), task(2, Status::InProgress), task(1, Status::Done)];

        let done: Vec<i64> = StatusFilter::Only(Status::Done).apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(done, vec![5, 3, 1]);

        let all: Vec<i64> = StatusFilter::All.apply(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(all, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("in-progress".parse::<StatusFilter>().unwrap(), StatusFilter::Only(Status::InProgress));
        assert_eq!("done".parse::<StatusFilter>().unwrap(), StatusFilter::Only(Status::Done));
        assert!("later".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Buy milk \n"), Some("Buy milk".to_string()));
        assert_eq!(normalize_title("   "), None);
        assert_eq!(normalize_title(""), None);
    }

    #[test]
    fn test_patch_changes_against() {
        let current = task(1, Status::Todo);
        let patch = TaskPatch {
            title: Some(current.title.clone()),
            description: Some(None),
            priority: Some(Priority::High),
            status: Some(Status::Todo),
        }
        .changes_against(&current);

        assert_eq!(patch.priority, Some(Priority::High));
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
        assert!(patch.status.is_none());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(task(7, Status::InProgress)).unwrap();
        assert_eq!(value["status"], "in_progress");
        assert_eq!(value["priority"], "medium");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());

        let stats = serde_json::to_value(TaskStats { total: 3, todo: 1, in_progress: 1, done: 1 }).unwrap();
        assert_eq!(stats["inProgress"], 1);
    }
}
