//! Task persistence gateway.
//!
//! [`Tasks`] wraps the `tasks` table behind five operations: `list`,
//! `create`, `update`, `delete` and `stats` (plus `get` for single lookups).
//! Every operation is its own unit of work; nothing spans operations.
//!
//! The handle is explicitly opened and cheap to clone. Clones share one
//! connection behind a mutex, so the handle can be passed to several
//! threads. Call [`Tasks::close`] on the last clone to surface errors from
//! closing the connection; dropping it closes silently.
//!
//! Read operations return their storage errors unchanged. Deciding whether
//! to show an empty board instead is left to the caller (see
//! `libs::board`).

use super::db::Db;
use crate::libs::config::{Config, DatabaseLocation};
use crate::libs::error::{Result, TaskError};
use crate::libs::task::{normalize_title, NewTask, Status, Task, TaskPatch, TaskStats};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;
use tracing::debug;

const INSERT_TASK: &str = "INSERT INTO tasks (title, description, priority, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)";
const SELECT_TASKS: &str = "SELECT id, title, description, priority, status, created_at, updated_at FROM tasks ORDER BY created_at DESC, id DESC";
const SELECT_TASK_BY_ID: &str = "SELECT id, title, description, priority, status, created_at, updated_at FROM tasks WHERE id = ?1";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, priority = ?4, status = ?5, updated_at = ?6 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";
const COUNT_TASKS_BY_STATUS: &str = "SELECT COUNT(*) FROM tasks WHERE status = ?1";

#[derive(Clone)]
pub struct Tasks {
    conn: Arc<Mutex<Connection>>,
}

impl Tasks {
    /// Opens the database selected by `config` (or `DATABASE_URL`).
    pub fn open(config: &Config) -> Result<Self> {
        Self::open_at(&config.database_location()?)
    }

    pub fn open_at(location: &DatabaseLocation) -> Result<Self> {
        let db = Db::open(location)?;
        debug!(?location, "task database opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(db.conn)),
        })
    }

    /// Opens a private in-memory database, mostly useful in tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::open_at(&DatabaseLocation::Memory)
    }

    /// Closes the connection if this is the last handle.
    pub fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => conn.into_inner().close().map_err(|(_, e)| TaskError::Storage(e)),
            Err(_) => Ok(()),
        }
    }

    /// All tasks, newest first.
    pub fn list(&self) -> Result<Vec<Task>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(SELECT_TASKS)?;
        let tasks = stmt.query_map([], task_from_row)?.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = tasks.len(), "tasks listed");

        Ok(tasks)
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.conn.lock();
        Ok(find(&conn, id)?)
    }

    /// Persists a new task. Both timestamps get the same instant.
    pub fn create(&self, input: NewTask) -> Result<Task> {
        let title = normalize_title(&input.title).ok_or(TaskError::InvalidTitle)?;
        let priority = input.priority.unwrap_or_default();
        let status = input.status.unwrap_or_default();
        let now = Utc::now();

        let conn = self.conn.lock();
        conn.execute(INSERT_TASK, params![title, input.description, priority, status, now])?;
        let id = conn.last_insert_rowid();
        debug!(task_id = id, %priority, %status, "task created");

        Ok(Task {
            id,
            title,
            description: input.description,
            priority,
            status,
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies the fields present in `patch` and refreshes `updated_at`.
    pub fn update(&self, id: i64, patch: TaskPatch) -> Result<Task> {
        let title = match patch.title {
            Some(title) => Some(normalize_title(&title).ok_or(TaskError::InvalidTitle)?),
            None => None,
        };

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let current = find(&tx, id)?.ok_or(TaskError::NotFound(id))?;

        let task = Task {
            id,
            title: title.unwrap_or(current.title),
            description: patch.description.unwrap_or(current.description),
            priority: patch.priority.unwrap_or(current.priority),
            status: patch.status.unwrap_or(current.status),
            created_at: current.created_at,
            updated_at: refreshed_timestamp(current.updated_at),
        };

        tx.execute(
            UPDATE_TASK,
            params![task.id, task.title, task.description, task.priority, task.status, task.updated_at],
        )?;
        tx.commit()?;
        debug!(task_id = id, status = %task.status, "task updated");

        Ok(task)
    }

    /// Removes the task for good.
    pub fn delete(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock();
        let affected = conn.execute(DELETE_TASK, params![id])?;
        if affected == 0 {
            return Err(TaskError::NotFound(id));
        }
        debug!(task_id = id, "task deleted");

        Ok(())
    }

    /// Total and per-status counts, one `COUNT(*)` query each.
    pub fn stats(&self) -> Result<TaskStats> {
        let conn = self.conn.lock();
        let count_status = |status: Status| -> rusqlite::Result<u64> {
            conn.query_row(COUNT_TASKS_BY_STATUS, params![status], |row| row.get::<_, i64>(0))
                .map(|n| n as u64)
        };

        let stats = TaskStats {
            total: conn.query_row(COUNT_TASKS, [], |row| row.get::<_, i64>(0))? as u64,
            todo: count_status(Status::Todo)?,
            in_progress: count_status(Status::InProgress)?,
            done: count_status(Status::Done)?,
        };
        debug!(total = stats.total, "task stats computed");

        Ok(stats)
    }
}

fn find(conn: &Connection, id: i64) -> rusqlite::Result<Option<Task>> {
    conn.query_row(SELECT_TASK_BY_ID, params![id], task_from_row).optional()
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// The current time, nudged forward when the clock has not moved past
/// `previous`, so `updated_at` strictly increases on every update.
fn refreshed_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
