//! Board state for the presentation layer.
//!
//! The board never patches its state incrementally. Every successful
//! mutation is followed by a full refresh: `list` and `stats` are issued in
//! parallel, strictly after the mutation has completed.
//!
//! This is also where read failures are softened. The gateway reports them
//! as errors; the board turns them into an empty list or zero counts, logs
//! the detail and attaches a generic [`Message::DataLoadFailed`] to the
//! snapshot. Write failures become a [`BoardError`] carrying an
//! operation-specific message without internal detail.

use crate::db::tasks::Tasks;
use crate::libs::error::TaskError;
use crate::libs::messages::Message;
use crate::libs::task::{NewTask, StatusFilter, Task, TaskPatch, TaskStats};
use thiserror::Error;
use tracing::warn;

/// One refreshed view of the board.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    pub error: Option<Message>,
}

impl Snapshot {
    pub fn visible(&self, filter: StatusFilter) -> Vec<&Task> {
        filter.apply(&self.tasks)
    }

    /// What to show when `filter` leaves nothing on the board.
    pub fn empty_message(filter: StatusFilter) -> Message {
        match filter {
            StatusFilter::All => Message::NoTasksYet,
            StatusFilter::Only(_) => Message::NoTasksInCategory,
        }
    }
}

/// A failed mutation, as presented to the user.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BoardError {
    message: Message,
    #[source]
    cause: TaskError,
}

impl BoardError {
    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn cause(&self) -> &TaskError {
        &self.cause
    }
}

pub struct Board {
    tasks: Tasks,
}

impl Board {
    pub fn new(tasks: Tasks) -> Self {
        Self { tasks }
    }

    /// Hands the gateway back, e.g. to close it.
    pub fn into_tasks(self) -> Tasks {
        self.tasks
    }

    /// Re-reads tasks and stats in parallel.
    pub async fn refresh(&self) -> Snapshot {
        let (tasks, stats) = tokio::join!(self.run(|t| t.list()), self.run(|t| t.stats()));
        let mut snapshot = Snapshot::default();

        match tasks {
            Ok(tasks) => snapshot.tasks = tasks,
            Err(e) => {
                warn!(error = %e, "failed to list tasks");
                snapshot.error = Some(Message::DataLoadFailed);
            }
        }
        match stats {
            Ok(stats) => snapshot.stats = stats,
            Err(e) => {
                warn!(error = %e, "failed to compute task stats");
                snapshot.error = Some(Message::DataLoadFailed);
            }
        }

        snapshot
    }

    pub async fn find(&self, id: i64) -> Result<Option<Task>, TaskError> {
        self.run(move |t| t.get(id)).await
    }

    pub async fn create(&self, input: NewTask) -> Result<(Task, Snapshot), BoardError> {
        let task = self.mutate(Message::TaskCreateFailed, move |t| t.create(input)).await?;
        Ok((task, self.refresh().await))
    }

    pub async fn update(&self, id: i64, patch: TaskPatch) -> Result<(Task, Snapshot), BoardError> {
        let task = self.mutate(Message::TaskUpdateFailed, move |t| t.update(id, patch)).await?;
        Ok((task, self.refresh().await))
    }

    pub async fn delete(&self, id: i64) -> Result<Snapshot, BoardError> {
        self.mutate(Message::TaskDeleteFailed, move |t| t.delete(id)).await?;
        Ok(self.refresh().await)
    }

    /// Moves a task to the next status: todo → in_progress → done → todo.
    pub async fn cycle(&self, id: i64) -> Result<(Task, Snapshot), BoardError> {
        let task = self
            .mutate(Message::TaskStatusUpdateFailed, move |t| {
                let current = t.get(id)?.ok_or(TaskError::NotFound(id))?;
                t.update(id, TaskPatch::status(current.status.next()))
            })
            .await?;
        Ok((task, self.refresh().await))
    }

    async fn mutate<T, F>(&self, message: Message, op: F) -> Result<T, BoardError>
    where
        T: Send + 'static,
        F: FnOnce(&Tasks) -> Result<T, TaskError> + Send + 'static,
    {
        self.run(op).await.map_err(|cause| {
            warn!(error = %cause, "{}", message);
            BoardError { message, cause }
        })
    }

    /// Runs a blocking gateway call off the async worker threads.
    async fn run<T, F>(&self, op: F) -> Result<T, TaskError>
    where
        T: Send + 'static,
        F: FnOnce(&Tasks) -> Result<T, TaskError> + Send + 'static,
    {
        let tasks = self.tasks.clone();
        tokio::task::spawn_blocking(move || op(&tasks)).await?
    }
}
