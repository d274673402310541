//! # taskdeck - personal task tracking
//!
//! A command-line task board backed by a local SQLite database.
//!
//! ## Features
//!
//! - **Task Management**: Create, edit, delete and cycle the status of tasks
//! - **Filtering**: Narrow the board down to a single status
//! - **Dashboard**: Aggregate counts per status next to the task list
//! - **Configuration**: `DATABASE_URL`, `.env` files or a stored `config.json`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdeck::db::tasks::Tasks;
//! use taskdeck::libs::task::NewTask;
//!
//! let tasks = Tasks::open_in_memory()?;
//! let task = tasks.create(NewTask::new("Water the plants"))?;
//! assert_eq!(tasks.list()?[0].id, task.id);
//! # Ok::<(), taskdeck::libs::error::TaskError>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;
