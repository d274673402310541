//! Database layer for taskdeck.
//!
//! Built on SQLite through `rusqlite`. [`db::Db`] opens a connection and
//! applies [`migrations`]; [`tasks::Tasks`] is the gateway every other part
//! of the application goes through.
//!
//! ```rust
//! use taskdeck::db::tasks::Tasks;
//! use taskdeck::libs::task::{NewTask, Priority};
//!
//! let tasks = Tasks::open_in_memory()?;
//! tasks.create(NewTask::new("Review PR").priority(Priority::High))?;
//! assert_eq!(tasks.stats()?.todo, 1);
//! tasks.close()?;
//! # Ok::<(), taskdeck::libs::error::TaskError>(())
//! ```

/// Connection opening and setup.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// The task gateway: list, create, update, delete and stats.
pub mod tasks;
