//! Core library modules for taskdeck.
//!
//! - [`task`]: the task data model, status cycling and filtering
//! - [`board`]: presentation state, refresh-after-mutation and degradation
//! - [`config`] / [`data_storage`]: where the database and settings live
//! - [`messages`]: user-facing text and output macros
//! - [`view`]: terminal tables and JSON output
//! - [`error`]: the library error type

pub mod board;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod messages;
pub mod task;
pub mod view;
