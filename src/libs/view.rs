use super::board::Snapshot;
use super::messages::Message;
use super::task::{Priority, StatusFilter, Task, TaskStats};
use crate::{msg_error, msg_info, msg_print, msg_warning};
use anyhow::Result;
use chrono::Local;
use prettytable::{row, Table};
use serde::Serialize;

pub struct View {}

impl View {
    pub fn tasks(tasks: &[&Task]) -> Result<()> {
        Self::tasks_table(tasks).printstd();
        Ok(())
    }

    pub fn stats(stats: &TaskStats) -> Result<()> {
        Self::stats_table(stats).printstd();
        Ok(())
    }

    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Reports a snapshot whose data failed to load. JSON output owns stdout,
    /// so in that mode the warning goes to stderr.
    pub fn load_warning(snapshot: &Snapshot, json: bool) -> Option<&Message> {
        let error = snapshot.error.as_ref()?;
        if json {
            msg_error!(error);
        } else {
            msg_warning!(error);
        }
        Some(error)
    }

    /// Renders the filtered task list of a snapshot, or its empty state.
    pub fn board(snapshot: &Snapshot, filter: StatusFilter) -> Result<()> {
        Self::load_warning(snapshot, false);

        let visible = snapshot.visible(filter);
        if visible.is_empty() {
            msg_info!(Snapshot::empty_message(filter));
            return Ok(());
        }

        match filter {
            StatusFilter::All => msg_print!(Message::TasksHeader, true),
            StatusFilter::Only(status) => msg_print!(Message::TasksFilteredHeader(status), true),
        }
        Self::tasks(&visible)
    }

    pub fn tasks_table(tasks: &[&Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "PRIORITY", "STATUS", "CREATED"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.description.as_deref().unwrap_or(""),
                priority_label(task.priority),
                task.status.label(),
                task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            ]);
        }

        table
    }

    pub fn stats_table(stats: &TaskStats) -> Table {
        let mut table = Table::new();

        table.add_row(row![Message::StatsTotal, Message::StatsTodo, Message::StatsInProgress, Message::StatsDone]);
        table.add_row(row![stats.total, stats.todo, stats.in_progress, stats.done]);

        table
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "low",
        Priority::Medium => "medium",
        Priority::High => "HIGH",
    }
}
