use crate::{
    libs::{board::Board, messages::Message, task::StatusFilter, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Show only tasks with this status (all, todo, in_progress, done)
    #[arg(short, long, default_value = "all")]
    status: StatusFilter,
}

pub async fn stats(board: &Board, args: StatsArgs) -> Result<()> {
    let snapshot = board.refresh().await;
    View::load_warning(&snapshot, args.json);

    if args.json {
        return View::json(&snapshot.stats);
    }
    View::stats(&snapshot.stats)
}

/// Counts on top, filtered task list below.
pub async fn dashboard(board: &Board, args: DashboardArgs) -> Result<()> {
    let snapshot = board.refresh().await;

    msg_print!(Message::StatsHeader, true);
    View::stats(&snapshot.stats)?;
    View::board(&snapshot, args.status)
}
