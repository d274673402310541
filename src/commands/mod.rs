pub mod dashboard;
pub mod init;
pub mod task;

use crate::db::tasks::Tasks;
use crate::libs::{board::Board, config::Config};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Board(BoardCommands),
    #[command(about = "Configuration initialization")]
    Init,
}

/// Commands that work on the task database.
#[derive(Debug, Subcommand)]
enum BoardCommands {
    #[command(about = "Create a task")]
    Add(task::AddArgs),
    #[command(about = "List tasks, newest first")]
    List(task::ListArgs),
    #[command(about = "Edit a task (interactively when no fields are given)")]
    Edit(task::EditArgs),
    #[command(about = "Move a task to its next status")]
    Cycle(task::CycleArgs),
    #[command(about = "Delete a task")]
    Delete(task::DeleteArgs),
    #[command(about = "Show task counts per status")]
    Stats(dashboard::StatsArgs),
    #[command(about = "Show counts and the task list together")]
    Dashboard(dashboard::DashboardArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        match Self::parse().command {
            Commands::Init => init::cmd(),
            Commands::Board(command) => Self::run(command).await,
        }
    }

    /// Runs a board command against the configured database, closing it
    /// afterwards.
    async fn run(command: BoardCommands) -> Result<()> {
        let config = Config::load()?;
        let board = Board::new(Tasks::open(&config)?);

        let result = match command {
            BoardCommands::Add(args) => task::add(&board, args).await,
            BoardCommands::List(args) => task::list(&board, args).await,
            BoardCommands::Edit(args) => task::edit(&board, args).await,
            BoardCommands::Cycle(args) => task::cycle(&board, args).await,
            BoardCommands::Delete(args) => task::delete(&board, args).await,
            BoardCommands::Stats(args) => dashboard::stats(&board, args).await,
            BoardCommands::Dashboard(args) => dashboard::dashboard(&board, args).await,
        };

        board.into_tasks().close()?;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_board_commands_parse() {
        let cli = Cli::parse_from(["taskdeck", "init"]);
        assert!(matches!(cli.command, Commands::Init));

        let cli = Cli::parse_from(["taskdeck", "cycle", "3"]);
        assert!(matches!(cli.command, Commands::Board(BoardCommands::Cycle(_))));

        let cli = Cli::parse_from(["taskdeck", "list", "--status", "done", "--json"]);
        assert!(matches!(cli.command, Commands::Board(BoardCommands::List(args)) if args.json));
    }
}
