use crate::{
    libs::{
        board::Board,
        messages::Message,
        task::{normalize_title, NewTask, Priority, Status, StatusFilter, Task, TaskPatch},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use tracing::debug;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required = true)]
    title: String,
    /// Optional longer description
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,
    #[arg(short, long, value_enum)]
    status: Option<Status>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show only tasks with this status (all, todo, in_progress, done)
    #[arg(short, long, default_value = "all")]
    pub status: StatusFilter,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the task to edit
    id: i64,
    /// New title
    #[arg(long)]
    title: Option<String>,
    /// New description; an empty string clears it
    #[arg(short, long, conflicts_with = "clear_description")]
    description: Option<String>,
    /// Remove the description
    #[arg(long)]
    clear_description: bool,
    #[arg(short, long, value_enum)]
    priority: Option<Priority>,
    #[arg(short, long, value_enum)]
    status: Option<Status>,
}

impl EditArgs {
    fn patch(&self) -> Result<TaskPatch> {
        let title = match &self.title {
            Some(title) => match normalize_title(title) {
                Some(title) => Some(title),
                None => msg_bail_anyhow!(Message::TaskTitleEmpty),
            },
            None => None,
        };

        let description = if self.clear_description {
            Some(None)
        } else {
            self.description.as_ref().map(|d| Some(d.trim().to_string()).filter(|d| !d.is_empty()))
        };

        Ok(TaskPatch {
            title,
            description,
            priority: self.priority,
            status: self.status,
        })
    }
}

#[derive(Debug, Args)]
pub struct CycleArgs {
    /// ID of the task whose status moves forward
    id: i64,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the task to delete
    id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn add(board: &Board, args: AddArgs) -> Result<()> {
    let Some(title) = normalize_title(&args.title) else {
        msg_bail_anyhow!(Message::TaskTitleEmpty);
    };

    let input = NewTask {
        title,
        description: args.description.filter(|d| !d.trim().is_empty()),
        priority: args.priority,
        status: args.status,
    };

    let (task, snapshot) = board.create(input).await?;
    msg_success!(Message::TaskCreated(task.title));
    View::board(&snapshot, StatusFilter::All)
}

pub async fn list(board: &Board, args: ListArgs) -> Result<()> {
    let snapshot = board.refresh().await;

    if args.json {
        View::load_warning(&snapshot, true);
        return View::json(&snapshot.visible(args.status));
    }
    View::board(&snapshot, args.status)
}

pub async fn edit(board: &Board, args: EditArgs) -> Result<()> {
    let patch = args.patch()?;
    let patch = if patch.is_empty() { prompt_patch(board, args.id).await? } else { patch };

    if patch.is_empty() {
        msg_info!(Message::NoChangesDetected);
        return Ok(());
    }

    let (task, snapshot) = board.update(args.id, patch).await?;
    msg_success!(Message::TaskUpdated(task.title));
    View::board(&snapshot, StatusFilter::All)
}

pub async fn cycle(board: &Board, args: CycleArgs) -> Result<()> {
    let (task, snapshot) = board.cycle(args.id).await?;
    msg_success!(Message::TaskStatusChanged(task.id, task.status));
    View::board(&snapshot, StatusFilter::All)
}

pub async fn delete(board: &Board, args: DeleteArgs) -> Result<()> {
    if !args.yes {
        let task = match board.find(args.id).await {
            Ok(Some(task)) => task,
            Ok(None) => {
                debug!(task_id = args.id, "delete requested for missing task");
                msg_bail_anyhow!(Message::TaskDeleteFailed);
            }
            Err(e) => {
                debug!(task_id = args.id, error = %e, "lookup before delete failed");
                msg_bail_anyhow!(Message::TaskDeleteFailed);
            }
        };

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.title).to_string())
            .default(false)
            .interact()?;

        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    let snapshot = board.delete(args.id).await?;
    msg_success!(Message::TaskDeleted(args.id));
    View::board(&snapshot, StatusFilter::All)
}

/// Asks for every field, seeded with the task's current values, and
/// returns only what changed.
async fn prompt_patch(board: &Board, id: i64) -> Result<TaskPatch> {
    let task = match board.find(id).await {
        Ok(Some(task)) => task,
        Ok(None) => msg_bail_anyhow!(Message::TaskNotFoundWithId(id)),
        Err(e) => {
            debug!(task_id = id, error = %e, "lookup before edit failed");
            msg_bail_anyhow!(Message::TaskUpdateFailed);
        }
    };

    msg_print!(Message::EditingTask(id), true);
    let theme = ColorfulTheme::default();

    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(task.title.clone())
        .validate_with(|input: &String| -> Result<(), String> {
            normalize_title(input).map(|_| ()).ok_or_else(|| Message::TaskTitleEmpty.to_string())
        })
        .interact_text()?;

    // Pre-filled rather than a default: submitting an empty line clears it.
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .with_initial_text(task.description.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let priority = select_from(&theme, Message::PromptTaskPriority, &Priority::ALL, task.priority)?;
    let status = select_from(&theme, Message::PromptTaskStatus, &Status::ALL, task.status)?;

    Ok(answers_patch(&task, title, &description, priority, status))
}

/// Builds a patch from the answered prompts, keeping only what changed.
fn answers_patch(task: &Task, title: String, description: &str, priority: Priority, status: Status) -> TaskPatch {
    TaskPatch {
        title: Some(title.trim().to_string()),
        description: Some(Some(description.trim().to_string()).filter(|d| !d.is_empty())),
        priority: Some(priority),
        status: Some(status),
    }
    .changes_against(&normalized(task.clone()))
}

fn select_from<T>(theme: &ColorfulTheme, prompt: Message, options: &[T], current: T) -> Result<T>
where
    T: Copy + PartialEq + ToString,
{
    let default = options.iter().position(|o| *o == current).unwrap_or(0);
    let selection = Select::with_theme(theme)
        .with_prompt(prompt.to_string())
        .items(options)
        .default(default)
        .interact()?;

    Ok(options[selection])
}

/// Prompted titles come back trimmed; compare against a trimmed original so
/// untouched fields are not reported as changes.
fn normalized(mut task: Task) -> Task {
    task.title = task.title.trim().to_string();
    task
}
