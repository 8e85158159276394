use super::confirm;
use super::user::find_user;
use crate::{
    db::{task_lists::TaskLists, tasks::Tasks, users::Users},
    libs::{
        messages::Message,
        models::{NewTask, TaskFilter, TaskPatch},
        view::View,
    },
    msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    /// Create a task in a task list
    Add {
        list: Uuid,
        title: String,
        /// Owner username or id; defaults to the list owner
        #[arg(short, long)]
        user: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Due date as YYYY-MM-DD
        #[arg(long)]
        due: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks in this task list
        #[arg(short, long, conflicts_with = "user")]
        list: Option<Uuid>,
        /// Only tasks owned by this user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Mark a task as completed
    Done { id: i64 },
    /// Change a task
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        /// An empty value clears the description
        #[arg(long)]
        description: Option<String>,
        /// Due date as YYYY-MM-DD; an empty value clears it
        #[arg(long)]
        due: Option<String>,
        /// Move the task to another task list
        #[arg(long)]
        list: Option<Uuid>,
    },
    /// Delete a task
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: TaskArgs) -> Result<()> {
    match args.command {
        TaskCommand::Add {
            list,
            title,
            user,
            description,
            due,
        } => handle_add(list, title, user, description, due),
        TaskCommand::List { list, user } => handle_list(list, user),
        TaskCommand::Done { id } => handle_done(id),
        TaskCommand::Edit {
            id,
            title,
            description,
            due,
            list,
        } => handle_edit(id, title, description, due, list),
        TaskCommand::Delete { id, yes } => handle_delete(id, yes),
    }
}

fn parse_due(value: &str) -> Result<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(value.to_string())))
}

fn handle_add(list: Uuid, title: String, user: Option<String>, description: Option<String>, due: Option<String>) -> Result<()> {
    let user_id = match user {
        Some(user) => find_user(&Users::new()?, &user)?.id,
        None => match TaskLists::new()?.get(list)? {
            Some(task_list) => task_list.user_id,
            None => msg_bail_anyhow!(Message::TaskListNotFound(list.to_string())),
        },
    };

    let mut new_task = NewTask::new(user_id, list, &title);
    new_task.description = description;
    new_task.due_date = due.as_deref().map(parse_due).transpose()?;

    let task = Tasks::new()?.create(new_task)?;

    msg_success!(Message::TaskCreated(task.id, task.title));
    Ok(())
}

fn handle_list(list: Option<Uuid>, user: Option<String>) -> Result<()> {
    let filter = match (list, user) {
        (Some(list), _) => TaskFilter::ByList(list),
        (None, Some(user)) => TaskFilter::ByUser(find_user(&Users::new()?, &user)?.id),
        (None, None) => TaskFilter::All,
    };
    let tasks = Tasks::new()?.fetch(filter)?;

    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader, true);
    View::tasks(&tasks)
}

fn handle_done(id: i64) -> Result<()> {
    let task = Tasks::new()?.complete(id)?;

    msg_success!(Message::TaskCompleted(task.id));
    Ok(())
}

fn handle_edit(id: i64, title: Option<String>, description: Option<String>, due: Option<String>, list: Option<Uuid>) -> Result<()> {
    if title.is_none() && description.is_none() && due.is_none() && list.is_none() {
        msg_bail_anyhow!(Message::NothingToUpdate);
    }

    let due_date = match due.as_deref() {
        None => None,
        Some("") => Some(None),
        Some(value) => Some(Some(parse_due(value)?)),
    };

    let patch = TaskPatch {
        task_list_id: list,
        title,
        description: description.map(|text| Some(text).filter(|text| !text.is_empty())),
        due_date,
        completed: None,
    };
    let task = Tasks::new()?.update(id, &patch)?;

    msg_success!(Message::TaskUpdated(task.id));
    Ok(())
}

fn handle_delete(id: i64, yes: bool) -> Result<()> {
    let mut tasks = Tasks::new()?;
    if tasks.get(id)?.is_none() {
        msg_bail_anyhow!(Message::TaskNotFound(id));
    }

    if !confirm(Message::ConfirmDeleteTask(id), yes)? {
        msg_warning!(Message::OperationCancelled);
        return Ok(());
    }

    tasks.delete(id)?;
    msg_success!(Message::TaskDeleted(id));
    Ok(())
}
