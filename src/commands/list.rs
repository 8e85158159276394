use super::user::find_user;
use super::{confirm, delete_policy};
use crate::{
    db::{task_lists::TaskLists, users::Users},
    libs::{
        config::DeletePolicy,
        messages::Message,
        models::{TaskList, TaskListPatch},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(subcommand)]
    command: ListCommand,
}

#[derive(Debug, Subcommand)]
enum ListCommand {
    /// Create a task list
    Add {
        /// Owner username or id
        user: String,
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List task lists
    List {
        /// Only lists owned by this user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Change a task list's title or description
    Edit {
        id: Uuid,
        #[arg(long)]
        title: Option<String>,
        /// An empty value clears the description
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task list
    Delete {
        id: Uuid,
        /// Overrides the configured delete policy
        #[arg(long, value_enum)]
        policy: Option<DeletePolicy>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: ListArgs) -> Result<()> {
    match args.command {
        ListCommand::Add { user, title, description } => handle_add(user, title, description),
        ListCommand::List { user } => handle_list(user),
        ListCommand::Edit { id, title, description } => handle_edit(id, title, description),
        ListCommand::Delete { id, policy, yes } => handle_delete(id, policy, yes),
    }
}

fn handle_add(user: String, title: String, description: Option<String>) -> Result<()> {
    let owner = find_user(&Users::new()?, &user)?;
    let list = TaskLists::new()?.create(&TaskList::new(owner.id, &title, description.as_deref()))?;

    msg_success!(Message::TaskListCreated(list.title, list.id.to_string()));
    Ok(())
}

fn handle_list(user: Option<String>) -> Result<()> {
    let task_lists = TaskLists::new()?;
    let lists = match user {
        Some(user) => task_lists.list_by_user(find_user(&Users::new()?, &user)?.id)?,
        None => task_lists.list()?,
    };

    if lists.is_empty() {
        msg_info!(Message::NoTaskListsFound);
        return Ok(());
    }

    msg_print!(Message::TaskListsHeader, true);
    View::task_lists(&lists)
}

fn handle_edit(id: Uuid, title: Option<String>, description: Option<String>) -> Result<()> {
    if title.is_none() && description.is_none() {
        msg_bail_anyhow!(Message::NothingToUpdate);
    }

    let patch = TaskListPatch {
        title,
        description: description.map(|text| Some(text).filter(|text| !text.is_empty())),
    };
    let updated = TaskLists::new()?.update(id, &patch)?;

    msg_success!(Message::TaskListUpdated(updated.title));
    Ok(())
}

fn handle_delete(id: Uuid, policy: Option<DeletePolicy>, yes: bool) -> Result<()> {
    let mut task_lists = TaskLists::new()?;
    let list = match task_lists.get(id)? {
        Some(list) => list,
        None => msg_bail_anyhow!(Message::TaskListNotFound(id.to_string())),
    };

    if !confirm(Message::ConfirmDeleteTaskList(list.title), yes)? {
        msg_warning!(Message::OperationCancelled);
        return Ok(());
    }

    task_lists.delete(id, delete_policy(policy)?)?;
    msg_success!(Message::TaskListDeleted(id.to_string()));
    Ok(())
}
