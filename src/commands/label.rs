use super::confirm;
use super::user::find_user;
use crate::{
    db::{labels::Labels, users::Users},
    libs::{
        messages::Message,
        models::{Label, LabelPatch},
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct LabelArgs {
    #[command(subcommand)]
    command: LabelCommand,
}

#[derive(Debug, Subcommand)]
enum LabelCommand {
    /// Create a label
    Add {
        /// Owner username or id
        user: String,
        name: String,
        #[arg(short, long)]
        color: Option<String>,
    },
    /// List labels
    List {
        /// Only labels owned by this user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Rename or recolor a label
    Edit {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        /// An empty value clears the color
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a label
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub fn cmd(args: LabelArgs) -> Result<()> {
    match args.command {
        LabelCommand::Add { user, name, color } => handle_add(user, name, color),
        LabelCommand::List { user } => handle_list(user),
        LabelCommand::Edit { id, name, color } => handle_edit(id, name, color),
        LabelCommand::Delete { id, yes } => handle_delete(id, yes),
    }
}

fn handle_add(user: String, name: String, color: Option<String>) -> Result<()> {
    let owner = find_user(&Users::new()?, &user)?;
    let label = Labels::new()?.create(&Label::new(owner.id, &name, color.as_deref()))?;

    msg_success!(Message::LabelCreated(label.name, label.id.to_string()));
    Ok(())
}

fn handle_list(user: Option<String>) -> Result<()> {
    let labels_db = Labels::new()?;
    let labels = match user {
        Some(user) => labels_db.list_by_user(find_user(&Users::new()?, &user)?.id)?,
        None => labels_db.list()?,
    };

    if labels.is_empty() {
        msg_info!(Message::NoLabelsFound);
        return Ok(());
    }

    msg_print!(Message::LabelsHeader, true);
    View::labels(&labels)
}

fn handle_edit(id: Uuid, name: Option<String>, color: Option<String>) -> Result<()> {
    if name.is_none() && color.is_none() {
        msg_bail_anyhow!(Message::NothingToUpdate);
    }

    let patch = LabelPatch {
        name,
        color: color.map(|color| Some(color).filter(|color| !color.is_empty())),
    };
    let label = Labels::new()?.update(id, &patch)?;

    msg_success!(Message::LabelUpdated(label.name));
    Ok(())
}

fn handle_delete(id: Uuid, yes: bool) -> Result<()> {
    let mut labels = Labels::new()?;
    let label = match labels.get(id)? {
        Some(label) => label,
        None => msg_bail_anyhow!(Message::LabelNotFound(id.to_string())),
    };

    if !confirm(Message::ConfirmDeleteLabel(label.name), yes)? {
        msg_warning!(Message::OperationCancelled);
        return Ok(());
    }

    labels.delete(id)?;
    msg_success!(Message::LabelDeleted(id.to_string()));
    Ok(())
}
