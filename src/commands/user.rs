use super::{confirm, delete_policy};
use crate::{
    db::users::Users,
    libs::{
        config::DeletePolicy,
        messages::Message,
        models::{User, UserPatch},
        view::View,
    },
    msg_bail_anyhow, msg_error, msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Password};
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Debug, Subcommand)]
enum UserCommand {
    /// Create a user
    Add {
        username: String,
        email: String,
        /// Prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List all users
    List,
    /// Change a user's username, email or password
    Edit {
        /// Username or id
        user: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        password: bool,
    },
    /// Delete a user
    Delete {
        /// Username or id
        user: String,
        /// Overrides the configured delete policy
        #[arg(long, value_enum)]
        policy: Option<DeletePolicy>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Check a user's password
    Verify {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
    },
}

pub fn cmd(args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Add { username, email, password } => handle_add(username, email, password),
        UserCommand::List => handle_list(),
        UserCommand::Edit {
            user,
            username,
            email,
            password,
        } => handle_edit(user, username, email, password),
        UserCommand::Delete { user, policy, yes } => handle_delete(user, policy, yes),
        UserCommand::Verify { username, password } => handle_verify(username, password),
    }
}

/// Finds a user by id or, failing that, by username.
pub(crate) fn find_user(users: &Users, key: &str) -> Result<User> {
    let found = match Uuid::parse_str(key) {
        Ok(id) => users.get(id)?,
        Err(_) => users.get_by_username(key)?,
    };
    match found {
        Some(user) => Ok(user),
        None => msg_bail_anyhow!(Message::UserNotFound(key.to_string())),
    }
}

fn prompt_password(confirm: bool) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut prompt = Password::with_theme(&theme).with_prompt(Message::PromptPassword.to_string());
    if confirm {
        prompt = prompt.with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordMismatch.to_string());
    }
    Ok(prompt.interact()?)
}

fn handle_add(username: String, email: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password(true)?,
    };

    let user = Users::new()?.create(&User::new(&username, &email, &password))?;

    msg_success!(Message::UserCreated(user.username));
    Ok(())
}

fn handle_list() -> Result<()> {
    let users = Users::new()?.list()?;

    if users.is_empty() {
        msg_info!(Message::NoUsersFound);
        return Ok(());
    }

    msg_print!(Message::UsersHeader, true);
    View::users(&users)
}

fn handle_edit(key: String, username: Option<String>, email: Option<String>, password: bool) -> Result<()> {
    if username.is_none() && email.is_none() && !password {
        msg_bail_anyhow!(Message::NothingToUpdate);
    }

    let mut users = Users::new()?;
    let user = find_user(&users, &key)?;

    let patch = UserPatch {
        username,
        email,
        password: if password { Some(prompt_password(true)?) } else { None },
    };
    let updated = users.update(user.id, &patch)?;

    msg_success!(Message::UserUpdated(updated.username));
    Ok(())
}

fn handle_delete(key: String, policy: Option<DeletePolicy>, yes: bool) -> Result<()> {
    let mut users = Users::new()?;
    let user = find_user(&users, &key)?;

    if !confirm(Message::ConfirmDeleteUser(user.username.clone()), yes)? {
        msg_warning!(Message::OperationCancelled);
        return Ok(());
    }

    users.delete(user.id, delete_policy(policy)?)?;
    msg_success!(Message::UserDeleted(user.username));
    Ok(())
}

fn handle_verify(username: String, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt_password(false)?,
    };

    if Users::new()?.verify_password(&username, &password)? {
        msg_success!(Message::PasswordAccepted(username));
    } else {
        msg_error!(Message::PasswordRejected(username));
    }
    Ok(())
}
