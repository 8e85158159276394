pub mod init;
pub mod label;
pub mod list;
pub mod migrations;
pub mod task;
pub mod user;
pub mod validate;

use crate::libs::config::{Config, DeletePolicy};
use crate::libs::messages::Message;
use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage users")]
    User(user::UserArgs),
    #[command(about = "Manage task lists")]
    List(list::ListArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Manage labels")]
    Label(label::LabelArgs),
    #[command(about = "Validate a JSON record against the database without storing it")]
    Validate(validate::ValidateArgs),
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::User(args) => user::cmd(args),
            Commands::List(args) => list::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Label(args) => label::cmd(args),
            Commands::Validate(args) => validate::cmd(args),
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Explicit `--policy` wins over the configured one.
fn delete_policy(explicit: Option<DeletePolicy>) -> Result<DeletePolicy> {
    match explicit {
        Some(policy) => Ok(policy),
        None => Ok(Config::read()?.delete_policy),
    }
}

fn confirm(prompt: Message, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }
    let confirmed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?;
    Ok(confirmed)
}
