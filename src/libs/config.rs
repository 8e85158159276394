//! Application configuration.
//!
//! Settings live in `config.json` inside the data directory resolved by
//! [`DataStorage`]. A missing file means defaults: deletes are restricted and
//! writers wait up to five seconds for the database lock.
//!
//! ```rust,no_run
//! use todo_guard::libs::config::{Config, DeletePolicy};
//!
//! let mut config = Config::read()?;
//! config.delete_policy = DeletePolicy::Cascade;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use clap::ValueEnum;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// What deleting a record that still has children does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DeletePolicy {
    /// Refuse while any task list, task or label still points at the record.
    #[default]
    Restrict,
    /// Remove the children in the same transaction.
    Cascade,
}

impl DeletePolicy {
    pub const ALL: [DeletePolicy; 2] = [DeletePolicy::Restrict, DeletePolicy::Cascade];
}

impl fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletePolicy::Restrict => write!(f, "restrict"),
            DeletePolicy::Cascade => write!(f, "cascade"),
        }
    }
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub delete_policy: DeletePolicy,

    /// How long a writer waits for the database lock before giving up.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            delete_policy: DeletePolicy::default(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl Config {
    /// Reads the configuration from the data directory, or defaults when no
    /// file has been saved yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(config_file_path)
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(config_file_path)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive setup wizard; current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();

        msg_print!(Message::ConfigModuleStore);

        let policies = DeletePolicy::ALL.iter().map(ToString::to_string).collect::<Vec<_>>();
        let default_policy = DeletePolicy::ALL
            .iter()
            .position(|policy| *policy == current.delete_policy)
            .unwrap_or(0);
        let selected = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDeletePolicy.to_string())
            .items(&policies)
            .default(default_policy)
            .interact()?;

        let busy_timeout_ms = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBusyTimeout.to_string())
            .default(current.busy_timeout_ms)
            .interact_text()?;

        Ok(Config {
            delete_policy: DeletePolicy::ALL[selected],
            busy_timeout_ms,
        })
    }
}
