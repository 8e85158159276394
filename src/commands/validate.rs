//! Dry-run validation of a JSON record file against the current database.

use crate::{
    db::{db::Db, snapshot::SqliteSnapshot},
    libs::{
        messages::Message,
        schema::{validate, RecordKind},
    },
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// user, task-list, task or label
    kind: RecordKind,
    /// File holding one JSON object with camelCase field names
    file: PathBuf,
}

pub fn cmd(args: ValidateArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.file)?;
    let candidate = match serde_json::from_str::<Value>(&raw)? {
        Value::Object(fields) => fields,
        _ => msg_bail_anyhow!(Message::RecordNotAnObject(args.file.display().to_string())),
    };

    let db = Db::new()?;
    if let Err(e) = validate(args.kind, &candidate, &SqliteSnapshot::new(&db.conn)) {
        msg_bail_anyhow!(Message::RecordRejected(args.kind.to_string(), e.to_string()));
    }

    msg_success!(Message::RecordAccepted(args.kind.to_string()));
    Ok(())
}
