use super::models::{Label, Task, TaskList, User};
use anyhow::Result;
use chrono::{DateTime, Utc};
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn users(users: &[User]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "USERNAME", "EMAIL", "CREATED", "UPDATED"]);
        for user in users {
            table.add_row(row![
                user.id,
                user.username,
                user.email,
                Self::timestamp(&user.created_at),
                user.updated_at.as_ref().map(Self::timestamp).unwrap_or_default()
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn task_lists(lists: &[TaskList]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "OWNER", "CREATED"]);
        for list in lists {
            table.add_row(row![
                list.id,
                list.title,
                list.description.as_deref().unwrap_or(""),
                list.user_id,
                Self::timestamp(&list.created_at)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "DESCRIPTION", "DUE", "DONE", "LIST"]);
        for task in tasks {
            let done = if task.completed { "✓" } else { "" };
            table.add_row(row![
                task.id,
                task.title,
                task.description.as_deref().unwrap_or(""),
                task.due_date.map(|due| due.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                done,
                task.task_list_id
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn labels(labels: &[Label]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "COLOR", "OWNER"]);
        for label in labels {
            table.add_row(row![label.id, label.name, label.color.as_deref().unwrap_or(""), label.user_id]);
        }
        table.printstd();

        Ok(())
    }

    fn timestamp(at: &DateTime<Utc>) -> String {
        at.format("%Y-%m-%d %H:%M").to_string()
    }
}
