//! Task persistence.
//!
//! [`Tasks`] is the only component that talks to the `tasks` table. It keeps
//! nothing but the database path: every call opens its own connection,
//! runs a single statement and drops the connection again.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskmaster::db::tasks::Tasks;
//! use taskmaster::libs::task::{Priority, Task};
//!
//! let tasks = Tasks::new("tasks.db");
//! tasks.init()?;
//! let id = tasks.insert(&Task::new("Buy milk", "", Priority::Medium, None))?;
//! assert!(tasks.get_by_id(id)?.is_some());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::db::Db;
use crate::libs::messages::Message;
use crate::libs::task::{timestamp_after, timestamp_now, Priority, Task, TaskFilter};
use crate::msg_debug;
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::types::ValueRef;
use rusqlite::{params, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use thiserror::Error;

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    priority TEXT DEFAULT 'medium',
    due_date TEXT,
    completed BOOLEAN DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, priority, due_date, completed, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?2, description = ?3, priority = ?4, due_date = ?5, completed = ?6, updated_at = ?7 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const SELECT_TASKS: &str = "SELECT id, title, description, priority, due_date, completed, created_at, updated_at FROM tasks";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_PRIORITY: &str = "WHERE priority = ?1";
// Same flag spellings as `completed_from_row` accepts.
const WHERE_COMPLETED: &str = "WHERE trim(completed) IN ('1', 'true')";
const WHERE_PENDING: &str = "WHERE trim(completed) IN ('0', 'false')";
// ISO `T` separators are compared as spaces so both text forms sort together.
const ORDER_BY_CREATED: &str = "ORDER BY replace(created_at, 'T', ' ') DESC, id DESC";
const ORDER_BY_UPDATED: &str = "ORDER BY replace(updated_at, 'T', ' ') DESC, id DESC";

/// Storage format of `created_at` / `updated_at`. Fixed width, so text
/// ordering in SQL matches chronological ordering.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
/// Accepted on read: our own format, SQLite's `CURRENT_TIMESTAMP` and ISO-8601.
const TIMESTAMP_READ_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

#[derive(Debug, Error)]
enum RowError {
    #[error("invalid completion flag: {0}")]
    Completed(String),
    #[error("invalid timestamp: {0}")]
    Timestamp(String),
}

#[derive(Debug, Clone)]
pub struct Tasks {
    path: PathBuf,
}

impl Tasks {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Tasks { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the table if it does not exist yet. Safe to call on every start.
    pub fn init(&self) -> Result<()> {
        let db = Db::open(&self.path)?;
        db.conn.execute(SCHEMA_TASKS, [])?;
        msg_debug!(Message::SchemaReady(self.path.display().to_string()));

        Ok(())
    }

    /// Inserts a new row using the task's construction timestamps and returns
    /// the assigned id. Any id already on `task` is ignored.
    pub fn insert(&self, task: &Task) -> Result<i64> {
        let now = timestamp_now();
        let created_at = task.created_at.unwrap_or(now);
        let updated_at = task.updated_at.unwrap_or(created_at);

        let db = Db::open(&self.path)?;
        db.conn.execute(
            INSERT_TASK,
            params![
                task.title,
                task.description,
                task.priority.as_str(),
                task.due_date,
                task.completed,
                format_timestamp(created_at),
                format_timestamp(updated_at),
            ],
        )?;
        let id = db.conn.last_insert_rowid();
        msg_debug!(Message::TaskCreated(id));

        Ok(id)
    }

    pub fn fetch(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let db = Db::open(&self.path)?;
        let (sql, priority) = match filter {
            TaskFilter::All => (format!("{} {}", SELECT_TASKS, ORDER_BY_CREATED), None),
            TaskFilter::Priority(priority) => (format!("{} {} {}", SELECT_TASKS, WHERE_PRIORITY, ORDER_BY_CREATED), Some(priority)),
            TaskFilter::Completed => (format!("{} {} {}", SELECT_TASKS, WHERE_COMPLETED, ORDER_BY_UPDATED), None),
            TaskFilter::Pending => (format!("{} {} {}", SELECT_TASKS, WHERE_PENDING, ORDER_BY_CREATED), None),
        };

        let mut stmt = db.conn.prepare(&sql)?;
        let task_iter = match &priority {
            Some(priority) => stmt.query_map(params![priority.as_str()], task_from_row)?,
            None => stmt.query_map([], task_from_row)?,
        };
        let mut tasks = Vec::new();
        for task_result in task_iter {
            tasks.push(task_result?);
        }

        Ok(tasks)
    }

    /// Every task, newest first.
    pub fn get_all(&self) -> Result<Vec<Task>> {
        self.fetch(TaskFilter::All)
    }

    pub fn get_by_priority(&self, priority: Priority) -> Result<Vec<Task>> {
        self.fetch(TaskFilter::Priority(priority))
    }

    /// Completed tasks, most recently updated first.
    pub fn get_completed(&self) -> Result<Vec<Task>> {
        self.fetch(TaskFilter::Completed)
    }

    /// Open tasks, newest first.
    pub fn get_pending(&self) -> Result<Vec<Task>> {
        self.fetch(TaskFilter::Pending)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        let db = Db::open(&self.path)?;
        db.conn
            .query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id], task_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Rewrites every mutable column of the task and refreshes `updated_at`
    /// (also on `task`). A task without an id, or whose row is gone, is not
    /// an error: the result is simply `false`.
    pub fn update(&self, task: &mut Task) -> Result<bool> {
        let Some(id) = task.id else {
            return Ok(false);
        };
        let updated_at = timestamp_after(task.updated_at);

        let db = Db::open(&self.path)?;
        let affected = db.conn.execute(
            UPDATE_TASK,
            params![
                id,
                task.title,
                task.description,
                task.priority.as_str(),
                task.due_date,
                task.completed,
                format_timestamp(updated_at),
            ],
        )?;
        if affected > 0 {
            task.updated_at = Some(updated_at);
            msg_debug!(Message::TaskUpdated(id));
        }

        Ok(affected > 0)
    }

    pub fn delete(&self, id: i64) -> Result<bool> {
        let db = Db::open(&self.path)?;
        let affected = db.conn.execute(DELETE_TASK, params![id])?;
        if affected > 0 {
            msg_debug!(Message::TaskDeleted(id));
        }

        Ok(affected > 0)
    }
}

fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    let description: Option<String> = row.get("description")?;
    let priority: Option<String> = row.get("priority")?;

    Ok(Task {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        description: description.unwrap_or_default(),
        priority: priority.map(Priority::from).unwrap_or_default(),
        due_date: row.get("due_date")?,
        completed: completed_from_row(row, "completed")?,
        created_at: Some(timestamp_from_row(row, "created_at")?),
        updated_at: Some(timestamp_from_row(row, "updated_at")?),
    })
}

fn completed_from_row(row: &Row<'_>, column: &str) -> rusqlite::Result<bool> {
    let idx = row.as_ref().column_index(column)?;
    let value = row.get_ref(idx)?;
    let parsed = match value {
        ValueRef::Integer(0) => Some(false),
        ValueRef::Integer(1) => Some(true),
        ValueRef::Text(text) => match std::str::from_utf8(text).map(str::trim) {
            Ok("0") | Ok("false") => Some(false),
            Ok("1") | Ok("true") => Some(true),
            _ => None,
        },
        _ => None,
    };

    parsed.ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(idx, value.data_type(), Box::new(RowError::Completed(format!("{:?}", value))))
    })
}

fn timestamp_from_row(row: &Row<'_>, column: &str) -> rusqlite::Result<NaiveDateTime> {
    let idx = row.as_ref().column_index(column)?;
    let value = row.get_ref(idx)?;
    let text = match value {
        ValueRef::Text(text) => std::str::from_utf8(text).ok(),
        _ => None,
    };

    text.and_then(|text| {
        TIMESTAMP_READ_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text.trim(), format).ok())
    })
    .ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(idx, value.data_type(), Box::new(RowError::Timestamp(format!("{:?}", value))))
    })
}
