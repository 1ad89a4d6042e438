//! Task entity and its presentation helpers.
//!
//! A [`Task`] is the only record the application stores. It carries the
//! user-facing fields (title, description, priority, due date, completion
//! flag) plus two timestamps managed by the application itself.
//!
//! ## Usage
//!
//! ```rust
//! use taskmaster::libs::task::{Priority, Task};
//!
//! let mut task = Task::new("Buy milk", "", Priority::Medium, None);
//! task.toggle_completed();
//! assert!(task.completed);
//! ```

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format of the `due_date` field.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local time at the microsecond precision used in storage.
pub fn timestamp_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(6)
}

/// Next `updated_at` value after `previous`: the current time, or one
/// microsecond past `previous` if the clock has not moved beyond it.
pub fn timestamp_after(previous: Option<NaiveDateTime>) -> NaiveDateTime {
    let now = timestamp_now();
    match previous {
        Some(previous) if previous >= now => previous + Duration::microseconds(1),
        _ => now,
    }
}

/// Task priority.
///
/// The three known levels drive the presentation helpers. Any other value
/// is kept verbatim in [`Priority::Other`] so that it round-trips through
/// storage unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Other(String),
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Other(value) => value,
        }
    }

    /// CSS text color class for the priority.
    pub fn text_class(&self) -> &'static str {
        match self {
            Priority::Low => "text-success",
            Priority::Medium => "text-warning",
            Priority::High => "text-danger",
            Priority::Other(_) => "text-secondary",
        }
    }

    /// CSS badge class for the priority.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Priority::Low => "badge bg-success",
            Priority::Medium => "badge bg-warning",
            Priority::High => "badge bg-danger",
            Priority::Other(_) => "badge bg-secondary",
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        match value.as_str() {
            "low" => Priority::Low,
            "medium" => Priority::Medium,
            "high" => Priority::High,
            _ => Priority::Other(value),
        }
    }
}

impl From<&str> for Priority {
    fn from(value: &str) -> Self {
        Priority::from(value.to_string())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single to-do item.
///
/// `id` is `None` until the store assigns one on insert. Both timestamps are
/// stamped at construction; `updated_at` moves forward on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub completed: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(title: &str, description: &str, priority: Priority, due_date: Option<String>) -> Self {
        let now = timestamp_now();
        Task {
            id: None,
            title: title.to_string(),
            description: description.to_string(),
            priority,
            due_date,
            completed: false,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.touch();
    }

    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.touch();
    }

    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
        self.touch();
    }

    /// Applies every field present in `patch`, leaving the rest untouched.
    ///
    /// Returns `true` if at least one field was supplied.
    pub fn apply(&mut self, patch: TaskPatch) -> bool {
        let mut changed = false;
        if let Some(title) = patch.title {
            self.title = title;
            changed = true;
        }
        if let Some(description) = patch.description {
            self.description = description;
            changed = true;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
            changed = true;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
            changed = true;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
            changed = true;
        }
        if changed {
            self.touch();
        }
        changed
    }

    /// Whether the task is past its due date and still open, judged against
    /// the local calendar date.
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    /// Same as [`Task::is_overdue`] against an explicit `today`.
    ///
    /// A missing or unparsable due date is never overdue.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        if self.completed {
            return false;
        }
        self.due_date
            .as_deref()
            .and_then(|due| NaiveDate::parse_from_str(due, DUE_DATE_FORMAT).ok())
            .is_some_and(|due| due < today)
    }

    fn touch(&mut self) {
        self.updated_at = Some(timestamp_after(self.updated_at));
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.completed { "✓" } else { "○" };
        write!(f, "[{}] {} ({})", status, self.title, self.priority)
    }
}

/// Partial update of a task.
///
/// Absent and `null` fields both deserialize to `None` and leave the stored
/// value as is.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskFilter {
    All,
    Priority(Priority),
    Completed,
    Pending,
}
