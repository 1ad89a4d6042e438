//! Server-rendered HTML task list.
//!
//! The page shows every task with its priority badge, due date and an
//! overdue marker, plus summary counters. Interactions (create, toggle,
//! delete) are handled by `/static/js/app.js` through the JSON API.

use super::task::Task;
use chrono::NaiveDate;
use std::fmt::Write;

/// Counters shown in the page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl Summary {
    pub fn from_tasks(tasks: &[Task], today: NaiveDate) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Summary {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
            overdue: tasks.iter().filter(|task| task.is_overdue_on(today)).count(),
        }
    }
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the full index page for `tasks` as of `today`.
pub fn render_index(tasks: &[Task], today: NaiveDate) -> String {
    let summary = Summary::from_tasks(tasks, today);
    let mut html = String::with_capacity(2048 + tasks.len() * 512);

    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>TaskMaster</title>
<link rel="stylesheet" href="/static/css/app.css">
</head>
<body>
<header class="header">
<h1>TaskMaster</h1>
"#,
    );

    let _ = write!(
        html,
        r#"<ul class="stats">
<li><span id="totalTasks">{}</span> total</li>
<li><span id="pendingTasks">{}</span> pending</li>
<li><span id="completedTasks">{}</span> completed</li>
<li><span id="overdueTasks">{}</span> overdue</li>
</ul>
</header>
"#,
        summary.total, summary.pending, summary.completed, summary.overdue
    );

    html.push_str(
        r#"<main>
<form id="taskForm" class="task-form">
<input name="title" placeholder="New task" required>
<input name="description" placeholder="Description">
<select name="priority">
<option value="low">Low</option>
<option value="medium" selected>Medium</option>
<option value="high">High</option>
</select>
<input name="due_date" type="date">
<button type="submit">Add</button>
</form>
"#,
    );

    if tasks.is_empty() {
        html.push_str("<p id=\"emptyState\" class=\"empty\">No tasks yet.</p>\n");
    } else {
        html.push_str("<ul id=\"tasksContainer\" class=\"tasks\">\n");
        for task in tasks {
            render_task(&mut html, task, today);
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</main>\n<script src=\"/static/js/app.js\"></script>\n</body>\n</html>\n");
    html
}

fn render_task(html: &mut String, task: &Task, today: NaiveDate) {
    let id = task.id.unwrap_or_default();
    let mut classes = format!("task-item priority-{}", escape_html(task.priority.as_str()));
    if task.completed {
        classes.push_str(" task-completed");
    }
    let overdue = task.is_overdue_on(today);
    if overdue {
        classes.push_str(" overdue");
    }

    let _ = write!(
        html,
        r#"<li class="{}" data-task-id="{}">
<input type="checkbox" class="task-checkbox" data-task-id="{}"{}>
<span class="task-title">{}</span>
<span class="task-priority-badge {}">{}</span>
"#,
        classes,
        id,
        id,
        if task.completed { " checked" } else { "" },
        escape_html(&task.title),
        task.priority.badge_class(),
        escape_html(task.priority.as_str()),
    );

    if !task.description.is_empty() {
        let _ = writeln!(html, r#"<p class="task-description">{}</p>"#, escape_html(&task.description));
    }
    if let Some(due_date) = &task.due_date {
        let _ = writeln!(html, r#"<span class="task-due-date">Due {}</span>"#, escape_html(due_date));
    }
    if overdue {
        html.push_str("<span class=\"task-overdue-badge badge bg-danger\">Overdue</span>\n");
    }

    html.push_str("<button class=\"delete-task\" type=\"button\">Delete</button>\n</li>\n");
}
