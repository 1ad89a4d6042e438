use super::task::Task;
use anyhow::Result;
use prettytable::{format, row, Table};

pub struct View {}

impl View {
    /// Prints tasks as a terminal table. Overdue tasks are flagged with `!`.
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);

        table.set_titles(row!["ID", "TITLE", "PRIORITY", "DUE", "STATUS"]);
        for task in tasks {
            let due = match (&task.due_date, task.is_overdue()) {
                (Some(date), true) => format!("{} !", date),
                (Some(date), false) => date.clone(),
                (None, _) => String::new(),
            };
            let status = if task.completed { "done" } else { "pending" };

            table.add_row(row![task.id.unwrap_or(0), task.title, task.priority, due, status]);
        }
        table.printstd();

        Ok(())
    }
}
