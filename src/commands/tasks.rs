use crate::{
    db::tasks::Tasks,
    libs::{
        config::Config,
        messages::Message,
        task::{Priority, TaskFilter},
        view::View,
    },
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct TasksArgs {
    /// Only tasks with this priority (low, medium, high)
    #[arg(short, long, conflicts_with_all = ["completed", "pending"])]
    priority: Option<String>,
    /// Only completed tasks
    #[arg(short, long, conflicts_with = "pending")]
    completed: bool,
    /// Only open tasks
    #[arg(long)]
    pending: bool,
}

impl TasksArgs {
    fn filter(&self) -> TaskFilter {
        match (&self.priority, self.completed, self.pending) {
            (Some(priority), _, _) => TaskFilter::Priority(Priority::from(priority.as_str())),
            (None, true, _) => TaskFilter::Completed,
            (None, false, true) => TaskFilter::Pending,
            (None, false, false) => TaskFilter::All,
        }
    }
}

pub fn cmd(tasks_args: TasksArgs) -> Result<()> {
    let config = Config::load()?;
    let tasks = Tasks::new(config.database_path()?);
    tasks.init()?;

    let found = tasks.fetch(tasks_args.filter())?;
    if found.is_empty() {
        msg_print!(Message::TasksNotFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader(found.len()), true);
    View::tasks(&found)
}
