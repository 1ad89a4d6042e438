//! Application building blocks shared by the HTTP server and the CLI.
//!
//! - `config`, `data_storage`: layered settings and their on-disk location
//! - `messages`: every user-facing and log text, plus the `msg_*!` macros
//! - `task`: the task entity, priorities and partial updates
//! - `page`, `view`: HTML and terminal renderings of a task list
//! - `meta`: build-time package metadata
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskmaster::db::tasks::Tasks;
//! use taskmaster::libs::config::Config;
//! use taskmaster::libs::task::{Priority, Task};
//!
//! let config = Config::load()?;
//! let tasks = Tasks::new(config.database_path()?);
//! tasks.init()?;
//! tasks.insert(&Task::new("Implement feature", "Add user authentication", Priority::High, None))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod messages;
pub mod meta;
pub mod page;
pub mod task;
pub mod view;
