//! # TaskMaster
//!
//! A small task tracker: a SQLite-backed store, a JSON API with an HTML
//! list view served by axum, and a command-line companion.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskmaster::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod http;
pub mod libs;
