//! Database layer.
//!
//! A single SQLite file holds the `tasks` table. Connections are opened per
//! operation, so the store itself is just a path and can be cloned freely
//! into request handlers.

/// Connection opening and the default database file name.
pub mod db;

/// Task CRUD and filtered reads.
pub mod tasks;
