use anyhow::Result;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub const DB_FILE_NAME: &str = "tasks.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens a connection to the database file, creating missing parent
    /// directories first.
    pub fn open(path: &Path) -> Result<Db> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let conn = Connection::open(path)?;

        Ok(Db { conn })
    }
}
