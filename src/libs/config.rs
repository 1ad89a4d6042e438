//! Configuration management.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults,
//! 2. `config.json` in the application data directory,
//! 3. environment variables (a `.env` file in the working directory is
//!    loaded first),
//! 4. command-line flags of the `serve` command.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\taskmaster\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/taskmaster/config.json`
//! - **Linux**: `~/.local/share/lacodda/taskmaster/config.json`
//!
//! The password for basic authentication is never written to the file; it is
//! only ever read from `APP_PASSWORD`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskmaster::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("listening on {}", config.server.address());
//! if let Some(credentials) = config.credentials()? {
//!     println!("auth user: {}", credentials.username);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_error_anyhow};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "static";

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATABASE_PATH: &str = "DATABASE_PATH";
pub const ENV_STATIC_DIR: &str = "STATIC_DIR";
pub const ENV_AUTH: &str = "APP_AUTH";
pub const ENV_USER: &str = "APP_USER";
pub const ENV_PASSWORD: &str = "APP_PASSWORD";
pub const ENV_DEBUG: &str = "TASKMASTER_DEBUG";

/// HTTP listener settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, `0.0.0.0` for all.
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Basic authentication settings.
///
/// Disabled by default. When enabled, both a username and a password must
/// be available at startup.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Only ever populated from the environment.
    #[serde(skip)]
    pub password: Option<String>,
}

/// The single username/password pair accepted by the server.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    /// SQLite database file. Defaults to `tasks.db` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Raises the default log level to `debug`.
    #[serde(default)]
    pub debug: bool,
}

impl Config {
    /// Effective configuration: file, then `.env`/environment on top.
    pub fn load() -> Result<Config> {
        let _ = dotenv::dotenv();
        Config::read()?.with_env(|key| std::env::var(key).ok())
    }

    /// Reads `config.json` from the data directory, or returns the defaults
    /// when there is none.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Config::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration to the data directory and returns the path.
    pub fn save(&self) -> Result<PathBuf> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)?;
        Ok(config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json`. Returns whether there was one.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Overlays environment values obtained through `lookup`.
    ///
    /// Empty values are ignored. Malformed ports and flags are errors rather
    /// than silently falling back to defaults.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        if let Some(host) = get(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            self.server.port = port.parse().map_err(|_| msg_error_anyhow!(Message::ConfigInvalidPort(port.clone())))?;
        }
        if let Some(static_dir) = get(ENV_STATIC_DIR) {
            self.server.static_dir = PathBuf::from(static_dir);
        }
        if let Some(path) = get(ENV_DATABASE_PATH) {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(flag) = get(ENV_AUTH) {
            self.auth.enabled = parse_flag(ENV_AUTH, &flag)?;
        }
        if let Some(username) = get(ENV_USER) {
            self.auth.username = Some(username);
        }
        // Passwords may legitimately contain surrounding whitespace.
        if let Some(password) = lookup(ENV_PASSWORD).filter(|value| !value.is_empty()) {
            self.auth.password = Some(password);
        }
        if let Some(flag) = get(ENV_DEBUG) {
            self.debug = parse_flag(ENV_DEBUG, &flag)?;
        }

        Ok(self)
    }

    /// Database file to use, falling back to the data directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    /// Credentials to enforce, `None` when authentication is disabled.
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        if !self.auth.enabled {
            return Ok(None);
        }
        let Some(username) = self.auth.username.clone() else {
            msg_bail_anyhow!(Message::AuthUsernameMissing);
        };
        let Some(password) = self.auth.password.clone() else {
            msg_bail_anyhow!(Message::AuthPasswordMissing);
        };

        Ok(Some(Credentials { username, password }))
    }

    /// Interactive setup, starting from the current values.
    pub fn init(&self) -> Result<Config> {
        let theme = ColorfulTheme::default();
        let mut config = self.clone();

        config.server.host = Input::with_theme(&theme)
            .with_prompt(Message::PromptHost.to_string())
            .default(config.server.host.clone())
            .interact_text()?;
        config.server.port = Input::with_theme(&theme)
            .with_prompt(Message::PromptPort.to_string())
            .default(config.server.port)
            .interact_text()?;

        let database_path: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDatabasePath.to_string())
            .default(config.database_path()?.display().to_string())
            .interact_text()?;
        config.database_path = Some(PathBuf::from(database_path));

        config.auth.enabled = Confirm::with_theme(&theme)
            .with_prompt(Message::PromptEnableAuth.to_string())
            .default(config.auth.enabled)
            .interact()?;
        if config.auth.enabled {
            let username: String = Input::with_theme(&theme)
                .with_prompt(Message::PromptUsername.to_string())
                .default(config.auth.username.clone().unwrap_or_else(|| "admin".to_string()))
                .interact_text()?;
            config.auth.username = Some(username);
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(msg_error_anyhow!(Message::ConfigInvalidFlag(name.to_string(), raw.to_string()))),
    }
}
