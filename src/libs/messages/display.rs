//! Display implementation for application messages.
//!
//! All user-facing and log text lives here, so the rest of the code refers
//! to [`Message`] variants instead of string literals. HTTP error bodies use
//! the same text.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id) => format!("Task {} created", id),
            Message::TaskUpdated(id) => format!("Task {} updated", id),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskToggled(id, completed) => {
                format!("Task {} marked as {}", id, if *completed { "completed" } else { "pending" })
            }
            Message::TaskDeletedSuccessfully => "Task deleted successfully".to_string(),
            Message::TaskNotFound => "Task not found".to_string(),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found", id),
            Message::TaskTitleRequired => "Title is required".to_string(),
            Message::TasksNotFound => "No tasks found".to_string(),
            Message::TasksHeader(count) => format!("Tasks ({})", count),

            // === REQUEST MESSAGES ===
            Message::RequestBodyRequired => "Request body is required".to_string(),
            Message::RequestBodyInvalid(err) => format!("Invalid request body: {}", err),
            Message::ConflictingTaskFilters => "Use either 'priority' or 'status' to filter tasks, not both".to_string(),
            Message::InvalidStatusFilter(status) => format!("Unknown status '{}', expected 'completed' or 'pending'", status),
            Message::AccessRestricted => "Access restricted".to_string(),
            Message::InternalServerError => "Internal server error".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerStarting(banner) => format!("Starting {}", banner),
            Message::ServerListening(addr) => format!("Server running on http://{}", addr),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::ShutdownSignalReceived => "Shutdown signal received, starting graceful shutdown".to_string(),
            Message::ShutdownSignalFailed(err) => format!("Failed to install shutdown signal handler: {}", err),
            Message::HealthCheckOk => "TaskMaster API is running".to_string(),
            Message::StaticDirMissing(path) => format!("Static directory '{}' does not exist, /static will return 404", path),

            // === DATABASE MESSAGES ===
            Message::SchemaReady(path) => format!("Task table ready in {}", path),

            // === AUTHENTICATION MESSAGES ===
            Message::AuthEnabled(user) => format!("Basic authentication enabled for user '{}'", user),
            Message::AuthDisabled => "Authentication disabled, all routes are public".to_string(),
            Message::AuthUsernameMissing => "Authentication is enabled but no username is configured (set APP_USER)".to_string(),
            Message::AuthPasswordMissing => "Authentication is enabled but no password is configured (set APP_PASSWORD)".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file found".to_string(),
            Message::ConfigInvalidPort(raw) => format!("Invalid port '{}'", raw),
            Message::ConfigInvalidFlag(name, raw) => format!("Invalid value '{}' for {}, expected true or false", raw, name),

            // === PROMPTS ===
            Message::PromptHost => "Host to bind".to_string(),
            Message::PromptPort => "Port to listen on".to_string(),
            Message::PromptDatabasePath => "Database file".to_string(),
            Message::PromptEnableAuth => "Require a username and password?".to_string(),
            Message::PromptUsername => "Username".to_string(),
        };
        write!(f, "{}", s)
    }
}
