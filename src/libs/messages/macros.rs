//! Macros for application messaging and logging.
//!
//! Two kinds of output go through here:
//!
//! - **Console output** (`msg_print!`, `msg_success!`): results of command-line
//!   commands, written to stdout.
//! - **Log output** (`msg_info!`, `msg_warning!`, `msg_error!`, `msg_debug!`):
//!   routed to `tracing`, so the subscriber installed at startup decides level
//!   and format.
//!
//! `msg_error_anyhow!` and `msg_bail_anyhow!` turn a [`Message`] into an
//! `anyhow::Error` for propagation.
//!
//! ## Usage
//!
//! ```rust
//! use taskmaster::libs::messages::Message;
//! use taskmaster::{msg_debug, msg_info};
//!
//! msg_info!(Message::ServerListening("127.0.0.1:5000".to_string()));
//! msg_debug!(Message::TaskCreated(1));
//! ```
//!
//! [`Message`]: crate::libs::messages::Message

/// Prints a message to stdout.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        println!("{}", $msg);
    };
    ($msg:expr, true) => {
        println!("\n{}\n", $msg);
    };
}

/// Prints a success message with ✅ prefix to stdout.
#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        println!("✅ {}", $msg);
    };
    ($msg:expr, true) => {
        println!("\n✅ {}\n", $msg);
    };
}

#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        tracing::error!("{}", $msg);
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        tracing::warn!("{}", $msg);
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        tracing::info!("{}", $msg);
    };
}

#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        tracing::debug!("{}", $msg);
    };
}

/// Creates an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("{}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("{}", $msg)
    };
}
