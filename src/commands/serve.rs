//! HTTP server command.
//!
//! Resolves the layered configuration, creates the task table if needed and
//! serves the application until Ctrl+C or SIGTERM.

use super::init_tracing;
use crate::{
    db::tasks::Tasks,
    http::{self, AppState},
    libs::{config::Config, messages::Message, meta},
    msg_error, msg_info, msg_warning,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Interface to bind
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,
    /// SQLite database file
    #[arg(long)]
    db: Option<PathBuf>,
    /// Directory served under /static
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Require basic authentication
    #[arg(long, conflicts_with = "no_auth")]
    auth: bool,
    /// Serve every route without authentication
    #[arg(long)]
    no_auth: bool,
    /// Username for basic authentication (the password comes from APP_PASSWORD)
    #[arg(long)]
    user: Option<String>,
    /// Verbose logging
    #[arg(long)]
    debug: bool,
}

impl ServeArgs {
    /// Overlays the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(db) = &self.db {
            config.database_path = Some(db.clone());
        }
        if let Some(static_dir) = &self.static_dir {
            config.server.static_dir = static_dir.clone();
        }
        if self.auth {
            config.auth.enabled = true;
        }
        if self.no_auth {
            config.auth.enabled = false;
        }
        if let Some(user) = &self.user {
            config.auth.username = Some(user.clone());
        }
        if self.debug {
            config.debug = true;
        }
    }
}

pub async fn cmd(serve_args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;
    serve_args.apply(&mut config);
    init_tracing(config.debug);

    msg_info!(Message::ServerStarting(meta::banner()));

    // Fail before binding if auth is enabled but incomplete.
    let credentials = config.credentials()?;
    match &credentials {
        Some(credentials) => {
            msg_info!(Message::AuthEnabled(credentials.username.clone()));
        }
        None => {
            msg_info!(Message::AuthDisabled);
        }
    }

    let tasks = Tasks::new(config.database_path()?);
    tasks.init()?;
    msg_info!(Message::SchemaReady(tasks.path().display().to_string()));

    if !config.server.static_dir.is_dir() {
        msg_warning!(Message::StaticDirMissing(config.server.static_dir.display().to_string()));
    }

    let app = http::router(AppState::new(tasks, credentials), &config.server.static_dir);
    let listener = TcpListener::bind(config.server.address()).await?;
    msg_info!(Message::ServerListening(listener.local_addr()?.to_string()));

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    msg_info!(Message::ServerStopped);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            msg_error!(Message::ShutdownSignalFailed(err.to_string()));
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                msg_error!(Message::ShutdownSignalFailed(err.to_string()));
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    msg_info!(Message::ShutdownSignalReceived);
}
