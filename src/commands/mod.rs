pub mod init;
pub mod serve;
pub mod tasks;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server")]
    Serve(serve::ServeArgs),
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List tasks")]
    Tasks(tasks::TasksArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Serve(args) => serve::cmd(args).await,
            Commands::Init(args) => {
                init_tracing(false);
                init::cmd(args)
            }
            Commands::Tasks(args) => {
                init_tracing(false);
                tasks::cmd(args)
            }
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `debug`.
pub fn init_tracing(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,taskmaster={level},tower_http={level}")));

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .try_init();
}
