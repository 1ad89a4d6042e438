//! Interactive configuration setup.
//!
//! Walks through the settings stored in `config.json`, starting from the
//! current values, then creates the task table in the chosen database.

use crate::{
    db::tasks::Tasks,
    libs::{config::Config, messages::Message},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        if Config::delete()? {
            msg_success!(Message::ConfigDeleted);
        } else {
            msg_print!(Message::ConfigNotFound);
        }
        return Ok(());
    }

    // Start from the file only, so environment overrides are not persisted.
    let config = Config::read()?.init()?;
    let config_path = config.save()?;
    Tasks::new(config.database_path()?).init()?;

    msg_success!(Message::ConfigSaved(config_path.display().to_string()));
    Ok(())
}
