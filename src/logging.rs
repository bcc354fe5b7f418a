// Log output goes to a file in the data directory so it never mixes with
// the interactive menus on the terminal.

use crate::config::Config;
use crate::error::RecordsError;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;

pub fn init(config: &Config) -> Result<(), RecordsError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())?;
    let log_config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    WriteLogger::init(config.log_level(), log_config, file)?;
    log::info!("logging to {}", config.log_file().display());
    Ok(())
}
