use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        if !Path::new(&cfg.database).exists() {
            return Err(AppError::not_found(format!("database file {}", cfg.database)));
        }

        let pool = DbPool::new(&cfg.database)?;
        BackupLogic::backup(&pool, file, *compress, *force)?;
    }

    Ok(())
}
