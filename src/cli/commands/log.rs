use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let store = SqliteStore::open(&cfg.database)?;
        LogLogic::print_log(store.pool(), *limit)?;
    }

    Ok(())
}
