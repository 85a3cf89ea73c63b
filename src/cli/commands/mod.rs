pub mod backup;
pub mod config;
pub mod db;
pub mod employee;
pub mod export;
pub mod init;
pub mod log;
pub mod perf;
pub mod salary;
pub mod whoami;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::{Repository, SeedContext, SqliteStore};
use crate::errors::{AppError, AppResult};
use crate::models::{Session, YearMonth};

/// Open the configured store. An empty store is seeded around the current month.
pub(crate) fn open_repo(cfg: &Config) -> AppResult<Repository<SqliteStore>> {
    let store = SqliteStore::open(&cfg.database)?;
    Ok(Repository::new(
        store,
        SeedContext::new(YearMonth::current(), cfg.policy()),
    ))
}

/// Resolve the `--as` user against the stored employees.
pub(crate) fn session(repo: &mut Repository<SqliteStore>, cli: &Cli) -> AppResult<Session> {
    let ident = cli
        .as_user
        .as_deref()
        .ok_or_else(|| AppError::invalid("this command needs --as <employee no or id>"))?;
    Session::resolve(&repo.employees()?, ident)
}

pub(crate) fn month_or_current(month: &Option<YearMonth>) -> YearMonth {
    month.unwrap_or_else(YearMonth::current)
}
