use crate::cli::parser::Cli;
use crate::cli::commands::open_repo;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{header, info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the SQLite database with all pending migrations
///  - the demo data of an empty store
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;

    header("Initializing perfpay");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", cfg.database));

    let mut repo = open_repo(&cfg)?;
    repo.ensure_seeded()?;

    repo.audit(
        "init",
        "database",
        &format!("Database initialized at {}", cfg.database),
    );

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
