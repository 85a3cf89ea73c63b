use crate::cli::commands::{month_or_current, open_repo, session};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};
use crate::ui::messages::info;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        kind,
        format,
        month,
        file,
        bank,
        force,
    } = &cli.command
    {
        let mut repo = open_repo(cfg)?;
        let me = session(&mut repo, cli)?;

        let req = ExportRequest {
            kind: *kind,
            format: *format,
            month: month_or_current(month),
            file: file.clone(),
            bank: bank.clone(),
            force: *force,
        };

        let count = ExportLogic::export(&mut repo, &me, &req)?;
        info(format!(
            "{} {}: {} record(s).",
            req.kind.as_str(),
            req.month,
            count
        ));
    }

    Ok(())
}
