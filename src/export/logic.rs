// src/export/logic.rs

use crate::db::repo::Repository;
use crate::db::store::RecordStore;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ExportRow, bank_rows, summary_rows};
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ReportKind};
use crate::models::{Role, Session, YearMonth};
use crate::ui::messages::warning;
use std::path::Path;

/// What to export and where.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub kind: ReportKind,
    pub format: ExportFormat,
    pub month: YearMonth,
    /// Absolute output path.
    pub file: String,
    /// Bank name filter, bank report only.
    pub bank: Option<String>,
    pub force: bool,
}

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Write the requested report. Returns the number of salary records exported.
    pub fn export<S: RecordStore>(
        repo: &mut Repository<S>,
        session: &Session,
        req: &ExportRequest,
    ) -> AppResult<usize> {
        session.require_role(&[Role::Finance])?;

        let path = Path::new(&req.file);
        if !path.is_absolute() {
            return Err(AppError::invalid(format!(
                "Output file path must be absolute: {}",
                req.file
            )));
        }

        ensure_writable(path, req.force)?;

        let employees = repo.employees()?;
        let salaries = repo.salaries()?;

        let count = match req.kind {
            ReportKind::Summary => {
                let rows = summary_rows(&salaries, &employees, req.month);
                let records = rows.len().saturating_sub(3);
                if records == 0 {
                    warning(format!("No salary records found for {}.", req.month));
                }
                write(&rows, req.format, path, "Payroll")?;
                records
            }
            ReportKind::Bank => {
                let rows = bank_rows(&salaries, &employees, req.month, req.bank.as_deref());
                if rows.is_empty() {
                    warning(format!("No salary records found for {}.", req.month));
                }
                write(&rows, req.format, path, "Bank transfer")?;
                rows.len()
            }
        };

        repo.audit(
            "export",
            &req.file,
            &format!(
                "{} exported {} {} ({} records, {})",
                session.employee_no,
                req.kind.as_str(),
                req.month,
                count,
                req.format.as_str()
            ),
        );

        Ok(count)
    }
}

fn write<T: ExportRow>(rows: &[T], format: ExportFormat, path: &Path, sheet: &str) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
        ExportFormat::Xlsx => export_xlsx(rows, path, sheet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::PayrollPolicy;
    use crate::db::{MemoryStore, SeedContext};
    use std::env;
    use std::fs;

    fn setup() -> Repository<MemoryStore> {
        Repository::new(
            MemoryStore::new(),
            SeedContext::new(YearMonth::new(2026, 2).unwrap(), PayrollPolicy::default()),
        )
    }

    fn request(kind: ReportKind, format: ExportFormat, name: &str) -> ExportRequest {
        let file = env::temp_dir().join(name);
        fs::remove_file(&file).ok();
        ExportRequest {
            kind,
            format,
            month: YearMonth::new(2026, 1).unwrap(),
            file: file.to_string_lossy().to_string(),
            bank: None,
            force: true,
        }
    }

    #[test]
    fn finance_exports_summary_csv() {
        let mut repo = setup();
        let fin = Session::resolve(&repo.employees().unwrap(), "T1003").unwrap();

        let req = request(ReportKind::Summary, ExportFormat::Csv, "perfpay_unit_summary.csv");
        let n = ExportLogic::export(&mut repo, &fin, &req).unwrap();
        assert_eq!(n, 5);

        let content = fs::read_to_string(&req.file).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[0].starts_with("Month,Employee No,Name"));
        assert_eq!(lines.len(), 1 + 5 + 3);
        assert!(lines[1].starts_with("202601,T1001,Zhang San"));
        assert!(lines[8].contains("Grand total"));
    }

    #[test]
    fn bank_json_has_memo() {
        let mut repo = setup();
        let fin = Session::resolve(&repo.employees().unwrap(), "T1003").unwrap();

        let req = request(ReportKind::Bank, ExportFormat::Json, "perfpay_unit_bank.json");
        ExportLogic::export(&mut repo, &fin, &req).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&req.file).unwrap()).unwrap();
        let rows = v.as_array().unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0]["Memo"], "01 salary");
        assert_eq!(rows[0]["Seq"], 1);
    }

    #[test]
    fn xlsx_is_written() {
        let mut repo = setup();
        let fin = Session::resolve(&repo.employees().unwrap(), "T1003").unwrap();

        let req = request(ReportKind::Summary, ExportFormat::Xlsx, "perfpay_unit_summary.xlsx");
        ExportLogic::export(&mut repo, &fin, &req).unwrap();
        assert!(fs::metadata(&req.file).unwrap().len() > 0);
    }

    #[test]
    fn relative_path_and_wrong_role_are_rejected() {
        let mut repo = setup();
        let employees = repo.employees().unwrap();
        let fin = Session::resolve(&employees, "T1003").unwrap();
        let leader = Session::resolve(&employees, "T1002").unwrap();

        let mut req = request(ReportKind::Bank, ExportFormat::Csv, "perfpay_unit_rel.csv");
        assert!(matches!(
            ExportLogic::export(&mut repo, &leader, &req),
            Err(AppError::Forbidden(_))
        ));

        req.file = "relative.csv".to_string();
        assert!(matches!(
            ExportLogic::export(&mut repo, &fin, &req),
            Err(AppError::InvalidInput(_))
        ));
    }
}
