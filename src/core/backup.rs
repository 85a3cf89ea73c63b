use crate::db::log::audit_log;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest_file`, optionally zipped.
    /// Returns the path of the file actually written.
    pub fn backup(
        pool: &DbPool,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(&pool.path);
        let dest = Path::new(dest_file);

        if pool.path == ":memory:" || !src.exists() {
            return Err(AppError::not_found(format!("database file {}", pool.path)));
        }
        if !dest.is_absolute() {
            return Err(AppError::invalid(format!(
                "backup path must be absolute: {dest_file}"
            )));
        }

        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_target, force)?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        // flush WAL pages so the copy is consistent
        pool.conn.execute_batch("PRAGMA wal_checkpoint(FULL);").ok();

        let final_path = if compress {
            let zipped = compress_file(src, &final_target)?;
            info(format!("Compressed: {}", zipped.display()));
            zipped
        } else {
            fs::copy(src, dest)?;
            dest.to_path_buf()
        };

        success(format!("Backup created: {}", final_path.display()));

        if let Err(e) = audit_log(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }

        Ok(final_path)
    }
}

/// Write `src` as the single entry of a new zip archive at `zip_path`.
fn compress_file(src: &Path, zip_path: &Path) -> AppResult<PathBuf> {
    let entry_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "perfpay.sqlite".to_string());

    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(src)?;
    zip.start_file(entry_name, options).map_err(io::Error::other)?;

    io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(io::Error::other)?;

    Ok(zip_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::SqliteStore;
    use std::env;

    fn temp(name: &str) -> PathBuf {
        let p = env::temp_dir().join(name);
        fs::remove_file(&p).ok();
        p
    }

    #[test]
    fn memory_database_cannot_be_backed_up() {
        let pool = DbPool::in_memory().unwrap();
        let dest = temp("perfpay_unit_mem_backup.sqlite");
        let err = BackupLogic::backup(&pool, &dest.to_string_lossy(), false, true).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn backup_copies_and_zips() {
        let db = temp("perfpay_unit_backup_src.sqlite");
        let store = SqliteStore::open(&db.to_string_lossy()).unwrap();

        let plain = temp("perfpay_unit_backup_copy.sqlite");
        let out = BackupLogic::backup(store.pool(), &plain.to_string_lossy(), false, true).unwrap();
        assert_eq!(out, plain);
        assert!(plain.exists());

        let zipped = temp("perfpay_unit_backup_copy.zip");
        let out = BackupLogic::backup(store.pool(), &plain.to_string_lossy(), true, true).unwrap();
        assert_eq!(out, zipped);
        assert!(zipped.exists());

        let rows = crate::db::log::load_log(store.pool(), Some(1)).unwrap();
        assert_eq!(rows[0].operation, "backup");
    }

    #[test]
    fn relative_destination_is_rejected() {
        let db = temp("perfpay_unit_backup_rel.sqlite");
        let store = SqliteStore::open(&db.to_string_lossy()).unwrap();
        let err = BackupLogic::backup(store.pool(), "backup.sqlite", false, true).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
