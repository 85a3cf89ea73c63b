use crate::db::pool::DbPool;
use crate::db::store::StoreKey;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(&pool.path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, pool.path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) RECORDS PER COLLECTION
    //
    println!("{}• Collections:{}", CYAN, RESET);
    for key in StoreKey::ALL {
        let row: Option<(i64, String)> = pool
            .conn
            .query_row(
                "SELECT json_array_length(value), updated_at FROM records WHERE key = ?1",
                [key.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        match row {
            Some((count, updated)) => println!(
                "    {:<13} {}{:>4}{} rows  (updated {})",
                key.as_str(),
                GREEN,
                count,
                RESET,
                updated
            ),
            None => println!("    {:<13} {GREY}not initialized{RESET}", key.as_str()),
        }
    }

    //
    // 3) AUDIT LOG
    //
    let log_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Log entries:{} {}", CYAN, RESET, log_rows);

    println!();
    Ok(())
}
