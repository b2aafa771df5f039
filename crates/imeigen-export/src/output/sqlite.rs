use std::path::Path;

use rusqlite::{Connection, params};
use tracing::info;

use imeigen_generate::DeviceBatch;

use crate::at::mikrotik_at_command;
use crate::errors::ExportError;
use crate::output::ExportOptions;

/// SQLite export: `devices` and `imeis` tables, one row per IMEI.
///
/// The `imei` column is unique; re-exporting into an existing database
/// skips duplicate IMEIs instead of failing.
pub fn write_sqlite_export(
    path: &Path,
    devices: &[DeviceBatch],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let mut conn = Connection::open(path)?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS devices (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            device_type TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        );
        CREATE TABLE IF NOT EXISTS imeis (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            device_id INTEGER,
            tac TEXT NOT NULL,
            imei TEXT NOT NULL UNIQUE,
            at_command TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (device_id) REFERENCES devices (id)
        );",
    )?;

    let tx = conn.transaction()?;
    let mut rows = 0u64;
    for device in devices {
        tx.execute(
            "INSERT INTO devices (name, device_type) VALUES (?1, ?2)",
            params![device.name, device.device_type.to_string()],
        )?;
        let device_id = tx.last_insert_rowid();

        for batch in &device.batches {
            for imei in &batch.imeis {
                let at_command = options
                    .include_at_commands
                    .then(|| mikrotik_at_command(imei, &options.interface));
                tx.execute(
                    "INSERT OR IGNORE INTO imeis (device_id, tac, imei, at_command)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![device_id, batch.tac, imei, at_command],
                )?;
                rows += 1;
            }
        }
    }
    tx.commit()?;

    info!(path = %path.display(), rows, "wrote sqlite export");
    Ok(())
}
