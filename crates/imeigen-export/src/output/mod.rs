use std::path::Path;

use imeigen_generate::DeviceBatch;

use crate::at::{DEFAULT_LTE_INTERFACE, utc_timestamp};
use crate::errors::ExportError;

pub mod csv;
pub mod json;
pub mod sqlite;
pub mod text;

/// File format for a full-catalog export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Csv,
    Json,
    Sqlite,
}

impl ExportFormat {
    /// Filename extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Sqlite => "sqlite",
        }
    }
}

/// Options shared by the export writers.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Include generation timestamps in headers and metadata.
    pub include_timestamps: bool,
    /// Emit a MikroTik AT command next to each IMEI.
    pub include_at_commands: bool,
    /// LTE interface used when AT commands are included.
    pub interface: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_timestamps: true,
            include_at_commands: false,
            interface: DEFAULT_LTE_INTERFACE.to_string(),
        }
    }
}

/// Default export filename: `all_imeis_<UTC timestamp>.<ext>`.
pub fn default_export_filename(format: ExportFormat) -> String {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    format!("all_imeis_{stamp}.{}", format.extension())
}

/// Write `devices` to `path` in the requested format.
pub fn write_export(
    format: ExportFormat,
    path: &Path,
    devices: &[DeviceBatch],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        ExportFormat::Txt => text::write_text_export(path, devices, options),
        ExportFormat::Csv => csv::write_csv_export(path, devices, options),
        ExportFormat::Json => json::write_json_export(path, devices, options),
        ExportFormat::Sqlite => sqlite::write_sqlite_export(path, devices, options),
    }
}

pub(crate) fn timestamp_line(options: &ExportOptions) -> Option<String> {
    options.include_timestamps.then(utc_timestamp)
}
