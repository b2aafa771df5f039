use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use imeigen_core::{CATALOG_VERSION, Catalog, DeviceRecord, validate_catalog};

/// Device table shipped with the binary, used when no `--catalog` file is
/// given.
const DEFAULT_CATALOG_JSON: &str = include_str!("../assets/default_catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("core error: {0}")]
    Core(#[from] imeigen_core::Error),
    #[error("invalid catalog path: {0}")]
    InvalidPath(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Load and validate a catalog: the given JSON file, or the embedded
/// default when no path is supplied.
pub fn load_catalog(path: Option<&Path>) -> CatalogResult<Catalog> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_CATALOG_JSON.to_string(),
    };
    let catalog: Catalog = serde_json::from_str(&contents)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

/// Append a device to the catalog file, creating it when missing.
///
/// An existing file is copied to a timestamped `.bak` sibling before the
/// rewrite, and the rewrite itself goes through a temp file + rename so a
/// crash cannot leave a truncated catalog. Returns the backup path when
/// one was made.
pub fn append_device(path: &Path, record: DeviceRecord) -> CatalogResult<Option<PathBuf>> {
    let (mut catalog, backup) = if path.exists() {
        let catalog = load_catalog(Some(path))?;
        let backup = backup_path(path);
        std::fs::copy(path, &backup)?;
        (catalog, Some(backup))
    } else {
        let catalog = Catalog {
            catalog_version: CATALOG_VERSION.to_string(),
            devices: Vec::new(),
        };
        (catalog, None)
    };

    catalog.devices.push(record);
    validate_catalog(&catalog)?;
    write_json_atomic(path, &catalog)?;

    info!(path = %path.display(), devices = catalog.devices.len(), "catalog updated");
    Ok(backup)
}

fn backup_path(path: &Path) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "catalog.json".to_string());
    path.with_file_name(format!("{file_name}.bak.{stamp}"))
}

fn write_json_atomic(path: &Path, catalog: &Catalog) -> CatalogResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| CatalogError::InvalidPath(path.display().to_string()))?;
    let tmp_path = path.with_file_name(format!("{}.tmp", file_name.to_string_lossy()));

    let data = serde_json::to_vec_pretty(catalog)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(&data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use imeigen_core::DeviceType;

    fn temp_catalog_path(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("imeigen_cli_{label}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir.join("catalog.json")
    }

    fn sample_record() -> DeviceRecord {
        DeviceRecord {
            name: "Teltonika".to_string(),
            model: "RUTX50".to_string(),
            device_type: DeviceType::Router,
            tacs: vec!["86030205".to_string()],
        }
    }

    #[test]
    fn embedded_default_catalog_is_valid() {
        let catalog = load_catalog(None).expect("embedded catalog loads");
        assert!(!catalog.devices.is_empty());
        assert!(catalog.devices.iter().any(|d| d.tacs.len() > 1));
    }

    #[test]
    fn append_creates_missing_catalog_without_backup() {
        let path = temp_catalog_path("append_new");
        let _ = std::fs::remove_file(&path);

        let backup = append_device(&path, sample_record()).expect("append");
        assert!(backup.is_none());

        let catalog = load_catalog(Some(&path)).expect("reload");
        assert_eq!(catalog.devices.len(), 1);
    }

    #[test]
    fn append_backs_up_existing_catalog() {
        let path = temp_catalog_path("append_existing");
        let _ = std::fs::remove_file(&path);

        append_device(&path, sample_record()).expect("first append");
        let backup = append_device(&path, sample_record()).expect("second append");

        let backup = backup.expect("backup path");
        assert!(backup.exists());

        let catalog = load_catalog(Some(&path)).expect("reload");
        assert_eq!(catalog.devices.len(), 2);
    }

    #[test]
    fn append_rejects_invalid_record() {
        let path = temp_catalog_path("append_invalid");
        let _ = std::fs::remove_file(&path);

        let mut record = sample_record();
        record.tacs = vec!["123".to_string()];
        assert!(append_device(&path, record).is_err());
        assert!(!path.exists(), "invalid record must not create a catalog");
    }
}
