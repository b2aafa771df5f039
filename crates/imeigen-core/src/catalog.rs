use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::TAC_LENGTH;
use crate::error::{Error, Result};

/// Kind of device a catalog entry describes. Display-only tagging; it
/// carries no generation behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Smartphone,
    Tablet,
    Router,
    Hotspot,
    Iot,
    Other,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeviceType::Smartphone => "Smartphone",
            DeviceType::Tablet => "Tablet",
            DeviceType::Router => "Router",
            DeviceType::Hotspot => "Hotspot",
            DeviceType::Iot => "IoT Device",
            DeviceType::Other => "Other",
        };
        f.write_str(label)
    }
}

impl FromStr for DeviceType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "smartphone" => Ok(DeviceType::Smartphone),
            "tablet" => Ok(DeviceType::Tablet),
            "router" => Ok(DeviceType::Router),
            "hotspot" => Ok(DeviceType::Hotspot),
            "iot" | "iot device" => Ok(DeviceType::Iot),
            "other" => Ok(DeviceType::Other),
            other => Err(Error::InvalidInput(format!(
                "unknown device type '{other}'"
            ))),
        }
    }
}

/// A catalog entry binding a display name and model to one or more TACs.
///
/// The TAC list order is meaningful: it is the display and export order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeviceRecord {
    pub name: String,
    pub model: String,
    pub device_type: DeviceType,
    /// One or more 8-digit TACs; a single-TAC device is a one-element list.
    pub tacs: Vec<String>,
}

impl DeviceRecord {
    /// Name and model joined for display, matching export headers.
    pub fn display_name(&self) -> String {
        let joined = format!("{} {}", self.name, self.model);
        joined.trim().to_string()
    }
}

/// Ordered device catalog consumed by the generator and the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    /// Contract version for this catalog format.
    pub catalog_version: String,
    /// Devices in display order.
    pub devices: Vec<DeviceRecord>,
}

/// Validate that `tac` is exactly eight ASCII digits.
pub fn validate_tac(tac: &str) -> Result<()> {
    if tac.len() != TAC_LENGTH || !tac.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidInput(format!(
            "TAC must be exactly {TAC_LENGTH} digits, got '{tac}'"
        )));
    }
    Ok(())
}

/// Validate internal consistency of a device catalog.
///
/// This checks:
/// - the catalog version matches the supported contract
/// - every device has a non-empty name and at least one TAC
/// - every TAC is exactly eight digits
/// - no device lists the same TAC twice
///
/// Duplicate TACs across devices are allowed; vendors reuse allocations
/// between model revisions.
pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
    if catalog.catalog_version != crate::CATALOG_VERSION {
        return Err(Error::InvalidCatalog(format!(
            "unsupported catalog version '{}', expected '{}'",
            catalog.catalog_version,
            crate::CATALOG_VERSION
        )));
    }

    for device in &catalog.devices {
        let label = device.display_name();
        if label.is_empty() {
            return Err(Error::InvalidCatalog(
                "device with empty name and model".to_string(),
            ));
        }
        if device.tacs.is_empty() {
            return Err(Error::InvalidCatalog(format!(
                "device '{label}' has no TACs"
            )));
        }
        for (index, tac) in device.tacs.iter().enumerate() {
            validate_tac(tac).map_err(|_| {
                Error::InvalidCatalog(format!("device '{label}' has invalid TAC '{tac}'"))
            })?;
            if device.tacs[..index].contains(tac) {
                return Err(Error::InvalidCatalog(format!(
                    "device '{label}' lists TAC '{tac}' more than once"
                )));
            }
        }
    }

    Ok(())
}
