use std::path::Path;

use serde::Serialize;
use tracing::info;

use imeigen_core::DeviceType;
use imeigen_generate::DeviceBatch;

use crate::EXPORT_NOTICE;
use crate::at::mikrotik_at_command;
use crate::errors::ExportError;
use crate::output::{ExportOptions, timestamp_line};

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    metadata: Metadata,
    devices: Vec<JsonDevice<'a>>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated: Option<String>,
    device_count: usize,
    notice: &'static str,
}

#[derive(Debug, Serialize)]
struct JsonDevice<'a> {
    name: &'a str,
    device_type: &'a DeviceType,
    tacs: Vec<&'a str>,
    imeis: Vec<JsonTacBatch<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonTacBatch<'a> {
    tac: &'a str,
    imeis: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    at_commands: Option<Vec<String>>,
}

/// JSON export: metadata block plus one entry per device with its TAC
/// batches in catalog order.
pub fn write_json_export(
    path: &Path,
    devices: &[DeviceBatch],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let export = JsonExport {
        metadata: Metadata {
            generated: timestamp_line(options),
            device_count: devices.len(),
            notice: EXPORT_NOTICE,
        },
        devices: devices
            .iter()
            .map(|device| JsonDevice {
                name: &device.name,
                device_type: &device.device_type,
                tacs: device.batches.iter().map(|b| b.tac.as_str()).collect(),
                imeis: device
                    .batches
                    .iter()
                    .map(|batch| JsonTacBatch {
                        tac: &batch.tac,
                        imeis: &batch.imeis,
                        at_commands: options.include_at_commands.then(|| {
                            batch
                                .imeis
                                .iter()
                                .map(|imei| mikrotik_at_command(imei, &options.interface))
                                .collect()
                        }),
                    })
                    .collect(),
            })
            .collect(),
    };

    std::fs::write(path, serde_json::to_vec_pretty(&export)?)?;
    info!(path = %path.display(), devices = devices.len(), "wrote json export");
    Ok(())
}
