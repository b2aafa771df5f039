use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use imeigen_generate::DeviceBatch;

use crate::EXPORT_NOTICE;
use crate::at::mikrotik_at_command;
use crate::errors::ExportError;
use crate::output::{ExportOptions, timestamp_line};

/// Plain-text export: commented header, then per-device blocks with the
/// IMEIs grouped by TAC in catalog order.
pub fn write_text_export(
    path: &Path,
    devices: &[DeviceBatch],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(writer, "# Imeigen - all devices export")?;
    if let Some(stamp) = timestamp_line(options) {
        writeln!(writer, "# Generated: {stamp}")?;
    }
    writeln!(writer, "# Devices: {}", devices.len())?;
    writeln!(writer, "# {EXPORT_NOTICE}")?;
    writeln!(writer)?;

    for device in devices {
        writeln!(writer, "Device: {} [{}]", device.name, device.device_type)?;
        writeln!(writer, "{}", "-".repeat(60))?;
        for batch in &device.batches {
            writeln!(writer, "TAC: {}", batch.tac)?;
            for imei in &batch.imeis {
                if options.include_at_commands {
                    let command = mikrotik_at_command(imei, &options.interface);
                    writeln!(writer, "{imei}    {command}")?;
                } else {
                    writeln!(writer, "{imei}")?;
                }
            }
            writeln!(writer)?;
        }
    }
    writer.flush()?;

    info!(path = %path.display(), devices = devices.len(), "wrote text export");
    Ok(())
}
