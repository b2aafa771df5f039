use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::info;

use imeigen_generate::DeviceBatch;

use crate::at::mikrotik_at_command;
use crate::errors::ExportError;
use crate::output::ExportOptions;

/// CSV export: one row per IMEI with its device and TAC, plus the AT
/// command column when requested.
pub fn write_csv_export(
    path: &Path,
    devices: &[DeviceBatch],
    options: &ExportOptions,
) -> Result<(), ExportError> {
    let writer = BufWriter::new(File::create(path)?);
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header = vec!["device", "device_type", "tac", "imei"];
    if options.include_at_commands {
        header.push("at_command");
    }
    writer.write_record(&header)?;

    let mut rows = 0u64;
    for device in devices {
        let device_type = device.device_type.to_string();
        for batch in &device.batches {
            for imei in &batch.imeis {
                if options.include_at_commands {
                    writer.write_record([
                        device.name.as_str(),
                        device_type.as_str(),
                        batch.tac.as_str(),
                        imei.as_str(),
                        mikrotik_at_command(imei, &options.interface).as_str(),
                    ])?;
                } else {
                    writer.write_record([
                        device.name.as_str(),
                        device_type.as_str(),
                        batch.tac.as_str(),
                        imei.as_str(),
                    ])?;
                }
                rows += 1;
            }
        }
    }
    writer.flush()?;

    info!(path = %path.display(), rows, "wrote csv export");
    Ok(())
}
