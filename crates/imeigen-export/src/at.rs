use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use imeigen_generate::DeviceBatch;

use crate::errors::ExportError;
use crate::{EXPORT_NOTICE, make_safe_filename};

/// LTE interface name used in MikroTik AT chat commands.
pub const DEFAULT_LTE_INTERFACE: &str = "lte1";

/// Router families that accept IMEI rewrite commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtFlavor {
    Mikrotik,
    Fiberhome,
    Both,
}

impl AtFlavor {
    fn includes_mikrotik(self) -> bool {
        matches!(self, AtFlavor::Mikrotik | AtFlavor::Both)
    }

    fn includes_fiberhome(self) -> bool {
        matches!(self, AtFlavor::Fiberhome | AtFlavor::Both)
    }
}

/// MikroTik RouterOS at-chat command rewriting the modem IMEI.
pub fn mikrotik_at_command(imei: &str, interface: &str) -> String {
    format!(r#"interface lte at-chat {interface} input="AT+EGMR=1,7,\"{imei}\"""#)
}

/// Bare AT command accepted by FiberHome CPE shells.
pub fn fiberhome_at_command(imei: &str) -> String {
    format!(r#"AT+EGMR=1,7,"{imei}""#)
}

/// Write one AT-command file per TAC of a device, named
/// `at_<device>_<tac>.txt`, and return the created paths.
pub fn write_device_at_files(
    device: &DeviceBatch,
    out_dir: &Path,
    flavor: AtFlavor,
    interface: &str,
) -> Result<Vec<PathBuf>, ExportError> {
    create_dir_all(out_dir)?;
    let safe_name = {
        let name = make_safe_filename(&device.name);
        if name.is_empty() { "device".to_string() } else { name }
    };

    let mut paths = Vec::with_capacity(device.batches.len());
    for batch in &device.batches {
        let path = out_dir.join(format!("at_{safe_name}_{}.txt", batch.tac));
        let mut writer = BufWriter::new(File::create(&path)?);

        writeln!(writer, "# AT commands for {} (TAC {})", device.name, batch.tac)?;
        writeln!(writer, "# Generated: {}", utc_timestamp())?;
        writeln!(writer, "# {EXPORT_NOTICE}")?;
        writeln!(writer)?;
        for imei in &batch.imeis {
            if flavor.includes_mikrotik() {
                writeln!(writer, "{}", mikrotik_at_command(imei, interface))?;
            }
            if flavor.includes_fiberhome() {
                writeln!(writer, "{}", fiberhome_at_command(imei))?;
            }
        }
        writeln!(writer)?;
        writeln!(writer, "# End of AT commands")?;
        writer.flush()?;

        info!(path = %path.display(), tac = %batch.tac, "wrote AT command file");
        paths.push(path);
    }

    Ok(paths)
}

/// Write a single combined AT-command file covering every device.
pub fn write_combined_at_file(
    devices: &[DeviceBatch],
    path: &Path,
    flavor: AtFlavor,
    interface: &str,
) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let label = match flavor {
        AtFlavor::Mikrotik => "mikrotik",
        AtFlavor::Fiberhome => "fiberhome",
        AtFlavor::Both => "both",
    };
    writeln!(writer, "# Combined AT commands ({label})")?;
    writeln!(writer, "# Generated: {}", utc_timestamp())?;
    writeln!(writer)?;

    for device in devices {
        writeln!(writer, "# Device: {}", device.name)?;
        for batch in &device.batches {
            writeln!(writer, "# TAC: {}", batch.tac)?;
            for imei in &batch.imeis {
                if flavor.includes_mikrotik() {
                    writeln!(writer, "{}", mikrotik_at_command(imei, interface))?;
                }
                if flavor.includes_fiberhome() {
                    writeln!(writer, "{}", fiberhome_at_command(imei))?;
                }
            }
            writeln!(writer)?;
        }
    }
    writer.flush()?;

    info!(path = %path.display(), devices = devices.len(), "wrote combined AT file");
    Ok(())
}

pub(crate) fn utc_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mikrotik_command_escapes_quotes_for_routeros() {
        let command = mikrotik_at_command("354614440000005", "lte1");
        assert_eq!(
            command,
            r#"interface lte at-chat lte1 input="AT+EGMR=1,7,\"354614440000005\"""#
        );
    }

    #[test]
    fn fiberhome_command_is_bare_at_syntax() {
        let command = fiberhome_at_command("354614440000005");
        assert_eq!(command, r#"AT+EGMR=1,7,"354614440000005""#);
    }
}
