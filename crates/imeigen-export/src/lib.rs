//! Serializers for generated IMEI batches.
//!
//! Every writer consumes already-generated `DeviceBatch` records; nothing
//! here draws randomness or validates IMEIs beyond what the batch model
//! carries.

pub mod at;
pub mod errors;
pub mod output;

pub use at::{AtFlavor, DEFAULT_LTE_INTERFACE, fiberhome_at_command, mikrotik_at_command};
pub use errors::ExportError;
pub use output::{ExportFormat, ExportOptions, default_export_filename, write_export};

/// Usage notice embedded in export headers and metadata.
pub const EXPORT_NOTICE: &str = "Generated identifiers are for lab and testing use only; \
programming IMEIs onto devices you do not own may be unlawful.";

/// Replace characters that are unsafe in filenames with underscores.
///
/// Whitelist approach: ASCII alphanumerics, dot, underscore, dash, and
/// space survive; everything else becomes `_`. Surrounding whitespace is
/// trimmed.
pub fn make_safe_filename(desired: &str) -> String {
    desired
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}
