mod catalog;
mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;

use imeigen_core::Error as CoreError;
use imeigen_export::ExportError;
use imeigen_export::output::ExportFormat;
use imeigen_export::{AtFlavor, DEFAULT_LTE_INTERFACE};

use catalog::CatalogError;

#[derive(Debug, Error)]
enum CliError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("export error: {0}")]
    Export(#[from] ExportError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Parser, Debug)]
#[command(name = "imeigen", version, about = "IMEI generator and validator")]
struct Cli {
    /// Enable debug logging on stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate IMEIs for one or more TACs, or fully random ones.
    Generate(GenerateArgs),
    /// Check an IMEI against the Luhn algorithm.
    Validate(ValidateArgs),
    /// Walk through the Luhn checksum of a number step by step.
    Luhn(LuhnArgs),
    /// Generate batches for every catalog device and export them.
    Export(ExportArgs),
    /// Write a combined AT-command file for every catalog device.
    At(AtArgs),
    /// Append a device to a catalog file.
    AddDevice(AddDeviceArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// TAC to generate for; repeat the flag for a multi-TAC batch.
    #[arg(long, value_name = "TAC")]
    tac: Vec<String>,
    /// Generate fully random IMEIs, each with its own TAC.
    #[arg(long, conflicts_with = "tac", default_value_t = false)]
    random: bool,
    /// IMEIs per TAC.
    #[arg(long, default_value_t = 10)]
    count: u32,
    /// Seed for reproducible output; omitted means OS entropy.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// The 15-digit IMEI to check.
    #[arg(value_name = "IMEI")]
    imei: String,
}

#[derive(Args, Debug)]
struct LuhnArgs {
    /// Digit string to analyze.
    #[arg(value_name = "NUMBER")]
    number: String,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Catalog JSON file; omitted means the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// IMEIs per TAC.
    #[arg(long, default_value_t = 3)]
    count: u32,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Export file format.
    #[arg(long, value_enum, default_value = "txt")]
    format: FormatArg,
    /// Explicit output path; overrides --out-dir and the default name.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Directory for default-named exports.
    #[arg(long, default_value = "exports")]
    out_dir: PathBuf,
    /// Emit a MikroTik AT command next to each IMEI.
    #[arg(long, default_value_t = false)]
    include_at: bool,
    /// LTE interface used in MikroTik AT commands.
    #[arg(long, default_value = DEFAULT_LTE_INTERFACE)]
    interface: String,
}

#[derive(Args, Debug)]
struct AtArgs {
    /// Catalog JSON file; omitted means the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// IMEIs per TAC.
    #[arg(long, default_value_t = 3)]
    count: u32,
    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
    /// Which router family's command syntax to emit.
    #[arg(long, value_enum, default_value = "both")]
    flavor: FlavorArg,
    /// LTE interface used in MikroTik AT commands.
    #[arg(long, default_value = DEFAULT_LTE_INTERFACE)]
    interface: String,
    /// Explicit output path; overrides --out-dir and the default name.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Directory for default-named AT files.
    #[arg(long, default_value = "exports")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct AddDeviceArgs {
    /// Catalog JSON file to update; created when missing.
    #[arg(long)]
    catalog: PathBuf,
    /// TAC of the new device; repeat the flag for multi-TAC devices.
    #[arg(long = "tac", value_name = "TAC", required = true)]
    tacs: Vec<String>,
    /// Display name, e.g. the vendor.
    #[arg(long)]
    name: String,
    /// Model string.
    #[arg(long)]
    model: String,
    /// Device kind: smartphone, tablet, router, hotspot, iot, or other.
    #[arg(long, default_value = "other")]
    device_type: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Txt,
    Csv,
    Json,
    Sqlite,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Txt => ExportFormat::Txt,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Sqlite => ExportFormat::Sqlite,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FlavorArg {
    Mikrotik,
    Fiberhome,
    Both,
}

impl FlavorArg {
    fn label(self) -> &'static str {
        match self {
            FlavorArg::Mikrotik => "mikrotik",
            FlavorArg::Fiberhome => "fiberhome",
            FlavorArg::Both => "both",
        }
    }
}

impl From<FlavorArg> for AtFlavor {
    fn from(value: FlavorArg) -> Self {
        match value {
            FlavorArg::Mikrotik => AtFlavor::Mikrotik,
            FlavorArg::Fiberhome => AtFlavor::Fiberhome,
            FlavorArg::Both => AtFlavor::Both,
        }
    }
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => commands::run_generate(args),
        Command::Validate(args) => commands::run_validate(args),
        Command::Luhn(args) => commands::run_luhn(args),
        Command::Export(args) => commands::run_export(args),
        Command::At(args) => commands::run_at(args),
        Command::AddDevice(args) => commands::run_add_device(args),
    }
}
