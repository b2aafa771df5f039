use tracing::info;

use imeigen_core::{is_valid_imei, luhn_checksum_mod10};
use imeigen_export::output::{ExportFormat, ExportOptions, default_export_filename, write_export};
use imeigen_export::{at, make_safe_filename};
use imeigen_generate::{DeviceBatch, ImeiGenerator};

use crate::catalog::load_catalog;
use crate::{AddDeviceArgs, AtArgs, CliError, ExportArgs, GenerateArgs, LuhnArgs, ValidateArgs};

pub fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let mut generator = ImeiGenerator::with_optional_seed(args.seed);

    if args.random {
        for imei in generator.generate_random_batch(args.count)? {
            println!("{imei}");
        }
        return Ok(());
    }

    match args.tac.len() {
        0 => Err(CliError::InvalidConfig(
            "provide --tac at least once, or --random".to_string(),
        )),
        1 => {
            for imei in generator.generate_flat_batch(&args.tac[0], args.count)? {
                println!("{imei}");
            }
            Ok(())
        }
        _ => {
            for batch in generator.generate_multi_tac_batch(&args.tac, args.count)? {
                println!("TAC: {}", batch.tac);
                for imei in &batch.imeis {
                    println!("  {imei}");
                }
            }
            Ok(())
        }
    }
}

pub fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let imei = args.imei.trim();

    if !imei.chars().all(|c| c.is_ascii_digit()) || imei.is_empty() {
        println!("IMEI must contain only digits");
        return Ok(());
    }
    if imei.len() != imeigen_core::IMEI_LENGTH {
        println!(
            "IMEI must be exactly {} digits, got {}",
            imeigen_core::IMEI_LENGTH,
            imei.len()
        );
        return Ok(());
    }

    let checksum = luhn_checksum_mod10(imei)?;
    let check_digit = imei.chars().next_back().unwrap_or('0');
    let verdict = if is_valid_imei(imei) { "VALID" } else { "INVALID" };
    println!("IMEI:        {imei}");
    println!("Check digit: {check_digit}");
    println!("Checksum:    {checksum} (mod 10)");
    println!("Status:      {verdict}");
    Ok(())
}

pub fn run_luhn(args: LuhnArgs) -> Result<(), CliError> {
    let number = args.number.trim();
    // Rejects empty or non-digit input before the walkthrough starts.
    let checksum = luhn_checksum_mod10(number)?;

    let digits: Vec<u32> = number.chars().filter_map(|c| c.to_digit(10)).collect();
    let reversed: Vec<u32> = digits.iter().rev().copied().collect();
    let doubled: Vec<u32> = reversed
        .iter()
        .enumerate()
        .map(|(index, digit)| if index % 2 == 1 { digit * 2 } else { *digit })
        .collect();
    let adjusted: Vec<u32> = doubled
        .iter()
        .map(|digit| if *digit > 9 { digit - 9 } else { *digit })
        .collect();
    let total: u32 = adjusted.iter().sum();

    println!("Original number:  {}", join_digits(&digits));
    println!("Number of digits: {}", digits.len());
    println!("1. Reverse the number:        {}", join_digits(&reversed));
    println!("2. Double every second digit: {}", join_digits(&doubled));
    println!("3. Reduce values above 9:     {}", join_digits(&adjusted));
    println!("4. Sum all digits:            {total}");
    println!("5. Sum mod 10:                {checksum}");
    if checksum == 0 {
        println!("Result: {number} passes the Luhn check");
    } else {
        println!("Result: {number} fails the Luhn check");
    }
    Ok(())
}

pub fn run_export(args: ExportArgs) -> Result<(), CliError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let mut generator = ImeiGenerator::with_optional_seed(args.seed);

    let devices = generate_catalog_batches(&catalog, &mut generator, args.count)?;
    let format = ExportFormat::from(args.format);
    let path = match args.out {
        Some(path) => path,
        None => args.out_dir.join(default_export_filename(format)),
    };
    let options = ExportOptions {
        include_at_commands: args.include_at,
        interface: args.interface,
        ..ExportOptions::default()
    };

    write_export(format, &path, &devices, &options)?;
    info!(devices = devices.len(), count = args.count, "export finished");
    println!("Saved export to {}", path.display());
    Ok(())
}

pub fn run_at(args: AtArgs) -> Result<(), CliError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let mut generator = ImeiGenerator::with_optional_seed(args.seed);

    let devices = generate_catalog_batches(&catalog, &mut generator, args.count)?;
    let path = match args.out {
        Some(path) => path,
        None => {
            let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
            let name = make_safe_filename(&format!("combined_at_{}_{stamp}.txt", args.flavor.label()));
            args.out_dir.join(name)
        }
    };

    at::write_combined_at_file(&devices, &path, args.flavor.into(), &args.interface)?;
    println!("Saved combined AT commands to {}", path.display());
    Ok(())
}

pub fn run_add_device(args: AddDeviceArgs) -> Result<(), CliError> {
    let device_type = args.device_type.parse::<imeigen_core::DeviceType>()?;
    let record = imeigen_core::DeviceRecord {
        name: args.name,
        model: args.model,
        device_type,
        tacs: args.tacs,
    };

    let backup = crate::catalog::append_device(&args.catalog, record)?;
    println!("Added device to {}", args.catalog.display());
    if let Some(backup) = backup {
        println!("Backup saved at {}", backup.display());
    }
    Ok(())
}

fn generate_catalog_batches(
    catalog: &imeigen_core::Catalog,
    generator: &mut ImeiGenerator,
    count: u32,
) -> Result<Vec<DeviceBatch>, CliError> {
    let mut devices = Vec::with_capacity(catalog.devices.len());
    for record in &catalog.devices {
        devices.push(generator.generate_device_batch(record, count)?);
    }
    Ok(devices)
}

fn join_digits(digits: &[u32]) -> String {
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
