//! Core contracts and helpers for Imeigen.
//!
//! This crate defines the Luhn checksum routines, the device catalog types,
//! and the error taxonomy shared by the generator, the exporters, and the
//! CLI.

pub mod catalog;
pub mod error;
pub mod luhn;

pub use catalog::{Catalog, DeviceRecord, DeviceType, validate_catalog, validate_tac};
pub use error::{Error, Result};
pub use luhn::{calculate_check_digit, is_valid_imei, luhn_checksum_mod10};

/// Current catalog contract version for `catalog.json` artifacts.
pub const CATALOG_VERSION: &str = "0.1";

/// Number of digits in a full IMEI.
pub const IMEI_LENGTH: usize = 15;

/// Number of digits in a Type Allocation Code, the IMEI prefix that
/// identifies a device model batch.
pub const TAC_LENGTH: usize = 8;

/// Number of digits in the randomized serial portion of an IMEI.
pub const SERIAL_LENGTH: usize = 6;

/// Safety ceiling for a single batch request. The generator enforces this
/// on every batch call; callers may also read it to pre-validate counts.
pub const MAX_IMEI_GENERATION: u32 = 1000;
