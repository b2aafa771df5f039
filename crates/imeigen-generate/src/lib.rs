//! Seedable IMEI synthesis for Imeigen.
//!
//! This crate wraps the core Luhn engine with a single seedable random
//! source and the batch operations built on it. A fixed seed reproduces
//! every IMEI of a run as long as the call order is stable.

pub mod generator;
pub mod model;

pub use generator::ImeiGenerator;
pub use model::{DeviceBatch, TacBatch};
