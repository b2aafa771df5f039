use serde::{Deserialize, Serialize};

use imeigen_core::DeviceType;

/// IMEIs generated for one TAC in one request, in generation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TacBatch {
    pub tac: String,
    pub imeis: Vec<String>,
}

/// Per-TAC batches for one device, in catalog order.
///
/// Exporters consume this shape for both cases: a flat single-TAC or
/// fully-random batch is a `DeviceBatch` with one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceBatch {
    pub name: String,
    pub device_type: DeviceType,
    pub batches: Vec<TacBatch>,
}

impl DeviceBatch {
    /// Total IMEIs across all TACs of this device.
    pub fn imei_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.imeis.len()).sum()
    }
}
