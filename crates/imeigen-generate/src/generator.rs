use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use imeigen_core::{
    DeviceRecord, Error, IMEI_LENGTH, MAX_IMEI_GENERATION, Result, calculate_check_digit,
    validate_tac,
};

use crate::model::{DeviceBatch, TacBatch};

/// Seedable IMEI generator.
///
/// Holds the one random stream the whole system draws from; every method
/// that produces output takes `&mut self`, so sequential draws cannot be
/// interleaved by concurrent callers without an explicit lock.
#[derive(Debug, Clone)]
pub struct ImeiGenerator {
    rng: ChaCha8Rng,
}

impl ImeiGenerator {
    /// Generator seeded from OS entropy; output differs between runs.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Fully reproducible generator: the same seed and call order yield
    /// byte-identical IMEIs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Constructor for callers that surface an optional `--seed` flag.
    pub fn with_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::new(),
        }
    }

    /// Six-digit serial, uniform in [0, 1_000_000), zero-padded.
    pub fn generate_serial(&mut self) -> String {
        format!("{:06}", self.rng.random_range(0..1_000_000u32))
    }

    /// One IMEI for an 8-digit TAC: TAC + fresh serial + check digit.
    ///
    /// Never idempotent: the serial is re-randomized on every call.
    pub fn generate_imei_for_tac(&mut self, tac: &str) -> Result<String> {
        validate_tac(tac)?;
        let serial = self.generate_serial();
        let mut imei = String::with_capacity(IMEI_LENGTH);
        imei.push_str(tac);
        imei.push_str(&serial);
        let check = calculate_check_digit(&imei)?;
        imei.push(check);
        Ok(imei)
    }

    /// Random 8-digit TAC, uniform in [10_000_000, 100_000_000), so the
    /// leading digit is never zero.
    pub fn generate_random_tac(&mut self) -> String {
        format!("{:08}", self.rng.random_range(10_000_000..100_000_000u32))
    }

    /// One IMEI with its own random TAC.
    pub fn generate_fully_random_imei(&mut self) -> Result<String> {
        let tac = self.generate_random_tac();
        self.generate_imei_for_tac(&tac)
    }

    /// `count` IMEIs sharing one TAC, each with an independent serial.
    pub fn generate_flat_batch(&mut self, tac: &str, count: u32) -> Result<Vec<String>> {
        ensure_count(count)?;
        validate_tac(tac)?;
        let mut imeis = Vec::with_capacity(count as usize);
        for _ in 0..count {
            imeis.push(self.generate_imei_for_tac(tac)?);
        }
        debug!(tac, count, "generated flat batch");
        Ok(imeis)
    }

    /// `count` independent IMEIs, each with its own random TAC.
    pub fn generate_random_batch(&mut self, count: u32) -> Result<Vec<String>> {
        ensure_count(count)?;
        let mut imeis = Vec::with_capacity(count as usize);
        for _ in 0..count {
            imeis.push(self.generate_fully_random_imei()?);
        }
        debug!(count, "generated fully random batch");
        Ok(imeis)
    }

    /// One batch of `count` IMEIs per TAC, in caller-supplied order.
    ///
    /// Every TAC is validated before any draw, so an invalid entry aborts
    /// the whole call without partial output. The ceiling applies per TAC,
    /// not to the aggregate across the list.
    pub fn generate_multi_tac_batch(
        &mut self,
        tacs: &[String],
        count: u32,
    ) -> Result<Vec<TacBatch>> {
        ensure_count(count)?;
        for tac in tacs {
            validate_tac(tac)?;
        }

        let mut batches = Vec::with_capacity(tacs.len());
        for tac in tacs {
            let mut imeis = Vec::with_capacity(count as usize);
            for _ in 0..count {
                imeis.push(self.generate_imei_for_tac(tac)?);
            }
            batches.push(TacBatch {
                tac: tac.clone(),
                imeis,
            });
        }
        debug!(tacs = tacs.len(), count, "generated multi-TAC batch");
        Ok(batches)
    }

    /// Batches for every TAC of a catalog device, carrying its display
    /// name and type for exporters.
    pub fn generate_device_batch(
        &mut self,
        record: &DeviceRecord,
        count: u32,
    ) -> Result<DeviceBatch> {
        let batches = self.generate_multi_tac_batch(&record.tacs, count)?;
        Ok(DeviceBatch {
            name: record.display_name(),
            device_type: record.device_type.clone(),
            batches,
        })
    }
}

impl Default for ImeiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_count(count: u32) -> Result<()> {
    if count == 0 {
        return Err(Error::InvalidInput(
            "batch count must be at least 1".to_string(),
        ));
    }
    if count > MAX_IMEI_GENERATION {
        return Err(Error::LimitExceeded {
            requested: count,
            limit: MAX_IMEI_GENERATION,
        });
    }
    Ok(())
}
