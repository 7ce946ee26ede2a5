//! Task id generation.
//!
//! Primary strategy is a v4 UUID from OS randomness. When the OS generator
//! fails, ids fall back to `<epoch-ms hex>-<random hex>` drawn from a
//! time-seeded PRNG, which is unique enough for a single local writer.

use crate::model::task::TaskId;
use log::warn;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Builder;

static FALLBACK_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Source of fresh task ids.
pub trait IdGenerator {
    fn generate(&mut self) -> TaskId;
}

/// Default generator backed by `generate_id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdGenerator;

impl IdGenerator for SystemIdGenerator {
    fn generate(&mut self) -> TaskId {
        generate_id()
    }
}

/// Returns a fresh id, preferring a random UUID.
pub fn generate_id() -> TaskId {
    let mut bytes = [0_u8; 16];
    match OsRng.try_fill_bytes(&mut bytes) {
        Ok(()) => Builder::from_random_bytes(bytes).into_uuid().to_string(),
        Err(err) => {
            warn!("event=id_generate module=service status=fallback error={err}");
            fallback_id()
        }
    }
}

/// Builds a time+random id without touching OS randomness.
pub fn fallback_id() -> TaskId {
    let now_ms = now_epoch_ms();
    let sequence = FALLBACK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let seed = (now_ms as u64) ^ sequence.rotate_left(32) ^ u64::from(std::process::id());
    let random: u64 = StdRng::seed_from_u64(seed).random();
    format!("{now_ms:x}-{random:016x}")
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
