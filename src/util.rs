use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};

/// length of generated entity names
const NAME_LENGTH: usize = 10;

static NAME_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn now() -> NaiveDateTime {
    chrono::offset::Local::now().naive_local()
}

/// generates a new entity name from the passed seed. Names are hex, [`NAME_LENGTH`] characters long,
/// and differ between calls even for the same seed
pub fn generate_name(seed: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let count = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut hasher = Sha256::new();
    hasher.update(format!("{seed}:{nanos}:{count}").as_bytes());
    let mut name = format!("{:x}", hasher.finalize());
    name.truncate(NAME_LENGTH);
    name
}
