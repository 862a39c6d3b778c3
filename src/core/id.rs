// Ephemeral node ids used as list keys while a document is being edited.
// Ids are never encoded and never take part in document equality.
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use getrandom::fill as fill_random;
use serde::{Deserialize, Serialize};

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn generate() -> Self {
        let mut bytes = [0u8; 8];
        let value = match fill_random(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(_) => fallback_value(),
        };
        Self(format!("{value:016x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Wall clock mixed with a process-local counter; unique within a session.
fn fallback_value() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    nanos.rotate_left(17) ^ count.wrapping_mul(0x9e37_79b9_7f4a_7c15)
}
