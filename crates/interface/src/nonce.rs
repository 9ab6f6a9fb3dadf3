use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Strictly increasing nonce source, seeded from wall-clock milliseconds.
///
/// Each `next()` returns `max(now_millis, last + 1)`, so values keep
/// increasing even when requests fire faster than the clock ticks. One
/// factory per credential set; the factory itself is safe to share across
/// tasks.
#[derive(Debug)]
pub struct NonceFactory {
    last: AtomicU64,
}

impl NonceFactory {
    pub fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> u64 {
        let now = now_millis();
        let mut result = 0;
        self.last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                result = now.max(last + 1);
                Some(result)
            })
            .ok();
        result
    }
}

impl Default for NonceFactory {
    fn default() -> Self {
        Self::new()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
