use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Hands out millisecond-timestamp ids that never repeat within a process.
///
/// A creation that needs several ids (a poll and its options) reserves a
/// contiguous block `base..=base + count`. When the clock has not advanced
/// past the last issued id, the block starts right after it instead.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never issue `id` or anything below it.
    pub fn observe(&self, id: i64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }

    pub fn next(&self) -> i64 {
        self.reserve(0)
    }

    /// Reserves `count + 1` consecutive ids and returns the first.
    pub fn reserve(&self, count: usize) -> i64 {
        self.reserve_at(Utc::now().timestamp_millis(), count as i64)
    }

    fn reserve_at(&self, now_ms: i64, count: i64) -> i64 {
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let base = now_ms.max(last + 1);
            let swapped =
                self.last.compare_exchange(last, base + count, Ordering::SeqCst, Ordering::SeqCst);
            match swapped {
                Ok(_) => return base,
                Err(current) => last = current,
            }
        }
    }
}
