//! Time helpers and the injectable clock used for snapshot naming.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_TIMESTAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Returns a unix millisecond timestamp strictly greater than the previous call's.
///
/// Values are monotonic within the current thread even when the system clock does not advance.
pub fn next_monotonic_timestamp_ms() -> u64 {
    let now = unix_time_ms_now();
    LAST_TIMESTAMP_MS.with(|last| {
        let next = now.max(last.get().saturating_add(1));
        last.set(next);
        next
    })
}

/// Source of capture timestamps.
pub trait Clock {
    /// Returns the current time in unix milliseconds.
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
/// Wall clock backed by [`next_monotonic_timestamp_ms`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        next_monotonic_timestamp_ms()
    }
}

#[derive(Debug, Clone, Default)]
/// Deterministic clock for tests: starts at a fixed instant and advances by `step_ms` per read.
pub struct SteppingClock {
    next: Cell<u64>,
    step_ms: u64,
}

impl SteppingClock {
    /// Creates a clock whose first reading is `start_ms`.
    pub fn new(start_ms: u64, step_ms: u64) -> Self {
        Self {
            next: Cell::new(start_ms),
            step_ms,
        }
    }

    /// Creates a clock that always reads `at_ms`.
    pub fn fixed(at_ms: u64) -> Self {
        Self::new(at_ms, 0)
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> u64 {
        let now = self.next.get();
        self.next.set(now.saturating_add(self.step_ms));
        now
    }
}
