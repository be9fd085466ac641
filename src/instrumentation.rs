//! Millisecond-resolution timers used for per-stage profiling, plus the wall-clock
//! seam telemetry reads its timestamps through (SPEC_FULL.md §6).

use std::time::Instant;

use chrono::{DateTime, Utc};

/// Wall-clock time for telemetry timestamps only; never consulted for planning
/// decisions. A trait so tests can inject a fixed instant instead of the real clock.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that always returns the same instant, for deterministic tests.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Measures elapsed wall time since construction (or since the last [`Timer::dur_ms`] call).
pub struct Timer {
    start: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Timer {
    /// Elapsed milliseconds since the timer was created, and resets the start point.
    pub fn dur_ms(&mut self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64() * 1_000.0;
        self.start = Instant::now();
        elapsed
    }

    /// Elapsed milliseconds since the timer was created, without resetting it.
    pub fn peek_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1_000.0
    }
}
