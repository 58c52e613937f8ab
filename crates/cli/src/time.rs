// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Time abstraction for deterministic replay testing.
//!
//! Provides a `Clock` trait with a monotonic reading and an async sleep, plus
//! a `FakeClock` so replay timing can be tested without wall-clock delays.
//! Micro-second granularity matches the 4-decimal-second offsets in logs.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic clock with an async sleep.
pub trait Clock: Send + Sync {
    /// Microseconds elapsed since this clock's origin.
    fn now_micros(&self) -> u64;

    /// Sleep for a duration.
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;

    /// Elapsed time since this clock's origin.
    fn now(&self) -> Duration {
        Duration::from_micros(self.now_micros())
    }
}

/// Real clock: monotonic from process construction, tokio sleeps.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Fake clock for tests with controllable time.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_micros: Arc<AtomicU64>,
    /// Whether sleep advances time by the requested duration.
    auto_advance: bool,
}

impl FakeClock {
    /// Create a fake clock starting at a given reading.
    pub fn new(start_micros: u64) -> Self {
        Self {
            current_micros: Arc::new(AtomicU64::new(start_micros)),
            auto_advance: true,
        }
    }

    /// Create a fake clock starting at zero.
    pub fn at_origin() -> Self {
        Self::new(0)
    }

    /// Create a clone with auto-advance disabled.
    pub fn without_auto_advance(&self) -> Self {
        Self {
            current_micros: Arc::clone(&self.current_micros),
            auto_advance: false,
        }
    }

    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    /// Advance time by a duration.
    pub fn advance(&self, duration: Duration) {
        self.current_micros
            .fetch_add(duration.as_micros() as u64, Ordering::SeqCst);
    }

    /// Advance time by milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    /// Set the absolute reading.
    pub fn set(&self, micros: u64) {
        self.current_micros.store(micros, Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::at_origin()
    }
}

impl Clock for FakeClock {
    fn now_micros(&self) -> u64 {
        self.current_micros.load(Ordering::SeqCst)
    }

    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        if self.auto_advance {
            self.advance(duration);
        }
        // No actual sleep
        Box::pin(async {})
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
