// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> SystemTime;

    fn now_unix_secs(&self) -> u64 {
        self.now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock frozen at a unix timestamp; tests move it with [`FixedClock::advance`].
#[derive(Debug, Default)]
pub struct FixedClock {
    unix_secs: AtomicU64,
}

impl FixedClock {
    #[must_use]
    pub fn at(unix_secs: u64) -> Self {
        Self {
            unix_secs: AtomicU64::new(unix_secs),
        }
    }

    pub fn advance(&self, secs: u64) {
        self.unix_secs.fetch_add(secs, Ordering::Relaxed);
    }

    pub fn set(&self, unix_secs: u64) {
        self.unix_secs.store(unix_secs, Ordering::Relaxed);
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(self.unix_secs.load(Ordering::Relaxed))
    }
}
