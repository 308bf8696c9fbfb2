use std::cell::Cell;

use chrono::{DateTime, FixedOffset, Local, Offset, Timelike, Utc};
use web_time::{SystemTime, UNIX_EPOCH};

pub const MS_PER_MINUTE: i64 = 60_000;

/// Wall clock. Platform code installs [`SystemClock`]; tests drive a
/// [`ManualClock`].
pub trait Clock: 'static {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
    /// Hour of the day in the user's local time zone, `0..24`.
    fn local_hour(&self) -> u32;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }

    fn local_hour(&self) -> u32 {
        Local::now().hour()
    }
}

/// A clock you can drive deterministically. Local hour is derived from the
/// current instant at a fixed UTC offset.
pub struct ManualClock {
    now_ms: Cell<i64>,
    offset: FixedOffset,
}

impl ManualClock {
    /// Starts at `now_ms`, local time = UTC.
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: Cell::new(now_ms),
            offset: Utc.fix(),
        }
    }

    /// Starts at `now_ms` with local time `offset_minutes` east of UTC.
    /// Offsets outside ±24h fall back to UTC.
    pub fn with_offset(now_ms: i64, offset_minutes: i32) -> Self {
        let offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self {
            now_ms: Cell::new(now_ms),
            offset,
        }
    }

    /// Starts at `hour:00` local time on the epoch day.
    pub fn at_hour(hour: u32) -> Self {
        Self::new(i64::from(hour % 24) * 60 * MS_PER_MINUTE)
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }

    fn local_hour(&self) -> u32 {
        DateTime::from_timestamp_millis(self.now_ms.get())
            .map(|t| t.with_timezone(&self.offset).hour())
            .unwrap_or(0)
    }
}
