use chrono::{Local, NaiveDateTime};

/// Source of "now" for the notification and reminder logic. Injectable so
/// both can be exercised deterministically without real timers.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time. Due dates are stored as naive local timestamps, so the
/// system clock is read the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
