//! Maps instants onto sprint working days.
//!
//! Day 0 is the sprint start itself; any instant within the following 24h is
//! day 1, and so on. Each completed seven-day block drops two weekend days.
//! Everything is UTC; nothing is localized.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

const HOURS_PER_DAY: i64 = 24;
const NANOS_PER_HOUR: i64 = 3_600_000_000_000;
const MICROS_PER_HOUR: i64 = 3_600_000_000;

/// `value / unit`, rounded towards positive infinity.
fn ceil_div(value: i64, unit: i64) -> i64 {
    value.div_euclid(unit) + i64::from(value.rem_euclid(unit) > 0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SprintCalendar {
    begin: DateTime<Utc>,
    length: u32,
}

impl SprintCalendar {
    pub fn new(begin: NaiveDate, length: u32) -> Self {
        Self {
            begin: begin.and_time(NaiveTime::MIN).and_utc(),
            length,
        }
    }

    pub fn begin(&self) -> DateTime<Utc> {
        self.begin
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Working-day ordinal of `t`. Instants before the sprint start map to 0.
    pub fn day_of_work(&self, t: DateTime<Utc>) -> u32 {
        let delta = t.signed_duration_since(self.begin);
        // Whole hours, rounded up at full nanosecond precision.
        let delta_hours = match (delta.num_nanoseconds(), delta.num_microseconds()) {
            (Some(nanos), _) => ceil_div(nanos, NANOS_PER_HOUR),
            (None, Some(micros)) => ceil_div(micros, MICROS_PER_HOUR),
            (None, None) => delta.num_hours(),
        };

        let mut day = delta_hours / HOURS_PER_DAY;
        if delta_hours % HOURS_PER_DAY > 0 {
            day += 1;
        }
        let weeks = day / 7;
        (day - 2 * weeks).clamp(0, u32::MAX as i64) as u32
    }

    /// Working day of `now`, clamped to the sprint length.
    pub fn current_day_of_work(&self, now: DateTime<Utc>) -> u32 {
        self.day_of_work(now).min(self.length)
    }
}
