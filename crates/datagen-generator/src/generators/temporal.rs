//! Date and time generators.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;

/// `num_days_from_ce` of 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Days from 1970-01-01 to 2037-12-31.
const DEFAULT_MAX_EPOCH_DAY: i32 = 24_836;

const SECONDS_PER_DAY: u32 = 86_400;
const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Uniform calendar date between two epoch days (inclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct DateGenerator {
    /// First day, counted from 1970-01-01
    pub min_epoch_day: i32,
    /// Last day, counted from 1970-01-01
    pub max_epoch_day: i32,
}

impl Default for DateGenerator {
    fn default() -> Self {
        Self {
            min_epoch_day: 0,
            max_epoch_day: DEFAULT_MAX_EPOCH_DAY,
        }
    }
}

impl DateGenerator {
    pub fn generate_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let day = rng.gen_range(self.min_epoch_day..=self.max_epoch_day);
        NaiveDate::from_num_days_from_ce_opt(UNIX_EPOCH_DAYS_FROM_CE + day).unwrap_or_default()
    }
}

/// Uniform time of day, truncated to `precision` fractional digits.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGenerator {
    pub precision: u8,
}

impl TimeGenerator {
    pub fn generate_time<R: Rng>(&self, rng: &mut R) -> NaiveTime {
        let seconds = rng.gen_range(0..SECONDS_PER_DAY);
        let nanos = truncate_nanos(rng.gen_range(0..NANOS_PER_SECOND), self.precision);
        NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos).unwrap_or_default()
    }
}

/// Drop the sub-second digits beyond `precision`.
fn truncate_nanos(nanos: u32, precision: u8) -> u32 {
    let unit = 10u32.pow(9 - u32::from(precision.min(9)));
    nanos - nanos % unit
}

/// Date plus time of day. Used for both TIMESTAMP and TIMESTAMP_LTZ.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampGenerator {
    pub date: DateGenerator,
    pub time: TimeGenerator,
}

impl TimestampGenerator {
    pub fn new(precision: u8) -> Self {
        Self {
            date: DateGenerator::default(),
            time: TimeGenerator { precision },
        }
    }

    pub fn generate_timestamp<R: Rng>(&self, rng: &mut R) -> NaiveDateTime {
        let date = self.date.generate_date(rng);
        let time = self.time.generate_time(rng);
        NaiveDateTime::new(date, time)
    }
}
