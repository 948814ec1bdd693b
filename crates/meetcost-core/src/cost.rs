//! Cost model.
//!
//! Pure functions only: salary to rate, rates to burn rate, and elapsed time
//! to cost. No state, no I/O.

use chrono::{DateTime, Utc};

use crate::participant::Participant;

/// Working days per year used to derive an hourly cost from an annual salary.
pub const DAYS_PER_YEAR: f64 = 220.0;

/// Working hours per day.
pub const HOURS_PER_DAY: f64 = 7.5;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Paid seconds in a working year (220 * 7.5 * 3600 = 1 782 000).
pub const WORKING_SECONDS_PER_YEAR: f64 = DAYS_PER_YEAR * HOURS_PER_DAY * SECONDS_PER_HOUR;

/// Cost per second of one person earning `annual_salary`.
pub fn rate_per_second(annual_salary: f64) -> f64 {
    annual_salary / WORKING_SECONDS_PER_YEAR
}

/// Combined cost per second of everyone in the room.
pub fn burn_rate_per_second(participants: &[Participant]) -> f64 {
    participants.iter().map(|p| p.rate_per_second).sum()
}

pub fn burn_rate_per_minute(participants: &[Participant]) -> f64 {
    burn_rate_per_second(participants) * 60.0
}

/// Linear cost increment over `elapsed_seconds`.
pub fn accrue(elapsed_seconds: f64, burn_rate_per_second: f64) -> f64 {
    elapsed_seconds * burn_rate_per_second
}

/// Seconds between the last recorded tick and `now`.
///
/// Without a previous tick the delta is zero, so the first tick after a start
/// or a reload never charges time that was not observed. A clock that went
/// backwards also yields zero.
pub fn elapsed_seconds(last_tick: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match last_tick {
        Some(last) => {
            let millis = (now - last).num_milliseconds();
            if millis <= 0 {
                0.0
            } else {
                millis as f64 / 1000.0
            }
        }
        None => 0.0,
    }
}
