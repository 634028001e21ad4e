//! Sign clock tricks for the laser job timer.
//!
//! The sign cannot count up from zero, but its clock fields keep ticking.
//! Setting the clock to midnight of a fixed day turns the hour, minute and
//! second fields into an elapsed-time display.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};

/// Seconds past midnight the sentinel starts at, covering the time the
/// screen takes to appear.
pub const SENTINEL_START_SECS: i64 = 2;

/// Midnight of "February 0th, 2000" plus an offset.
///
/// Day zero of February is the last day of January, so the result is always
/// on 2000-01-31 unless the offset crosses midnight.
pub fn sentinel(offset_minutes: i64, offset_seconds: i64) -> Option<NaiveDateTime> {
    let day_zero = NaiveDate::from_ymd_opt(2000, 2, 1)?.pred_opt()?;
    let midnight = day_zero.and_hms_opt(0, 0, 0)?;
    let offset = TimeDelta::try_minutes(offset_minutes)?
        .checked_add(&TimeDelta::try_seconds(offset_seconds)?)?;
    midnight.checked_add_signed(offset)
}

/// Clock value to re-push for a reported job duration, if any.
///
/// Every other minute, three seconds before it ends, the sign is set to the
/// start of the next minute. This keeps the sign's free-running clock from
/// drifting away from the job timer.
pub fn drift_correction(duration_secs: i64) -> Option<NaiveDateTime> {
    let minutes = (duration_secs % 3600) / 60;
    let seconds = duration_secs % 60;

    if minutes % 2 == 0 && seconds == 57 {
        sentinel(minutes + 1, 0)
    } else {
        None
    }
}

/// Local wall-clock time, as shown on the idle screen.
pub fn wall_clock() -> NaiveDateTime {
    Local::now().naive_local()
}
