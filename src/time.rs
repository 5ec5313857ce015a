use hifitime::{Duration, Epoch, UNIX_REF_EPOCH};
use itertools::Itertools;

use crate::constants::{
    UnixSeconds, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE, SECONDS_PER_YEAR,
};

const NANOSECONDS_PER_SECOND: i128 = 1_000_000_000;

/// Transformation from unix seconds to a hifitime [`Epoch`] in the UTC time scale
///
/// The conversion is exact. A hifitime epoch spans 32768 centuries on either
/// side of 1900 (about `±1.03e14` seconds); timestamps beyond that saturate to
/// the first or last representable epoch.
///
/// Argument
/// --------
/// * `unix_seconds`: seconds since 1970-01-01T00:00:00 UTC
///
/// Return
/// ------
/// * the corresponding epoch
pub fn unix_to_epoch(unix_seconds: UnixSeconds) -> Epoch {
    let since_unix =
        Duration::from_total_nanoseconds(i128::from(unix_seconds) * NANOSECONDS_PER_SECOND);
    Epoch::from_utc_duration(UNIX_REF_EPOCH.to_utc_duration() + since_unix)
}

/// Transformation from a hifitime [`Epoch`] to whole unix seconds (rounded to the nearest second)
///
/// Argument
/// --------
/// * `epoch`: any epoch, whatever its time scale
///
/// Return
/// ------
/// * seconds since 1970-01-01T00:00:00 UTC
pub fn epoch_to_unix(epoch: &Epoch) -> UnixSeconds {
    let nanos = epoch.to_unix_duration().total_nanoseconds();
    let seconds = (nanos + NANOSECONDS_PER_SECOND / 2).div_euclid(NANOSECONDS_PER_SECOND);
    seconds.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as UnixSeconds
}

/// Render unix seconds as an ISO-like UTC date, e.g. `2024-01-11T11:57:00 UTC`.
///
/// Dates outside the range of [`unix_to_epoch`] are clamped to its bounds.
pub fn format_utc(unix_seconds: UnixSeconds) -> String {
    let (year, month, day, hour, minute, second, _) =
        unix_to_epoch(unix_seconds).to_gregorian_utc();
    format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02} UTC")
}

/// Render a signed number of seconds as human readable text.
///
/// Units are years (365 days), days, hours, minutes and seconds. Zero-valued
/// units are skipped, a unit equal to one uses its singular form and the
/// result is prefixed with `-` for negative durations.
///
/// Argument
/// --------
/// * `seconds`: signed duration in seconds
///
/// Return
/// ------
/// * e.g. `"1 year 2 days 3 hours 4 mins 5 secs"`, or `"0 secs"` for zero
pub fn duration_to_text(seconds: i64) -> String {
    const UNITS: [(u64, &str, &str); 5] = [
        (SECONDS_PER_YEAR, "year", "years"),
        (SECONDS_PER_DAY, "day", "days"),
        (SECONDS_PER_HOUR, "hour", "hours"),
        (SECONDS_PER_MINUTE, "min", "mins"),
        (1, "sec", "secs"),
    ];

    let mut remaining = seconds.unsigned_abs();
    let mut parts = Vec::with_capacity(UNITS.len());
    for (unit, singular, plural) in UNITS {
        let value = remaining / unit;
        remaining %= unit;
        if value != 0 {
            let name = if value == 1 { singular } else { plural };
            parts.push(format!("{value} {name}"));
        }
    }

    let text = if parts.is_empty() {
        "0 secs".to_string()
    } else {
        parts.iter().join(" ")
    };

    if seconds < 0 {
        format!("-{text}")
    } else {
        text
    }
}
