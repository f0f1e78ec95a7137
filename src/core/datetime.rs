//! Calendar arithmetic used by the task-input parser.
//!
//! All helpers operate on local wall-clock values (`NaiveDate`,
//! `NaiveDateTime`). Out-of-range components overflow into the neighbouring
//! unit instead of being rejected: day 31 of a 30-day month is the 1st of the
//! next month, month 13 is January of the next year, hour 25 is 01:00 the next
//! day. Only results outside chrono's representable range yield `None`.

use chrono::{
    DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Weekday,
};

/// Build a date from possibly out-of-range components.
///
/// `month0` is zero-based and may be negative or exceed 11; `day` may be 0 or
/// exceed the month length. Both roll over into neighbouring months/years.
#[must_use]
pub fn overflowing_date(year: i32, month0: i64, day: i64) -> Option<NaiveDate> {
    let base = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first = if month0 >= 0 {
        base.checked_add_months(Months::new(u32::try_from(month0).ok()?))?
    } else {
        base.checked_sub_months(Months::new(u32::try_from(-month0).ok()?))?
    };
    first.checked_add_signed(TimeDelta::try_days(day - 1)?)
}

/// Add calendar months, overflowing the day-of-month instead of clamping.
///
/// Jan 31 + 1 month is Mar 2 (leap year) or Mar 3.
#[must_use]
pub fn add_months_overflowing(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let month0 = i64::from(date.month0()) + i64::from(months);
    overflowing_date(date.year(), month0, i64::from(date.day()))
}

/// Add whole days.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Days from `from` until the next `target`, in `0..7`.
#[must_use]
pub fn days_until_weekday(from: Weekday, target: Weekday) -> i64 {
    (i64::from(target.num_days_from_sunday()) - i64::from(from.num_days_from_sunday()) + 7) % 7
}

/// The next occurrence of `weekday` strictly after `today`.
///
/// Naming today's own weekday means a week from today.
#[must_use]
pub fn next_weekday_after(today: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days = match days_until_weekday(today.weekday(), weekday) {
        0 => 7,
        n => n,
    };
    add_days(today, days)
}

/// The coming Saturday; a Saturday maps to itself.
#[must_use]
pub fn upcoming_saturday(today: NaiveDate) -> Option<NaiveDate> {
    add_days(today, days_until_weekday(today.weekday(), Weekday::Sat))
}

/// Combine a date with an hour and minute, overflowing past 23:59.
#[must_use]
pub fn at_time_of_day(date: NaiveDate, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    date.and_hms_opt(0, 0, 0)?
        .checked_add_signed(TimeDelta::try_hours(i64::from(hour))?)?
        .checked_add_signed(TimeDelta::try_minutes(i64::from(minute))?)
}

/// Local midnight of `date`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Resolve a wall-clock time in `tz` to an absolute instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times that do not
/// exist (DST spring-forward gap) move forward by one hour.
#[must_use]
pub fn resolve_local<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(TimeDelta::try_hours(1)?)?;
        tz.from_local_datetime(&shifted).earliest()
    })
}

/// Epoch milliseconds of a wall-clock time in the host's local zone.
#[must_use]
pub fn local_timestamp_millis(naive: NaiveDateTime) -> Option<i64> {
    resolve_local(naive, &chrono::Local).map(|dt| dt.timestamp_millis())
}

/// Parse a reference instant given on the command line.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, `YYYY-MM-DDTHH:MM` and the same
/// with seconds. A bare date means local midnight.
#[must_use]
pub fn parse_reference_instant(input: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    let input = input.trim();
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(start_of_day)
}
