//! Natural language task-input parser.
//!
//! Turns free text such as "Buy milk tomorrow at 5pm!" into a cleaned title,
//! an optional due date and a priority flag.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

use super::rules::{DateMatch, DATE_RULES};
use crate::core::{at_time_of_day, local_timestamp_millis, resolve_local, start_of_day};

/// Result of parsing one line of task input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTaskInput {
    /// Input with every recognized priority, time and date phrase removed.
    pub title: String,
    /// Local wall-clock due date, present iff a date or time was recognized.
    pub due: Option<NaiveDateTime>,
    /// Whether a priority marker was present.
    pub priority: bool,
}

impl ParsedTaskInput {
    /// Check if a due date was recognized.
    #[must_use]
    pub const fn has_due_date(&self) -> bool {
        self.due.is_some()
    }

    /// The due date as an instant in `tz`.
    #[must_use]
    pub fn due_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        self.due.and_then(|due| resolve_local(due, tz))
    }

    /// The due date as epoch milliseconds in the host's local zone.
    #[must_use]
    pub fn due_timestamp_millis(&self) -> Option<i64> {
        self.due.and_then(local_timestamp_millis)
    }

    /// The due date formatted as `YYYY-MM-DDTHH:MM:SS`.
    #[must_use]
    pub fn due_iso(&self) -> Option<String> {
        self.due.map(|d| d.format("%Y-%m-%dT%H:%M:%S").to_string())
    }
}

// Whole-word keywords, or any run of exclamation marks
static PRIORITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:important|urgent|priority|critical|asap)\b|!+")
        .unwrap_or_else(|e| panic!("Invalid priority regex: {e}"))
});

// "[at] H[:MM][am|pm]". Candidates without "at", minutes or meridiem are
// bare numbers and get rejected in `clock_time`.
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(at\s+)?(\d{1,2})(?::(\d{2}))?(?:\s*(am|pm))?\b")
        .unwrap_or_else(|e| panic!("Invalid time regex: {e}"))
});

static ORPHAN_AT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bat\s+").unwrap_or_else(|e| panic!("Invalid 'at' regex: {e}"))
});

/// A clock time in 24-hour form. Values are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClockTime {
    hour: u32,
    minute: u32,
}

/// Parse task input relative to the current local time.
///
/// See [`parse_task_input_at`].
#[must_use]
pub fn parse_task_input(input: &str) -> ParsedTaskInput {
    parse_task_input_at(input, Local::now().naive_local())
}

/// Parse task input relative to `now`.
///
/// Priority markers are stripped first, then the last clock time, then the
/// first date phrase according to the fixed rule order. Never fails: input
/// without recognizable phrases comes back as a whitespace-normalized title.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tasker::features::nlp::parse_task_input_at;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 10)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
///
/// let parsed = parse_task_input_at("Buy milk tomorrow at 5pm!", now);
/// assert_eq!(parsed.title, "Buy milk");
/// assert!(parsed.priority);
/// assert_eq!(
///     parsed.due,
///     NaiveDate::from_ymd_opt(2024, 3, 11).unwrap().and_hms_opt(17, 0, 0)
/// );
/// ```
#[must_use]
pub fn parse_task_input_at(input: &str, now: NaiveDateTime) -> ParsedTaskInput {
    let today = now.date();

    let (priority, remaining) = extract_priority(input.trim());
    let (time, remaining) = extract_time(&remaining);

    let (date_match, remaining) = match match_date(&remaining, today) {
        Some((m, rest)) => (Some(m), rest),
        None => (None, remaining),
    };

    debug!(
        rule = date_match.map(|m| m.rule.name()),
        has_time = time.is_some(),
        priority,
        "parsed task input"
    );

    ParsedTaskInput {
        title: clean_title(&remaining),
        due: resolve_due(date_match.as_ref(), time, today),
        priority,
    }
}

/// Strip every priority marker.
fn extract_priority(text: &str) -> (bool, String) {
    if PRIORITY_PATTERN.is_match(text) {
        (true, PRIORITY_PATTERN.replace_all(text, "").into_owned())
    } else {
        (false, text.to_string())
    }
}

/// Strip clock times, keeping the value of the last one mentioned.
fn extract_time(text: &str) -> (Option<ClockTime>, String) {
    let mut last = None;
    let mut remaining = String::with_capacity(text.len());
    let mut cursor = 0;

    for caps in TIME_PATTERN.captures_iter(text) {
        let Some(time) = clock_time(&caps) else {
            continue;
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        remaining.push_str(&text[cursor..whole.start()]);
        cursor = whole.end();
        last = Some(time);
    }
    remaining.push_str(&text[cursor..]);

    if last.is_some() {
        remaining = ORPHAN_AT_PATTERN.replace_all(&remaining, "").into_owned();
    }

    (last, remaining)
}

/// Convert a time candidate to 24-hour form, or reject it as a bare number.
fn clock_time(caps: &Captures<'_>) -> Option<ClockTime> {
    let minutes = caps.get(3);
    let meridiem = caps.get(4);
    if caps.get(1).is_none() && minutes.is_none() && meridiem.is_none() {
        return None;
    }

    let mut hour: u32 = caps.get(2)?.as_str().parse().ok()?;
    let minute: u32 = match minutes {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    match meridiem.map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        Some("pm") if hour != 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {},
    }

    Some(ClockTime { hour, minute })
}

/// Run the date rules in order; the first match wins.
fn match_date(text: &str, today: NaiveDate) -> Option<(DateMatch, String)> {
    DATE_RULES.iter().find_map(|rule| rule.apply(text, today))
}

/// Combine the resolved date with the explicit or implied time of day.
fn resolve_due(
    date_match: Option<&DateMatch>,
    time: Option<ClockTime>,
    today: NaiveDate,
) -> Option<NaiveDateTime> {
    let date = match (date_match, time) {
        (Some(m), _) => m.date,
        (None, Some(_)) => today,
        (None, None) => return None,
    };

    match (time, date_match.and_then(|m| m.default_time)) {
        (Some(t), _) => at_time_of_day(date, t.hour, t.minute),
        (None, Some(default)) => Some(date.and_time(default)),
        (None, None) => Some(start_of_day(date)),
    }
}

/// Collapse whitespace runs left behind by removals.
fn clean_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
