//! Date-phrase recognizers and their evaluation order.
//!
//! Each [`DateRule`] pairs a recognizer pattern with a resolver. Rules are
//! tried in [`DATE_RULES`] order and the first one that matches wins; no later
//! rule is consulted, so the order doubles as the tie-break between phrases
//! that appear together in one input.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::{
    add_days, add_months_overflowing, next_weekday_after, overflowing_date, upcoming_saturday,
};

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const MONTHS_SHORT: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const WEEKDAYS: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

// "22nd of november", "22 nov", "november 22", "nov 22nd"
static MONTH_DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // Full names first so "january" is not cut short at "jan"
    let names = format!("{}|{}", MONTHS.join("|"), MONTHS_SHORT.join("|"));
    Regex::new(&format!(
        r"(?i)\b(?:(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({names})|({names})\s+(\d{{1,2}})(?:st|nd|rd|th)?)\b"
    ))
    .unwrap_or_else(|e| panic!("Invalid month-day regex: {e}"))
});

static TOMORROW_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btomorrow\b").unwrap_or_else(|e| panic!("Invalid tomorrow regex: {e}"))
});

static TODAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btoday\b").unwrap_or_else(|e| panic!("Invalid today regex: {e}"))
});

static TONIGHT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\btonight\b").unwrap_or_else(|e| panic!("Invalid tonight regex: {e}"))
});

static PART_OF_DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bthis\s+(morning|afternoon|evening)\b")
        .unwrap_or_else(|e| panic!("Invalid part-of-day regex: {e}"))
});

static NEXT_WEEK_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bnext\s+week\b").unwrap_or_else(|e| panic!("Invalid next-week regex: {e}"))
});

static THIS_WEEKEND_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bthis\s+(?:week|weekend)\b")
        .unwrap_or_else(|e| panic!("Invalid this-weekend regex: {e}"))
});

static WEEKDAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<&str> = WEEKDAYS.iter().map(|(name, _)| *name).collect();
    Regex::new(&format!(r"(?i)\b({})\b", names.join("|")))
        .unwrap_or_else(|e| panic!("Invalid weekday regex: {e}"))
});

// "in 3 days", "in 1 week", "in 2 months"
static RELATIVE_OFFSET_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bin\s+(\d+)\s+(day|week|month)s?\b")
        .unwrap_or_else(|e| panic!("Invalid relative-offset regex: {e}"))
});

// "3/25", "3-25", "3/25/24", "12-1-2025"
static NUMERIC_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})[/-](\d{1,2})(?:[/-](\d{2,4}))?\b")
        .unwrap_or_else(|e| panic!("Invalid numeric-date regex: {e}"))
});

/// One family of date phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// `22nd of november`, `nov 22`: this year, or next year once passed.
    MonthDay,
    /// `tomorrow`
    Tomorrow,
    /// `today`
    Today,
    /// `tonight`: today, 20:00 unless a time was given.
    Tonight,
    /// `this morning|afternoon|evening`: today at 09:00, 14:00 or 18:00.
    PartOfDay,
    /// `next week`: seven days from today.
    NextWeek,
    /// `this week`, `this weekend`: the coming Saturday.
    ThisWeekend,
    /// `monday` .. `sunday`: next occurrence strictly after today.
    Weekday,
    /// `in N days|weeks|months`
    RelativeOffset,
    /// `M/D`, `M-D`, optionally followed by a 2- or 4-digit year.
    NumericDate,
}

/// Order in which date rules are tried.
///
/// The first rule that matches decides the due date, so this order is also
/// the tie-break between competing phrases. Reordering it changes results for
/// existing inputs.
pub const DATE_RULES: [DateRule; 10] = [
    DateRule::MonthDay,
    DateRule::Tomorrow,
    DateRule::Today,
    DateRule::Tonight,
    DateRule::PartOfDay,
    DateRule::NextWeek,
    DateRule::ThisWeekend,
    DateRule::Weekday,
    DateRule::RelativeOffset,
    DateRule::NumericDate,
];

/// A date produced by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateMatch {
    /// The rule that fired.
    pub rule: DateRule,
    /// Resolved calendar date.
    pub date: NaiveDate,
    /// Time of day implied by the phrase itself ("tonight" is 20:00).
    pub default_time: Option<NaiveTime>,
}

impl DateRule {
    /// Short identifier used in logs and parse reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MonthDay => "month-day",
            Self::Tomorrow => "tomorrow",
            Self::Today => "today",
            Self::Tonight => "tonight",
            Self::PartOfDay => "part-of-day",
            Self::NextWeek => "next-week",
            Self::ThisWeekend => "this-weekend",
            Self::Weekday => "weekday",
            Self::RelativeOffset => "relative-offset",
            Self::NumericDate => "numeric-date",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::MonthDay => &MONTH_DAY_PATTERN,
            Self::Tomorrow => &TOMORROW_PATTERN,
            Self::Today => &TODAY_PATTERN,
            Self::Tonight => &TONIGHT_PATTERN,
            Self::PartOfDay => &PART_OF_DAY_PATTERN,
            Self::NextWeek => &NEXT_WEEK_PATTERN,
            Self::ThisWeekend => &THIS_WEEKEND_PATTERN,
            Self::Weekday => &WEEKDAY_PATTERN,
            Self::RelativeOffset => &RELATIVE_OFFSET_PATTERN,
            Self::NumericDate => &NUMERIC_DATE_PATTERN,
        }
    }

    /// Whether every occurrence of the phrase is stripped, or just the first.
    const fn removes_all(self) -> bool {
        !matches!(self, Self::NumericDate)
    }

    /// Try this rule against `text`.
    ///
    /// On a match, returns the resolved date together with `text` minus the
    /// consumed phrase. Returns `None` when the phrase is absent or its date
    /// falls outside the representable calendar.
    #[must_use]
    pub fn apply(self, text: &str, today: NaiveDate) -> Option<(DateMatch, String)> {
        let pattern = self.pattern();
        let caps = pattern.captures(text)?;
        let (date, default_time) = self.resolve(&caps, today)?;

        let remaining = if self.removes_all() {
            pattern.replace_all(text, "")
        } else {
            pattern.replace(text, "")
        };

        Some((
            DateMatch {
                rule: self,
                date,
                default_time,
            },
            remaining.into_owned(),
        ))
    }

    fn resolve(
        self,
        caps: &Captures<'_>,
        today: NaiveDate,
    ) -> Option<(NaiveDate, Option<NaiveTime>)> {
        match self {
            Self::MonthDay => resolve_month_day(caps, today).map(|d| (d, None)),
            Self::Tomorrow => add_days(today, 1).map(|d| (d, None)),
            Self::Today => Some((today, None)),
            Self::Tonight => Some((today, NaiveTime::from_hms_opt(20, 0, 0))),
            Self::PartOfDay => {
                let hour = match caps.get(1)?.as_str().to_ascii_lowercase().as_str() {
                    "morning" => 9,
                    "afternoon" => 14,
                    _ => 18,
                };
                Some((today, NaiveTime::from_hms_opt(hour, 0, 0)))
            },
            Self::NextWeek => add_days(today, 7).map(|d| (d, None)),
            Self::ThisWeekend => upcoming_saturday(today).map(|d| (d, None)),
            Self::Weekday => {
                let name = caps.get(1)?.as_str().to_ascii_lowercase();
                let (_, weekday) = WEEKDAYS.iter().find(|(n, _)| *n == name)?;
                next_weekday_after(today, *weekday).map(|d| (d, None))
            },
            Self::RelativeOffset => resolve_relative_offset(caps, today).map(|d| (d, None)),
            Self::NumericDate => resolve_numeric_date(caps, today).map(|d| (d, None)),
        }
    }
}

fn month_index(name: &str) -> Option<i64> {
    let name = name.to_ascii_lowercase();
    let index = MONTHS
        .iter()
        .position(|m| *m == name)
        .or_else(|| MONTHS_SHORT.iter().position(|m| *m == name))?;
    i64::try_from(index).ok()
}

fn resolve_month_day(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    // Groups 1/2 hold "<day> <month>", groups 3/4 hold "<month> <day>"
    let (day, month) = match (caps.get(1), caps.get(2)) {
        (Some(day), Some(month)) => (day, month),
        _ => (caps.get(4)?, caps.get(3)?),
    };
    let day: i64 = day.as_str().parse().ok()?;
    let month0 = month_index(month.as_str())?;

    let this_year = overflowing_date(today.year(), month0, day)?;
    if this_year < today {
        overflowing_date(today.year() + 1, month0, day)
    } else {
        Some(this_year)
    }
}

fn resolve_relative_offset(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let amount: u32 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2)?.as_str().to_ascii_lowercase().as_str() {
        "day" => add_days(today, i64::from(amount)),
        "week" => add_days(today, i64::from(amount) * 7),
        _ => add_months_overflowing(today, amount),
    }
}

fn resolve_numeric_date(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let month: i64 = caps.get(1)?.as_str().parse().ok()?;
    let day: i64 = caps.get(2)?.as_str().parse().ok()?;
    let year = match caps.get(3) {
        Some(y) if y.as_str().len() == 2 => 2000 + y.as_str().parse::<i32>().ok()?,
        Some(y) => y.as_str().parse().ok()?,
        None => today.year(),
    };
    overflowing_date(year, month - 1, day)
}
