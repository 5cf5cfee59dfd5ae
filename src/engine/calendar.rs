//! Week arithmetic and day-preference parsing for schedule construction.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

const DAYS: [(Weekday, &str, &str); 7] = [
    (Weekday::Mon, "monday", "mon"),
    (Weekday::Tue, "tuesday", "tue"),
    (Weekday::Wed, "wednesday", "wed"),
    (Weekday::Thu, "thursday", "thu"),
    (Weekday::Fri, "friday", "fri"),
    (Weekday::Sat, "saturday", "sat"),
    (Weekday::Sun, "sunday", "sun"),
];

/// Capitalized weekday name for display.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// The Monday of the week containing `date`.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The next Monday strictly after `date` (a Monday maps a full week ahead).
pub fn next_monday_from(date: NaiveDate) -> NaiveDate {
    date + Duration::days(7 - i64::from(date.weekday().num_days_from_monday()))
}

/// All seven dates of the week starting at `monday`.
pub fn week_dates(monday: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

/// The dates from `from` through the coming Sunday, inclusive.
pub fn remaining_week_dates(from: NaiveDate) -> Vec<NaiveDate> {
    let remaining = 7 - i64::from(from.weekday().num_days_from_monday());
    (0..remaining).map(|i| from + Duration::days(i)).collect()
}

/// Whether a free-form preference string mentions the date's weekday.
pub fn preference_mentions(preference: &str, date: NaiveDate) -> bool {
    let pref = preference.to_lowercase();
    DAYS.iter()
        .find(|(weekday, _, _)| *weekday == date.weekday())
        .map(|(_, _, abbr)| pref.contains(abbr))
        .unwrap_or(false)
}

/// Normalizes free-form day names ("Tue and thursday work for me") into a
/// canonical comma-separated list in week order. Returns `None` when no day
/// is recognized.
pub fn parse_preferred_days(message: &str) -> Option<String> {
    let m = message.to_lowercase();
    let found: Vec<&str> = DAYS
        .iter()
        .filter(|(_, _, abbr)| m.contains(abbr))
        .map(|(_, full, _)| *full)
        .collect();
    if found.is_empty() {
        None
    } else {
        Some(found.join(", "))
    }
}

/// The first weekday mentioned in a message, in week order.
pub fn parse_weekday(message: &str) -> Option<Weekday> {
    let m = message.to_lowercase();
    DAYS.iter()
        .find(|(_, _, abbr)| m.contains(abbr))
        .map(|(weekday, _, _)| *weekday)
}

/// The date of `weekday` within the week starting at `week_start`.
pub fn date_for_weekday(week_start: NaiveDate, weekday: Weekday) -> NaiveDate {
    let offset = (weekday.num_days_from_monday() + 7
        - week_start.weekday().num_days_from_monday())
        % 7;
    week_start + Duration::days(i64::from(offset))
}
