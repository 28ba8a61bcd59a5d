//! Natural-language time expression parsing.
//!
//! Turns requests like "remind me every day at 8am to take my medicine" into
//! cleaned reminder text, an absolute due instant, and an optional
//! recurrence. Pure and deterministic given `now` — no I/O, no locking.

#[cfg(test)]
mod tests;

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::model::Recurrence;

/// Result of parsing a free-text reminder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReminder {
    pub text: String,
    pub due_time: DateTime<Utc>,
    pub recurrence: Option<Recurrence>,
}

static PREFIXED_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:at|by|for)\s+(\d{1,2})(?::(\d{2}))?\s*([ap]m)?\b").unwrap());
static BARE_TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})(?::(\d{2}))?\s*([ap]m)?\b").unwrap());
static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:(?:next|on)\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .unwrap()
});
static TRIGGER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:remind me to|remind me|set a reminder to|set a reminder|set reminder to|set reminder)\b")
        .unwrap()
});
static LEADING_FILLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:that|to)\b\s*").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Parse a reminder request.
///
/// Returns `None` when no reminder content remains after stripping the time
/// expression and trigger phrases — a parse failure, not an empty reminder.
pub fn parse(raw: &str, now: DateTime<Utc>) -> Option<ParsedReminder> {
    let mut text = raw.to_lowercase();

    let recurrence = extract_recurrence(&mut text);
    let day_shift = extract_day_keyword(&mut text, now);
    let clock_time = extract_time(&mut text);

    let due_time = resolve_due(now, day_shift, clock_time);
    let text = clean_text(&text)?;

    Some(ParsedReminder {
        text,
        due_time,
        recurrence,
    })
}

/// Detect and strip a recurrence phrase. Daily wins over weekly wins over
/// monthly when several appear.
fn extract_recurrence(text: &mut String) -> Option<Recurrence> {
    let classes: [(&[&str], Recurrence); 3] = [
        (&["every day", "daily"], Recurrence::Days(1)),
        (&["every week", "weekly"], Recurrence::Weeks(1)),
        (&["every month", "monthly"], Recurrence::Months(1)),
    ];
    for (phrases, recurrence) in classes {
        if phrases.iter().any(|p| text.contains(p)) {
            for p in phrases {
                *text = text.replace(p, " ");
            }
            return Some(recurrence);
        }
    }
    None
}

/// Detect and strip a day keyword ("tomorrow", "on friday", "next monday").
///
/// Returns how many days past today the reminder should land on. Weekdays
/// resolve to the next strictly future occurrence: naming today's weekday
/// means a week from now.
fn extract_day_keyword(text: &mut String, now: DateTime<Utc>) -> Option<i64> {
    if text.contains("tomorrow") {
        *text = text.replace("tomorrow", " ");
        return Some(1);
    }
    let caps = WEEKDAY.captures(text)?;
    let target = match &caps[1] {
        "monday" => Weekday::Mon,
        "tuesday" => Weekday::Tue,
        "wednesday" => Weekday::Wed,
        "thursday" => Weekday::Thu,
        "friday" => Weekday::Fri,
        "saturday" => Weekday::Sat,
        _ => Weekday::Sun,
    };
    let today = i64::from(now.weekday().num_days_from_monday());
    let mut ahead = (i64::from(target.num_days_from_monday()) - today).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    let span = caps.get(0).map(|m| m.range())?;
    text.replace_range(span, " ");
    Some(ahead)
}

/// Find the first valid time expression and strip it from the text.
///
/// A prefixed expression ("at 3pm", "by 15:30") wins over a bare one.
/// Matches whose hour or minute is out of range are not time expressions
/// and stay in the text.
fn extract_time(text: &mut String) -> Option<NaiveTime> {
    let (span, time) = find_time(text)?;
    text.replace_range(span, " ");
    Some(time)
}

fn find_time(text: &str) -> Option<(std::ops::Range<usize>, NaiveTime)> {
    for re in [&*PREFIXED_TIME, &*BARE_TIME] {
        for caps in re.captures_iter(text) {
            if let Some(time) = resolve_clock_time(&caps) {
                let span = caps.get(0)?.range();
                return Some((span, time));
            }
        }
    }
    None
}

/// Interpret captured hour/minute/meridiem. 12-hour only when am/pm is
/// present; "12am" maps to hour 0, pm adds 12 below noon.
fn resolve_clock_time(caps: &Captures) -> Option<NaiveTime> {
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    match caps.get(3).map(|m| m.as_str()) {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Resolve the absolute due instant.
///
/// An explicit day keyword fixes the date outright. Otherwise a resolved
/// clock time that is not strictly in the future rolls forward one day —
/// reminders are never scheduled in the past. With no time expression at
/// all, the reminder lands one hour from now.
fn resolve_due(
    now: DateTime<Utc>,
    day_shift: Option<i64>,
    clock_time: Option<NaiveTime>,
) -> DateTime<Utc> {
    match clock_time {
        Some(time) => {
            let date = now.date_naive() + Duration::days(day_shift.unwrap_or(0));
            let due = date.and_time(time).and_utc();
            if day_shift.is_none() && due <= now {
                due + Duration::days(1)
            } else {
                due
            }
        }
        None => now + Duration::hours(1) + Duration::days(day_shift.unwrap_or(0)),
    }
}

/// Strip trigger phrases and leading filler, collapse whitespace, trim
/// trailing punctuation. `None` when nothing remains.
fn clean_text(text: &str) -> Option<String> {
    let stripped = TRIGGER.replace_all(text, " ");
    let mut text = WHITESPACE.replace_all(&stripped, " ").trim().to_string();
    while let Some(end) = LEADING_FILLER.find(&text).map(|m| m.end()) {
        text.drain(..end);
    }
    let text = text
        .trim()
        .trim_matches(|c| matches!(c, '.' | ',' | '!' | '?'))
        .trim()
        .to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
