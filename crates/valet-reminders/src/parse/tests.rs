use super::*;
use chrono::TimeZone;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

// 2024-01-01 is a Monday.
fn monday_morning() -> DateTime<Utc> {
    at(2024, 1, 1, 10, 0)
}

#[test]
fn test_tomorrow_with_afternoon_time() {
    let parsed = parse("remind me to call mom tomorrow at 3pm", monday_morning()).unwrap();
    assert_eq!(parsed.text, "call mom");
    assert_eq!(parsed.due_time, at(2024, 1, 2, 15, 0));
    assert_eq!(parsed.recurrence, None);
}

#[test]
fn test_daily_recurrence_rolls_past_time_forward() {
    let now = at(2024, 1, 1, 9, 0);
    let parsed = parse("remind me every day at 8am to take my medicine", now).unwrap();
    assert_eq!(parsed.text, "take my medicine");
    assert_eq!(parsed.recurrence, Some(Recurrence::Days(1)));
    // 08:00 today has passed, so the first firing is tomorrow morning.
    assert_eq!(parsed.due_time, at(2024, 1, 2, 8, 0));
}

#[test]
fn test_future_time_today_stays_today() {
    let parsed = parse("remind me to check the oven at 3pm", monday_morning()).unwrap();
    assert_eq!(parsed.text, "check the oven");
    assert_eq!(parsed.due_time, at(2024, 1, 1, 15, 0));
}

#[test]
fn test_past_time_never_schedules_in_the_past() {
    let parsed = parse("remind me to stretch at 9am", monday_morning()).unwrap();
    assert_eq!(parsed.due_time, at(2024, 1, 2, 9, 0));
    assert!(parsed.due_time > monday_morning());
}

#[test]
fn test_no_time_defaults_to_one_hour_out() {
    let parsed = parse("remind me to water the plants", monday_morning()).unwrap();
    assert_eq!(parsed.text, "water the plants");
    assert_eq!(parsed.due_time, at(2024, 1, 1, 11, 0));
}

#[test]
fn test_minutes_and_24_hour_clock() {
    let parsed = parse("remind me to join standup at 15:30", monday_morning()).unwrap();
    assert_eq!(parsed.text, "join standup");
    assert_eq!(parsed.due_time, at(2024, 1, 1, 15, 30));

    let parsed = parse("remind me to leave by 5:45pm", monday_morning()).unwrap();
    assert_eq!(parsed.text, "leave");
    assert_eq!(parsed.due_time, at(2024, 1, 1, 17, 45));
}

#[test]
fn test_midnight_and_noon_edges() {
    // 12am is hour 0; it has always passed, so it lands tomorrow.
    let parsed = parse("remind me to take out the trash at 12am", monday_morning()).unwrap();
    assert_eq!(parsed.due_time, at(2024, 1, 2, 0, 0));

    let parsed = parse("remind me to eat lunch at 12pm", monday_morning()).unwrap();
    assert_eq!(parsed.due_time, at(2024, 1, 1, 12, 0));
}

#[test]
fn test_weekly_and_monthly_recurrence() {
    let parsed = parse("remind me weekly at 9am to file my timesheet", monday_morning()).unwrap();
    assert_eq!(parsed.recurrence, Some(Recurrence::Weeks(1)));
    assert_eq!(parsed.text, "file my timesheet");

    let parsed = parse("remind me to pay rent every month at 9am", monday_morning()).unwrap();
    assert_eq!(parsed.recurrence, Some(Recurrence::Months(1)));
    assert_eq!(parsed.text, "pay rent");
}

#[test]
fn test_weekday_resolves_to_next_occurrence() {
    let parsed = parse("remind me to submit the report on friday at 5pm", monday_morning()).unwrap();
    assert_eq!(parsed.text, "submit the report");
    assert_eq!(parsed.due_time, at(2024, 1, 5, 17, 0));
}

#[test]
fn test_todays_weekday_means_next_week() {
    let parsed = parse("remind me to plan the week next monday at 9am", monday_morning()).unwrap();
    assert_eq!(parsed.text, "plan the week");
    assert_eq!(parsed.due_time, at(2024, 1, 8, 9, 0));
}

#[test]
fn test_leading_that_is_stripped() {
    let parsed = parse("remind me that the meeting starts at 4pm", monday_morning()).unwrap();
    assert_eq!(parsed.text, "the meeting starts");
    assert_eq!(parsed.due_time, at(2024, 1, 1, 16, 0));
}

#[test]
fn test_trailing_punctuation_is_trimmed() {
    let parsed = parse("Remind me to call mom!", monday_morning()).unwrap();
    assert_eq!(parsed.text, "call mom");
}

#[test]
fn test_empty_content_is_a_parse_failure() {
    assert!(parse("remind me to", monday_morning()).is_none());
    assert!(parse("set a reminder at 3pm", monday_morning()).is_none());
    assert!(parse("   ", monday_morning()).is_none());
}

#[test]
fn test_out_of_range_numbers_are_not_times() {
    // 99 cannot be an hour; it stays in the text and the default applies.
    let parsed = parse("remind me to buy 99 balloons", monday_morning()).unwrap();
    assert_eq!(parsed.text, "buy 99 balloons");
    assert_eq!(parsed.due_time, at(2024, 1, 1, 11, 0));
}

#[test]
fn test_prefixed_time_wins_over_bare() {
    let parsed = parse("remind me to buy 2 croissants at 7am", monday_morning()).unwrap();
    assert_eq!(parsed.text, "buy 2 croissants");
    assert_eq!(parsed.due_time, at(2024, 1, 2, 7, 0));
}

#[test]
fn test_deterministic_given_now() {
    let a = parse("remind me to call mom tomorrow at 3pm", monday_morning());
    let b = parse("remind me to call mom tomorrow at 3pm", monday_morning());
    assert_eq!(a, b);
}
