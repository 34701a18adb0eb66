//! Best-effort extraction of alarm, reminder, and map intents from free text.
//!
//! Pattern matching only: a time token (`7:30`, `6:30 AM`, `9pm`), a date
//! token (`25-12-2025`), daily-recurrence markers, and the `navigate to` /
//! `open map` prefixes. Anything else is reported back as unrecognized.

use alarmchat_core::models::Recurrence;
use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_english::{parse_date_string, Dialect};
use chrono_tz::Tz;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// hh:mm with optional am/pm, e.g. "7:30", "6:30 AM", "19:05"
    static ref CLOCK_TIME: Regex =
        Regex::new(r"\b(\d{1,2}):(\d{2})(?:\s?([AaPp])[Mm])?\b").unwrap();
    /// compact hour with meridiem, e.g. "7am", "9 PM"
    static ref COMPACT_TIME: Regex = Regex::new(r"\b(\d{1,2})\s?([AaPp])[Mm]\b").unwrap();
    /// dd-mm-yyyy, e.g. "25-12-2025"
    static ref DAY_MONTH_YEAR: Regex = Regex::new(r"\b(\d{1,2})-(\d{1,2})-(\d{4})\b").unwrap();
    /// "until 31-12-2025" recurrence bound
    static ref UNTIL_CLAUSE: Regex =
        Regex::new(r"(?i)\buntil\s+(\d{1,2})-(\d{1,2})-(\d{4})\b").unwrap();
}

/// When no time of day is mentioned alongside a date, schedule for 09:00.
const DEFAULT_HOUR: u32 = 9;

/// What a chat message asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Arm a one-shot alarm carrying the original message as its label.
    SetAlarm { label: String, at: DateTime<Utc> },
    /// Persist a scheduled task, possibly recurring.
    ScheduleTask {
        description: String,
        at: DateTime<Utc>,
        recurrence: Recurrence,
    },
    /// Look up a place on the map.
    OpenMap { query: String },
    /// Nothing schedulable found in the message.
    Unrecognized,
}

/// Parses one chat message. Wall-clock tokens are interpreted in `tz`;
/// `now` anchors "next occurrence" resolution.
pub fn parse_message(text: &str, now: DateTime<Utc>, tz: Tz) -> Intent {
    let text = text.trim();
    if text.is_empty() {
        return Intent::Unrecognized;
    }
    let lowered = text.to_lowercase();

    if let Some(query) = extract_map_query(&lowered) {
        return if query.is_empty() {
            Intent::Unrecognized
        } else {
            Intent::OpenMap { query }
        };
    }

    let until = UNTIL_CLAUSE.captures(text).and_then(|c| {
        end_of_day(
            c[3].parse().ok()?,
            c[2].parse().ok()?,
            c[1].parse().ok()?,
            tz,
        )
    });
    // Strip the until-clause so its date is not mistaken for the task date
    let remainder = UNTIL_CLAUSE.replace(text, "");

    let time = extract_time(&remainder);
    let date = extract_date(&remainder);

    let at = match (date, time) {
        (Some(date), time) => {
            let time = time.unwrap_or_else(|| NaiveTime::from_hms_opt(DEFAULT_HOUR, 0, 0).unwrap());
            match tz.from_local_datetime(&date.and_time(time)).earliest() {
                Some(local) => local.with_timezone(&Utc),
                None => return Intent::Unrecognized,
            }
        }
        (None, Some(time)) => match next_occurrence_of(time, now, tz) {
            Some(at) => at,
            None => return Intent::Unrecognized,
        },
        (None, None) => return Intent::Unrecognized,
    };

    let daily = lowered.contains("every day") || lowered.contains("everyday") || lowered.contains("daily");
    let recurrence = match (daily, until) {
        (true, Some(until)) => Recurrence::DailyUntil(until),
        (true, None) => Recurrence::Daily,
        (false, _) => Recurrence::Once,
    };

    let wants_task = recurrence != Recurrence::Once
        || date.is_some()
        || lowered.contains("task")
        || lowered.contains("remind");

    if wants_task {
        Intent::ScheduleTask {
            description: text.to_string(),
            at,
            recurrence,
        }
    } else {
        Intent::SetAlarm {
            label: text.to_string(),
            at,
        }
    }
}

/// Parses an explicit date expression such as "tomorrow 7am" or "2025-12-25".
pub fn parse_due_date(date_str: &str) -> Result<DateTime<Utc>> {
    parse_date_string(date_str, Utc::now(), Dialect::Uk)
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", date_str, e))
}

fn extract_map_query(lowered: &str) -> Option<String> {
    let rest = lowered
        .strip_prefix("navigate to")
        .or_else(|| lowered.strip_prefix("navigate"))
        .or_else(|| lowered.strip_prefix("open map"))?;
    Some(rest.trim_start_matches("to").trim().to_string())
}

fn extract_time(text: &str) -> Option<NaiveTime> {
    if let Some(c) = CLOCK_TIME.captures(text) {
        let hour: u32 = c[1].parse().ok()?;
        let minute: u32 = c[2].parse().ok()?;
        let hour = match c.get(3).map(|m| m.as_str().to_lowercase()) {
            Some(meridiem) => to_24_hour(hour, &meridiem)?,
            None if hour < 24 => hour,
            None => return None,
        };
        return NaiveTime::from_hms_opt(hour, minute, 0);
    }
    if let Some(c) = COMPACT_TIME.captures(text) {
        let hour: u32 = c[1].parse().ok()?;
        let hour = to_24_hour(hour, &c[2].to_lowercase())?;
        return NaiveTime::from_hms_opt(hour, 0, 0);
    }
    None
}

fn to_24_hour(hour: u32, meridiem: &str) -> Option<u32> {
    if !(1..=12).contains(&hour) {
        return None;
    }
    Some(match (meridiem, hour) {
        ("a", 12) => 0,
        ("a", h) => h,
        ("p", 12) => 12,
        ("p", h) => h + 12,
        _ => return None,
    })
}

fn extract_date(text: &str) -> Option<NaiveDate> {
    let c = DAY_MONTH_YEAR.captures(text)?;
    NaiveDate::from_ymd_opt(c[3].parse().ok()?, c[2].parse().ok()?, c[1].parse().ok()?)
}

/// Today at the given wall-clock time if that is still ahead, otherwise
/// tomorrow. Mirrors how a clock app resolves "wake me at 7:00".
fn next_occurrence_of(time: NaiveTime, now: DateTime<Utc>, tz: Tz) -> Option<DateTime<Utc>> {
    let today = now.with_timezone(&tz).date_naive();
    for date in [today, today + Duration::days(1)] {
        if let Some(candidate) = tz.from_local_datetime(&date.and_time(time)).earliest() {
            let candidate = candidate.with_timezone(&Utc);
            if candidate > now {
                return Some(candidate);
            }
        }
    }
    None
}

/// The recurrence bound covers the whole named day.
fn end_of_day(year: i32, month: u32, day: u32, tz: Tz) -> Option<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let end = date.and_time(NaiveTime::from_hms_opt(23, 59, 59)?);
    Some(tz.from_local_datetime(&end).earliest()?.with_timezone(&Utc))
}
