use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::error::CalmtaskError;

/// Quick picks offered by the add form, as day offsets from now.
pub const QUICK_DATES: [(&str, u64); 3] = [("today", 0), ("tomorrow", 1), ("next-week", 7)];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Parse a deadline typed by the user.
///
/// Quick picks keep the time of day of `now`. A bare date means midnight.
pub fn parse_deadline(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime, CalmtaskError> {
    let input = input.trim();
    let lowered = input.to_ascii_lowercase();
    if let Some((_, days)) = QUICK_DATES.iter().find(|(label, _)| *label == lowered) {
        return now
            .checked_add_days(Days::new(*days))
            .ok_or_else(|| CalmtaskError::invalid_argument(format!("Deadline out of range: {input}")));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(dt);
        }
    }
    let date = parse_date(input).map_err(|_| {
        CalmtaskError::invalid_argument(format!(
            "Invalid deadline '{input}'. Use today, tomorrow, next-week, YYYY-MM-DD or YYYY-MM-DD HH:MM"
        ))
    })?;
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| CalmtaskError::invalid_argument(format!("Invalid deadline '{input}'")))
}

pub fn parse_date(input: &str) -> Result<NaiveDate, CalmtaskError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| CalmtaskError::invalid_argument(format!("Invalid date '{input}'. Use YYYY-MM-DD")))
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(input: &str) -> Result<(i32, u32), CalmtaskError> {
    let invalid = || CalmtaskError::invalid_argument(format!("Invalid month '{input}'. Use YYYY-MM"));
    let (year, month) = input.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}
