use chrono::NaiveDate;

use crate::models::Priority;

pub const NO_DESCRIPTION: &str =
    "No description added yet. Add details to keep track of what needs to be done.";

/// "Today", "Tomorrow", or a short month/day label such as "Oct 27".
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(date) {
        return "Tomorrow".to_string();
    }
    date.format("%b %-d").to_string()
}

/// Month name and year, e.g. "October 2025".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

pub fn status_label(completed: bool) -> &'static str {
    if completed {
        "Completed"
    } else {
        "In Progress"
    }
}

pub fn active_summary(active: usize) -> String {
    let plural = if active == 1 { "" } else { "s" };
    format!("You have {active} task{plural} today")
}
