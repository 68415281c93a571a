use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::Task;
use crate::store::TaskProgress;
use crate::views::{self, MonthGrid, WEEKDAY_NAMES};

pub fn task_line(t: &Task, today: NaiveDate) -> String {
    format!(
        "  [{}] {} ({}) {} {}",
        if t.completed { "x" } else { " " },
        t.title,
        t.id,
        views::format_relative_date(t.deadline.date(), today),
        views::priority_color(Some(t.priority)).as_str(),
    )
}

pub fn task_list(tasks: &[&Task], today: NaiveDate) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    tasks
        .iter()
        .map(|t| task_line(t, today))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn task_detail(t: &Task) -> String {
    let description = if t.description.is_empty() {
        views::NO_DESCRIPTION
    } else {
        t.description.as_str()
    };
    let mut out = String::new();
    let _ = writeln!(out, "Task: {} ({})", t.title, t.id);
    let _ = writeln!(out, "  Status: {}", views::status_label(t.completed));
    let _ = writeln!(out, "  Deadline: {}", views::format_long_date(t.deadline.date()));
    let _ = writeln!(
        out,
        "  Priority: {} Priority ({})",
        views::priority_label(t.priority),
        views::priority_color(Some(t.priority)).hex()
    );
    let _ = write!(out, "  Description: {description}");
    out
}

pub fn home(active: &[&Task], completed: &[&Task], today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", views::active_summary(active.len()));
    let _ = writeln!(out, "\nActive Tasks");
    if active.is_empty() {
        let _ = writeln!(out, "  All caught up!");
    } else {
        let _ = writeln!(out, "{}", task_list(active, today));
    }
    if !completed.is_empty() {
        let _ = writeln!(out, "\nCompleted");
        let _ = writeln!(out, "{}", task_list(completed, today));
    }
    out.trim_end().to_string()
}

pub fn month_grid(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.title());
    let _ = writeln!(out, "{}", WEEKDAY_NAMES.map(|d| format!(" {d} ")).concat().trim_end());
    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                None => "     ".to_string(),
                Some(day) => {
                    let mark = if grid.marked_days.contains(day) { "*" } else { " " };
                    if grid.today == Some(*day) {
                        format!("[{day:>2}]{mark}")
                    } else {
                        format!(" {day:>2}{mark} ")
                    }
                }
            })
            .collect();
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out.trim_end().to_string()
}

pub fn agenda(date: NaiveDate, tasks: &[&Task], today: NaiveDate) -> String {
    let header = format!("{} ({})", views::format_relative_date(date, today), date.format("%Y-%m-%d"));
    if tasks.is_empty() {
        return format!("{header}\n  No tasks scheduled.");
    }
    format!("{header}\n{}", task_list(tasks, today))
}

pub fn groups(groups: &BTreeMap<NaiveDate, Vec<&Task>>, today: NaiveDate) -> String {
    if groups.is_empty() {
        return "No tasks found.".to_string();
    }
    groups
        .iter()
        .map(|(date, tasks)| agenda(*date, tasks, today))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn progress(p: &TaskProgress) -> String {
    format!(
        "Progress: {:.1}% ({}/{})\n  active={} completed={}",
        p.percentage, p.completed, p.total, p.active, p.completed
    )
}
