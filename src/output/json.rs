use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::error::CalmtaskError;
use crate::models::Task;
use crate::store::TaskProgress;
use crate::views::{self, MonthGrid};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &CalmtaskError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn task_summary(t: &Task, today: NaiveDate) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "deadline": t.deadline.format("%Y-%m-%dT%H:%M:%S").to_string(),
        "priority": t.priority.as_str(),
        "completed": t.completed,
        "color": views::priority_color(Some(t.priority)).as_str(),
        "due_label": views::format_relative_date(t.deadline.date(), today)
    })
}

pub fn task_list(tasks: &[&Task], today: NaiveDate) -> Value {
    Value::Array(tasks.iter().map(|t| task_summary(t, today)).collect())
}

pub fn task_detail(t: &Task, today: NaiveDate) -> Value {
    let color = views::priority_color(Some(t.priority));
    let mut v = task_summary(t, today);
    v["status"] = json!(views::status_label(t.completed));
    v["deadline_label"] = json!(views::format_long_date(t.deadline.date()));
    v["priority_label"] = json!(views::priority_label(t.priority));
    v["color_hex"] = json!(color.hex());
    v["created_at"] = json!(t.created_at.format("%Y-%m-%dT%H:%M:%S").to_string());
    v
}

pub fn progress_json(p: &TaskProgress) -> Value {
    json!({
        "total": p.total,
        "active": p.active,
        "completed": p.completed,
        "percentage": (p.percentage * 10.0).round() / 10.0
    })
}

pub fn groups_json(groups: &BTreeMap<NaiveDate, Vec<&Task>>, today: NaiveDate) -> Value {
    let dates: Vec<Value> = groups
        .iter()
        .map(|(date, tasks)| {
            json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "label": views::format_relative_date(*date, today),
                "tasks": task_list(tasks, today)
            })
        })
        .collect();
    Value::Array(dates)
}

pub fn month_grid_json(grid: &MonthGrid) -> Value {
    json!({
        "year": grid.year,
        "month": grid.month,
        "title": grid.title(),
        "days_in_month": grid.days_in_month,
        "leading_blanks": grid.leading_blanks,
        "marked_days": grid.marked_days,
        "today": grid.today
    })
}
