use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CalmtaskError;
use crate::models::{NewTask, Priority};
use crate::store::TaskStore;

struct SampleTask {
    title: &'static str,
    due: (i32, u32, u32),
    priority: Priority,
    completed: bool,
}

const SAMPLE_TASKS: &[SampleTask] = &[
    SampleTask {
        title: "Morning meditation",
        due: (2025, 10, 26),
        priority: Priority::Low,
        completed: false,
    },
    SampleTask {
        title: "Team meeting prep",
        due: (2025, 10, 25),
        priority: Priority::High,
        completed: false,
    },
    SampleTask {
        title: "Grocery shopping",
        due: (2025, 10, 27),
        priority: Priority::Medium,
        completed: true,
    },
];

/// The day the sample board is laid out around.
pub fn sample_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 25).unwrap_or(NaiveDate::MIN)
}

/// Load the built-in starter board into `store`. Returns how many tasks were added.
pub fn seed_sample_tasks(store: &mut TaskStore, now: NaiveDateTime) -> Result<usize, CalmtaskError> {
    for sample in SAMPLE_TASKS {
        let (y, m, d) = sample.due;
        let deadline = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| CalmtaskError::invalid_argument(format!("bad sample date {y}-{m}-{d}")))?;

        let task = store.create_task(
            NewTask::new(sample.title)
                .deadline(deadline)
                .priority(sample.priority),
            now,
        )?;
        if sample.completed {
            store.toggle_completion(&task.id)?;
        }
    }
    Ok(SAMPLE_TASKS.len())
}
