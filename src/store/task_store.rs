use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};
use ulid::Ulid;

use crate::error::CalmtaskError;
use crate::models::{NewTask, Task};

/// In-memory, insertion-ordered task collection.
///
/// Projections borrow the store, so they can never outlive the next mutation.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskProgress {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub percentage: f64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task built from `new_task`. `now` stands in for the creation
    /// time and the default deadline.
    pub fn create_task(&mut self, new_task: NewTask, now: NaiveDateTime) -> Result<Task, CalmtaskError> {
        let title = new_task.title.trim();
        if title.is_empty() {
            debug!("rejected task with empty title");
            return Err(CalmtaskError::empty_title());
        }

        let task = Task {
            id: self.fresh_id(),
            title: title.to_string(),
            description: new_task.description.unwrap_or_default(),
            deadline: new_task.deadline.unwrap_or(now),
            priority: new_task.priority.unwrap_or_default(),
            completed: false,
            created_at: now,
        };
        info!(id = %task.id, priority = task.priority.as_str(), "task created");
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub fn toggle_completion(&mut self, id: &str) -> Result<Task, CalmtaskError> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            warn!(id, "toggle requested for unknown task");
            return Err(CalmtaskError::task_not_found(id));
        };
        task.completed = !task.completed;
        info!(id, completed = task.completed, "task toggled");
        Ok(task.clone())
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolve a task by exact ID, falling back to a unique ID prefix.
    /// Prefixes ignore ASCII case, like ULIDs themselves.
    pub fn resolve(&self, reference: &str) -> Result<&Task, CalmtaskError> {
        if let Some(task) = self.get(reference) {
            return Ok(task);
        }
        if reference.is_empty() {
            return Err(CalmtaskError::task_not_found(reference));
        }

        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| {
                t.id.get(..reference.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(reference))
            })
            .collect();
        match matches.as_slice() {
            [] => {
                warn!(reference, "no task matches reference");
                Err(CalmtaskError::task_not_found(reference))
            }
            [task] => Ok(task),
            _ => {
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|t| format!("{} ({})", t.title, t.id))
                    .collect();
                Err(CalmtaskError::ambiguous_ref(reference, &candidates))
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn list_active(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(|t| !t.completed)
    }

    pub fn list_completed(&self) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(|t| t.completed)
    }

    /// Bucket tasks by the calendar day of their deadline.
    pub fn group_by_date(&self) -> BTreeMap<NaiveDate, Vec<&Task>> {
        let mut buckets: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
        for task in &self.tasks {
            buckets.entry(task.deadline.date()).or_default().push(task);
        }
        buckets
    }

    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.deadline.date() == date)
            .collect()
    }

    /// Days of `month` that carry at least one task.
    pub fn days_with_tasks(&self, year: i32, month: u32) -> BTreeSet<u32> {
        self.tasks
            .iter()
            .map(|t| t.deadline.date())
            .filter(|d| d.year() == year && d.month() == month)
            .map(|d| d.day())
            .collect()
    }

    pub fn progress(&self) -> TaskProgress {
        let total = self.tasks.len();
        let completed = self.list_completed().count();
        let percentage = if total > 0 {
            (completed as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        TaskProgress {
            total,
            active: total - completed,
            completed,
            percentage,
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Ulid::new().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
