use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{error::ErrorKind, CommandFactory, Parser};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::cli::commands::{SessionCommand, SessionLine};
use crate::config::Config;
use crate::error::CalmtaskError;
use crate::models::{NewTask, Priority, Task};
use crate::output;
use crate::store::{sample, TaskStore};
use crate::views::{self, MonthGrid};

/// What a single session line produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Reply { data: Value, text: String },
    Skip,
    Quit,
}

impl Outcome {
    fn reply(data: Value, text: impl Into<String>) -> Self {
        Self::Reply {
            data,
            text: text.into(),
        }
    }
}

/// Owns the board for one process and turns command lines into store calls.
pub struct Session {
    store: TaskStore,
    config: Config,
    today: Option<NaiveDate>,
    json_output: bool,
}

impl Session {
    /// `today` pins the calendar day; `None` reads the local clock per command.
    pub fn new(config: Config, today: Option<NaiveDate>, json_output: bool) -> Self {
        Self {
            store: TaskStore::new(),
            config,
            today,
            json_output,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn seed_samples(&mut self) -> Result<usize, CalmtaskError> {
        let now = self.now();
        let added = sample::seed_sample_tasks(&mut self.store, now)?;
        info!(added, "sample tasks loaded");
        Ok(added)
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Current moment on the pinned day, keeping the wall-clock time.
    pub fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        match self.today {
            Some(day) => day.and_time(now.time()),
            None => now,
        }
    }

    /// Run every line from `input`, writing one rendering per command to `out`.
    ///
    /// Command errors are reported and the loop continues; only I/O failures end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<(), CalmtaskError> {
        for line in input.lines() {
            let line = line?;
            match self.execute(&line) {
                Ok(Outcome::Skip) => {}
                Ok(Outcome::Quit) => break,
                Ok(Outcome::Reply { data, text }) => {
                    if self.json_output {
                        writeln!(out, "{}", output::json::success(data))?;
                    } else {
                        writeln!(out, "{text}")?;
                    }
                }
                Err(e) => {
                    if self.json_output {
                        writeln!(out, "{}", output::json::error(&e))?;
                    } else {
                        writeln!(out, "Error: {}", e.message)?;
                    }
                }
            }
            out.flush()?;
        }
        Ok(())
    }

    pub fn execute(&mut self, line: &str) -> Result<Outcome, CalmtaskError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Outcome::Skip);
        }
        if has_inline_comment(trimmed) {
            return Err(CalmtaskError::invalid_command(format!(
                "Unquoted '#' would drop the rest of the line; quote text containing '#': {trimmed}"
            )));
        }
        let words = shlex::split(trimmed)
            .ok_or_else(|| CalmtaskError::invalid_command(format!("Unbalanced quotes in: {trimmed}")))?;

        let parsed = match SessionLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => {
                let help = e.to_string();
                return Ok(Outcome::reply(json!({ "help": help }), help));
            }
            Err(e) => {
                debug!(line = trimmed, "unparsable session line");
                return Err(CalmtaskError::invalid_command(e.to_string().trim_end()));
            }
        };
        self.dispatch(parsed.command)
    }

    fn dispatch(&mut self, command: SessionCommand) -> Result<Outcome, CalmtaskError> {
        match command {
            SessionCommand::Add {
                title,
                description,
                deadline,
                priority,
            } => self.run_add(title, description, deadline.as_deref(), priority.as_deref()),
            SessionCommand::Toggle { id } => self.run_toggle(&id),
            SessionCommand::List { completed, all } => Ok(self.run_list(completed, all)),
            SessionCommand::Show { id } => self.run_show(&id),
            SessionCommand::Home => Ok(self.run_home()),
            SessionCommand::Calendar { month } => self.run_calendar(month.as_deref()),
            SessionCommand::Agenda { date } => self.run_agenda(date.as_deref()),
            SessionCommand::Dates => Ok(self.run_dates()),
            SessionCommand::Stats => Ok(self.run_stats()),
            SessionCommand::Edit { id } => self.run_unsupported("edit", &id),
            SessionCommand::Delete { id } => self.run_unsupported("delete", &id),
            SessionCommand::Help => {
                let help = SessionLine::command().render_help().to_string();
                Ok(Outcome::reply(json!({ "help": help }), help))
            }
            SessionCommand::Quit => Ok(Outcome::Quit),
        }
    }

    fn run_add(
        &mut self,
        title: String,
        description: Option<String>,
        deadline: Option<&str>,
        priority: Option<&str>,
    ) -> Result<Outcome, CalmtaskError> {
        let now = self.now();
        // Flags are validated before the store is touched.
        let deadline = deadline.map(|d| views::parse_deadline(d, now)).transpose()?;
        let priority = match priority {
            Some(p) => Priority::from_str(p).ok_or_else(|| {
                CalmtaskError::invalid_argument(format!("Unknown priority '{p}'. Use low, medium or high"))
            })?,
            None => self.config.default_priority,
        };

        let task = self.store.create_task(
            NewTask {
                title,
                description,
                deadline,
                priority: Some(priority),
            },
            now,
        )?;
        Ok(Outcome::reply(
            json!({ "task": output::json::task_summary(&task, self.today()) }),
            format!("Added task: {} ({})", task.title, task.id),
        ))
    }

    fn run_toggle(&mut self, reference: &str) -> Result<Outcome, CalmtaskError> {
        let id = self.store.resolve(reference)?.id.clone();
        let task = self.store.toggle_completion(&id)?;
        let text = format!("Task {} → {}", task.id, views::status_label(task.completed));
        Ok(Outcome::reply(
            json!({
                "task": output::json::task_summary(&task, self.today()),
                "progress": output::json::progress_json(&self.store.progress())
            }),
            text,
        ))
    }

    fn run_list(&self, completed: bool, all: bool) -> Outcome {
        let today = self.today();
        let tasks: Vec<&Task> = if all {
            self.store.tasks().iter().collect()
        } else if completed {
            self.store.list_completed().collect()
        } else {
            self.store.list_active().collect()
        };
        Outcome::reply(
            json!({ "tasks": output::json::task_list(&tasks, today) }),
            output::text::task_list(&tasks, today),
        )
    }

    fn run_show(&self, reference: &str) -> Result<Outcome, CalmtaskError> {
        let task = self.store.resolve(reference)?;
        Ok(Outcome::reply(
            json!({ "task": output::json::task_detail(task, self.today()) }),
            output::text::task_detail(task),
        ))
    }

    fn run_home(&self) -> Outcome {
        let today = self.today();
        let active: Vec<&Task> = self.store.list_active().collect();
        let completed: Vec<&Task> = self.store.list_completed().collect();
        Outcome::reply(
            json!({
                "summary": views::active_summary(active.len()),
                "active": output::json::task_list(&active, today),
                "completed": output::json::task_list(&completed, today)
            }),
            output::text::home(&active, &completed, today),
        )
    }

    fn run_calendar(&self, month: Option<&str>) -> Result<Outcome, CalmtaskError> {
        let today = self.today();
        let grid = match month {
            Some(m) => {
                let (year, month) = views::parse_month(m)?;
                MonthGrid::build(&self.store, year, month, today)?
            }
            None => MonthGrid::for_date(&self.store, today, today)?,
        };
        let agenda = self.store.tasks_on(today);
        Ok(Outcome::reply(
            json!({
                "month": output::json::month_grid_json(&grid),
                "today": output::json::task_list(&agenda, today)
            }),
            format!(
                "{}\n\n{}",
                output::text::month_grid(&grid),
                output::text::agenda(today, &agenda, today)
            ),
        ))
    }

    fn run_agenda(&self, date: Option<&str>) -> Result<Outcome, CalmtaskError> {
        let today = self.today();
        let date = date.map(views::parse_date).transpose()?.unwrap_or(today);
        let tasks = self.store.tasks_on(date);
        Ok(Outcome::reply(
            json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "label": views::format_relative_date(date, today),
                "tasks": output::json::task_list(&tasks, today)
            }),
            output::text::agenda(date, &tasks, today),
        ))
    }

    fn run_dates(&self) -> Outcome {
        let today = self.today();
        let groups = self.store.group_by_date();
        Outcome::reply(
            json!({ "dates": output::json::groups_json(&groups, today) }),
            output::text::groups(&groups, today),
        )
    }

    fn run_stats(&self) -> Outcome {
        let progress = self.store.progress();
        Outcome::reply(
            json!({ "progress": output::json::progress_json(&progress) }),
            output::text::progress(&progress),
        )
    }

    fn run_unsupported(&self, action: &str, reference: &str) -> Result<Outcome, CalmtaskError> {
        let task = self.store.resolve(reference)?;
        warn!(id = %task.id, action, "task {action} requested but not supported");
        Err(CalmtaskError::unsupported(action))
    }
}

/// True when a word starts with an unquoted `#`, which the shell-style
/// splitter would treat as a comment and silently discard.
fn has_inline_comment(line: &str) -> bool {
    let mut chars = line.chars();
    let mut quote: Option<char> = None;
    let mut word_start = true;
    while let Some(c) = chars.next() {
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                }
            }
            Some(_) => match c {
                '"' => quote = None,
                '\\' => {
                    chars.next();
                }
                _ => {}
            },
            None => match c {
                '#' if word_start => return true,
                '\'' | '"' => quote = Some(c),
                '\\' => {
                    chars.next();
                }
                _ => {}
            },
        }
        word_start = quote.is_none() && c.is_whitespace();
    }
    false
}

