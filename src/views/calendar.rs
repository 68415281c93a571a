use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use crate::error::CalmtaskError;
use crate::store::TaskStore;

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// One month of the calendar screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub days_in_month: u32,
    /// Empty cells before the 1st; Sunday-first weeks.
    pub leading_blanks: u32,
    pub marked_days: BTreeSet<u32>,
    pub today: Option<u32>,
}

impl MonthGrid {
    pub fn build(store: &TaskStore, year: i32, month: u32, today: NaiveDate) -> Result<Self, CalmtaskError> {
        let first = first_of_month(year, month)?;
        let (next_year, next_month) = Self::shift(year, month, 1);
        let days_in_month = first_of_month(next_year, next_month)?
            .signed_duration_since(first)
            .num_days() as u32;

        let today = (today.year() == year && today.month() == month).then(|| today.day());

        Ok(Self {
            year,
            month,
            month_name: MONTH_NAMES[(month - 1) as usize],
            days_in_month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            marked_days: store.days_with_tasks(year, month),
            today,
        })
    }

    pub fn for_date(store: &TaskStore, date: NaiveDate, today: NaiveDate) -> Result<Self, CalmtaskError> {
        Self::build(store, date.year(), date.month(), today)
    }

    /// Move `delta` months away from (`year`, `month`), rolling the year over.
    pub fn shift(year: i32, month: u32, delta: i32) -> (i32, u32) {
        let index = year * 12 + (month as i32 - 1) + delta;
        (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.month_name, self.year)
    }

    /// Rows of seven cells, `None` for padding.
    pub fn weeks(&self) -> Vec<Vec<Option<u32>>> {
        let cells: Vec<Option<u32>> = (0..self.leading_blanks)
            .map(|_| None)
            .chain((1..=self.days_in_month).map(Some))
            .collect();
        cells
            .chunks(7)
            .map(|week| {
                let mut row = week.to_vec();
                row.resize(7, None);
                row
            })
            .collect()
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalmtaskError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalmtaskError::invalid_argument(format!("Invalid month: {year}-{month:02}")))
}
