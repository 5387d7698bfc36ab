//! Answers "what classes are on today / tomorrow / this date".

use chrono::Days;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::Clock;
use crate::lesson::{Lesson, format_date};
use crate::schedule::Schedule;

/// The day a caller is asking about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum When {
    Today,
    Tomorrow,
    /// An explicit date, kept verbatim.
    Date(String),
}

impl When {
    /// `"today"` and `"tomorrow"` are keywords; anything else is taken as a
    /// date string without validation.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "today" => When::Today,
            "tomorrow" => When::Tomorrow,
            other => When::Date(other.to_string()),
        }
    }
}

impl fmt::Display for When {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            When::Today => f.write_str("today"),
            When::Tomorrow => f.write_str("tomorrow"),
            When::Date(date) => f.write_str(date),
        }
    }
}

/// Lessons for a single resolved date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: String,
    pub lessons: Vec<Lesson>,
}

/// Read-only lookups over a borrowed [`Schedule`].
#[derive(Debug, Clone, Copy)]
pub struct ScheduleQuery<'a, C> {
    schedule: &'a Schedule,
    clock: C,
}

impl<'a, C: Clock> ScheduleQuery<'a, C> {
    pub fn new(schedule: &'a Schedule, clock: C) -> Self {
        Self { schedule, clock }
    }

    pub fn schedule(&self) -> &'a Schedule {
        self.schedule
    }

    /// Turns `when` into the `YYYY-MM-DD` text it refers to. Explicit dates
    /// pass through untouched.
    pub fn resolve_date(&self, when: &When) -> String {
        match when {
            When::Today => format_date(self.clock.today()),
            When::Tomorrow => {
                let today = self.clock.today();
                // Only NaiveDate::MAX has no successor.
                format_date(today.checked_add_days(Days::new(1)).unwrap_or(today))
            }
            When::Date(date) => date.clone(),
        }
    }

    pub fn resolve(&self, when: &When) -> DaySchedule {
        let date = self.resolve_date(when);
        let lessons = self.schedule.by_date(&date).to_vec();
        DaySchedule { date, lessons }
    }

    /// Accepts `"today"`, `"tomorrow"` or a `YYYY-MM-DD` date.
    pub fn get_schedule(&self, when: &str) -> DaySchedule {
        self.resolve(&When::parse(when))
    }

    /// Accepts a `YYYY-MM-DD` date only.
    pub fn get_schedule_by_date(&self, date: &str) -> Vec<Lesson> {
        self.schedule.by_date(date).to_vec()
    }
}
