use chrono::{Days, NaiveDate};

use crate::builder;
use crate::config::ScheduleConfig;
use crate::lesson::{DATE_FORMAT, Lesson, format_date};

/// A term's lessons, expanded once from its config and read-only afterwards.
///
/// Construct one at startup and hand out references (or an `Arc`) to the
/// query layer; nothing mutates it after [`Schedule::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    config: ScheduleConfig,
    lessons: Vec<Lesson>,
}

impl Schedule {
    pub fn new(config: ScheduleConfig) -> Self {
        let lessons = builder::build(&config);
        Self { config, lessons }
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Every lesson of the term, ordered by date then start time.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Lessons whose date, written as `YYYY-MM-DD`, equals `date` exactly.
    /// Any other spelling of a date matches nothing.
    pub fn by_date(&self, date: &str) -> &[Lesson] {
        match NaiveDate::parse_from_str(date, DATE_FORMAT) {
            Ok(parsed) if format_date(parsed) == date => self.lessons_on(parsed),
            _ => &[],
        }
    }

    pub fn lessons_on(&self, date: NaiveDate) -> &[Lesson] {
        self.lessons_between(date, date)
    }

    /// Lessons dated `start..=end`; empty when `start > end`.
    pub fn lessons_between(&self, start: NaiveDate, end: NaiveDate) -> &[Lesson] {
        if start > end {
            return &[];
        }
        let lo = self.lessons.partition_point(|lesson| lesson.date < start);
        let hi = self.lessons.partition_point(|lesson| lesson.date <= end);
        &self.lessons[lo..hi]
    }

    /// Lessons from Monday through Sunday of the labelled week.
    pub fn lessons_in_week(&self, week: u32) -> &[Lesson] {
        let Some(monday) = builder::week_monday(&self.config, week) else {
            return &[];
        };
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
        self.lessons_between(monday, sunday)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}
