use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::lesson::hhmm;

/// A lesson that recurs on a fixed weekday across an explicit list of week numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WeeklyRule {
    /// ISO weekday; written as 1 (Monday) through 7 (Sunday).
    #[serde(with = "iso_weekday")]
    pub weekday: Weekday,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub subject: String,
    #[serde(default)]
    pub teacher: String,
    #[serde(default)]
    pub room: String,
    /// Week labels on which the rule fires. Duplicates are kept.
    pub weeks: Vec<u32>,
}

impl WeeklyRule {
    pub fn new(
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            weekday,
            start,
            end,
            subject: subject.into(),
            teacher: String::new(),
            room: String::new(),
            weeks: Vec::new(),
        }
    }

    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher = teacher.into();
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = room.into();
        self
    }

    pub fn with_weeks<I>(mut self, weeks: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        self.weeks = weeks.into_iter().collect();
        self
    }

    /// Days after the week's Monday on which this rule falls (0 for Monday).
    pub fn day_offset(&self) -> i64 {
        i64::from(self.weekday.num_days_from_monday())
    }
}

/// Inclusive list of week numbers, `from..=to`.
pub fn week_range(from: u32, to: u32) -> Vec<u32> {
    (from..=to).collect()
}

pub(crate) mod iso_weekday {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de};

    const ALL_WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(weekday.number_from_monday() as u8)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let iso = u8::deserialize(deserializer)?;
        iso.checked_sub(1)
            .and_then(|idx| ALL_WEEKDAYS.get(usize::from(idx)).copied())
            .ok_or_else(|| de::Error::custom(format!("weekday must be 1..=7, got {iso}")))
    }
}
