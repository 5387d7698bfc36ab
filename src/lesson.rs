use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::rule::WeeklyRule;

/// Canonical textual form of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Canonical textual form of a time of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// One concrete, dated lesson produced from a [`WeeklyRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub subject: String,
    pub teacher: String,
    pub room: String,
}

impl Lesson {
    pub fn from_rule(rule: &WeeklyRule, date: NaiveDate) -> Self {
        Self {
            date,
            start: rule.start,
            end: rule.end,
            subject: rule.subject.clone(),
            teacher: rule.teacher.clone(),
            room: rule.room.clone(),
        }
    }

    /// `YYYY-MM-DD`
    pub fn date_key(&self) -> String {
        format_date(self.date)
    }

    /// `HH:mm–HH:mm`
    pub fn time_span(&self) -> String {
        format!(
            "{}\u{2013}{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), TIME_FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid time '{raw}' (expected HH:mm): {e}")))
    }
}
