use chrono::{FixedOffset, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::info;

use crate::error::{TimetableError, TimetableResult};
use crate::rule::{WeeklyRule, week_range};

/// Offset carried by the built-in term (UTC+7). Loaded configs without
/// `utc_offset_minutes` use the host's local time instead.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 7 * 60;

const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// Everything needed to expand a term's weekly timetable into dated lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_name: Option<String>,
    /// Monday of the reference week.
    pub anchor_monday: NaiveDate,
    /// Label of the reference week; other week numbers are offsets from it.
    pub anchor_week_number: u32,
    pub rules: Vec<WeeklyRule>,
    #[serde(default)]
    pub excluded_dates: BTreeSet<NaiveDate>,
    /// Fixed UTC offset used to resolve "today" and "tomorrow". `None` falls
    /// back to the host's local time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl ScheduleConfig {
    pub fn new(anchor_monday: NaiveDate, anchor_week_number: u32) -> Self {
        Self {
            term_name: None,
            anchor_monday,
            anchor_week_number,
            rules: Vec::new(),
            excluded_dates: BTreeSet::new(),
            utc_offset_minutes: None,
        }
    }

    pub fn with_rule(mut self, rule: WeeklyRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_excluded_dates<I>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        self.excluded_dates.extend(dates);
        self
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = Some(minutes);
        self
    }

    /// The configured offset, or `None` when unset or not a valid offset.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| minutes.checked_mul(60))
            .and_then(FixedOffset::east_opt)
    }

    /// Rejects settings the rest of the crate cannot represent. Week numbers
    /// and lesson times are not checked.
    pub fn validate(&self) -> TimetableResult<()> {
        if let Some(minutes) = self.utc_offset_minutes {
            if minutes.unsigned_abs() >= MAX_OFFSET_MINUTES.unsigned_abs() {
                return Err(TimetableError::InvalidConfig(format!(
                    "utc_offset_minutes must be within \u{b1}{MAX_OFFSET_MINUTES}, got {minutes}"
                )));
            }
        }
        if let Some((idx, _)) = self
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.subject.trim().is_empty())
        {
            return Err(TimetableError::InvalidConfig(format!(
                "rule #{idx} requires a non-empty subject"
            )));
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    /// The spring term timetable: week 25 starts on Monday 2026-02-16 and
    /// every class runs weeks 25 through 42.
    fn default() -> Self {
        let weeks = week_range(25, 42);
        let rule = |weekday, start: (u32, u32), end: (u32, u32), subject: &str, teacher: &str, room: &str| {
            WeeklyRule::new(weekday, hm(start), hm(end), subject)
                .with_teacher(teacher)
                .with_room(room)
                .with_weeks(weeks.iter().copied())
        };

        let mut config = Self::new(ymd(2026, 2, 16), 25).with_utc_offset_minutes(DEFAULT_UTC_OFFSET_MINUTES);
        config.term_name = Some("Spring 2026".to_string());
        config.rules = vec![
            rule(Weekday::Mon, (8, 30), (10, 5), "Phương trình vi phân và chuỗi", "Ninh Văn Thu", "D9-301"),
            rule(Weekday::Tue, (10, 15), (11, 50), "Kỹ năng ITSS học bằng tiếng Nhật 1", "Nguyễn Thị Diệp", "BI-203"),
            rule(Weekday::Tue, (12, 30), (14, 5), "Kỹ năng ITSS học bằng tiếng Nhật 1", "Nguyễn Thị Diệp", "BI-203"),
            rule(Weekday::Tue, (14, 15), (17, 35), "Phát triển phần mềm theo chuẩn kỹ năng ITSS", "Nguyễn Mạnh Tuấn", "D9-401"),
            rule(Weekday::Wed, (6, 45), (8, 20), "Phương trình vi phân và chuỗi (BT)", "Đỗ Đức Thuận", "D9-405"),
            rule(Weekday::Thu, (6, 45), (9, 15), "Tư duy công nghệ và thiết kế kỹ thuật", "Lương Thị Hồng Liên / Trần Anh Vũ", "D9-202"),
            rule(Weekday::Thu, (14, 15), (17, 35), "Tiếng Nhật chuyên ngành 2", "Nguyễn Phi Lê", "BI-207"),
            rule(Weekday::Fri, (8, 30), (10, 5), "Tiếng Nhật 6", "Jingu Anna", "C7-219"),
            rule(Weekday::Fri, (12, 30), (14, 5), "Nhập môn Trí tuệ nhân tạo", "Đỗ Tiến Dũng", "D9-401"),
        ];
        config
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn hm((h, m): (u32, u32)) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> TimetableResult<ScheduleConfig> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let config: ScheduleConfig = serde_json::from_reader(file)?;
    config.validate()?;
    info!(
        path = %path.display(),
        rules = config.rules.len(),
        excluded = config.excluded_dates.len(),
        "loaded schedule config"
    );
    Ok(config)
}

pub fn save_config_to_json<P: AsRef<Path>>(config: &ScheduleConfig, path: P) -> TimetableResult<()> {
    config.validate()?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_term_matches_published_timetable() {
        let config = ScheduleConfig::default();
        assert_eq!(config.anchor_monday, ymd(2026, 2, 16));
        assert_eq!(config.anchor_week_number, 25);
        assert_eq!(config.rules.len(), 9);
        assert!(config.rules.iter().all(|r| r.weeks == week_range(25, 42)));
        assert!(config.excluded_dates.is_empty());
        assert_eq!(config.utc_offset_minutes, Some(420));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn offset_beyond_a_day_is_rejected() {
        let config = ScheduleConfig::new(ymd(2026, 2, 16), 25).with_utc_offset_minutes(1440);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TimetableError::InvalidConfig(_)));
    }

    #[test]
    fn blank_subject_is_rejected() {
        let config = ScheduleConfig::new(ymd(2026, 2, 16), 25).with_rule(WeeklyRule::new(
            Weekday::Mon,
            hm((8, 0)),
            hm((9, 0)),
            "  ",
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn utc_offset_converts_minutes() {
        let config = ScheduleConfig::new(ymd(2026, 2, 16), 25).with_utc_offset_minutes(-90);
        assert_eq!(config.utc_offset(), FixedOffset::west_opt(90 * 60));
        assert_eq!(ScheduleConfig::new(ymd(2026, 2, 16), 25).utc_offset(), None);
    }

    #[test]
    fn unusable_offsets_yield_none_without_overflow() {
        for minutes in [40_000_000, i32::MIN, 2000, -1440] {
            let config = ScheduleConfig::new(ymd(2026, 2, 16), 25).with_utc_offset_minutes(minutes);
            assert_eq!(config.utc_offset(), None, "{minutes}");
            assert!(config.validate().is_err(), "{minutes}");
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw = r#"{"anchor_monday":"2026-02-16","anchor_week_number":25,"rules":[],"holidays":[]}"#;
        assert!(serde_json::from_str::<ScheduleConfig>(raw).is_err());
    }

    #[test]
    fn optional_fields_default() {
        let raw = r#"{"anchor_monday":"2026-02-16","anchor_week_number":25,"rules":[]}"#;
        let config: ScheduleConfig = serde_json::from_str(raw).unwrap();
        assert!(config.excluded_dates.is_empty());
        assert_eq!(config.utc_offset_minutes, None);
        assert_eq!(config.term_name, None);
    }
}
