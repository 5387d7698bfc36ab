//! Expansion of weekly rules into dated lessons.

use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

use crate::config::ScheduleConfig;
use crate::lesson::Lesson;
use crate::rule::WeeklyRule;

/// Expands every `(rule, week)` pair of `config` into a lesson, drops excluded
/// dates and returns the result ordered by date, then start time.
///
/// The same config always produces the same list. Week numbers before the
/// anchor week yield dates before the anchor Monday; duplicate week numbers
/// yield duplicate lessons.
pub fn build(config: &ScheduleConfig) -> Vec<Lesson> {
    let capacity = config.rules.iter().map(|rule| rule.weeks.len()).sum();
    let mut lessons = Vec::with_capacity(capacity);
    let mut excluded = 0usize;

    for rule in &config.rules {
        for &week in &rule.weeks {
            let Some(date) = occurrence_date(config, rule, week) else {
                warn!(
                    week,
                    subject = %rule.subject,
                    "week falls outside the representable calendar; skipping"
                );
                continue;
            };
            if config.excluded_dates.contains(&date) {
                excluded += 1;
                continue;
            }
            lessons.push(Lesson::from_rule(rule, date));
        }
    }

    // Stable, so lessons sharing a date and start keep rule order.
    lessons.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start.cmp(&b.start)));

    debug!(
        rules = config.rules.len(),
        lessons = lessons.len(),
        excluded,
        "expanded weekly rules"
    );
    lessons
}

/// Signed number of weeks between `week` and the anchor week.
pub fn week_offset(config: &ScheduleConfig, week: u32) -> i64 {
    i64::from(week) - i64::from(config.anchor_week_number)
}

/// Monday of the labelled week, relative to the anchor.
pub fn week_monday(config: &ScheduleConfig, week: u32) -> Option<NaiveDate> {
    shift_days(config.anchor_monday, week_offset(config, week) * 7)
}

/// Calendar date on which `rule` fires during `week`.
pub fn occurrence_date(config: &ScheduleConfig, rule: &WeeklyRule, week: u32) -> Option<NaiveDate> {
    shift_days(config.anchor_monday, week_offset(config, week) * 7 + rule.day_offset())
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}
