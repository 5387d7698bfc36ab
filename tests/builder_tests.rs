use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use timetable::{ScheduleConfig, WeeklyRule, build, week_range};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn term() -> ScheduleConfig {
    ScheduleConfig::new(d(2026, 2, 16), 25)
        .with_rule(WeeklyRule::new(Weekday::Tue, t(14, 15), t(17, 35), "Software").with_weeks(week_range(25, 30)))
        .with_rule(WeeklyRule::new(Weekday::Tue, t(10, 15), t(11, 50), "Japanese").with_weeks(week_range(25, 30)))
        .with_rule(WeeklyRule::new(Weekday::Mon, t(8, 30), t(10, 5), "Calculus").with_weeks([30, 25, 27]))
        .with_rule(WeeklyRule::new(Weekday::Sun, t(7, 0), t(9, 0), "Seminar").with_weeks([26]))
}

#[test]
fn monday_rule_lands_on_anchor_and_next_monday() {
    let config = ScheduleConfig::new(d(2026, 2, 16), 25).with_rule(
        WeeklyRule::new(Weekday::Mon, t(8, 30), t(10, 5), "Calculus").with_weeks([25, 26]),
    );
    let dates: Vec<String> = build(&config).iter().map(|l| l.date_key()).collect();
    assert_eq!(dates, vec!["2026-02-16", "2026-02-23"]);
}

#[test]
fn one_occurrence_per_rule_and_week_on_the_right_weekday() {
    let config = term();
    let lessons = build(&config);
    let expected: usize = config.rules.iter().map(|r| r.weeks.len()).sum();
    assert_eq!(lessons.len(), expected);

    for rule in &config.rules {
        for &week in &rule.weeks {
            let hits: Vec<_> = lessons
                .iter()
                .filter(|l| l.subject == rule.subject && l.start == rule.start)
                .filter(|l| {
                    let days = (l.date - config.anchor_monday).num_days();
                    days.div_euclid(7) == i64::from(week) - 25
                })
                .collect();
            assert_eq!(hits.len(), 1, "{} week {week}", rule.subject);
            assert_eq!(hits[0].date.weekday(), rule.weekday);
        }
    }
}

#[test]
fn build_is_deterministic() {
    let config = term();
    assert_eq!(build(&config), build(&config));
}

#[test]
fn output_is_ordered_by_date_then_start() {
    let lessons = build(&term());
    for pair in lessons.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.date <= b.date);
        if a.date == b.date {
            assert!(a.start <= b.start);
        }
        let key_a = (a.date_key(), a.start.format("%H:%M").to_string());
        let key_b = (b.date_key(), b.start.format("%H:%M").to_string());
        assert!(key_a <= key_b);
    }
    // Japanese (10:15) sorts ahead of Software (14:15) on the same Tuesday.
    assert_eq!(lessons[1].subject, "Japanese");
    assert_eq!(lessons[2].subject, "Software");
}

#[test]
fn excluded_dates_never_appear() {
    // Tuesday of week 26 is hit by two rules.
    let holiday = d(2026, 2, 24);
    let config = term().with_excluded_dates([holiday, d(2026, 2, 16)]);
    let lessons = build(&config);
    assert!(lessons.iter().all(|l| l.date != holiday));
    assert!(lessons.iter().all(|l| l.date != d(2026, 2, 16)));
    assert_eq!(lessons.len(), build(&term()).len() - 3);
}

#[test]
fn weeks_before_the_anchor_are_accepted() {
    let config = ScheduleConfig::new(d(2026, 2, 16), 25).with_rule(
        WeeklyRule::new(Weekday::Wed, t(6, 45), t(8, 20), "Exercises").with_weeks([1, 24]),
    );
    let dates: Vec<String> = build(&config).iter().map(|l| l.date_key()).collect();
    assert_eq!(dates, vec!["2025-09-03", "2026-02-11"]);
}

#[test]
fn duplicate_weeks_produce_duplicate_lessons() {
    let config = ScheduleConfig::new(d(2026, 2, 16), 25).with_rule(
        WeeklyRule::new(Weekday::Fri, t(8, 30), t(10, 5), "Japanese 6").with_weeks([25, 25]),
    );
    let lessons = build(&config);
    assert_eq!(lessons.len(), 2);
    assert_eq!(lessons[0], lessons[1]);
}

#[test]
fn dates_roll_over_months_and_years() {
    let config = ScheduleConfig::new(d(2025, 12, 22), 1).with_rule(
        WeeklyRule::new(Weekday::Sun, t(9, 0), t(10, 0), "Review").with_weeks([1, 2, 10]),
    );
    let dates: Vec<String> = build(&config).iter().map(|l| l.date_key()).collect();
    assert_eq!(dates, vec!["2025-12-28", "2026-01-04", "2026-03-01"]);
}

#[test]
fn empty_config_builds_nothing() {
    assert!(build(&ScheduleConfig::new(d(2026, 2, 16), 25)).is_empty());
}
