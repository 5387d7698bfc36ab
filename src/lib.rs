pub mod builder;
pub mod clock;
pub mod config;
pub mod error;
pub mod export;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod lesson;
pub mod logging;
pub mod query;
pub mod rule;
pub mod schedule;

pub use builder::build;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ScheduleConfig, load_config_from_json, save_config_to_json};
pub use error::{TimetableError, TimetableResult};
pub use export::{save_lessons_to_csv, save_lessons_to_json, write_lessons_csv};
pub use lesson::Lesson;
pub use query::{DaySchedule, ScheduleQuery, When};
pub use rule::{WeeklyRule, week_range};
pub use schedule::Schedule;
