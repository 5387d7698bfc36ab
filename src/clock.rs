use chrono::{FixedOffset, Local, NaiveDate, Utc};
use tracing::warn;

use crate::config::ScheduleConfig;

/// Source of the current civil date used to resolve "today" and "tomorrow".
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock, either at a fixed UTC offset or in the host's
/// local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn local() -> Self {
        Self { offset: None }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            offset: Some(offset),
        }
    }

    /// Clock at the config's UTC offset, or host local time when the config
    /// has none. An offset chrono cannot represent falls back to local time
    /// with a warning.
    pub fn for_config(config: &ScheduleConfig) -> Self {
        let offset = config.utc_offset();
        if let (Some(minutes), None) = (config.utc_offset_minutes, offset) {
            warn!(minutes, "utc_offset_minutes is not a usable offset; using local time");
        }
        Self { offset }
    }

    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
