use time::{Date, Duration};

use crate::domain::timestamp::{format_iso_date, parse_iso_date};
use crate::ConfigError;

/// Inclusive calendar-day range an extraction covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueryWindow {
    start: Date,
    end: Date,
}

impl QueryWindow {
    pub fn new(start: Date, end: Date) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvalidWindow {
                start: format_iso_date(start),
                end: format_iso_date(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Builds a window from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    pub fn single_day(day: Date) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    /// Number of calendar days covered, always at least one.
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end - self.start).whole_days() + 1).unwrap_or(1)
    }

    /// Every day in the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let start = self.start;
        (0..self.day_count()).map(move |offset| start + Duration::days(offset as i64))
    }
}
