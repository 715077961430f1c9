use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use crate::ValidationError;

/// ENTSO-E documents carry minute precision with a literal `Z`.
const MINUTE_PRECISION: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]Z");
const SPACE_SEPARATED: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
const SPACE_SEPARATED_MINUTES: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");
const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Absolute timestamp guaranteed to be UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcDateTime(OffsetDateTime);

impl UtcDateTime {
    /// Parses any of the timestamp spellings the upstream documents use.
    ///
    /// Accepted, in order: RFC 3339 (converted to UTC), `YYYY-MM-DDTHH:MMZ`,
    /// `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD HH:MM` and a bare `YYYY-MM-DD`
    /// (midnight). Offset-less forms are taken as UTC.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();

        if let Ok(parsed) = OffsetDateTime::parse(trimmed, &Rfc3339) {
            return Ok(Self(parsed.to_offset(UtcOffset::UTC)));
        }

        for format in [MINUTE_PRECISION, SPACE_SEPARATED, SPACE_SEPARATED_MINUTES] {
            if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, format) {
                return Ok(Self(parsed.assume_utc()));
            }
        }

        Date::parse(trimmed, ISO_DATE)
            .map(Self::start_of_day)
            .map_err(|_| ValidationError::InvalidTimestamp {
                value: input.to_owned(),
            })
    }

    /// Midnight UTC at the start of `date`.
    pub fn start_of_day(date: Date) -> Self {
        Self(PrimitiveDateTime::new(date, Time::MIDNIGHT).assume_utc())
    }

    /// `None` when the result falls outside the representable date range.
    pub fn plus_minutes(self, minutes: i64) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        self.0.checked_add(Duration::seconds(seconds)).map(Self)
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn format_rfc3339(self) -> String {
        // RFC 3339 formatting only fails for years outside 0..=9999, which
        // `parse` cannot produce.
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.0.unix_timestamp().to_string())
    }
}

impl Display for UtcDateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_rfc3339())
    }
}

impl Serialize for UtcDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_rfc3339())
    }
}

impl<'de> Deserialize<'de> for UtcDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), ISO_DATE).map_err(|_| ValidationError::InvalidDate {
        value: input.to_owned(),
    })
}

/// Formats a calendar date as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}
