use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ValidationError;

/// Spacing between consecutive points of a period, parsed from an ISO-8601
/// duration token such as `PT15M`, `PT1H` or `P1D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Resolution {
    minutes: u32,
}

impl Resolution {
    pub const QUARTER_HOUR: Self = Self { minutes: 15 };
    pub const HALF_HOUR: Self = Self { minutes: 30 };
    pub const HOUR: Self = Self { minutes: 60 };

    pub fn from_minutes(minutes: u32) -> Result<Self, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::EmptyResolution {
                value: format!("PT{minutes}M"),
            });
        }
        Ok(Self { minutes })
    }

    pub const fn minutes(self) -> u32 {
        self.minutes
    }

    /// Minutes elapsed between the period start and the point at `position`,
    /// `None` when the product does not fit.
    pub fn offset_minutes(self, position: u32) -> Option<i64> {
        i64::from(position.saturating_sub(1)).checked_mul(i64::from(self.minutes))
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (hours, minutes) = (self.minutes / 60, self.minutes % 60);
        match (hours, minutes) {
            (0, m) => write!(f, "PT{m}M"),
            (h, 0) => write!(f, "PT{h}H"),
            (h, m) => write!(f, "PT{h}H{m}M"),
        }
    }
}

impl FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let token = value.trim().to_ascii_uppercase();
        let invalid = || ValidationError::InvalidResolution {
            value: value.to_owned(),
        };

        let rest = token.strip_prefix('P').ok_or_else(invalid)?;
        let (date_part, time_part) = match rest.split_once('T') {
            Some((date_part, time_part)) => (date_part, Some(time_part)),
            None => (rest, None),
        };

        let mut minutes: u64 = 0;
        for (amount, unit) in components(date_part).ok_or_else(invalid)? {
            let step = match unit {
                'D' => amount.checked_mul(24 * 60),
                _ => return Err(invalid()),
            };
            minutes = step
                .and_then(|step| minutes.checked_add(step))
                .ok_or_else(invalid)?;
        }
        if let Some(time_part) = time_part {
            if time_part.is_empty() {
                return Err(invalid());
            }
            for (amount, unit) in components(time_part).ok_or_else(invalid)? {
                let step = match unit {
                    'H' => amount.checked_mul(60),
                    'M' => Some(amount),
                    _ => return Err(invalid()),
                };
                minutes = step
                    .and_then(|step| minutes.checked_add(step))
                    .ok_or_else(invalid)?;
            }
        }

        if rest.is_empty() {
            return Err(invalid());
        }
        let minutes = u32::try_from(minutes).map_err(|_| invalid())?;
        if minutes == 0 {
            return Err(ValidationError::EmptyResolution {
                value: value.to_owned(),
            });
        }
        Ok(Self { minutes })
    }
}

/// Splits `1H30M` into `[(1, 'H'), (30, 'M')]`.
fn components(part: &str) -> Option<Vec<(u64, char)>> {
    let mut out = Vec::new();
    let mut digits = String::new();
    for ch in part.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else {
            if digits.is_empty() {
                return None;
            }
            out.push((digits.parse().ok()?, ch));
            digits.clear();
        }
    }
    digits.is_empty().then_some(out)
}

impl Serialize for Resolution {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Resolution {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}
