use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Identifiers of the upstream data sources gridlake can extract from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Entsoe,
    Elexon,
}

impl SourceId {
    pub const ALL: [Self; 2] = [Self::Entsoe, Self::Elexon];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entsoe => "entsoe",
            Self::Elexon => "elexon",
        }
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "entsoe" => Ok(Self::Entsoe),
            "elexon" => Ok(Self::Elexon),
            other => Err(ValidationError::InvalidSource {
                value: other.to_owned(),
            }),
        }
    }
}
