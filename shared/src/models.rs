use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit suffix attached to a decomposed yen amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum YenUnit {
    /// Whole 億 with no 万 remainder, rendered "億円".
    #[serde(rename = "億円")]
    Oku,
    /// Rendered "万円".
    #[serde(rename = "万円")]
    Man,
}

impl YenUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            YenUnit::Oku => "億円",
            YenUnit::Man => "万円",
        }
    }
}

impl fmt::Display for YenUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A yen amount split into its grouped numeral and unit suffix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormattedParts {
    pub magnitude: String,
    pub unit: YenUnit,
}

impl FormattedParts {
    pub fn new(magnitude: impl Into<String>, unit: YenUnit) -> Self {
        Self {
            magnitude: magnitude.into(),
            unit,
        }
    }
}

impl fmt::Display for FormattedParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}
