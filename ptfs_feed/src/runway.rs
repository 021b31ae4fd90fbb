use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Normalized runway identifier: two digit heading plus an optional `L`, `R` or `C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RunwayDesignator(String);

impl RunwayDesignator {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for RunwayDesignator {
    type Err = FeedError;

    /// Accepts `7`, `07`, `7l`, `25L` and so on. A single digit heading is
    /// zero padded, the side letter is uppercased.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let digits = raw.bytes().take_while(u8::is_ascii_digit).count();
        let (heading, side) = raw.split_at(digits);
        let side_ok = match side.as_bytes() {
            [] => true,
            [c] => matches!(c.to_ascii_uppercase(), b'L' | b'R' | b'C'),
            _ => false,
        };
        if !(1..=2).contains(&digits) || !side_ok {
            return Err(FeedError::InvalidRunway(s.to_string()));
        }
        Ok(Self(format!("{:0>2}{}", heading, side.to_ascii_uppercase())))
    }
}

impl TryFrom<String> for RunwayDesignator {
    type Error = FeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RunwayDesignator> for String {
    fn from(value: RunwayDesignator) -> Self {
        value.0
    }
}

impl fmt::Display for RunwayDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunwayRole {
    Departure,
    Arrival,
}

impl RunwayRole {
    /// Tag used in advisory text, as in `DEP RWY 25L`.
    pub fn advisory_tag(self) -> &'static str {
        match self {
            Self::Departure => "DEP",
            Self::Arrival => "ARR",
        }
    }
}
