use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::FeedError;

/// Four letter ICAO style identifier, always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AirportCode {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 4 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(FeedError::InvalidAirport(s.to_string()))
        }
    }
}

impl TryFrom<String> for AirportCode {
    type Error = FeedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AirportCode> for String {
    fn from(value: AirportCode) -> Self {
        value.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_code_is_uppercased() {
        let code: AirportCode = "irfd".parse().unwrap();
        assert_eq!(code.as_str(), "IRFD");
    }

    #[test]
    fn test_airport_code_rejects_wrong_length_and_digits() {
        assert!("IRF".parse::<AirportCode>().is_err());
        assert!("IRFDX".parse::<AirportCode>().is_err());
        assert!("IRF1".parse::<AirportCode>().is_err());
    }

    #[test]
    fn test_airport_code_from_json() {
        let code: AirportCode = serde_json::from_str("\"IPPH\"").unwrap();
        assert_eq!(code.to_string(), "IPPH");
        assert!(serde_json::from_str::<AirportCode>("\"IPP\"").is_err());
    }
}
