//! Track duration value object: whole seconds, never negative.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// A track length in whole seconds.
///
/// Displays as zero-padded `MM:SS`; the minute field keeps growing past 99
/// rather than rolling into hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(i64);

impl Duration {
    pub fn from_seconds(seconds: i64) -> Result<Self, ValidationError> {
        if seconds < 0 {
            return Err(ValidationError::NegativeDuration(seconds));
        }
        Ok(Self(seconds))
    }

    pub fn seconds(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

// Serialize as the plain integer second count
impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seconds = i64::deserialize(deserializer)?;
        Duration::from_seconds(seconds).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative_seconds() {
        assert!(matches!(
            Duration::from_seconds(-1),
            Err(ValidationError::NegativeDuration(-1))
        ));
        assert!(Duration::from_seconds(0).is_ok());
    }

    #[test]
    fn test_display_as_minutes_and_seconds() {
        let cases = [
            (0, "00:00"),
            (9, "00:09"),
            (59, "00:59"),
            (60, "01:00"),
            (61, "01:01"),
            (205, "03:25"),
            (3600, "60:00"),
            (6037, "100:37"),
        ];
        for (seconds, expected) in cases {
            assert_eq!(Duration::from_seconds(seconds).unwrap().to_string(), expected);
        }
    }

    #[test]
    fn test_serde_as_integer_seconds() {
        let duration = Duration::from_seconds(205).unwrap();
        let json = serde_json::to_string(&duration).unwrap();
        assert_eq!(json, "205");

        let back: Duration = serde_json::from_str(&json).unwrap();
        assert_eq!(back, duration);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let result: Result<Duration, _> = serde_json::from_str("-205");
        assert!(result.is_err());
    }
}
