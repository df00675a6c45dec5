//! International Standard Recording Code value object.
//!
//! The ISRC is the business key of the whole catalog: tracks are stored,
//! looked up and reconciled by it. The format is fixed at twelve characters:
//! two-letter country code, three alphanumeric registrant characters, two
//! digits of year, five digits of designation.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ValidationError;

static ISRC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9A-Z]{3}[0-9]{2}[0-9]{5}$").unwrap());

/// A validated ISRC code.
///
/// # Example
///
/// ```ignore
/// use isrc_minder::domain::Isrc;
///
/// let isrc = Isrc::new("US7VG1846811")?;
/// assert_eq!(isrc.to_string(), "US7VG1846811");
/// assert!(Isrc::new("not-an-isrc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Isrc(String);

impl Isrc {
    /// Validate and wrap a code. Rejects anything that does not match the
    /// twelve-character ISRC format, including lowercase input.
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        if ISRC_PATTERN.is_match(code) {
            Ok(Self(code.to_owned()))
        } else {
            Err(ValidationError::InvalidIsrc(code.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isrc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Isrc {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Isrc {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Isrc::new(s)
    }
}

// Serialize as the bare code string
impl Serialize for Isrc {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

// Deserialization revalidates: a malformed code in a payload is an error,
// never a silently absent value
impl<'de> Deserialize<'de> for Isrc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Isrc::new(&code).map_err(serde::de::Error::custom)
    }
}
