//! System indicators: the one-letter category at the head of the type segment.

use std::fmt;
use std::str::FromStr;

/// Concatenation of every indicator code, used for membership checks.
pub const INDICATOR_CHECKSUM: &str = "ELCMAFTRND";

/// Category of the thing an ID names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Indicator {
    /// Standard entities.
    #[default]
    Entity,
    /// Log entries.
    Log,
    /// Cached data.
    Cache,
    /// In-memory items.
    Memory,
    /// Meta data.
    Meta,
    /// Configuration items.
    Configuration,
    /// Time series data.
    TimeSeries,
    /// Relationships.
    Relationship,
    /// Notes and comments.
    Note,
    /// Files, usually stored in a bucket.
    File,
}

impl Indicator {
    /// Every indicator, in `INDICATOR_CHECKSUM` order.
    pub const ALL: [Indicator; 10] = [
        Indicator::Entity,
        Indicator::Log,
        Indicator::Cache,
        Indicator::Memory,
        Indicator::Meta,
        Indicator::Configuration,
        Indicator::TimeSeries,
        Indicator::Relationship,
        Indicator::Note,
        Indicator::File,
    ];

    /// Returns the one-letter code embedded in IDs.
    #[must_use]
    pub const fn code(&self) -> char {
        match self {
            Indicator::Entity => 'E',
            Indicator::Log => 'L',
            Indicator::Cache => 'C',
            Indicator::Memory => 'M',
            Indicator::Meta => 'A',
            Indicator::Configuration => 'F',
            Indicator::TimeSeries => 'T',
            Indicator::Relationship => 'R',
            Indicator::Note => 'N',
            Indicator::File => 'D',
        }
    }

    /// Looks up an indicator by code, ignoring ASCII case.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        let code = code.to_ascii_uppercase();
        Self::ALL.into_iter().find(|i| i.code() == code)
    }

    /// Parses an indicator, falling back to [`Indicator::Entity`] for anything
    /// that is not exactly one known code (including the empty string).
    #[must_use]
    pub fn normalize(proposed: &str) -> Self {
        match proposed.parse() {
            Ok(indicator) => indicator,
            Err(_) => {
                tracing::debug!(proposed, "unknown indicator, defaulting to entity");
                Indicator::Entity
            }
        }
    }
}

/// Returns true if `proposed` is exactly one known indicator code.
pub fn is_valid_indicator(proposed: &str) -> bool {
    proposed.parse::<Indicator>().is_ok()
}

/// Returned by the strict `FromStr` implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownIndicator(pub String);

impl fmt::Display for UnknownIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown indicator '{}': expected one of {}",
            self.0, INDICATOR_CHECKSUM
        )
    }
}

impl std::error::Error for UnknownIndicator {}

impl FromStr for Indicator {
    type Err = UnknownIndicator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => {
                Self::from_code(code).ok_or_else(|| UnknownIndicator(s.to_string()))
            }
            _ => Err(UnknownIndicator(s.to_string())),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl serde::Serialize for Indicator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_char(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Indicator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_matches_codes() {
        let codes: String = Indicator::ALL.iter().map(Indicator::code).collect();
        assert_eq!(codes, INDICATOR_CHECKSUM);
    }

    #[test]
    fn test_codes_unique() {
        let unique: std::collections::HashSet<_> =
            Indicator::ALL.iter().map(Indicator::code).collect();
        assert_eq!(unique.len(), Indicator::ALL.len());
    }

    #[test]
    fn test_valid_indicator() {
        assert!(is_valid_indicator("E"));
        assert!(is_valid_indicator("d"));
        assert!(!is_valid_indicator("Z"));
        assert!(!is_valid_indicator(""));
        assert!(!is_valid_indicator("EL"));
    }

    #[test]
    fn test_normalize_falls_back_to_entity() {
        assert_eq!(Indicator::normalize("L"), Indicator::Log);
        assert_eq!(Indicator::normalize("a"), Indicator::Meta);
        assert_eq!(Indicator::normalize("Z"), Indicator::Entity);
        assert_eq!(Indicator::normalize(""), Indicator::Entity);
        assert_eq!(Indicator::normalize("LOG"), Indicator::Entity);
    }

    #[test]
    fn test_from_str_roundtrip() {
        for indicator in Indicator::ALL {
            let parsed: Indicator = indicator.to_string().parse().unwrap();
            assert_eq!(parsed, indicator);
        }
    }

    #[test]
    fn test_json_as_code() {
        let json = serde_json::to_string(&Indicator::TimeSeries).unwrap();
        assert_eq!(json, "\"T\"");
        let parsed: Indicator = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Indicator::TimeSeries);
        assert!(serde_json::from_str::<Indicator>("\"Q\"").is_err());
    }
}
