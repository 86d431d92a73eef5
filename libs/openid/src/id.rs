//! The `OpenId` value type and its decoded `Description`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codec::{self, LOCATION_RANGE, RANDOM_RANGE, TIME_RANGE, TYPE_RANGE};
use crate::error::OpenIdError;
use crate::indicator::Indicator;

/// A structurally valid 32-character Open ID.
///
/// Holding an `OpenId` proves the layout is right. It says nothing about the
/// checksum; call [`OpenId::verify`] with the vendor secret for that.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpenId(String);

impl OpenId {
    /// Parses an ID, checking length, character set, and segment layout.
    pub fn parse(s: &str) -> Result<Self, OpenIdError> {
        codec::validate(s)?;
        Ok(Self(s.to_string()))
    }

    pub(crate) fn from_validated(s: String) -> Self {
        Self(s)
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the ID and returns the owned string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// The raw time key, padding included.
    #[must_use]
    pub fn time_key(&self) -> &str {
        &self.0[TIME_RANGE]
    }

    /// The indicator, or `None` if the letter is not a known code.
    #[must_use]
    pub fn indicator(&self) -> Option<Indicator> {
        self.0[TYPE_RANGE].chars().next().and_then(Indicator::from_code)
    }

    #[must_use]
    pub fn vendor(&self) -> &str {
        &self.type_segment()[1..4]
    }

    #[must_use]
    pub fn id_type(&self) -> &str {
        &self.type_segment()[4..6]
    }

    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.type_segment()[6..8]
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.0[LOCATION_RANGE]
    }

    /// The random segment, including the trailing checksum position.
    #[must_use]
    pub fn random(&self) -> &str {
        &self.0[RANDOM_RANGE]
    }

    /// The last character, which is the checksum when the ID was signed.
    #[must_use]
    pub fn checksum_char(&self) -> char {
        self.0.chars().last().unwrap_or_default()
    }

    /// Decodes the embedded timestamp.
    pub fn timestamp(&self) -> Result<DateTime<Utc>, OpenIdError> {
        codec::get_time_from_id(&self.0)
    }

    /// Decodes every field.
    pub fn describe(&self) -> Result<Description, OpenIdError> {
        codec::describe(&self.0)
    }

    /// Checks the trailing checksum against `secret`. An empty secret always passes.
    pub fn verify(&self, secret: &str) -> Result<(), OpenIdError> {
        codec::verify(&self.0, secret)
    }

    fn type_segment(&self) -> &str {
        &self.0[TYPE_RANGE]
    }
}

impl std::fmt::Display for OpenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for OpenId {
    type Err = OpenIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for OpenId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<OpenId> for String {
    fn from(id: OpenId) -> Self {
        id.0
    }
}

impl serde::Serialize for OpenId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for OpenId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        codec::validate(&s).map_err(serde::de::Error::custom)?;
        Ok(Self(s))
    }
}

/// Decoded fields of an ID, produced by [`describe`](crate::describe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Description {
    pub(crate) indicator_code: char,
    pub(crate) indicator: Option<Indicator>,
    pub(crate) vendor: String,
    pub(crate) id_type: String,
    pub(crate) subtype: String,
    pub(crate) location: String,
    pub(crate) time_key: String,
    pub(crate) time: DateTime<Utc>,
    pub(crate) random: String,
}

impl Description {
    /// The indicator letter as it appears in the ID.
    pub fn indicator_code(&self) -> char {
        self.indicator_code
    }

    /// The indicator, or `None` for letters outside the known set.
    pub fn indicator(&self) -> Option<Indicator> {
        self.indicator
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn id_type(&self) -> &str {
        &self.id_type
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn time_key(&self) -> &str {
        &self.time_key
    }

    /// The generation instant, millisecond precision.
    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    /// The random segment, including the trailing checksum position.
    pub fn random(&self) -> &str {
        &self.random
    }
}
