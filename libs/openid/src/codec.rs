//! Generation, structural validation, checksum verification, and decoding.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::checksum;
use crate::error::OpenIdError;
use crate::id::{Description, OpenId};
use crate::indicator::Indicator;
use crate::time_key::{self, ALPHABET, PADDING_CHAR, TIME_KEY_LENGTH};

/// Total length of an ID.
pub const ID_LENGTH: usize = 32;

/// Separator between segments.
pub const DELIMITER: char = '-';

/// Number of dash-separated segments.
pub const SEGMENT_COUNT: usize = 4;

/// Width of the vendor code.
pub const VENDOR_LENGTH: usize = 3;

/// Width of the type and subtype codes.
pub const TYPE_LENGTH: usize = 2;

/// Width of the location segment.
pub const LOCATION_LENGTH: usize = 5;

/// Width of the random suffix segment, including the checksum position.
pub const RANDOM_LENGTH: usize = 7;

/// Location used when none (or a malformed one) is supplied.
pub const UNKNOWN_LOCATION: &str = "MISCR";

const TYPE_SEGMENT_LENGTH: usize = 1 + VENDOR_LENGTH + 2 * TYPE_LENGTH;

const SEGMENTS: [(&str, usize); SEGMENT_COUNT] = [
    ("time", TIME_KEY_LENGTH),
    ("type", TYPE_SEGMENT_LENGTH),
    ("location", LOCATION_LENGTH),
    ("random", RANDOM_LENGTH),
];

// Segment offsets within a validated ID.
pub(crate) const TIME_RANGE: std::ops::Range<usize> = 0..TIME_KEY_LENGTH;
pub(crate) const TYPE_RANGE: std::ops::Range<usize> =
    TIME_RANGE.end + 1..TIME_RANGE.end + 1 + TYPE_SEGMENT_LENGTH;
pub(crate) const LOCATION_RANGE: std::ops::Range<usize> =
    TYPE_RANGE.end + 1..TYPE_RANGE.end + 1 + LOCATION_LENGTH;
pub(crate) const RANDOM_RANGE: std::ops::Range<usize> =
    LOCATION_RANGE.end + 1..LOCATION_RANGE.end + 1 + RANDOM_LENGTH;

/// Generates a new ID stamped with the current time.
///
/// - an unknown or empty `indicator` becomes [`Indicator::Entity`]
/// - `vendor` must be 3 and `id_type` 2 alphanumeric characters
/// - a malformed `subtype` repeats `id_type`
/// - a malformed `location` becomes [`UNKNOWN_LOCATION`]
/// - a non-empty `secret` replaces the last random character with a checksum
pub fn generate(
    indicator: &str,
    vendor: &str,
    id_type: &str,
    subtype: &str,
    location: &str,
    secret: &str,
) -> Result<OpenId, OpenIdError> {
    generate_at(
        Utc::now(),
        indicator,
        vendor,
        id_type,
        subtype,
        location,
        secret,
    )
}

/// Same as [`generate`], stamped with `at` instead of the current time.
pub fn generate_at(
    at: DateTime<Utc>,
    indicator: &str,
    vendor: &str,
    id_type: &str,
    subtype: &str,
    location: &str,
    secret: &str,
) -> Result<OpenId, OpenIdError> {
    assemble(
        at,
        Indicator::normalize(indicator),
        vendor,
        id_type,
        subtype,
        location,
        secret,
    )
}

pub(crate) fn assemble(
    at: DateTime<Utc>,
    indicator: Indicator,
    vendor: &str,
    id_type: &str,
    subtype: &str,
    location: &str,
    secret: &str,
) -> Result<OpenId, OpenIdError> {
    let time_key = time_key::encode_time_key(at)?;
    let vendor = required_field("vendor", vendor, VENDOR_LENGTH)?;
    let id_type = required_field("type", id_type, TYPE_LENGTH)?;

    let subtype = well_formed(subtype, TYPE_LENGTH).unwrap_or_else(|| {
        tracing::debug!(subtype, "malformed subtype, repeating type");
        id_type.clone()
    });
    let location = well_formed(location, LOCATION_LENGTH).unwrap_or_else(|| {
        if !location.is_empty() {
            tracing::debug!(location, "malformed location, using sentinel");
        }
        UNKNOWN_LOCATION.to_string()
    });

    let mut id = format!(
        "{time_key}{DELIMITER}{indicator}{vendor}{id_type}{subtype}{DELIMITER}{location}{DELIMITER}{}",
        random_suffix()
    );

    if !secret.is_empty() {
        id.pop();
        let check = checksum::checksum(secret, &id);
        id.push(check);
    }

    debug_assert!(validate(&id).is_ok(), "generated malformed ID {id}");
    tracing::debug!(%id, signed = !secret.is_empty(), "generated open id");
    Ok(OpenId::from_validated(id))
}

/// Checks length, character set, and segment layout. No checksum is checked.
pub fn validate(id: &str) -> Result<(), OpenIdError> {
    if id.len() != ID_LENGTH {
        return Err(OpenIdError::InvalidLength {
            expected: ID_LENGTH,
            actual: id.len(),
        });
    }

    if let Some(c) = id.chars().find(|&c| c != DELIMITER && !is_id_char(c)) {
        return Err(OpenIdError::InvalidFormat {
            message: format!("unexpected character '{c}'"),
        });
    }

    let segments: Vec<&str> = id.split(DELIMITER).collect();
    if segments.len() != SEGMENT_COUNT {
        return Err(OpenIdError::InvalidStructure {
            expected: SEGMENT_COUNT,
            actual: segments.len(),
        });
    }

    for (segment, (name, width)) in segments.iter().zip(SEGMENTS) {
        if segment.len() != width {
            return Err(OpenIdError::InvalidFormat {
                message: format!(
                    "{name} segment must be {width} characters, got {}",
                    segment.len()
                ),
            });
        }
    }

    Ok(())
}

/// Verifies an ID.
///
/// With an empty `secret` only the structure is checked and any trailing
/// character is accepted. Otherwise the trailing character must be the
/// checksum of the first 31 characters under `secret`.
pub fn verify(id: &str, secret: &str) -> Result<(), OpenIdError> {
    validate(id)?;

    if secret.is_empty() {
        return Ok(());
    }

    let (body, check) = id.split_at(ID_LENGTH - 1);
    let check = check.chars().next().unwrap_or(PADDING_CHAR);
    if !checksum::matches(secret, body, check) {
        tracing::debug!(%id, "checksum mismatch");
        return Err(OpenIdError::ChecksumMismatch);
    }

    Ok(())
}

/// Boolean form of [`verify`].
pub fn is_valid(id: &str, secret: &str) -> bool {
    verify(id, secret).is_ok()
}

/// Decodes every field of a structurally valid ID.
pub fn describe(id: &str) -> Result<Description, OpenIdError> {
    validate(id)?;

    let time_key = &id[TIME_RANGE];
    let time = time_key::decode_time_key(time_key)?;
    let type_segment = &id[TYPE_RANGE];
    let indicator_code = type_segment.chars().next().unwrap_or(PADDING_CHAR);
    let vendor_end = 1 + VENDOR_LENGTH;
    let type_end = vendor_end + TYPE_LENGTH;

    Ok(Description {
        indicator_code,
        indicator: Indicator::from_code(indicator_code),
        vendor: type_segment[1..vendor_end].to_string(),
        id_type: type_segment[vendor_end..type_end].to_string(),
        subtype: type_segment[type_end..].to_string(),
        location: id[LOCATION_RANGE].to_string(),
        time_key: time_key.to_string(),
        time,
        random: id[RANDOM_RANGE].to_string(),
    })
}

/// Returns the instant embedded in an ID's time key.
pub fn get_time_from_id(id: &str) -> Result<DateTime<Utc>, OpenIdError> {
    validate(id)?;
    time_key::decode_time_key(&id[TIME_RANGE])
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == PADDING_CHAR
}

/// Upper-cases `value` and returns it if it is exactly `width` of `[A-Z0-9]`.
fn well_formed(value: &str, width: usize) -> Option<String> {
    let upper = value.to_ascii_uppercase();
    (upper.len() == width && upper.bytes().all(|b| b.is_ascii_alphanumeric())).then_some(upper)
}

pub(crate) fn required_field(
    field: &'static str,
    value: &str,
    width: usize,
) -> Result<String, OpenIdError> {
    well_formed(value, width).ok_or_else(|| OpenIdError::InvalidField {
        field,
        expected: width,
        actual: value.to_string(),
    })
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..RANDOM_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
