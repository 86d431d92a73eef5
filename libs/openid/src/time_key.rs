//! Time key: the base-36 millisecond timestamp at the head of every ID.
//!
//! The key is the plain millisecond count since the Unix epoch in uppercase
//! base 36, left-aligned and right-padded with `=` to nine characters. Keys
//! need eight digits until 2059-05-25 and nine after that; instants from the
//! year 5188 on no longer fit.

use chrono::{DateTime, Utc};

use crate::error::OpenIdError;

/// Width of the time segment.
pub const TIME_KEY_LENGTH: usize = 9;

/// Character appended to short keys.
pub const PADDING_CHAR: char = '=';

/// Digits of the base-36 alphabet, also used for random suffixes.
pub(crate) const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const RADIX: u32 = 36;

/// Encodes an instant as a padded time key.
pub fn encode_time_key(at: DateTime<Utc>) -> Result<String, OpenIdError> {
    let millis = at.timestamp_millis();
    let overflow = || {
        tracing::warn!(millis, "timestamp outside the representable time key range");
        OpenIdError::TimeKeyOverflow {
            millis,
            width: TIME_KEY_LENGTH,
        }
    };

    let mut remaining = u64::try_from(millis).map_err(|_| overflow())?;
    let mut digits = Vec::with_capacity(TIME_KEY_LENGTH);
    loop {
        digits.push(ALPHABET[(remaining % u64::from(RADIX)) as usize] as char);
        remaining /= u64::from(RADIX);
        if remaining == 0 {
            break;
        }
    }

    if digits.len() > TIME_KEY_LENGTH {
        return Err(overflow());
    }

    let mut key: String = digits.into_iter().rev().collect();
    while key.len() < TIME_KEY_LENGTH {
        key.push(PADDING_CHAR);
    }
    Ok(key)
}

/// Decodes a time key back into the instant it was generated at.
///
/// Every padding character is dropped before the digits are parsed.
pub fn decode_time_key(key: &str) -> Result<DateTime<Utc>, OpenIdError> {
    let invalid = || OpenIdError::InvalidTimeKey {
        key: key.to_string(),
    };

    let digits: String = key.chars().filter(|&c| c != PADDING_CHAR).collect();
    if digits.is_empty() || !digits.bytes().all(|b| ALPHABET.contains(&b)) {
        return Err(invalid());
    }

    let millis = i64::from_str_radix(&digits, RADIX).map_err(|_| invalid())?;
    DateTime::from_timestamp_millis(millis).ok_or_else(invalid)
}
