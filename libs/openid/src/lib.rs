//! # fident-openid
//!
//! Generation, validation, and decoding of Open IDs: compact, self-describing
//! identifiers that carry their category, owner, type, location, and creation
//! time.
//!
//! ## ID Format
//!
//! Every ID is 32 uppercase characters in four dash-separated segments:
//! `{time:9}-{indicator:1}{vendor:3}{type:2}{subtype:2}-{location:5}-{random:7}`
//!
//! Examples:
//! - `IPIH7MI2=-EABCCDEF-MISCR-V669VFQ`
//! - `LOYW3V28=-LFORTEST-LON01-3K9QZ0A`
//!
//! - The time segment is the creation time in milliseconds, base 36, right
//!   padded with `=`
//! - `MISCR` stands in for an unknown location
//! - When a vendor secret is used, the last character is a keyed checksum
//!
//! The checksum is a single hex digit. It catches tampering and wrong secrets,
//! but a forger has a 1-in-16 chance per guess, so it is not authentication.
//!
//! Uniqueness rests on the millisecond timestamp plus roughly 36 random bits
//! (31 when signed). Generators do not coordinate.

mod checksum;
mod codec;
mod config;
mod error;
mod id;
mod indicator;
mod time_key;

pub use checksum::checksum;
pub use codec::{
    describe, generate, generate_at, get_time_from_id, is_valid, validate, verify, DELIMITER,
    ID_LENGTH, LOCATION_LENGTH, RANDOM_LENGTH, SEGMENT_COUNT, TYPE_LENGTH, UNKNOWN_LOCATION,
    VENDOR_LENGTH,
};
pub use config::{Generator, GeneratorConfig, LOCATION_ENV, SECRET_ENV, VENDOR_ENV};
pub use error::OpenIdError;
pub use id::{Description, OpenId};
pub use indicator::{is_valid_indicator, Indicator, UnknownIndicator, INDICATOR_CHECKSUM};
pub use time_key::{decode_time_key, encode_time_key, PADDING_CHAR, TIME_KEY_LENGTH};
