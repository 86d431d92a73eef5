//! Vendor-scoped generator configured once from the environment or a file.

use chrono::Utc;
use serde::Deserialize;

use crate::codec::{self, VENDOR_LENGTH};
use crate::error::OpenIdError;
use crate::id::OpenId;
use crate::indicator::Indicator;

/// Environment variable holding the 3-character vendor code.
pub const VENDOR_ENV: &str = "FIDENT_VENDOR";

/// Environment variable holding the 5-character location. Optional.
pub const LOCATION_ENV: &str = "FIDENT_LOCATION";

/// Environment variable holding the checksum secret. Optional.
pub const SECRET_ENV: &str = "FIDENT_SECRET";

/// Settings shared by every ID a service generates.
#[derive(Clone, Default, Deserialize)]
pub struct GeneratorConfig {
    pub vendor: String,
    /// Empty means the unknown-location sentinel.
    #[serde(default)]
    pub location: String,
    /// Empty means IDs are not signed.
    #[serde(default)]
    pub secret: String,
}

impl GeneratorConfig {
    /// Reads the config from `FIDENT_*` variables. Fails with
    /// [`OpenIdError::MissingEnv`] when `FIDENT_VENDOR` is unset.
    pub fn from_env() -> Result<Self, OpenIdError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OpenIdError> {
        let vendor = lookup(VENDOR_ENV).ok_or(OpenIdError::MissingEnv { var: VENDOR_ENV })?;

        Ok(Self {
            vendor,
            location: lookup(LOCATION_ENV).unwrap_or_default(),
            secret: lookup(SECRET_ENV).unwrap_or_default(),
        })
    }
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("vendor", &self.vendor)
            .field("location", &self.location)
            .field("secret", &if self.secret.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

/// Generates and verifies IDs for a single vendor.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Validates the vendor code up front so `generate` only fails on type codes.
    pub fn new(mut config: GeneratorConfig) -> Result<Self, OpenIdError> {
        config.vendor = codec::required_field("vendor", &config.vendor, VENDOR_LENGTH)?;
        tracing::debug!(
            vendor = %config.vendor,
            signed = !config.secret.is_empty(),
            "open id generator configured"
        );
        Ok(Self { config })
    }

    pub fn from_env() -> Result<Self, OpenIdError> {
        Self::new(GeneratorConfig::from_env()?)
    }

    pub fn vendor(&self) -> &str {
        &self.config.vendor
    }

    /// Returns true if generated IDs carry a checksum.
    pub fn is_signed(&self) -> bool {
        !self.config.secret.is_empty()
    }

    pub fn generate(
        &self,
        indicator: Indicator,
        id_type: &str,
        subtype: &str,
    ) -> Result<OpenId, OpenIdError> {
        codec::assemble(
            Utc::now(),
            indicator,
            &self.config.vendor,
            id_type,
            subtype,
            &self.config.location,
            &self.config.secret,
        )
    }

    /// Verifies `id` against this generator's secret.
    pub fn verify(&self, id: &str) -> Result<(), OpenIdError> {
        codec::verify(id, &self.config.secret)
    }
}
