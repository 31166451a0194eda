//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ELECTROHOME_DATA_DIR` - Directory holding the stored catalog, cart and
//!   admin flag (default: `.electrohome`)
//! - `ELECTROHOME_CHECKOUT_PHONE` - Phone number orders are sent to, digits
//!   only with country code (default: 5493804160373)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//!
//! The admin PIN is compiled in and cannot be configured.

use std::path::PathBuf;

use thiserror::Error;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = ".electrohome";

/// Default destination for checkout messages.
pub const DEFAULT_CHECKOUT_PHONE: &str = "5493804160373";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for persisted state
    pub data_dir: PathBuf,
    /// Phone number receiving checkout messages
    pub checkout_phone: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production")
    pub sentry_environment: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            checkout_phone: DEFAULT_CHECKOUT_PHONE.to_string(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("ELECTROHOME_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let checkout_phone = lookup("ELECTROHOME_CHECKOUT_PHONE")
            .unwrap_or_else(|| DEFAULT_CHECKOUT_PHONE.to_string());
        validate_phone(&checkout_phone, "ELECTROHOME_CHECKOUT_PHONE")?;

        Ok(Self {
            data_dir,
            checkout_phone,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|env| !env.is_empty()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Validate a messaging phone number: digits only, 8 to 15 of them (E.164
/// without the leading `+`).
fn validate_phone(phone: &str, var_name: &str) -> Result<(), ConfigError> {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must contain digits only (country code first, no '+')".to_string(),
        ));
    }
    if !(8..=15).contains(&phone.len()) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be 8 to 15 digits (got {})", phone.len()),
        ));
    }
    Ok(())
}
