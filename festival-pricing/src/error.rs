//! Error types for festival pricing.
//!
//! Pricing itself never fails: missing or malformed aggregates are coerced to
//! zero (see [`crate::absent`]). The errors here belong to the surfaces around
//! the engine - loading configuration, validating event names and decoding
//! caller-supplied selections. All errors implement [`std::error::Error`] via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration Errors** ([`PricingError::InvalidConfig`],
//!   [`PricingError::ConfigParse`], [`PricingError::ConfigIo`]): rejected, unparsable or
//!   unreadable pricing config
//! - **Validation Errors** ([`PricingError::InvalidEventKey`],
//!   [`PricingError::InvalidSelection`]): rejected caller input
//! - **Decoding Errors** ([`PricingError::Json`]): payloads that are not JSON at all
//!
//! # Examples
//!
//! ```
//! use festival_pricing::error::{PricingError, Result};
//!
//! fn parse_count(raw: &str) -> Result<u32> {
//!     raw.parse()
//!         .map_err(|_| PricingError::InvalidSelection(format!("'{raw}' is not a count")))
//! }
//!
//! assert!(parse_count("3").is_ok());
//! assert!(parse_count("three").is_err());
//! ```

use thiserror::Error;

/// Result type alias for pricing operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Errors that can occur around the pricing engine.
///
/// The error messages are user-facing and name the offending value.
///
/// # Error Recovery
///
/// - **Configuration errors**: fix the TOML file and reload
/// - **Validation errors**: correct the input and retry
/// - **Decoding errors**: the upstream payload is not JSON; report it to the backend owner
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum PricingError {
    /// Pricing configuration failed validation.
    ///
    /// Raised by [`PricingConfig::validate`](crate::config::PricingConfig::validate)
    /// when a price is not positive, the coupon ceiling is out of range, or the
    /// event list is empty, too long or contains duplicates.
    ///
    /// # Examples
    ///
    /// ```
    /// use festival_pricing::error::PricingError;
    ///
    /// let err = PricingError::InvalidConfig("price_per_coupon must be positive".to_owned());
    /// assert!(err.to_string().contains("Invalid pricing config"));
    /// ```
    #[error("Invalid pricing config: {0}")]
    InvalidConfig(String),

    /// Pricing configuration is not valid TOML or has the wrong shape.
    #[error("Failed to parse pricing config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Pricing configuration file could not be read.
    #[error("Failed to read pricing config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Event name rejected.
    ///
    /// Event keys must be 1-32 characters of ASCII letters, digits, hyphens
    /// and underscores.
    #[error("Invalid event key: {0}")]
    InvalidEventKey(String),

    /// A caller-supplied coupon selection could not be understood.
    ///
    /// Raised when parsing `event=count` tokens, never by the reducers.
    #[error("Invalid coupon selection: {0}")]
    InvalidSelection(String),

    /// Payload is not valid JSON.
    ///
    /// Field-level problems (missing, null or non-numeric amounts) never reach
    /// this variant; they are coerced to zero during decoding.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}
