//! Pricing configuration.
//!
//! TOML-deserializable price constants and festival calendar. Every key is
//! optional; omitted keys take the program's standing prices (500 per coupon,
//! 1000 family base fee, up to 4 coupons per day over Saptami, Nabami and
//! Dashami).

use std::{collections::HashSet, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::{PricingError, Result},
    pricing::EventKey,
};

/// Standing price of one meal coupon.
pub const DEFAULT_PRICE_PER_COUPON: u32 = 500;

/// Standing per-family subscription fee.
pub const DEFAULT_FAMILY_BASE_FEE: u32 = 1000;

/// Default ceiling on coupons bought for a single day.
pub const DEFAULT_MAX_COUPONS_PER_EVENT: u32 = 4;

/// Hard upper bound accepted for `max_coupons_per_event`.
const MAX_COUPONS_CEILING: u32 = 10_000;

/// Hard upper bound on the number of festival days.
const MAX_EVENTS: usize = 16;

/// Process-wide pricing constants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Price of one coupon.
    pub price_per_coupon: Decimal,

    /// Fixed per-family charge, independent of coupons.
    pub family_base_fee: Decimal,

    /// Highest coupon count allowed for a single day.
    pub max_coupons_per_event: u32,

    /// Festival days coupons are sold for, in display order.
    pub events: Vec<EventKey>,

    /// ISO 4217 currency code used when displaying amounts.
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            price_per_coupon: Decimal::from(DEFAULT_PRICE_PER_COUPON),
            family_base_fee: Decimal::from(DEFAULT_FAMILY_BASE_FEE),
            max_coupons_per_event: DEFAULT_MAX_COUPONS_PER_EVENT,
            events: EventKey::defaults(),
            currency: "INR".to_owned(),
        }
    }
}

impl PricingConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::ConfigParse`] for malformed TOML or unknown keys,
    /// and [`PricingError::InvalidConfig`] when validation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use festival_pricing::config::PricingConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = PricingConfig::from_toml("max_coupons_per_event = 10").unwrap();
    /// assert_eq!(config.max_coupons_per_event, 10);
    /// assert_eq!(config.price_per_coupon, Decimal::from(500));
    /// ```
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`from_toml`](Self::from_toml).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&raw)?;
        debug!(path = %path.display(), events = config.events.len(), "loaded pricing config");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// This method checks that:
    /// - `price_per_coupon` and `family_base_fee` are positive
    /// - `max_coupons_per_event` is between 1 and 10 000
    /// - `events` is non-empty, holds at most 16 days and has no duplicates
    /// - `currency` is a three-letter uppercase code
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidConfig`] naming the first failing key.
    pub fn validate(&self) -> Result<()> {
        if self.price_per_coupon <= Decimal::ZERO {
            return Err(PricingError::InvalidConfig(format!(
                "price_per_coupon must be positive, got {}",
                self.price_per_coupon
            )));
        }
        if self.family_base_fee <= Decimal::ZERO {
            return Err(PricingError::InvalidConfig(format!(
                "family_base_fee must be positive, got {}",
                self.family_base_fee
            )));
        }
        if self.max_coupons_per_event == 0 || self.max_coupons_per_event > MAX_COUPONS_CEILING {
            return Err(PricingError::InvalidConfig(format!(
                "max_coupons_per_event must be between 1 and {MAX_COUPONS_CEILING}, got {}",
                self.max_coupons_per_event
            )));
        }

        self.validate_events()?;

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(PricingError::InvalidConfig(format!(
                "currency must be a three-letter ISO 4217 code, got '{}'",
                self.currency
            )));
        }

        Ok(())
    }

    fn validate_events(&self) -> Result<()> {
        if self.events.is_empty() {
            return Err(PricingError::InvalidConfig("events cannot be empty".into()));
        }
        if self.events.len() > MAX_EVENTS {
            return Err(PricingError::InvalidConfig(format!(
                "at most {MAX_EVENTS} events are supported, got {}",
                self.events.len()
            )));
        }
        let mut seen = HashSet::with_capacity(self.events.len());
        for event in &self.events {
            if !seen.insert(event) {
                return Err(PricingError::InvalidConfig(format!("duplicate event '{event}'")));
            }
        }
        Ok(())
    }

    /// Returns true if `event` is one of the configured festival days.
    #[must_use]
    pub fn has_event(&self, event: &EventKey) -> bool {
        self.events.contains(event)
    }
}
