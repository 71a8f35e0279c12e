//! Festival day identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PricingError, Result};

/// Longest accepted event name.
const MAX_EVENT_KEY_LEN: usize = 32;

/// Festival days coupons are sold for when no configuration overrides them.
pub const DEFAULT_EVENTS: [&str; 3] = ["Saptami", "Nabami", "Dashami"];

/// Name of a festival day coupons are sold for.
///
/// Wraps the day name with validation so that it can be used both as a map
/// key and as a JSON field prefix (`SaptamiCoupons`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventKey(String);

impl EventKey {
    /// Creates a new event key after validation.
    ///
    /// # Errors
    ///
    /// Returns error if the name is empty, longer than 32 characters, or contains
    /// anything other than ASCII alphanumerics, hyphens and underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use festival_pricing::pricing::EventKey;
    ///
    /// assert!(EventKey::new("Saptami").is_ok());
    /// assert!(EventKey::new("Maha Ashtami").is_err());
    /// ```
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(PricingError::InvalidEventKey("event name cannot be empty".into()));
        }
        if name.len() > MAX_EVENT_KEY_LEN {
            return Err(PricingError::InvalidEventKey(format!(
                "'{name}' is longer than {MAX_EVENT_KEY_LEN} characters"
            )));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(PricingError::InvalidEventKey(format!(
                "'{name}' can only contain alphanumeric characters, hyphens, and underscores"
            )));
        }
        Ok(Self(name))
    }

    /// Returns the inner string reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Field name the backend uses for this day's coupon count (`SaptamiCoupons`).
    #[must_use]
    pub fn coupons_field(&self) -> String {
        format!("{}Coupons", self.0)
    }

    /// The canonical festival days.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        DEFAULT_EVENTS.iter().map(|name| Self((*name).to_owned())).collect()
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EventKey {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EventKey> for String {
    fn from(key: EventKey) -> Self {
        key.0
    }
}
