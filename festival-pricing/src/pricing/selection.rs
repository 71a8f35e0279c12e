//! Coupon selection state and its reducers.
//!
//! A [`CouponSelection`] is owned by whoever hosts the subscription form for
//! the duration of one visit. It changes only through [`CouponSelection::increment`]
//! and [`CouponSelection::decrement`], which consume the selection and return
//! the updated value.

use std::collections::BTreeMap;

use tracing::trace;

use super::event::EventKey;
use crate::{
    config::PricingConfig,
    error::{PricingError, Result},
};

/// Coupon counts per festival day.
///
/// Every count stays within `0..=max_per_event`. Days are kept in the order
/// the configuration lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponSelection {
    counts: Vec<(EventKey, u32)>,
    max_per_event: u32,
}

impl CouponSelection {
    /// Creates an empty selection (all counts zero) for the configured days.
    #[must_use]
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            counts: config.events.iter().map(|event| (event.clone(), 0)).collect(),
            max_per_event: config.max_coupons_per_event,
        }
    }

    /// Creates a selection from externally supplied counts.
    ///
    /// Counts above the configured maximum are clamped; days that are not
    /// configured are dropped. Later entries for the same day win.
    #[must_use]
    pub fn with_counts<I>(config: &PricingConfig, counts: I) -> Self
    where
        I: IntoIterator<Item = (EventKey, u32)>,
    {
        let mut selection = Self::new(config);
        for (event, count) in counts {
            let max = selection.max_per_event;
            if let Some(slot) = selection.slot_mut(&event) {
                *slot = count.min(max);
            } else {
                trace!(event = %event, "dropping count for unconfigured event");
            }
        }
        selection
    }

    /// Parses `Event=count` tokens, as typed on a command line.
    ///
    /// Unlike [`with_counts`](Self::with_counts) this is strict: the input comes
    /// from a person who should be told what was wrong.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidSelection`] if a token is malformed, names
    /// an unconfigured day, repeats a day, or exceeds the per-day maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use festival_pricing::{config::PricingConfig, pricing::CouponSelection};
    ///
    /// let config = PricingConfig::default();
    /// let selection = CouponSelection::parse(&config, ["Saptami=2", "Nabami=1"]).unwrap();
    /// assert_eq!(selection.total_coupons(), 3);
    /// ```
    pub fn parse<'a, I>(config: &PricingConfig, tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut selection = Self::new(config);
        let mut seen = Vec::new();

        for token in tokens {
            let (name, raw_count) = token.split_once('=').ok_or_else(|| {
                PricingError::InvalidSelection(format!("expected EVENT=COUNT, got '{token}'"))
            })?;
            let event = EventKey::new(name.trim())?;
            let count: u32 = raw_count.trim().parse().map_err(|_| {
                PricingError::InvalidSelection(format!(
                    "'{raw_count}' is not a valid coupon count for {event}"
                ))
            })?;
            if count > selection.max_per_event {
                return Err(PricingError::InvalidSelection(format!(
                    "{count} coupons for {event} exceeds the maximum of {}",
                    selection.max_per_event
                )));
            }
            if seen.contains(&event) {
                return Err(PricingError::InvalidSelection(format!("{event} given more than once")));
            }
            let slot = selection.slot_mut(&event).ok_or_else(|| {
                PricingError::InvalidSelection(format!("{event} is not a festival day"))
            })?;
            *slot = count;
            seen.push(event);
        }

        Ok(selection)
    }

    /// Adds one coupon for `event`.
    ///
    /// No-op when the count is already at the maximum or the day is not part
    /// of this selection.
    #[must_use]
    pub fn increment(mut self, event: &EventKey) -> Self {
        let max = self.max_per_event;
        if let Some(slot) = self.slot_mut(event) {
            *slot = slot.saturating_add(1).min(max);
        } else {
            trace!(event = %event, "increment ignored for unknown event");
        }
        self
    }

    /// Removes one coupon for `event`.
    ///
    /// No-op when the count is already zero or the day is not part of this
    /// selection.
    #[must_use]
    pub fn decrement(mut self, event: &EventKey) -> Self {
        if let Some(slot) = self.slot_mut(event) {
            *slot = slot.saturating_sub(1);
        } else {
            trace!(event = %event, "decrement ignored for unknown event");
        }
        self
    }

    /// Returns the count for `event`, or `None` if the day is not part of this selection.
    #[must_use]
    pub fn count(&self, event: &EventKey) -> Option<u32> {
        self.counts.iter().find(|(key, _)| key == event).map(|(_, count)| *count)
    }

    /// Returns true if another coupon can be added for `event`.
    #[must_use]
    pub fn can_increment(&self, event: &EventKey) -> bool {
        self.count(event).is_some_and(|count| count < self.max_per_event)
    }

    /// Returns true if a coupon can be removed for `event`.
    #[must_use]
    pub fn can_decrement(&self, event: &EventKey) -> bool {
        self.count(event).is_some_and(|count| count > 0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total_coupons(&self) -> u64 {
        self.counts.iter().map(|(_, count)| u64::from(*count)).sum()
    }

    /// Highest count allowed per day.
    #[must_use]
    pub const fn max_per_event(&self) -> u32 {
        self.max_per_event
    }

    /// Iterates over `(day, count)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&EventKey, u32)> {
        self.counts.iter().map(|(event, count)| (event, *count))
    }

    /// Returns the counts keyed by day.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<EventKey, u32> {
        self.counts.iter().cloned().collect()
    }

    fn slot_mut(&mut self, event: &EventKey) -> Option<&mut u32> {
        self.counts.iter_mut().find(|(key, _)| key == event).map(|(_, count)| count)
    }
}
