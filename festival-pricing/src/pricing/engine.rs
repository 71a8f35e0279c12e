//! Coupon and subscription totals.
//!
//! The engine is a pure calculator. It is used interactively while coupon
//! counts are adjusted before payment, and read-only when a dashboard
//! reassembles a grand total from server-summed partial totals.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, instrument};

use super::{event::EventKey, selection::CouponSelection};
use crate::{absent::OrZero, config::PricingConfig, error::Result};

/// Totals derived from a coupon selection.
///
/// Serializes amounts as JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateTotals {
    /// Coupons across all days.
    pub total_coupons: u64,
    /// `total_coupons × price_per_coupon`.
    #[serde(with = "rust_decimal::serde::float")]
    pub coupon_amount: Decimal,
    /// `family_base_fee + coupon_amount`.
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
}

/// Computes the totals payable for `selection` under `config`.
///
/// The grand total is never below the family base fee.
///
/// # Examples
///
/// ```
/// use festival_pricing::{
///     config::PricingConfig,
///     pricing::{CouponSelection, EventKey, compute_total},
/// };
/// use rust_decimal::Decimal;
///
/// let config = PricingConfig::default();
/// let saptami = EventKey::new("Saptami").unwrap();
/// let selection = CouponSelection::new(&config).increment(&saptami).increment(&saptami);
///
/// let totals = compute_total(&selection, &config);
/// assert_eq!(totals.total_coupons, 2);
/// assert_eq!(totals.grand_total, Decimal::from(2000));
/// ```
#[must_use]
pub fn compute_total(selection: &CouponSelection, config: &PricingConfig) -> AggregateTotals {
    let total_coupons = selection.total_coupons();
    let coupon_amount = Decimal::from(total_coupons).saturating_mul(config.price_per_coupon);
    let grand_total = config.family_base_fee.saturating_add(coupon_amount);

    AggregateTotals { total_coupons, coupon_amount, grand_total }
}

/// Adds a family-subscription total and an event-coupon total.
///
/// Both figures typically come pre-summed from the backend. Missing, null,
/// NaN or non-numeric inputs count as zero (see [`crate::absent`]); the two
/// figures are not checked against each other.
///
/// # Examples
///
/// ```
/// use festival_pricing::pricing::combine_dashboard_totals;
/// use rust_decimal::Decimal;
///
/// let total = combine_dashboard_totals(Decimal::from(45_000), Decimal::from(12_500));
/// assert_eq!(total, Decimal::from(57_500));
///
/// assert_eq!(combine_dashboard_totals(None::<Decimal>, 500_u64), Decimal::from(500));
/// ```
#[must_use]
pub fn combine_dashboard_totals(
    family_subscription_total: impl OrZero,
    event_coupon_total: impl OrZero,
) -> Decimal {
    family_subscription_total.or_zero().saturating_add(event_coupon_total.or_zero())
}

/// Pricing engine bound to one validated configuration.
///
/// Cheap to clone and safe to share; holds no mutable state.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    /// Creates an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidConfig`](crate::error::PricingError::InvalidConfig)
    /// if validation fails.
    pub fn new(config: PricingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Starts an empty selection over the configured days.
    #[must_use]
    pub fn new_selection(&self) -> CouponSelection {
        CouponSelection::new(&self.config)
    }

    /// Adds one coupon for `event`, clamped at the per-day maximum.
    #[must_use]
    pub fn increment_count(&self, selection: CouponSelection, event: &EventKey) -> CouponSelection {
        selection.increment(event)
    }

    /// Removes one coupon for `event`, clamped at zero.
    #[must_use]
    pub fn decrement_count(&self, selection: CouponSelection, event: &EventKey) -> CouponSelection {
        selection.decrement(event)
    }

    /// Computes totals for `selection` with this engine's prices.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(currency = %self.config.currency))]
    pub fn compute_total(&self, selection: &CouponSelection) -> AggregateTotals {
        let totals = compute_total(selection, &self.config);
        debug!(
            total_coupons = totals.total_coupons,
            coupon_amount = %totals.coupon_amount,
            grand_total = %totals.grand_total,
            "computed subscription total"
        );
        totals
    }

    /// Adds two server-reported totals, treating absent values as zero.
    #[must_use]
    pub fn combine_dashboard_totals(
        &self,
        family_subscription_total: impl OrZero,
        event_coupon_total: impl OrZero,
    ) -> Decimal {
        let grand_total = combine_dashboard_totals(family_subscription_total, event_coupon_total);
        debug!(grand_total = %grand_total, "combined dashboard totals");
        grand_total
    }
}
