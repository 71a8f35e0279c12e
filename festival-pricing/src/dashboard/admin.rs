//! Admin dashboard.
//!
//! The admin view is assembled from four backend payloads fetched
//! independently: subscription stats, per-day coupon amounts, the family
//! subscription total, and per-day coupon counts. Any of them may be missing
//! or may have failed; a missing payload contributes zeros.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::{CouponFigures, EventFigure};
use crate::{
    absent::{self, count_of},
    pricing::{EventKey, PricingEngine},
};

/// Subscription stats (`admin-stats`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    /// Sum of all family subscriptions.
    #[serde(default, deserialize_with = "absent::amount")]
    pub total_subscription: Decimal,
    /// Sum of all coupon purchases, as computed by the backend.
    #[serde(default, deserialize_with = "absent::amount")]
    pub total_coupon_amount: Decimal,
}

/// Family subscription total (`total-family-subscription`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySubscriptionDetails {
    /// Number of subscribed families.
    #[serde(default, deserialize_with = "absent::count")]
    pub total_families: u64,
    /// Amount collected from family subscriptions.
    #[serde(default, deserialize_with = "absent::amount")]
    pub total_amount: Decimal,
}

/// Coupon counts keyed by `<Day>Coupons` (`getCouponsData`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct CouponCounts(Map<String, Value>);

impl CouponCounts {
    /// Coupons registered for `event`; zero when absent.
    #[must_use]
    pub fn count_for(&self, event: &EventKey) -> u64 {
        self.0.get(&event.coupons_field()).map_or(0, count_of)
    }
}

impl From<Value> for CouponCounts {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }
}

/// Raw admin dashboard payloads.
///
/// Deserializes from `{"adminStats", "couponAmounts", "familySubscription",
/// "couponCounts"}`; every key is optional. A payload that is not an object,
/// such as the error body of a failed fetch, is treated as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminDashboard {
    /// `admin-stats` payload.
    #[serde(deserialize_with = "absent::payload")]
    pub admin_stats: Option<AdminStats>,
    /// `coupon-amounts` payload.
    #[serde(deserialize_with = "absent::payload")]
    pub coupon_amounts: Option<CouponFigures>,
    /// `total-family-subscription` payload.
    #[serde(deserialize_with = "absent::payload")]
    pub family_subscription: Option<FamilySubscriptionDetails>,
    /// `getCouponsData` payload.
    #[serde(deserialize_with = "absent::payload")]
    pub coupon_counts: Option<CouponCounts>,
}

/// Per-day line of the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    /// Festival day.
    pub event: EventKey,
    /// Coupons registered, from the coupon counts payload.
    pub registered_coupons: u64,
    /// Coupons sold and amount collected, from the coupon amounts payload.
    pub figure: EventFigure,
}

/// Figures shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Per configured day, in configuration order.
    pub events: Vec<EventSummary>,
    /// Coupons sold across the configured days.
    pub coupon_count_total: u64,
    /// Coupon amount across the configured days.
    #[serde(with = "rust_decimal::serde::float")]
    pub coupon_amount_total: Decimal,
    /// Sum of all family subscriptions.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_subscription: Decimal,
    /// Amount collected from family subscriptions.
    #[serde(with = "rust_decimal::serde::float")]
    pub family_total: Decimal,
    /// Number of subscribed families.
    pub total_families: u64,
    /// `total_subscription + coupon_amount_total`.
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
}

impl AdminDashboard {
    /// Decodes the payload bundle from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Json`](crate::error::PricingError::Json) if the
    /// input is not JSON or not an object.
    pub fn from_json(input: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Reduces the payloads to dashboard figures.
    ///
    /// The coupon totals add up the configured days only, so they match the
    /// per-day lines. When no breakdown was reported at all the amount falls
    /// back to the backend's own `totalCouponAmount`.
    #[must_use]
    #[instrument(level = "debug", skip_all)]
    pub fn summarize(&self, engine: &PricingEngine) -> DashboardSummary {
        let stats = self.admin_stats.clone().unwrap_or_default();
        let family = self.family_subscription.clone().unwrap_or_default();
        let amounts = self.coupon_amounts.clone().unwrap_or_default();
        let counts = self.coupon_counts.clone().unwrap_or_default();

        let events: Vec<EventSummary> = engine
            .config()
            .events
            .iter()
            .map(|event| EventSummary {
                event: event.clone(),
                registered_coupons: counts.count_for(event),
                figure: amounts.figure(event),
            })
            .collect();

        let coupon_count_total =
            events.iter().fold(0_u64, |sum, line| sum.saturating_add(line.figure.count));
        let coupon_amount_total = if amounts.is_empty() {
            debug!("no coupon breakdown reported, using backend coupon total");
            stats.total_coupon_amount
        } else {
            events.iter().fold(Decimal::ZERO, |sum, line| sum.saturating_add(line.figure.amount))
        };

        let grand_total =
            engine.combine_dashboard_totals(stats.total_subscription, coupon_amount_total);

        DashboardSummary {
            events,
            coupon_count_total,
            coupon_amount_total,
            total_subscription: stats.total_subscription,
            family_total: family.total_amount,
            total_families: family.total_families,
            grand_total,
        }
    }
}
