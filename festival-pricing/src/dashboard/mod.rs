//! Dashboard read models.
//!
//! Dashboards show totals the backend has already summed across many
//! families. Each payload is decoded under the absent-value policy
//! ([`crate::absent`]) and the pieces are recombined by the
//! [`PricingEngine`](crate::pricing::PricingEngine).

pub mod admin;
pub mod user;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use admin::{
    AdminDashboard, AdminStats, CouponCounts, DashboardSummary, EventSummary,
    FamilySubscriptionDetails,
};
pub use user::{MemberEventLine, SubscriptionDetails, UserDashboard, UserSummary};

use crate::{
    absent::{OrZero, count_of},
    pricing::EventKey,
};

/// Key the user dashboard puts next to the per-day figures; it is not a day.
const GRAND_TOTAL_KEY: &str = "grandTotalAmount";

/// Coupons sold and collected for one festival day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventFigure {
    /// Coupons sold.
    pub count: u64,
    /// Amount collected for those coupons.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl EventFigure {
    fn from_value(value: &Value) -> Self {
        Self {
            count: value.get("count").map_or(0, count_of),
            amount: value.get("amount").or_zero(),
        }
    }
}

/// Per-day coupon figures keyed by day name: `{"Saptami": {"count", "amount"}, ...}`.
///
/// Entries that are not objects are skipped, so a missing or failed payload
/// decodes as empty rather than as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct CouponFigures(BTreeMap<String, EventFigure>);

impl CouponFigures {
    /// Figure for `event`; zero when the backend did not report the day.
    #[must_use]
    pub fn figure(&self, event: &EventKey) -> EventFigure {
        self.0.get(event.as_str()).copied().unwrap_or_default()
    }

    /// Returns true if no day was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over every reported day, configured or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventFigure)> {
        self.0.iter().map(|(name, figure)| (name.as_str(), figure))
    }
}

impl From<Value> for CouponFigures {
    fn from(value: Value) -> Self {
        let Value::Object(entries) = value else {
            return Self::default();
        };
        Self(
            entries
                .iter()
                .filter(|(name, entry)| name.as_str() != GRAND_TOTAL_KEY && entry.is_object())
                .map(|(name, entry)| (name.clone(), EventFigure::from_value(entry)))
                .collect(),
        )
    }
}
