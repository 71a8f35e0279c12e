//! Hand-off record for payment submission.
//!
//! After a family finishes picking coupons, the counts and the amount due are
//! passed on to the payment step as one record. The record is built from the
//! engine so the amount can never disagree with the counts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::{CouponSelection, EventKey, PricingEngine};

/// Coupon counts and total amount handed to the payment collaborator.
///
/// Serializes as `{"counts": {"Saptami": 2, ...}, "totalAmount": 2500.0}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubmission {
    /// Coupons bought per festival day.
    pub counts: BTreeMap<EventKey, u32>,
    /// Amount due, family base fee included.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl PaymentSubmission {
    /// Prices `selection` with `engine` and captures the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use festival_pricing::{payment::PaymentSubmission, pricing::{EventKey, PricingEngine}};
    /// use rust_decimal::Decimal;
    ///
    /// let engine = PricingEngine::default();
    /// let nabami = EventKey::new("Nabami").unwrap();
    /// let selection = engine.increment_count(engine.new_selection(), &nabami);
    ///
    /// let submission = PaymentSubmission::new(&engine, &selection);
    /// assert_eq!(submission.total_amount, Decimal::from(1500));
    /// ```
    #[must_use]
    pub fn new(engine: &PricingEngine, selection: &CouponSelection) -> Self {
        let totals = engine.compute_total(selection);
        Self { counts: selection.to_map(), total_amount: totals.grand_total }
    }

    /// Coupons across all days.
    #[must_use]
    pub fn total_coupons(&self) -> u64 {
        self.counts.values().copied().map(u64::from).sum()
    }
}
