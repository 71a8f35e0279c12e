//! Festival Pricing: coupon totals for community festival subscriptions
//!
//! Families subscribe to a festival by paying a fixed base fee and buying meal
//! coupons for individual festival days. This crate prices those selections
//! and reassembles the grand totals shown on admin and member dashboards.
//!
//! # What's in the crate?
//!
//! - **Pricing engine** ([`pricing`]): bounded per-day coupon counts and the
//!   `family_base_fee + coupons × price_per_coupon` total
//! - **Absent-value policy** ([`absent`]): missing, null, NaN or non-numeric
//!   aggregates count as zero instead of poisoning a sum
//! - **Dashboards** ([`dashboard`]): read models for the admin and member views
//! - **Payment hand-off** ([`payment`]): counts plus amount due, priced by the engine
//! - **Approval vocabulary** ([`approval`]): status codes, update requests and review tabs
//! - **Configuration** ([`config`]): TOML-loaded, validated price constants
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐        ┌─────────────────────┐
//! │  Subscription form │        │  Dashboard payloads │  server-summed
//! │  (+ / - per day)   │        │  (JSON, may be null)│  aggregates
//! └─────────┬──────────┘        └──────────┬──────────┘
//!           │ CouponSelection              │ absent policy
//! ┌─────────▼──────────────────────────────▼──────────┐
//! │                 PricingEngine                     │
//! │  increment / decrement / compute_total / combine  │
//! └─────────┬──────────────────────────────┬──────────┘
//!           │                              │
//! ┌─────────▼──────────┐        ┌──────────▼──────────┐
//! │ PaymentSubmission  │        │  DashboardSummary   │
//! └────────────────────┘        └─────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## 1. Price a selection
//!
//! ```rust
//! use festival_pricing::{PricingEngine, pricing::EventKey};
//! use rust_decimal::Decimal;
//!
//! let engine = PricingEngine::default();
//! let saptami = EventKey::new("Saptami")?;
//! let nabami = EventKey::new("Nabami")?;
//!
//! let selection = engine.new_selection();
//! let selection = engine.increment_count(selection, &saptami);
//! let selection = engine.increment_count(selection, &saptami);
//! let selection = engine.increment_count(selection, &nabami);
//!
//! let totals = engine.compute_total(&selection);
//! assert_eq!(totals.total_coupons, 3);
//! assert_eq!(totals.grand_total, Decimal::from(2500));
//! # Ok::<(), festival_pricing::PricingError>(())
//! ```
//!
//! ## 2. Combine dashboard totals
//!
//! ```rust
//! use festival_pricing::PricingEngine;
//! use rust_decimal::Decimal;
//! use serde_json::json;
//!
//! let engine = PricingEngine::default();
//! let stats = json!({"totalSubscription": 45000, "totalCouponAmount": null});
//!
//! let total = engine.combine_dashboard_totals(
//!     stats.get("totalSubscription"),
//!     stats.get("totalCouponAmount"),
//! );
//! assert_eq!(total, Decimal::from(45_000));
//! ```
//!
//! ## 3. Load prices from TOML
//!
//! ```rust
//! use festival_pricing::{PricingConfig, PricingEngine};
//!
//! let config = PricingConfig::from_toml(
//!     r#"
//!     price_per_coupon = 600
//!     events = ["Shashthi", "Saptami", "Ashtami", "Nabami", "Dashami"]
//!     "#,
//! )?;
//! let engine = PricingEngine::new(config)?;
//! assert_eq!(engine.new_selection().iter().count(), 5);
//! # Ok::<(), festival_pricing::PricingError>(())
//! ```
//!
//! # Money
//!
//! Amounts are [`rust_decimal::Decimal`]. Sums saturate instead of
//! overflowing, and JSON output writes amounts as plain numbers.
//!
//! # Logging
//!
//! The crate emits [`tracing`] events at `debug` and `trace` level and never
//! installs a subscriber; that is left to the binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod absent;
pub mod approval;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod payment;
pub mod pricing;

pub use config::PricingConfig;
pub use error::{PricingError, Result};
pub use payment::PaymentSubmission;
pub use pricing::{AggregateTotals, CouponSelection, EventKey, PricingEngine};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _ = std::marker::PhantomData::<PricingError>;
        let _ = PricingEngine::default();
    }
}
