//! Coupon pricing.
//!
//! This module holds the pricing engine together with the state it operates
//! on: festival days, the per-day coupon selection and the derived totals.

pub mod engine;
pub mod event;
pub mod selection;


pub use engine::{AggregateTotals, PricingEngine, combine_dashboard_totals, compute_total};
pub use event::{DEFAULT_EVENTS, EventKey};
pub use selection::CouponSelection;
