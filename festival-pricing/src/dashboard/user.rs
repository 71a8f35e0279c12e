//! Member dashboard.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{CouponFigures, EventFigure};
use crate::{
    absent,
    approval::SubscriptionStatus,
    pricing::{EventKey, PricingEngine},
};

/// Subscription amounts for one family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetails {
    /// Amount the family owes, base fee and coupons included.
    #[serde(default, deserialize_with = "absent::amount")]
    pub user_subscription_amount: Decimal,
    /// Amount paid so far, if the backend reports it.
    #[serde(default, deserialize_with = "absent::optional_amount")]
    pub total_paid: Option<Decimal>,
}

/// Member dashboard payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDashboard {
    /// Account type, e.g. `"admin"`; non-strings read as missing.
    #[serde(deserialize_with = "lenient_text")]
    pub user_type: Option<String>,
    /// Approval status; missing, null or non-string reads as inactive.
    #[serde(deserialize_with = "lenient_status")]
    pub subscription_status: SubscriptionStatus,
    /// Amounts owed and paid; a non-object payload reads as missing.
    #[serde(deserialize_with = "absent::payload")]
    pub subscription_details: Option<SubscriptionDetails>,
    /// Per-day coupon figures.
    pub coupon_details: CouponFigures,
}

/// Per-day line of the member dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEventLine {
    /// Festival day.
    pub event: EventKey,
    /// Coupons bought and amount charged for the day.
    pub figure: EventFigure,
}

/// Figures shown on the member dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Approval status.
    pub status: SubscriptionStatus,
    /// Label for `status`.
    pub status_label: &'static str,
    /// Coupon figures per configured day.
    pub events: Vec<MemberEventLine>,
    /// Amount owed.
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    /// Amount paid, if reported.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub total_paid: Option<Decimal>,
}

impl UserDashboard {
    /// Reduces the payload to dashboard figures.
    ///
    /// The grand total is the backend's `userSubscriptionAmount`; it is not
    /// recomputed from the coupon figures.
    #[must_use]
    pub fn summarize(&self, engine: &PricingEngine) -> UserSummary {
        let details = self.subscription_details.clone().unwrap_or_default();
        UserSummary {
            status: self.subscription_status,
            status_label: self.subscription_status.label(),
            events: engine
                .config()
                .events
                .iter()
                .map(|event| MemberEventLine {
                    event: event.clone(),
                    figure: self.coupon_details.figure(event),
                })
                .collect(),
            grand_total: details.user_subscription_amount,
            total_paid: details.total_paid,
        }
    }

    /// Returns true if the account has admin rights.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_type.as_deref() == Some("admin")
    }
}

fn lenient_status<'de, D>(deserializer: D) -> Result<SubscriptionStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(code) => SubscriptionStatus::from_code(&code),
        _ => SubscriptionStatus::default(),
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_approved_member() {
        let dashboard: UserDashboard = serde_json::from_value(json!({
            "userType": "member",
            "subscriptionStatus": "APR",
            "subscriptionDetails": {"userSubscriptionAmount": 2500, "totalPaid": 2500},
            "couponDetails": {
                "Saptami": {"count": 2, "amount": 1000},
                "Nabami": {"count": 1, "amount": 500},
                "grandTotalAmount": 1500
            }
        }))
        .unwrap();
        let summary = dashboard.summarize(&PricingEngine::default());

        assert!(!dashboard.is_admin());
        assert_eq!(summary.status, SubscriptionStatus::Approved);
        assert_eq!(summary.status_label, "Approved");
        assert_eq!(summary.grand_total, Decimal::from(2500));
        assert_eq!(summary.total_paid, Some(Decimal::from(2500)));
        assert_eq!(summary.events.len(), 3);
        assert_eq!(summary.events[0].figure, EventFigure { count: 2, amount: Decimal::from(1000) });
        assert_eq!(summary.events[2].figure, EventFigure::default());
    }

    #[test]
    fn test_missing_fields_default() {
        let dashboard: UserDashboard =
            serde_json::from_value(json!({"subscriptionStatus": null, "subscriptionDetails": null}))
                .unwrap();
        let summary = dashboard.summarize(&PricingEngine::default());

        assert_eq!(summary.status, SubscriptionStatus::Inactive);
        assert_eq!(summary.grand_total, Decimal::ZERO);
        assert_eq!(summary.total_paid, None);
    }

    #[test]
    fn test_unknown_status_code() {
        let dashboard: UserDashboard =
            serde_json::from_value(json!({"subscriptionStatus": "XYZ", "userType": "admin"}))
                .unwrap();
        assert_eq!(dashboard.subscription_status, SubscriptionStatus::Inactive);
        assert!(dashboard.is_admin());
    }

    #[test]
    fn test_summary_json_shape() {
        let dashboard: UserDashboard = serde_json::from_value(json!({
            "subscriptionStatus": "PEN",
            "subscriptionDetails": {"userSubscriptionAmount": "1500"}
        }))
        .unwrap();
        let json = serde_json::to_value(dashboard.summarize(&PricingEngine::default())).unwrap();
        assert_eq!(json["status"], "PEN");
        assert_eq!(json["statusLabel"], "Pending");
        assert_eq!(json["grandTotal"].as_f64(), Some(1500.0));
        assert!(json["totalPaid"].is_null());
        assert_eq!(json["events"][0]["event"], "Saptami");
        assert_eq!(json["events"][0]["figure"]["count"], 0);
    }

    #[test]
    fn test_failed_member_payloads_default() {
        let dashboard: UserDashboard = serde_json::from_value(json!({
            "userType": 7,
            "subscriptionStatus": 1,
            "subscriptionDetails": "oops",
            "couponDetails": "Internal Server Error"
        }))
        .unwrap();
        assert_eq!(dashboard.user_type, None);
        let summary = dashboard.summarize(&PricingEngine::default());

        assert_eq!(summary.status, SubscriptionStatus::Inactive);
        assert_eq!(summary.grand_total, Decimal::ZERO);
        assert_eq!(summary.total_paid, None);
        assert!(summary.events.iter().all(|line| line.figure == EventFigure::default()));
    }
}
