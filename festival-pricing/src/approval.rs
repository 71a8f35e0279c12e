//! Subscription approval vocabulary.
//!
//! Admins review submitted payments and approve or reject the subscription.
//! The backend owns the transition; this module names the status codes it
//! reports, the request body it expects, and which review tab to show after
//! a decision.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Approval status of a family subscription as reported by the backend.
///
/// Parsing is lenient: any unrecognized code is [`SubscriptionStatus::Inactive`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum SubscriptionStatus {
    /// Payment submitted, awaiting admin review (`PEN`).
    Pending,
    /// Approved by an admin (`APR`).
    Approved,
    /// Rejected by an admin (`REJ`).
    Rejected,
    /// No usable status.
    #[default]
    Inactive,
}

impl SubscriptionStatus {
    /// Parses a backend status code, falling back to [`Self::Inactive`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "PEN" => Self::Pending,
            "APR" => Self::Approved,
            "REJ" => Self::Rejected,
            _ => Self::Inactive,
        }
    }

    /// Returns the backend status code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pending => "PEN",
            Self::Approved => "APR",
            Self::Rejected => "REJ",
            Self::Inactive => "INA",
        }
    }

    /// Returns the label shown to members.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Inactive => "Inactive",
        }
    }

    /// Returns true once an admin has ruled on the subscription.
    #[must_use]
    pub const fn is_decided(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for SubscriptionStatus {
    fn from(code: String) -> Self {
        Self::from_code(&code)
    }
}

impl From<SubscriptionStatus> for &'static str {
    fn from(status: SubscriptionStatus) -> Self {
        status.code()
    }
}

/// Admin ruling on a pending subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    /// Accept the payment.
    Approve,
    /// Refuse the payment.
    Reject,
}

impl ApprovalDecision {
    /// Status the subscription moves to.
    #[must_use]
    pub const fn target_status(self) -> SubscriptionStatus {
        match self {
            Self::Approve => SubscriptionStatus::Approved,
            Self::Reject => SubscriptionStatus::Rejected,
        }
    }

    /// Review tab that lists subscriptions with the target status.
    #[must_use]
    pub const fn target_tab(self) -> ApprovalTab {
        match self {
            Self::Approve => ApprovalTab::Approved,
            Self::Reject => ApprovalTab::Rejected,
        }
    }
}

/// Body of an approval status update request.
///
/// Serializes as `{"phoneNumber", "newStatus", "updatedBy", "rejectionReason"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    /// Phone number identifying the family.
    pub phone_number: String,
    /// Status code to set.
    pub new_status: SubscriptionStatus,
    /// Who made the decision.
    pub updated_by: String,
    /// Why the subscription was rejected; only sent with rejections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl StatusUpdate {
    /// Builds the request for `decision`.
    ///
    /// A reason given with an approval is dropped, as is a blank reason.
    #[must_use]
    pub fn new(
        phone_number: impl Into<String>,
        decision: ApprovalDecision,
        updated_by: impl Into<String>,
        rejection_reason: Option<String>,
    ) -> Self {
        let rejection_reason = match decision {
            ApprovalDecision::Reject => rejection_reason.filter(|reason| !reason.trim().is_empty()),
            ApprovalDecision::Approve => None,
        };
        Self {
            phone_number: phone_number.into(),
            new_status: decision.target_status(),
            updated_by: updated_by.into(),
            rejection_reason,
        }
    }
}

/// Admin review tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalTab {
    /// Subscriptions awaiting review.
    Pending,
    /// Approved subscriptions.
    Approved,
    /// Rejected subscriptions.
    Rejected,
}

impl ApprovalTab {
    /// Tabs in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Backend path listing the subscriptions on this tab.
    #[must_use]
    pub const fn list_path(self) -> &'static str {
        match self {
            Self::Pending => "/admin/pending",
            Self::Approved => "/admin/approved",
            Self::Rejected => "/admin/rejected",
        }
    }

    /// Status shared by every subscription on this tab.
    #[must_use]
    pub const fn status(self) -> SubscriptionStatus {
        match self {
            Self::Pending => SubscriptionStatus::Pending,
            Self::Approved => SubscriptionStatus::Approved,
            Self::Rejected => SubscriptionStatus::Rejected,
        }
    }

    /// Tab to show after `decision` was taken on an entry of this tab.
    ///
    /// When the decided entry was the last one listed (`entries <= 1`), the
    /// view follows it to the tab for its new status; otherwise it stays.
    #[must_use]
    pub const fn after_decision(self, entries: usize, decision: ApprovalDecision) -> Self {
        if entries <= 1 { decision.target_tab() } else { self }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    // ========================================================================
    // SubscriptionStatus Tests
    // ========================================================================

    #[test]
    fn test_status_codes() {
        assert_eq!(SubscriptionStatus::from_code("PEN"), SubscriptionStatus::Pending);
        assert_eq!(SubscriptionStatus::from_code("APR"), SubscriptionStatus::Approved);
        assert_eq!(SubscriptionStatus::from_code(" REJ "), SubscriptionStatus::Rejected);
    }

    #[test]
    fn test_unknown_status_is_inactive() {
        for code in ["", "apr", "CANCELLED", "null"] {
            assert_eq!(SubscriptionStatus::from_code(code), SubscriptionStatus::Inactive);
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(SubscriptionStatus::Approved.to_string(), "Approved");
        assert_eq!(SubscriptionStatus::Pending.label(), "Pending");
        assert_eq!(SubscriptionStatus::Inactive.label(), "Inactive");
    }

    #[test]
    fn test_status_is_decided() {
        assert!(SubscriptionStatus::Approved.is_decided());
        assert!(SubscriptionStatus::Rejected.is_decided());
        assert!(!SubscriptionStatus::Pending.is_decided());
        assert!(!SubscriptionStatus::Inactive.is_decided());
    }

    #[test]
    fn test_status_serde() {
        let status: SubscriptionStatus = serde_json::from_value(json!("APR")).unwrap();
        assert_eq!(status, SubscriptionStatus::Approved);
        assert_eq!(serde_json::to_value(SubscriptionStatus::Pending).unwrap(), json!("PEN"));

        let status: SubscriptionStatus = serde_json::from_value(json!("???")).unwrap();
        assert_eq!(status, SubscriptionStatus::Inactive);
    }

    // ========================================================================
    // StatusUpdate Tests
    // ========================================================================

    #[test]
    fn test_approval_update_body() {
        let update = StatusUpdate::new(
            "9876543210",
            ApprovalDecision::Approve,
            "admin",
            Some("ignored".to_owned()),
        );
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"phoneNumber": "9876543210", "newStatus": "APR", "updatedBy": "admin"})
        );
    }

    #[test]
    fn test_rejection_update_body() {
        let update = StatusUpdate::new(
            "9876543210",
            ApprovalDecision::Reject,
            "admin",
            Some("reference number not found".to_owned()),
        );
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "phoneNumber": "9876543210",
                "newStatus": "REJ",
                "updatedBy": "admin",
                "rejectionReason": "reference number not found"
            })
        );
    }

    #[test]
    fn test_blank_rejection_reason_dropped() {
        let update =
            StatusUpdate::new("9876543210", ApprovalDecision::Reject, "admin", Some("  ".into()));
        assert_eq!(update.rejection_reason, None);
    }

    // ========================================================================
    // ApprovalTab Tests
    // ========================================================================

    #[test]
    fn test_tab_paths_and_statuses() {
        let paths: Vec<&str> = ApprovalTab::ALL.iter().map(|tab| tab.list_path()).collect();
        assert_eq!(paths, ["/admin/pending", "/admin/approved", "/admin/rejected"]);
        assert_eq!(ApprovalTab::Rejected.status(), SubscriptionStatus::Rejected);
    }

    #[test]
    fn test_last_entry_follows_decision() {
        assert_eq!(
            ApprovalTab::Pending.after_decision(1, ApprovalDecision::Approve),
            ApprovalTab::Approved
        );
        assert_eq!(
            ApprovalTab::Pending.after_decision(1, ApprovalDecision::Reject),
            ApprovalTab::Rejected
        );
        assert_eq!(
            ApprovalTab::Approved.after_decision(0, ApprovalDecision::Reject),
            ApprovalTab::Rejected
        );
    }

    #[test]
    fn test_remaining_entries_keep_tab() {
        assert_eq!(
            ApprovalTab::Pending.after_decision(2, ApprovalDecision::Approve),
            ApprovalTab::Pending
        );
        assert_eq!(
            ApprovalTab::Rejected.after_decision(5, ApprovalDecision::Approve),
            ApprovalTab::Rejected
        );
    }
}
