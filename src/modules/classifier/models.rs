use serde::{Deserialize, Serialize};

use crate::modules::gateways::models::RedirectDirective;

/// Shared outcome taxonomy across gateways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeCategory {
    Success,
    Pending,
    Failed,
    Unknown,
}

impl std::fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeCategory::Success => write!(f, "success"),
            OutcomeCategory::Pending => write!(f, "pending"),
            OutcomeCategory::Failed => write!(f, "failed"),
            OutcomeCategory::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which vendor code list a raw code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeTable {
    /// Azki envelope `rsCode`
    AzkiResult,
    /// Azki ticket `status` from the status endpoint
    AzkiTicketStatus,
    /// Sadad `AppStatusCode` (paired with `AppStatusDescription`)
    SadadStatus,
}

/// One row of a vendor code table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeEntry {
    pub code: &'static str,
    pub category: OutcomeCategory,
    pub message: &'static str,
    /// Persian message shown to payers
    pub localized: &'static str,
    pub retryable: bool,
    /// Secondary status text that must accompany a success code
    pub expected_status: Option<&'static str>,
}

/// Normalized gateway outcome
///
/// Raw vendor payloads never leave the gateway client; this is all the
/// state machine sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub outcome_code: String,
    pub category: OutcomeCategory,
    pub message: String,
    pub localized_message: String,
    pub retryable: bool,
    pub reference_id: Option<String>,
    pub tracking_code: Option<String>,
    pub card_number: Option<String>,
    pub redirect_target: Option<RedirectDirective>,
}

impl GatewayResponse {
    /// Success for calls that carry no status code of their own
    pub fn accepted() -> Self {
        Self {
            outcome_code: "0".to_string(),
            category: OutcomeCategory::Success,
            message: "Request accepted".to_string(),
            localized_message: "درخواست پذیرفته شد".to_string(),
            retryable: false,
            reference_id: None,
            tracking_code: None,
            card_number: None,
            redirect_target: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.category == OutcomeCategory::Success
    }

    pub fn with_reference(mut self, reference_id: impl Into<String>) -> Self {
        self.reference_id = Some(reference_id.into());
        self
    }

    pub fn with_tracking_code(mut self, tracking_code: impl Into<String>) -> Self {
        self.tracking_code = Some(tracking_code.into());
        self
    }

    pub fn with_card_number(mut self, card_number: Option<String>) -> Self {
        self.card_number = card_number.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_redirect(mut self, redirect: RedirectDirective) -> Self {
        self.redirect_target = Some(redirect);
        self
    }
}
