use crate::core::{AppError, Amount, Result};
use crate::modules::gateways::models::{GatewayKind, RedirectDirective};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::InvoiceItem;

/// Merchant-side transaction identifier
///
/// Numeric because Sadad sends it as its integer `OrderId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(TransactionId)
            .map_err(|_| AppError::validation(format!("Invalid transaction id: {}", s)))
    }
}

/// Transaction lifecycle state
///
/// Created → Pending → {Succeeded | Failed}. Terminal states are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Created,
    Pending,
    Succeeded,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransactionStatus::Succeeded | TransactionStatus::Failed)
    }

    /// Forward-only transition graph
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        use TransactionStatus::*;
        matches!(
            (self, next),
            (Created, Pending) | (Created, Failed) | (Pending, Succeeded) | (Pending, Failed)
        )
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Created => write!(f, "created"),
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Succeeded => write!(f, "succeeded"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One recorded state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: TransactionStatus,
    pub to: TransactionStatus,
    pub at: DateTime<Utc>,
}

/// Data needed to create a transaction; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub gateway: GatewayKind,
    pub amount: Amount,
    pub items: Vec<InvoiceItem>,
    pub created_at: DateTime<Utc>,
}

/// Payment transaction record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,

    /// Gateway handling this transaction
    pub gateway: GatewayKind,

    pub amount: Amount,

    pub status: TransactionStatus,

    /// Gateway-issued reference (Azki ticket id, Sadad request key)
    pub reference_id: Option<String>,

    /// Settlement/audit code, set on success
    pub tracking_code: Option<String>,

    /// Masked payer card, when the gateway reports one
    pub card_number: Option<String>,

    pub items: Vec<InvoiceItem>,

    /// Where to send the payer, set together with the reference id
    pub redirect_target: Option<RedirectDirective>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,

    pub transitions: Vec<StatusTransition>,
}

impl Transaction {
    /// Build the record for a freshly allocated id, in `Created`
    pub fn create(id: TransactionId, new: NewTransaction) -> Self {
        Self {
            id,
            gateway: new.gateway,
            amount: new.amount,
            status: TransactionStatus::Created,
            reference_id: None,
            tracking_code: None,
            card_number: None,
            items: new.items,
            redirect_target: None,
            created_at: new.created_at,
            updated_at: new.created_at,
            paid_at: None,
            transitions: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Move to `next`, recording the transition
    ///
    /// # Errors
    /// * `InvalidState` - If the graph does not allow the move
    pub fn transition_to(&mut self, next: TransactionStatus, at: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::invalid_state(format!(
                "transaction {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }

        self.transitions.push(StatusTransition {
            from: self.status,
            to: next,
            at,
        });
        self.status = next;
        self.updated_at = at;
        Ok(())
    }

    /// When the transaction entered `status`, if it ever did
    pub fn entered_at(&self, status: TransactionStatus) -> Option<DateTime<Utc>> {
        if status == TransactionStatus::Created {
            return Some(self.created_at);
        }
        self.transitions
            .iter()
            .find(|t| t.to == status)
            .map(|t| t.at)
    }
}
