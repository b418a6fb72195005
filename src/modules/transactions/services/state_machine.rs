use std::sync::Arc;

use crate::core::{AppError, Amount, Clock, Result, SystemClock};
use crate::modules::gateways::models::{GatewayKind, RedirectDirective};
use crate::modules::transactions::models::{
    InvoiceItem, NewTransaction, Transaction, TransactionId, TransactionLog, TransactionStatus,
};
use crate::modules::transactions::repositories::TransactionStore;

/// Owns the transaction lifecycle
///
/// Every transition is load → check → mutate → persist against the store.
/// Callers keep one writer per transaction id, so no locking happens here.
#[derive(Clone)]
pub struct TransactionStateMachine {
    store: Arc<dyn TransactionStore>,
    clock: Arc<dyn Clock>,
}

impl TransactionStateMachine {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn TransactionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<dyn TransactionStore> {
        &self.store
    }

    /// Create a transaction and move it straight to `Pending`
    pub async fn start(
        &self,
        gateway: GatewayKind,
        amount: Amount,
        items: Vec<InvoiceItem>,
    ) -> Result<Transaction> {
        let mut transaction = self
            .store
            .insert(NewTransaction {
                gateway,
                amount,
                items,
                created_at: self.clock.now(),
            })
            .await?;

        let id = transaction.id;
        let now = self.clock.now();
        let persisted = match transaction.transition_to(TransactionStatus::Pending, now) {
            Ok(()) => self.store.update(&transaction).await,
            Err(e) => Err(e),
        };

        // A record must not be left in `Created`
        if let Err(e) = persisted {
            if let Err(fail_err) = self.fail(id, &e.log_code(), &e.log_message()).await {
                tracing::error!(
                    transaction_id = %id,
                    error = %fail_err,
                    "Could not mark unstarted transaction failed"
                );
            }
            return Err(e);
        }

        tracing::info!(
            gateway = %gateway,
            transaction_id = %transaction.id,
            amount = %amount,
            "Transaction started"
        );
        Ok(transaction)
    }

    /// Attach the gateway reference and redirect target
    ///
    /// # Errors
    /// * `InvalidState` - Outside `Pending`, or a reference was already recorded
    pub async fn record_reference(
        &self,
        id: TransactionId,
        reference_id: &str,
        redirect_target: Option<RedirectDirective>,
    ) -> Result<Transaction> {
        let mut transaction = self.find(id).await?;

        if transaction.status != TransactionStatus::Pending {
            return Err(AppError::invalid_state(format!(
                "cannot record reference on {} transaction {}",
                transaction.status, id
            )));
        }

        if transaction.reference_id.is_some() {
            return Err(AppError::invalid_state(format!(
                "transaction {} already has a gateway reference",
                id
            )));
        }

        if reference_id.trim().is_empty() {
            return Err(AppError::validation("Gateway reference cannot be empty"));
        }

        transaction.reference_id = Some(reference_id.to_string());
        transaction.redirect_target = redirect_target;
        transaction.updated_at = self.clock.now();
        self.store.update(&transaction).await?;

        tracing::info!(
            transaction_id = %id,
            reference_id = reference_id,
            "Gateway reference recorded"
        );
        Ok(transaction)
    }

    /// `Pending` → `Succeeded`
    ///
    /// # Errors
    /// * `InvalidState` - If the transaction is not `Pending`
    pub async fn succeed(
        &self,
        id: TransactionId,
        tracking_code: &str,
        card_number: Option<String>,
    ) -> Result<Transaction> {
        let mut transaction = self.find(id).await?;
        let now = self.clock.now();

        transaction.transition_to(TransactionStatus::Succeeded, now)?;
        transaction.tracking_code = Some(tracking_code.to_string());
        transaction.card_number = card_number;
        transaction.paid_at = Some(now);
        self.store.update(&transaction).await?;

        tracing::info!(
            gateway = %transaction.gateway,
            transaction_id = %id,
            tracking_code = tracking_code,
            "Transaction succeeded"
        );
        Ok(transaction)
    }

    /// Any non-terminal state → `Failed`, logging the reason
    ///
    /// Idempotent on an already failed transaction.
    ///
    /// # Errors
    /// * `InvalidState` - If the transaction already succeeded
    pub async fn fail(
        &self,
        id: TransactionId,
        reason_code: &str,
        reason_message: &str,
    ) -> Result<Transaction> {
        let mut transaction = self.find(id).await?;

        match transaction.status {
            TransactionStatus::Failed => return Ok(transaction),
            TransactionStatus::Succeeded => {
                return Err(AppError::invalid_state(format!(
                    "transaction {} already succeeded",
                    id
                )))
            }
            TransactionStatus::Created | TransactionStatus::Pending => {}
        }

        transaction.transition_to(TransactionStatus::Failed, self.clock.now())?;
        self.store.update(&transaction).await?;
        self.log(id, reason_code, reason_message).await?;

        tracing::warn!(
            gateway = %transaction.gateway,
            transaction_id = %id,
            code = reason_code,
            reason = reason_message,
            "Transaction failed"
        );
        Ok(transaction)
    }

    /// Append a code/message pair to the transaction log
    pub async fn log(&self, id: TransactionId, code: &str, message: &str) -> Result<()> {
        self.store
            .append_log(TransactionLog {
                transaction_id: id,
                code: code.to_string(),
                message: message.to_string(),
                logged_at: self.clock.now(),
            })
            .await
    }

    pub async fn find(&self, id: TransactionId) -> Result<Transaction> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transaction '{}' not found", id)))
    }
}
