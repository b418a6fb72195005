use std::sync::Arc;

use crate::core::{AppError, Amount, Clock, Result};
use crate::modules::classifier::GatewayResponse;
use crate::modules::gateways::models::{GatewayKind, InitiateRequest, RedirectDirective, VerifyRequest};
use crate::modules::gateways::services::PaymentGateway;
use crate::modules::ports::models::VerifyTarget;
use crate::modules::transactions::models::{InvoiceItem, Transaction, TransactionId};
use crate::modules::transactions::repositories::TransactionStore;
use crate::modules::transactions::services::TransactionStateMachine;

pub const AMOUNT_MISMATCH: &str = "amount-mismatch";
pub const REFERENCE_MISMATCH: &str = "reference-mismatch";

/// Uniform checkout flow over one gateway
///
/// One port drives one transaction: `set` and `add_item` collect the
/// purchase, `ready` opens it at the gateway, `redirect` hands the payer
/// off and `verify` settles it when the callback arrives. Verification only
/// needs the stored record, so a fresh port can verify a transaction opened
/// by another one.
pub struct PaymentPort {
    gateway: Arc<dyn PaymentGateway>,
    machine: TransactionStateMachine,
    amount: Option<Amount>,
    items: Vec<InvoiceItem>,
    transaction: Option<Transaction>,
}

impl PaymentPort {
    pub fn new(gateway: Arc<dyn PaymentGateway>, store: Arc<dyn TransactionStore>) -> Self {
        Self::with_state_machine(gateway, TransactionStateMachine::new(store))
    }

    /// Port whose transaction timestamps come from `clock`
    pub fn with_clock(
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn TransactionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_state_machine(gateway, TransactionStateMachine::with_clock(store, clock))
    }

    pub fn with_state_machine(
        gateway: Arc<dyn PaymentGateway>,
        machine: TransactionStateMachine,
    ) -> Self {
        Self {
            gateway,
            machine,
            amount: None,
            items: Vec::new(),
            transaction: None,
        }
    }

    pub fn gateway(&self) -> GatewayKind {
        self.gateway.kind()
    }

    /// Set the amount to charge
    ///
    /// # Errors
    /// * `InvalidAmount` - Zero or negative amount
    /// * `InvalidState` - The purchase was already sent
    pub fn set(&mut self, amount: i64) -> Result<&mut Self> {
        self.ensure_not_sent()?;
        self.amount = Some(Amount::new(amount)?);
        Ok(self)
    }

    /// Attach an invoice item; order is kept
    ///
    /// # Errors
    /// * `InvalidState` - The purchase was already sent
    pub fn add_item(&mut self, item: InvoiceItem) -> Result<&mut Self> {
        self.ensure_not_sent()?;
        self.items.push(item);
        Ok(self)
    }

    /// Open the transaction at the gateway
    ///
    /// On success the transaction is `Pending` with a gateway reference and a
    /// redirect target. Any failure after the transaction exists leaves it
    /// `Failed` with a log entry.
    ///
    /// # Errors
    /// * `PaymentInitiation` - Wraps the underlying cause
    pub async fn ready(&mut self) -> Result<&mut Self> {
        self.ensure_not_sent().map_err(AppError::initiation)?;

        let amount = self.amount.ok_or_else(|| {
            AppError::initiation(AppError::invalid_amount("Amount must be set before ready()"))
        })?;

        let transaction = self
            .machine
            .start(self.gateway.kind(), amount, self.items.clone())
            .await
            .map_err(AppError::initiation)?;
        let id = transaction.id;
        self.transaction = Some(transaction);

        let request = InitiateRequest {
            transaction_id: id,
            amount,
            items: self.items.clone(),
        };

        match self.open(&request).await {
            Ok(transaction) => {
                tracing::info!(
                    gateway = %self.gateway.kind(),
                    transaction_id = %id,
                    reference_id = transaction.reference_id.as_deref().unwrap_or_default(),
                    "Payment ready for redirect"
                );
                self.transaction = Some(transaction);
                Ok(self)
            }
            Err(e) => {
                self.abort(id, &e).await;
                Err(AppError::initiation(e))
            }
        }
    }

    async fn open(&self, request: &InitiateRequest) -> Result<Transaction> {
        let response = self.gateway.initiate(request).await?;
        let kind = self.gateway.kind();

        let reference_id = response
            .reference_id
            .ok_or_else(|| AppError::protocol(kind, "Purchase response without a reference id"))?;
        let redirect = response
            .redirect_target
            .ok_or_else(|| AppError::protocol(kind, "Purchase response without a redirect target"))?;

        self.machine
            .record_reference(request.transaction_id, &reference_id, Some(redirect))
            .await
    }

    /// Where to send the payer
    ///
    /// # Errors
    /// * `InvalidState` - Before a successful `ready()`
    pub fn redirect(&self) -> Result<RedirectDirective> {
        self.transaction
            .as_ref()
            .and_then(|transaction| transaction.redirect_target.clone())
            .ok_or_else(|| AppError::invalid_state("No redirect target: ready() has not succeeded"))
    }

    /// Settle a transaction after the payer returns
    ///
    /// Returns the terminal record. A record that is already terminal, or
    /// belongs to another gateway, is rejected without being touched; every
    /// other failure leaves the transaction `Failed`.
    ///
    /// # Errors
    /// * `PaymentVerification` - Wraps the underlying cause
    pub async fn verify(&mut self, target: &VerifyTarget) -> Result<Transaction> {
        let transaction = self
            .machine
            .find(target.id)
            .await
            .map_err(AppError::verification)?;

        if transaction.gateway != self.gateway.kind() {
            return Err(AppError::verification(AppError::validation(format!(
                "Transaction {} belongs to gateway {}",
                transaction.id, transaction.gateway
            ))));
        }

        if transaction.is_terminal() {
            return Err(AppError::verification(AppError::invalid_state(format!(
                "Transaction {} is already {}",
                transaction.id, transaction.status
            ))));
        }

        let id = transaction.id;
        self.transaction = Some(transaction.clone());

        match self.settle(&transaction, target).await {
            Ok(settled) => {
                self.transaction = Some(settled.clone());
                Ok(settled)
            }
            Err(e) => {
                self.abort(id, &e).await;
                Err(AppError::verification(e))
            }
        }
    }

    async fn settle(&self, transaction: &Transaction, target: &VerifyTarget) -> Result<Transaction> {
        let id = transaction.id;
        let reference_id = transaction.reference_id.as_deref().ok_or_else(|| {
            AppError::invalid_state(format!("Transaction {} has no gateway reference", id))
        })?;

        if reference_id != target.reference_id {
            return Err(AppError::callback_mismatch(
                REFERENCE_MISMATCH,
                format!(
                    "Callback reference {} does not match {}",
                    target.reference_id, reference_id
                ),
            ));
        }

        if transaction.amount != target.amount {
            return Err(AppError::callback_mismatch(
                AMOUNT_MISMATCH,
                format!(
                    "Callback amount {} does not match {}",
                    target.amount, transaction.amount
                ),
            ));
        }

        let request = VerifyRequest {
            transaction_id: id,
            reference_id: reference_id.to_string(),
            amount: transaction.amount,
        };

        // The status answer is diagnostic only; the verify call decides
        if let Some(status) = self.gateway.query_status(&request).await? {
            tracing::info!(
                gateway = %self.gateway.kind(),
                transaction_id = %id,
                code = %status.outcome_code,
                category = %status.category,
                status = %status.message,
                "Gateway status received"
            );
        }

        let outcome = self.gateway.verify(&request).await?;
        if !outcome.is_success() {
            return Err(rejection(outcome));
        }

        let tracking_code = outcome.tracking_code.clone().ok_or_else(|| {
            AppError::protocol(self.gateway.kind(), "Successful verify without a tracking code")
        })?;

        self.machine
            .log(id, &outcome.outcome_code, &outcome.message)
            .await?;
        self.machine
            .succeed(id, &tracking_code, outcome.card_number)
            .await
    }

    /// Mark the transaction failed after an error; the original error wins
    async fn abort(&mut self, id: TransactionId, cause: &AppError) {
        tracing::error!(
            gateway = %self.gateway.kind(),
            transaction_id = %id,
            code = %cause.log_code(),
            retryable = cause.is_retryable(),
            error = %cause,
            "Payment step failed"
        );

        match self
            .machine
            .fail(id, &cause.log_code(), &cause.log_message())
            .await
        {
            Ok(transaction) => self.transaction = Some(transaction),
            Err(e) => {
                tracing::error!(transaction_id = %id, error = %e, "Could not mark transaction failed")
            }
        }
    }

    fn ensure_not_sent(&self) -> Result<()> {
        match &self.transaction {
            Some(transaction) => Err(AppError::invalid_state(format!(
                "Purchase for transaction {} was already sent",
                transaction.id
            ))),
            None => Ok(()),
        }
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction.as_ref().map(|transaction| transaction.id)
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.transaction.as_ref()?.reference_id.as_deref()
    }

    pub fn tracking_code(&self) -> Option<&str> {
        self.transaction.as_ref()?.tracking_code.as_deref()
    }

    pub fn card_number(&self) -> Option<&str> {
        self.transaction.as_ref()?.card_number.as_deref()
    }
}

fn rejection(response: GatewayResponse) -> AppError {
    AppError::rejected(response.outcome_code, response.message, response.retryable)
}
