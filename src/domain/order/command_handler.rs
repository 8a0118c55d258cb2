use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use crate::messaging::{Command, EventEnvelope, Mediator, Message};
use crate::metrics::Metrics;
use crate::utils::{retry_on_transient, RetryConfig, RetryResult};

use super::aggregate::{Order, OrderFactory};
use super::commands::AddOrderItemCommand;
use super::errors::OrderError;
use super::events::{OrderEvent, OrderItemAdded};
use super::repository::{OrderRepository, PersistenceError};
use super::value_objects::OrderItem;
use super::voucher::Voucher;
use crate::validation::ValidationResult;

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: Command → Aggregate → Repository → Mediator → Unit of Work
//
// One command is handled per call; callers serialize access per order.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Domain(#[from] OrderError),

    #[error("Failed to publish event: {0}")]
    Publish(#[source] anyhow::Error),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// How an add-item command ended when no error was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddItemOutcome {
    Invalid,
    Committed,
    NothingCommitted,
}

pub struct OrderCommandHandler {
    repository: Arc<dyn OrderRepository>,
    mediator: Arc<dyn Mediator>,
    metrics: Arc<Metrics>,
    commit_retry: RetryConfig,
}

impl OrderCommandHandler {
    pub fn new(
        repository: Arc<dyn OrderRepository>,
        mediator: Arc<dyn Mediator>,
        metrics: Arc<Metrics>,
        commit_retry: RetryConfig,
    ) -> Self {
        Self {
            repository,
            mediator,
            metrics,
            commit_retry,
        }
    }

    /// Handle an add-item command. Returns `Ok(false)` when the command is
    /// rejected by validation or the unit of work had nothing to write.
    /// On any error the staged order is rolled back.
    pub async fn handle(&self, command: AddOrderItemCommand) -> Result<bool, CommandError> {
        let started = Instant::now();
        let command_type = command.message_type();

        let outcome = self.handle_add_item(command).await;

        let label = match &outcome {
            Ok(AddItemOutcome::Committed) => "success",
            Ok(AddItemOutcome::NothingCommitted) => "nothing_committed",
            Ok(AddItemOutcome::Invalid) => "rejected",
            Err(CommandError::Domain(e)) => {
                self.metrics.record_domain_violation(e.kind());
                "domain_violation"
            }
            Err(_) => "failure",
        };
        self.metrics
            .record_command(command_type, label, started.elapsed().as_secs_f64());

        outcome.map(|o| o == AddItemOutcome::Committed)
    }

    async fn handle_add_item(
        &self,
        command: AddOrderItemCommand,
    ) -> Result<AddItemOutcome, CommandError> {
        let validation = command.validate();
        if !validation.is_valid() {
            let errors: Vec<&str> = validation.messages().collect();
            tracing::warn!(
                customer_id = %command.customer_id,
                errors = ?errors,
                "Rejected invalid AddOrderItemCommand"
            );
            return Ok(AddItemOutcome::Invalid);
        }

        let correlation_id = Uuid::new_v4();
        let command_timestamp = command.timestamp();
        let item = OrderItem::new(
            command.product_id,
            command.product_name.clone(),
            command.quantity,
            command.unit_value,
        );

        let mut order = OrderFactory::generate_order(command.customer_id);
        if let Err(e) = order.add_item(item) {
            tracing::warn!(
                order_id = %order.id(),
                product_id = %command.product_id,
                error = %e,
                "Order rejected item"
            );
            return Err(e.into());
        }

        let order_id = order.id();
        tracing::debug!(
            order_id = %order_id,
            customer_id = %command.customer_id,
            total_value = %order.total_value(),
            "Item added to draft order"
        );

        self.repository.add(order);

        let event = OrderEvent::ItemAdded(OrderItemAdded {
            customer_id: command.customer_id,
            product_id: command.product_id,
            order_id,
            product_name: command.product_name,
            quantity: command.quantity,
            unit_value: command.unit_value,
        });
        let envelope = EventEnvelope::new(order_id, event, correlation_id)
            .with_metadata("command_type", "AddOrderItemCommand")
            .with_metadata("command_timestamp", command_timestamp.to_rfc3339());
        if let Err(e) = self.mediator.publish(envelope).await {
            tracing::error!(order_id = %order_id, error = %e, "Publish failed, rolling back");
            self.repository.unit_of_work().rollback();
            return Err(CommandError::Publish(e));
        }

        let committed = match self.commit().await {
            Ok(committed) => committed,
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "Commit failed, rolling back");
                self.repository.unit_of_work().rollback();
                return Err(e.into());
            }
        };

        tracing::info!(order_id = %order_id, committed, "AddOrderItemCommand handled");
        Ok(if committed {
            AddItemOutcome::Committed
        } else {
            AddItemOutcome::NothingCommitted
        })
    }

    /// Apply a voucher to an order held by the caller
    pub fn apply_voucher(&self, order: &mut Order, voucher: Arc<Voucher>) -> ValidationResult {
        let result = order.apply_voucher(voucher);
        self.metrics.record_voucher_application(result.is_valid());

        if result.is_valid() {
            tracing::info!(
                order_id = %order.id(),
                discount = %order.discount(),
                total_value = %order.total_value(),
                "Voucher applied"
            );
        } else {
            let errors: Vec<&str> = result.messages().collect();
            tracing::warn!(order_id = %order.id(), errors = ?errors, "Voucher rejected");
        }

        result
    }

    async fn commit(&self) -> Result<bool, PersistenceError> {
        let unit_of_work = self.repository.unit_of_work();
        let metrics = &self.metrics;

        let result = retry_on_transient(&self.commit_retry, move |attempt| {
            metrics.record_commit_attempt(attempt);
            unit_of_work.commit()
        })
        .await;

        match &result {
            RetryResult::Success(written) => metrics.record_commit_outcome(true, *written),
            _ => metrics.record_commit_outcome(false, false),
        }
        result.into_result()
    }
}

// ============================================================================
// Tests
// ============================================================================
