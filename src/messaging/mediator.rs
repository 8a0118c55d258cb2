use std::sync::Mutex;

use async_trait::async_trait;
use anyhow::Result;

use crate::domain::order::OrderEvent;
use super::envelope::EventEnvelope;

// ============================================================================
// Mediator - Notification dispatch
// ============================================================================

#[async_trait]
pub trait Mediator: Send + Sync {
    async fn publish(&self, envelope: EventEnvelope<OrderEvent>) -> Result<()>;
}

/// Keeps every published envelope in memory
#[derive(Default)]
pub struct InMemoryMediator {
    published: Mutex<Vec<EventEnvelope<OrderEvent>>>,
}

impl InMemoryMediator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<EventEnvelope<OrderEvent>> {
        match self.published.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl Mediator for InMemoryMediator {
    async fn publish(&self, envelope: EventEnvelope<OrderEvent>) -> Result<()> {
        tracing::info!(
            event_id = %envelope.event_id,
            aggregate_id = %envelope.aggregate_id,
            event_type = %envelope.event_type,
            "Published event"
        );

        self.published
            .lock()
            .map_err(|_| anyhow::anyhow!("Mediator state poisoned"))?
            .push(envelope);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderItemAdded;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_publish_records_envelope() {
        let mediator = InMemoryMediator::new();
        let order_id = Uuid::new_v4();
        let event = OrderEvent::ItemAdded(OrderItemAdded {
            customer_id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            order_id,
            product_name: "Keyboard".to_string(),
            quantity: 1,
            unit_value: Decimal::from(80),
        });

        mediator
            .publish(EventEnvelope::new(order_id, event, Uuid::new_v4()))
            .await
            .unwrap();

        let published = mediator.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].aggregate_id, order_id);
        assert_eq!(published[0].event_type, "OrderItemAdded");
    }
}
