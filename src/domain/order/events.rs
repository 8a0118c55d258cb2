use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messaging::DomainEvent;

// ============================================================================
// Order Events - Notifications emitted by the order handlers
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    ItemAdded(OrderItemAdded),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::ItemAdded(_) => "OrderItemAdded",
        }
    }
}

/// An item was added to a customer's order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItemAdded {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_value: Decimal,
}
