use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Order Value Objects
// ============================================================================

pub const MIN_PRODUCT_QUANTITY: i32 = 1;
pub const MAX_PRODUCT_QUANTITY: i32 = 15;

/// A line item. Quantity bounds are enforced by the owning order, not here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_value: Decimal,
}

impl OrderItem {
    pub fn new(
        product_id: Uuid,
        product_name: impl Into<String>,
        quantity: i32,
        unit_value: Decimal,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_value,
        }
    }

    pub fn add_quantity(&mut self, quantity: i32) {
        self.quantity = self.quantity.saturating_add(quantity);
    }

    /// Saturates at `Decimal::MAX` instead of overflowing
    pub fn item_total_value(&self) -> Decimal {
        Decimal::from(self.quantity).saturating_mul(self.unit_value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Draft,
}

// ============================================================================
// Unit Tests
// ============================================================================
