use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::messaging::{Command, Message};
use crate::validation::ValidationResult;
use super::value_objects::{MAX_PRODUCT_QUANTITY, MIN_PRODUCT_QUANTITY};

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

pub const CLIENT_ID_ERROR_MESSAGE: &str = "Client Id is invalid";
pub const PRODUCT_ID_ERROR_MESSAGE: &str = "Product Id is invalid";
pub const PRODUCT_NAME_ERROR_MESSAGE: &str = "Product name is not informed";
pub const VALUE_ERROR_MESSAGE: &str = "The item value must be greater than 0";

pub fn quantity_min_error_message() -> String {
    format!("The minimum quantity is {}", MIN_PRODUCT_QUANTITY)
}

pub fn quantity_max_error_message() -> String {
    format!("The maximum quantity is {}", MAX_PRODUCT_QUANTITY)
}

#[derive(Debug, Clone)]
pub struct AddOrderItemCommand {
    pub customer_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_value: Decimal,
    timestamp: DateTime<Utc>,
}

impl AddOrderItemCommand {
    pub fn new(
        customer_id: Uuid,
        product_id: Uuid,
        product_name: impl Into<String>,
        quantity: i32,
        unit_value: Decimal,
    ) -> Self {
        Self {
            customer_id,
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_value,
            timestamp: Utc::now(),
        }
    }
}

impl Message for AddOrderItemCommand {
    fn message_type(&self) -> &'static str {
        "AddOrderItemCommand"
    }

    fn aggregate_id(&self) -> Uuid {
        self.customer_id
    }
}

impl Command for AddOrderItemCommand {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.check(!self.customer_id.is_nil(), "command.customer_id", CLIENT_ID_ERROR_MESSAGE);
        result.check(!self.product_id.is_nil(), "command.product_id", PRODUCT_ID_ERROR_MESSAGE);
        result.check(
            !self.product_name.trim().is_empty(),
            "command.product_name",
            PRODUCT_NAME_ERROR_MESSAGE,
        );
        result.check(
            self.quantity >= MIN_PRODUCT_QUANTITY,
            "command.quantity",
            &quantity_min_error_message(),
        );
        result.check(
            self.quantity <= MAX_PRODUCT_QUANTITY,
            "command.quantity",
            &quantity_max_error_message(),
        );
        result.check(self.unit_value > Decimal::ZERO, "command.unit_value", VALUE_ERROR_MESSAGE);

        result
    }
}
