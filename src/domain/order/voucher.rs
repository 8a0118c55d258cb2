use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::validation::ValidationResult;

// ============================================================================
// Voucher - Discount descriptor
// ============================================================================

pub const CODE_ERROR_MESSAGE: &str = "Voucher doesn't have a valid code";
pub const VALIDATION_DATE_ERROR_MESSAGE: &str = "This Voucher is expired";
pub const ACTIVE_ERROR_MESSAGE: &str = "This Voucher isn't active";
pub const USED_ERROR_MESSAGE: &str = "This Voucher has already been used";
pub const QUANTITY_ERROR_MESSAGE: &str = "This Voucher isn't available";
pub const DISCOUNT_VALUE_ERROR_MESSAGE: &str = "The discount value must be greater than 0";
pub const DISCOUNT_PERCENTAGE_ERROR_MESSAGE: &str =
    "The discount percentage must be greater than 0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherType {
    Value,
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    code: String,
    discount_value: Option<Decimal>,
    discount_percentage: Option<Decimal>,
    quantity: i32,
    active: bool,
    used: bool,
    validation_date: NaiveDate,
    voucher_type: VoucherType,
}

impl Voucher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        code: impl Into<String>,
        discount_value: Option<Decimal>,
        discount_percentage: Option<Decimal>,
        quantity: i32,
        active: bool,
        used: bool,
        validation_date: NaiveDate,
        voucher_type: VoucherType,
    ) -> Self {
        Self {
            code: code.into(),
            discount_value,
            discount_percentage,
            quantity,
            active,
            used,
            validation_date,
            voucher_type,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn discount_value(&self) -> Option<Decimal> {
        self.discount_value
    }

    pub fn discount_percentage(&self) -> Option<Decimal> {
        self.discount_percentage
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn validation_date(&self) -> NaiveDate {
        self.validation_date
    }

    pub fn voucher_type(&self) -> VoucherType {
        self.voucher_type
    }

    /// Validate against the current UTC date
    pub fn validate(&self) -> ValidationResult {
        self.validate_at(Utc::now().date_naive())
    }

    /// Run every voucher rule against `today`. A voucher expiring today is
    /// still valid.
    pub fn validate_at(&self, today: NaiveDate) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.check(!self.code.is_empty(), "voucher.code", CODE_ERROR_MESSAGE);
        result.check(
            self.validation_date >= today,
            "voucher.validation_date",
            VALIDATION_DATE_ERROR_MESSAGE,
        );
        result.check(self.active, "voucher.active", ACTIVE_ERROR_MESSAGE);
        result.check(!self.used, "voucher.used", USED_ERROR_MESSAGE);
        result.check(self.quantity > 0, "voucher.quantity", QUANTITY_ERROR_MESSAGE);

        match self.voucher_type {
            VoucherType::Value => result.check(
                is_positive(self.discount_value),
                "voucher.discount_value",
                DISCOUNT_VALUE_ERROR_MESSAGE,
            ),
            VoucherType::Percentage => result.check(
                is_positive(self.discount_percentage),
                "voucher.discount_percentage",
                DISCOUNT_PERCENTAGE_ERROR_MESSAGE,
            ),
        }

        result
    }
}

fn is_positive(value: Option<Decimal>) -> bool {
    value.is_some_and(|v| v > Decimal::ZERO)
}

// ============================================================================
// Unit Tests
// ============================================================================
