use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::validation::ValidationResult;
use super::errors::OrderError;
use super::value_objects::{OrderItem, OrderStatus, MAX_PRODUCT_QUANTITY, MIN_PRODUCT_QUANTITY};
use super::voucher::{Voucher, VoucherType};

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
//
// Invariants held after every operation:
// - product ids are unique within `order_items`
// - every item quantity lies in [MIN_PRODUCT_QUANTITY, MAX_PRODUCT_QUANTITY]
// - `total_value` is the item sum minus `discount`, never below zero
//
// Failed operations leave the item list untouched.
//
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    id: Uuid,
    customer_id: Uuid,
    status: OrderStatus,
    total_value: Decimal,
    discount: Decimal,
    used_voucher: bool,
    voucher: Option<Arc<Voucher>>,
    order_items: Vec<OrderItem>,
}

impl Order {
    fn new(customer_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            status: OrderStatus::Draft,
            total_value: Decimal::ZERO,
            discount: Decimal::ZERO,
            used_voucher: false,
            voucher: None,
            order_items: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn customer_id(&self) -> Uuid {
        self.customer_id
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn used_voucher(&self) -> bool {
        self.used_voucher
    }

    pub fn voucher(&self) -> Option<&Voucher> {
        self.voucher.as_deref()
    }

    pub fn order_items(&self) -> &[OrderItem] {
        &self.order_items
    }

    /// Add an item, merging quantities when the product is already present
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        validate_quantity(item.quantity)?;

        match self.position_of(item.product_id) {
            Some(index) => {
                let mut merged = self.order_items[index].clone();
                merged.add_quantity(item.quantity);
                validate_quantity(merged.quantity)?;
                self.order_items[index] = merged;
            }
            None => self.order_items.push(item),
        }

        self.calculate_total_value();
        Ok(())
    }

    /// Replace an existing item wholesale
    pub fn update_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        let index = self.require_position(&item)?;
        validate_quantity(item.quantity)?;

        self.order_items[index] = item;
        self.calculate_total_value();
        Ok(())
    }

    pub fn remove_item(&mut self, item: &OrderItem) -> Result<(), OrderError> {
        let index = self.require_position(item)?;

        self.order_items.remove(index);
        self.calculate_total_value();
        Ok(())
    }

    /// Apply a voucher. An invalid voucher leaves the order untouched and the
    /// failures are handed back to the caller.
    pub fn apply_voucher(&mut self, voucher: Arc<Voucher>) -> ValidationResult {
        let result = voucher.validate();
        if !result.is_valid() {
            return result;
        }

        self.voucher = Some(voucher);
        self.used_voucher = true;
        self.calculate_total_value();
        result
    }

    pub fn make_draft(&mut self) {
        self.status = OrderStatus::Draft;
    }

    fn position_of(&self, product_id: Uuid) -> Option<usize> {
        self.order_items.iter().position(|i| i.product_id == product_id)
    }

    fn require_position(&self, item: &OrderItem) -> Result<usize, OrderError> {
        self.position_of(item.product_id).ok_or_else(|| OrderError::ItemNotFound {
            product_name: item.product_name.clone(),
        })
    }

    fn calculate_total_value(&mut self) {
        self.total_value = self
            .order_items
            .iter()
            .map(OrderItem::item_total_value)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        self.calculate_discount_total_value();
    }

    fn calculate_discount_total_value(&mut self) {
        let voucher = match (&self.voucher, self.used_voucher) {
            (Some(voucher), true) => voucher,
            _ => {
                self.discount = Decimal::ZERO;
                return;
            }
        };

        self.discount = match voucher.voucher_type() {
            VoucherType::Value => voucher.discount_value().unwrap_or_default(),
            VoucherType::Percentage => {
                self.total_value
                    .saturating_mul(voucher.discount_percentage().unwrap_or_default())
                    / Decimal::ONE_HUNDRED
            }
        };

        // Excess discount is capped at the item sum
        let applied = self.total_value.min(self.discount);
        self.total_value -= applied;
    }
}

fn validate_quantity(quantity: i32) -> Result<(), OrderError> {
    if quantity < MIN_PRODUCT_QUANTITY {
        return Err(OrderError::QuantityBelowMinimum { min: MIN_PRODUCT_QUANTITY });
    }
    if quantity > MAX_PRODUCT_QUANTITY {
        return Err(OrderError::QuantityAboveMaximum { max: MAX_PRODUCT_QUANTITY });
    }
    Ok(())
}

// ============================================================================
// Order Factory
// ============================================================================

pub struct OrderFactory;

impl OrderFactory {
    pub fn generate_order(customer_id: Uuid) -> Order {
        let mut order = Order::new(customer_id);
        order.make_draft();
        order
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Utc};

    fn new_order() -> Order {
        OrderFactory::generate_order(Uuid::new_v4())
    }

    fn item(product_id: Uuid, quantity: i32, unit_value: i64) -> OrderItem {
        OrderItem::new(product_id, "Test Product", quantity, Decimal::from(unit_value))
    }

    fn voucher(
        discount_value: Option<Decimal>,
        discount_percentage: Option<Decimal>,
        voucher_type: VoucherType,
    ) -> Arc<Voucher> {
        Arc::new(Voucher::new(
            "PROMO",
            discount_value,
            discount_percentage,
            1,
            true,
            false,
            Utc::now().date_naive() + Days::new(10),
            voucher_type,
        ))
    }

    /// Order holding two products worth 200 in total
    fn order_worth_200() -> Order {
        let mut order = new_order();
        order.add_item(item(Uuid::new_v4(), 2, 50)).unwrap();
        order.add_item(item(Uuid::new_v4(), 1, 100)).unwrap();
        assert_eq!(order.total_value(), Decimal::from(200));
        order
    }

    #[test]
    fn test_factory_creates_draft_order() {
        let customer_id = Uuid::new_v4();
        let order = OrderFactory::generate_order(customer_id);

        assert_eq!(order.customer_id(), customer_id);
        assert_eq!(order.status(), OrderStatus::Draft);
        assert_eq!(order.total_value(), Decimal::ZERO);
        assert_eq!(order.discount(), Decimal::ZERO);
        assert!(!order.used_voucher());
        assert!(order.voucher().is_none());
        assert!(order.order_items().is_empty());
    }

    #[test]
    fn test_add_item_updates_total_value() {
        let mut order = new_order();

        for quantity in MIN_PRODUCT_QUANTITY..=MAX_PRODUCT_QUANTITY {
            let before = order.total_value();
            order.add_item(item(Uuid::new_v4(), quantity, 10)).unwrap();
            assert_eq!(order.total_value() - before, Decimal::from(quantity * 10));
        }

        assert_eq!(order.order_items().len(), MAX_PRODUCT_QUANTITY as usize);
    }

    #[test]
    fn test_add_item_above_maximum_fails() {
        let mut order = new_order();
        let result = order.add_item(item(Uuid::new_v4(), MAX_PRODUCT_QUANTITY + 1, 100));

        assert_eq!(result, Err(OrderError::QuantityAboveMaximum { max: MAX_PRODUCT_QUANTITY }));
        assert!(result.unwrap_err().to_string().contains("Maximum of 15"));
        assert!(order.order_items().is_empty());
    }

    #[test]
    fn test_add_item_below_minimum_fails() {
        let mut order = new_order();
        let result = order.add_item(item(Uuid::new_v4(), MIN_PRODUCT_QUANTITY - 1, 100));

        assert_eq!(result, Err(OrderError::QuantityBelowMinimum { min: MIN_PRODUCT_QUANTITY }));
        assert!(result.unwrap_err().to_string().contains("Minimum of 1"));
        assert!(order.order_items().is_empty());
    }

    #[test]
    fn test_add_existing_item_merges_quantity() {
        let mut order = new_order();
        let product_id = Uuid::new_v4();

        order.add_item(item(product_id, 2, 100)).unwrap();
        order.add_item(item(product_id, 1, 100)).unwrap();

        assert_eq!(order.order_items().len(), 1);
        assert_eq!(order.order_items()[0].quantity, 3);
        assert_eq!(order.total_value(), Decimal::from(300));
    }

    #[test]
    fn test_merge_keeps_item_position() {
        let mut order = new_order();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        order.add_item(item(first, 1, 10)).unwrap();
        order.add_item(item(second, 1, 10)).unwrap();
        order.add_item(item(first, 1, 10)).unwrap();

        assert_eq!(order.order_items()[0].product_id, first);
        assert_eq!(order.order_items()[0].quantity, 2);
    }

    #[test]
    fn test_merge_above_maximum_fails_and_keeps_item() {
        let mut order = new_order();
        let product_id = Uuid::new_v4();

        order.add_item(item(product_id, 10, 100)).unwrap();
        let result = order.add_item(item(product_id, 6, 100));

        assert_eq!(result, Err(OrderError::QuantityAboveMaximum { max: MAX_PRODUCT_QUANTITY }));
        assert_eq!(order.order_items().len(), 1);
        assert_eq!(order.order_items()[0].quantity, 10);
        assert_eq!(order.total_value(), Decimal::from(1000));
    }

    #[test]
    fn test_update_missing_item_fails() {
        let mut order = new_order();
        order.add_item(item(Uuid::new_v4(), 2, 100)).unwrap();
        let before = order.order_items().to_vec();

        let result = order.update_item(item(Uuid::new_v4(), 3, 100));

        assert!(matches!(result, Err(OrderError::ItemNotFound { .. })));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Item Test Product doesn't belong to the order list."
        );
        assert_eq!(order.order_items(), before.as_slice());
        assert_eq!(order.total_value(), Decimal::from(200));
    }

    #[test]
    fn test_update_item_replaces_quantity() {
        let mut order = new_order();
        let product_id = Uuid::new_v4();

        order.add_item(item(product_id, 2, 100)).unwrap();
        order.update_item(item(product_id, 5, 100)).unwrap();

        assert_eq!(order.order_items().len(), 1);
        assert_eq!(order.order_items()[0].quantity, 5);
        assert_eq!(order.total_value(), Decimal::from(500));
    }

    #[test]
    fn test_update_item_with_invalid_quantity_keeps_list() {
        let mut order = new_order();
        let product_id = Uuid::new_v4();
        order.add_item(item(product_id, 2, 100)).unwrap();

        let above = order.update_item(item(product_id, MAX_PRODUCT_QUANTITY + 1, 100));
        let below = order.update_item(item(product_id, 0, 100));

        assert!(matches!(above, Err(OrderError::QuantityAboveMaximum { .. })));
        assert!(matches!(below, Err(OrderError::QuantityBelowMinimum { .. })));
        assert_eq!(order.order_items()[0].quantity, 2);
        assert_eq!(order.total_value(), Decimal::from(200));
    }

    #[test]
    fn test_remove_missing_item_fails() {
        let mut order = new_order();
        let result = order.remove_item(&item(Uuid::new_v4(), 1, 100));
        assert!(matches!(result, Err(OrderError::ItemNotFound { .. })));
    }

    #[test]
    fn test_remove_missing_item_keeps_order_unchanged() {
        let mut order = order_worth_200();
        let before = order.order_items().to_vec();

        let result = order.remove_item(&item(Uuid::new_v4(), 1, 100));

        assert!(matches!(result, Err(OrderError::ItemNotFound { .. })));
        assert_eq!(order.order_items(), before.as_slice());
        assert_eq!(order.total_value(), Decimal::from(200));
    }

    #[test]
    fn test_remove_item_recalculates_total() {
        let mut order = new_order();
        let kept = item(Uuid::new_v4(), 2, 100);
        let removed = item(Uuid::new_v4(), 3, 15);

        order.add_item(kept.clone()).unwrap();
        order.add_item(removed.clone()).unwrap();
        assert_eq!(order.total_value(), Decimal::from(245));

        order.remove_item(&removed).unwrap();

        assert_eq!(order.order_items(), &[kept]);
        assert_eq!(order.total_value(), Decimal::from(200));
    }

    #[test]
    fn test_apply_invalid_voucher_leaves_order_untouched() {
        let mut order = order_worth_200();
        let expired = Arc::new(Voucher::new(
            "",
            Some(Decimal::from(20)),
            None,
            0,
            false,
            true,
            Utc::now().date_naive() - Days::new(1),
            VoucherType::Value,
        ));

        let result = order.apply_voucher(expired);

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 5);
        assert!(!order.used_voucher());
        assert!(order.voucher().is_none());
        assert_eq!(order.discount(), Decimal::ZERO);
        assert_eq!(order.total_value(), Decimal::from(200));
    }

    #[test]
    fn test_apply_voucher_failing_one_rule_leaves_order_untouched() {
        let mut order = order_worth_200();
        let inactive = Arc::new(Voucher::new(
            "PROMO",
            Some(Decimal::from(20)),
            None,
            1,
            false,
            false,
            Utc::now().date_naive() + Days::new(10),
            VoucherType::Value,
        ));

        let result = order.apply_voucher(inactive);

        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].rule, "voucher.active");
        assert!(!order.used_voucher());
        assert!(order.voucher().is_none());
        assert_eq!(order.discount(), Decimal::ZERO);
        assert_eq!(order.total_value(), Decimal::from(200));
    }

    #[test]
    fn test_add_item_with_huge_unit_value_saturates_total() {
        let mut order = new_order();
        let gold = OrderItem::new(Uuid::new_v4(), "Gold bar", 2, Decimal::MAX);

        order.add_item(gold).unwrap();
        order.add_item(item(Uuid::new_v4(), 1, 100)).unwrap();

        assert_eq!(order.order_items().len(), 2);
        assert_eq!(order.total_value(), Decimal::MAX);
    }

    #[test]
    fn test_percentage_voucher_on_saturated_total_does_not_overflow() {
        let mut order = new_order();
        order.add_item(OrderItem::new(Uuid::new_v4(), "Gold bar", 2, Decimal::MAX)).unwrap();

        let result =
            order.apply_voucher(voucher(None, Some(Decimal::from(50)), VoucherType::Percentage));

        assert!(result.is_valid());
        assert!(order.discount() > Decimal::ZERO);
        assert!(order.total_value() < Decimal::MAX);
    }

    #[test]
    fn test_apply_value_voucher() {
        let mut order = order_worth_200();

        let result = order.apply_voucher(voucher(Some(Decimal::from(20)), None, VoucherType::Value));

        assert!(result.is_valid());
        assert!(order.used_voucher());
        assert_eq!(order.discount(), Decimal::from(20));
        assert_eq!(order.total_value(), Decimal::from(180));
    }

    #[test]
    fn test_apply_percentage_voucher() {
        let mut order = order_worth_200();

        let result =
            order.apply_voucher(voucher(None, Some(Decimal::from(20)), VoucherType::Percentage));

        assert!(result.is_valid());
        assert_eq!(order.discount(), Decimal::from(40));
        assert_eq!(order.total_value(), Decimal::from(160));
    }

    #[test]
    fn test_discount_never_drives_total_below_zero() {
        let mut order = order_worth_200();

        order.apply_voucher(voucher(Some(Decimal::from(500)), None, VoucherType::Value));

        assert_eq!(order.discount(), Decimal::from(500));
        assert_eq!(order.total_value(), Decimal::ZERO);
    }

    #[test]
    fn test_discount_reapplied_after_item_changes() {
        let mut order = order_worth_200();
        order.apply_voucher(voucher(None, Some(Decimal::from(10)), VoucherType::Percentage));
        assert_eq!(order.total_value(), Decimal::from(180));

        order.add_item(item(Uuid::new_v4(), 1, 100)).unwrap();

        assert_eq!(order.discount(), Decimal::from(30));
        assert_eq!(order.total_value(), Decimal::from(270));
    }

    #[test]
    fn test_order_snapshot_serialization() {
        let mut order = order_worth_200();
        order.apply_voucher(voucher(Some(Decimal::from(20)), None, VoucherType::Value));

        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["status"], "Draft");
        assert_eq!(json["used_voucher"], true);
        assert_eq!(json["order_items"].as_array().unwrap().len(), 2);
        assert_eq!(json["voucher"]["code"], "PROMO");
    }
}
