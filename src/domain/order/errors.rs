// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Minimum of {min} units per product.")]
    QuantityBelowMinimum { min: i32 },

    #[error("Maximum of {max} units per product.")]
    QuantityAboveMaximum { max: i32 },

    #[error("Item {product_name} doesn't belong to the order list.")]
    ItemNotFound { product_name: String },
}

impl OrderError {
    /// Stable label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::QuantityBelowMinimum { .. } => "quantity_below_minimum",
            OrderError::QuantityAboveMaximum { .. } => "quantity_above_maximum",
            OrderError::ItemNotFound { .. } => "item_not_found",
        }
    }
}
