// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderItem, OrderStatus, quantity bounds)
// - Voucher and its validation rules
// - Events (OrderItemAdded)
// - Commands (AddOrderItemCommand)
// - Errors (OrderError enum)
// - Aggregate (Order with business logic, OrderFactory)
// - Persistence ports (OrderRepository, UnitOfWork)
// - Command Handler (OrderCommandHandler)
//
// ============================================================================

pub mod value_objects;
pub mod voucher;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod repository;
pub mod command_handler;

// Re-export for convenience
pub use value_objects::*;
pub use voucher::{Voucher, VoucherType};
pub use events::*;
pub use commands::AddOrderItemCommand;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
pub use command_handler::*;
