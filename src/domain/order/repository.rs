use async_trait::async_trait;

use crate::utils::IsTransient;
use super::aggregate::Order;

// ============================================================================
// Persistence Ports
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("Transient persistence failure: {0}")]
    Transient(String),

    #[error("Persistence failure: {0}")]
    Permanent(String),
}

impl IsTransient for PersistenceError {
    fn is_transient(&self) -> bool {
        matches!(self, PersistenceError::Transient(_))
    }
}

#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Flush staged changes; `Ok(false)` means nothing was written
    async fn commit(&self) -> Result<bool, PersistenceError>;

    /// Drop every staged change without writing it
    fn rollback(&self);
}

pub trait OrderRepository: Send + Sync {
    /// Stage an order for the next commit
    fn add(&self, order: Order);

    fn unit_of_work(&self) -> &dyn UnitOfWork;
}
