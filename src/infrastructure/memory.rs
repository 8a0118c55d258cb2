use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::{Order, OrderRepository, PersistenceError, UnitOfWork};

// ============================================================================
// In-Memory Order Repository
// ============================================================================
//
// Orders added through the repository are staged and only become visible via
// `get` after a successful commit. The repository is its own unit of work.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderRepository {
    staged: Mutex<Vec<Order>>,
    committed: Mutex<HashMap<Uuid, Order>>,
    transient_failures: AtomicU32,
    commit_attempts: AtomicU32,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` commits fail with a transient error
    pub fn fail_next_commits(&self, count: u32) {
        self.transient_failures.store(count, Ordering::SeqCst);
    }

    pub fn get(&self, order_id: Uuid) -> Option<Order> {
        self.committed.lock().ok()?.get(&order_id).cloned()
    }

    pub fn committed_count(&self) -> usize {
        self.committed.lock().map(|orders| orders.len()).unwrap_or_default()
    }

    pub fn staged_count(&self) -> usize {
        self.staged.lock().map(|orders| orders.len()).unwrap_or_default()
    }

    pub fn commit_attempts(&self) -> u32 {
        self.commit_attempts.load(Ordering::SeqCst)
    }

    fn take_transient_failure(&self) -> bool {
        self.transient_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn add(&self, order: Order) {
        tracing::debug!(order_id = %order.id(), customer_id = %order.customer_id(), "Staging order");
        match self.staged.lock() {
            Ok(mut staged) => staged.push(order),
            Err(poisoned) => poisoned.into_inner().push(order),
        }
    }

    fn unit_of_work(&self) -> &dyn UnitOfWork {
        self
    }
}

#[async_trait]
impl UnitOfWork for InMemoryOrderRepository {
    async fn commit(&self) -> Result<bool, PersistenceError> {
        self.commit_attempts.fetch_add(1, Ordering::SeqCst);

        if self.take_transient_failure() {
            return Err(PersistenceError::Transient("storage busy".to_string()));
        }

        let staged: Vec<Order> = self
            .staged
            .lock()
            .map_err(|_| PersistenceError::Permanent("staging area poisoned".to_string()))?
            .drain(..)
            .collect();

        if staged.is_empty() {
            return Ok(false);
        }

        let mut committed = self
            .committed
            .lock()
            .map_err(|_| PersistenceError::Permanent("order store poisoned".to_string()))?;

        let count = staged.len();
        for order in staged {
            committed.insert(order.id(), order);
        }

        tracing::debug!(orders = count, "Committed orders");
        Ok(true)
    }

    fn rollback(&self) {
        let discarded = match self.staged.lock() {
            Ok(mut staged) => staged.drain(..).count(),
            Err(poisoned) => poisoned.into_inner().drain(..).count(),
        };
        tracing::debug!(orders = discarded, "Rolled back staged orders");
    }
}
