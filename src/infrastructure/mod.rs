// ============================================================================
// Infrastructure - Adapters for the domain ports
// ============================================================================

pub mod memory;

pub use memory::InMemoryOrderRepository;
