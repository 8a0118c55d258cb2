// ============================================================================
// Messaging - Message contracts, envelopes and dispatch
// ============================================================================

pub mod envelope;
pub mod mediator;
pub mod message;

pub use envelope::{DomainEvent, EventEnvelope};
pub use mediator::{InMemoryMediator, Mediator};
pub use message::{Command, Message};
