use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::validation::ValidationResult;

/// Anything routed through the application layer
pub trait Message {
    fn message_type(&self) -> &'static str;

    fn aggregate_id(&self) -> Uuid;
}

/// A request to change state. Commands validate themselves before a handler
/// acts on them.
pub trait Command: Message {
    fn timestamp(&self) -> DateTime<Utc>;

    fn validate(&self) -> ValidationResult;

    fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }
}
