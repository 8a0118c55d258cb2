//! Sales order aggregate with line items, quantity bounds and voucher
//! discounts, plus the thin application layer that drives it: commands,
//! event envelopes, a mediator, persistence ports and retrying commits.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod messaging;
pub mod metrics;
pub mod telemetry;
pub mod utils;
pub mod validation;
