//! Shared types for the AutoDine dashboard
//!
//! - [`table`]: the table snapshot contract reported by the host
//! - [`lifecycle`]: the engine turning a snapshot into what the dashboard shows
//! - [`error`]: snapshot validation errors

pub mod error;
pub mod lifecycle;
pub mod table;

// Re-exports
pub use error::{ValidationError, ValidationResult};
pub use lifecycle::{ActionKind, ActionTarget, AvailableAction, ContentMode, DerivedView, TableCard};
pub use table::{OrderId, OrderState, TableId, TableSnapshot, TableStatus};
