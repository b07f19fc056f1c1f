//! Table Snapshot Model
//!
//! Server-reported table state: wire types as served by the host and the
//! validated [`TableSnapshot`] the lifecycle engine works from.

pub mod snapshot;
pub mod status;

// Re-exports
pub use snapshot::{OrderId, OrderItem, OrderItemWire, TableId, TableSnapshot, TableSnapshotWire};
pub use status::{OrderState, TableStatus};
