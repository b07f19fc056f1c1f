//! Error types for the shared crate

use crate::table::{OrderState, TableStatus};
use thiserror::Error;

/// A table snapshot that violates the snapshot contract
///
/// Raised per table. The dashboard renders the offending table as a degraded
/// card and keeps rendering the rest of the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Element is not shaped like a table object at all
    #[error("malformed table object: {0}")]
    Malformed(String),

    #[error("table_id must be a positive integer, got {0}")]
    InvalidTableId(i64),

    #[error("unknown order state '{0}'")]
    UnknownOrderState(String),

    #[error("order_id is required while order state is {0}")]
    MissingOrderId(OrderState),

    #[error("order_id {0} present while no order is attached")]
    UnexpectedOrderId(i64),

    #[error("order_id must be a positive integer, got {0}")]
    InvalidOrderId(i64),

    #[error("{0} item(s) listed without an attached order")]
    ItemsWithoutOrder(usize),

    #[error("item #{index} ('{name}'): {reason}")]
    InvalidItem {
        index: usize,
        name: String,
        reason: String,
    },

    #[error("total must be a finite non-negative amount, got {0}")]
    InvalidTotal(f64),

    #[error("payment method '{method}' set while table is {status}")]
    UnexpectedPaymentMethod { method: String, status: TableStatus },
}

/// Result type for snapshot validation
pub type ValidationResult<T> = Result<T, ValidationError>;
