//! Table snapshot - one table's state at a fetch instant
//!
//! The host reports tables as loosely typed JSON ([`TableSnapshotWire`]).
//! [`TableSnapshot`] is the validated, immutable form the lifecycle engine
//! consumes; it can only be obtained through [`TableSnapshot::try_from`] or
//! [`TableSnapshot::from_json`], both of which enforce every invariant.

use super::status::{OrderState, TableStatus};
use crate::error::{ValidationError, ValidationResult};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Table identifier (stable for the table's physical life)
pub type TableId = u32;

/// Order identifier assigned by the host
pub type OrderId = u32;

/// Maximum accepted unit price
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum accepted quantity per line
const MAX_QUANTITY: i64 = 9999;

// ============================================================================
// Wire Types
// ============================================================================

/// Table object as served by `GET /api/dashboard/tables`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshotWire {
    pub table_id: i64,
    pub status: String,
    #[serde(default = "default_order_state")]
    pub order_state: String,
    /// The host writes `0` when no order is attached
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub items: Option<Vec<OrderItemWire>>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

fn default_order_state() -> String {
    OrderState::None.as_str().to_string()
}

/// Order line as served by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItemWire {
    pub name: String,
    pub qty: i64,
    pub price: f64,
}

// ============================================================================
// Validated Types
// ============================================================================

/// One validated order line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    name: String,
    qty: u32,
    price: Decimal,
}

impl OrderItem {
    /// Validate a single line; `index` is only used for error reporting
    fn from_wire(index: usize, wire: OrderItemWire) -> ValidationResult<Self> {
        let invalid = |reason: String| ValidationError::InvalidItem {
            index,
            name: wire.name.clone(),
            reason,
        };

        if wire.name.trim().is_empty() {
            return Err(invalid("name must not be empty".into()));
        }
        if wire.qty <= 0 || wire.qty > MAX_QUANTITY {
            return Err(invalid(format!(
                "qty must be between 1 and {}, got {}",
                MAX_QUANTITY, wire.qty
            )));
        }
        if !wire.price.is_finite() || wire.price < 0.0 || wire.price > MAX_PRICE {
            return Err(invalid(format!(
                "price must be between 0 and {}, got {}",
                MAX_PRICE, wire.price
            )));
        }
        let price = Decimal::from_f64(wire.price)
            .ok_or_else(|| invalid(format!("price {} is not representable", wire.price)))?;
        // Bounded by MAX_QUANTITY above
        let qty = wire.qty as u32;

        Ok(Self {
            name: wire.name,
            qty,
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qty(&self) -> u32 {
        self.qty
    }

    /// Unit price
    pub fn price(&self) -> Decimal {
        self.price
    }
}

/// Validated, immutable table snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot {
    table_id: TableId,
    status: TableStatus,
    order_state: OrderState,
    order_id: Option<OrderId>,
    items: Vec<OrderItem>,
    total: Option<Decimal>,
    payment_method: Option<String>,
}

impl TableSnapshot {
    /// Decode and validate one element of the host's table list
    pub fn from_json(value: serde_json::Value) -> ValidationResult<Self> {
        let wire: TableSnapshotWire = serde_json::from_value(value)
            .map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::try_from(wire)
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn status(&self) -> &TableStatus {
        &self.status
    }

    pub fn order_state(&self) -> OrderState {
        self.order_state
    }

    /// Present iff an order is attached
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Pre-tax total as reported by the host
    pub fn total(&self) -> Option<Decimal> {
        self.total
    }

    pub fn payment_method(&self) -> Option<&str> {
        self.payment_method.as_deref()
    }

    /// Idle table with nothing attached (the only "no active orders" state)
    pub fn is_unengaged(&self) -> bool {
        self.status == TableStatus::Idle && self.order_state == OrderState::None
    }
}

impl TryFrom<TableSnapshotWire> for TableSnapshot {
    type Error = ValidationError;

    fn try_from(wire: TableSnapshotWire) -> ValidationResult<Self> {
        let table_id = TableId::try_from(wire.table_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ValidationError::InvalidTableId(wire.table_id))?;

        let status = TableStatus::from(wire.status);
        let order_state: OrderState = wire.order_state.parse()?;

        // `0` is the host's "empty slot" marker
        let raw_order_id = wire.order_id.filter(|id| *id != 0);
        let order_id = match (order_state.has_order(), raw_order_id) {
            (true, Some(raw)) => Some(
                OrderId::try_from(raw)
                    .ok()
                    .filter(|id| *id > 0)
                    .ok_or(ValidationError::InvalidOrderId(raw))?,
            ),
            (true, None) => return Err(ValidationError::MissingOrderId(order_state)),
            (false, Some(raw)) => return Err(ValidationError::UnexpectedOrderId(raw)),
            (false, None) => None,
        };

        let wire_items = wire.items.unwrap_or_default();
        if !wire_items.is_empty() && !order_state.has_order() {
            return Err(ValidationError::ItemsWithoutOrder(wire_items.len()));
        }
        let items = wire_items
            .into_iter()
            .enumerate()
            .map(|(index, item)| OrderItem::from_wire(index, item))
            .collect::<ValidationResult<Vec<_>>>()?;

        let total = match wire.total {
            None => None,
            Some(t) if t.is_finite() && t >= 0.0 => {
                Some(Decimal::from_f64(t).ok_or(ValidationError::InvalidTotal(t))?)
            }
            Some(t) => return Err(ValidationError::InvalidTotal(t)),
        };

        let payment_method = wire.payment_method.filter(|m| !m.trim().is_empty());
        if let Some(method) = &payment_method
            && !status.is_billing_stage()
        {
            return Err(ValidationError::UnexpectedPaymentMethod {
                method: method.clone(),
                status,
            });
        }

        Ok(Self {
            table_id,
            status,
            order_state,
            order_id,
            items,
            total,
            payment_method,
        })
    }
}
