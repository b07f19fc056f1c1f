//! Lifecycle Engine
//!
//! Pure functions from a [`TableSnapshot`] to the [`DerivedView`] a dashboard
//! renders: status label, content mode, line amounts, bill figures and the
//! set of legal actions. Nothing here mutates a snapshot or talks to the
//! network; the same snapshot always yields the same view.
//!
//! # Example
//!
//! ```
//! use shared::lifecycle::{interpret, ActionKind, ContentMode};
//! use serde_json::json;
//!
//! let card = interpret(json!({
//!     "table_id": 1,
//!     "status": "idle",
//!     "order_state": "pending",
//!     "order_id": 7,
//!     "items": [{"name": "Idli", "qty": 2, "price": 30}]
//! }));
//!
//! let view = card.view().unwrap();
//! assert_eq!(view.mode, ContentMode::Order);
//! assert!(view.allows(ActionKind::Accept));
//! ```

pub mod actions;
pub mod billing;
pub mod mode;

pub use actions::{
    ActionKind, ActionTarget, AvailableAction, TargetKind, available_actions, eligible_actions,
};
pub use billing::{BillingFigures, LineItem, TAX_LABEL, TAX_RATE, compute_billing, order_lines};
pub use mode::{ContentMode, classify, status_label};

use crate::error::ValidationError;
use crate::table::{OrderId, OrderState, TableId, TableSnapshot, TableStatus};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Everything the UI layer needs to draw one table
///
/// The UI must not re-derive eligibility or totals from the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    pub table_id: TableId,
    pub status: TableStatus,
    pub status_label: String,
    pub mode: ContentMode,
    pub order_id: Option<OrderId>,
    /// Order lines (order and bill modes)
    pub lines: Vec<LineItem>,
    /// Host-reported pre-tax total (order mode only)
    pub order_total: Option<Decimal>,
    /// Bill figures (bill mode only)
    pub billing: Option<BillingFigures>,
    /// Upper-cased for display
    pub payment_method: Option<String>,
    /// Bill is out, customer has not picked a payment method yet
    pub awaiting_payment_method: bool,
    pub actions: Vec<AvailableAction>,
}

impl DerivedView {
    pub fn available_actions(&self) -> BTreeSet<ActionKind> {
        self.actions.iter().map(|a| a.kind).collect()
    }

    pub fn allows(&self, kind: ActionKind) -> bool {
        self.actions.iter().any(|a| a.kind == kind)
    }
}

/// One table's slot on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum TableCard {
    Live(DerivedView),
    /// Snapshot failed validation; `table_id` is kept when it could be read
    Degraded {
        table_id: Option<TableId>,
        error: ValidationError,
    },
}

impl TableCard {
    pub fn table_id(&self) -> Option<TableId> {
        match self {
            Self::Live(view) => Some(view.table_id),
            Self::Degraded { table_id, .. } => *table_id,
        }
    }

    pub fn view(&self) -> Option<&DerivedView> {
        match self {
            Self::Live(view) => Some(view),
            Self::Degraded { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Live(_) => None,
            Self::Degraded { error, .. } => Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}

/// Derive the view for a validated snapshot
pub fn derive_view(snapshot: &TableSnapshot) -> DerivedView {
    let status = snapshot.status();
    let order_state = snapshot.order_state();
    let mode = classify(status, order_state);

    let (lines, order_total, billing) = match mode {
        ContentMode::Empty => (Vec::new(), None, None),
        ContentMode::Order => (order_lines(snapshot.items()), snapshot.total(), None),
        ContentMode::Bill => (
            order_lines(snapshot.items()),
            None,
            Some(compute_billing(snapshot.items())),
        ),
    };

    DerivedView {
        table_id: snapshot.table_id(),
        status: status.clone(),
        status_label: status_label(status).to_string(),
        mode,
        order_id: snapshot.order_id(),
        lines,
        order_total,
        billing,
        payment_method: snapshot.payment_method().map(str::to_uppercase),
        awaiting_payment_method: *status == TableStatus::Billing
            && order_state == OrderState::Accepted,
        actions: available_actions(snapshot),
    }
}

/// Validate and interpret one element of the host's table list
pub fn interpret(value: serde_json::Value) -> TableCard {
    let table_id = value
        .get("table_id")
        .and_then(serde_json::Value::as_u64)
        .and_then(|id| TableId::try_from(id).ok())
        .filter(|id| *id > 0);

    match TableSnapshot::from_json(value) {
        Ok(snapshot) => TableCard::Live(derive_view(&snapshot)),
        Err(error) => {
            tracing::warn!(table_id = ?table_id, error = %error, "Rejected table snapshot");
            TableCard::Degraded { table_id, error }
        }
    }
}

/// Interpret a whole fetch, preserving the host's table order
///
/// A bad table becomes a degraded card; it never affects its siblings.
pub fn interpret_batch(values: Vec<serde_json::Value>) -> Vec<TableCard> {
    values.into_iter().map(interpret).collect()
}
