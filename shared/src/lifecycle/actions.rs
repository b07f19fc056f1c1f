//! Action eligibility
//!
//! The five one-way transition commands a staff member can issue, and which
//! of them are legal for the current `(status, order_state)` pair. The engine
//! only describes actions as data; dispatching them is the shell's job.

use crate::table::{OrderId, OrderState, TableId, TableSnapshot, TableStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Transition command kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    /// pending → accepted, table starts cooking
    Accept,
    /// pending → none, table status unchanged
    Decline,
    /// cooking → prepared
    MarkPrepared,
    /// prepared → billing
    GenerateBill,
    /// payment → idle, cycle closed
    VerifyPayment,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        Self::Accept,
        Self::Decline,
        Self::MarkPrepared,
        Self::GenerateBill,
        Self::VerifyPayment,
    ];

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accept => "Accept",
            Self::Decline => "Decline",
            Self::MarkPrepared => "Food Prepared",
            Self::GenerateBill => "Generate Bill",
            Self::VerifyPayment => "Verify Payment",
        }
    }

    /// Whether the action addresses the order or the table
    pub fn target_kind(&self) -> TargetKind {
        match self {
            Self::Accept | Self::Decline | Self::MarkPrepared => TargetKind::Order,
            Self::GenerateBill | Self::VerifyPayment => TargetKind::Table,
        }
    }

    /// Question the operator must confirm before a destructive action
    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            Self::Decline => Some("Decline this order?"),
            Self::VerifyPayment => Some("Confirm payment received?"),
            _ => None,
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        self.confirmation_prompt().is_some()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Order,
    Table,
}

/// Entity an action is sent for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ActionTarget {
    Order(OrderId),
    Table(TableId),
}

impl ActionTarget {
    pub fn id(&self) -> u32 {
        match self {
            Self::Order(id) | Self::Table(id) => *id,
        }
    }
}

impl fmt::Display for ActionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order(id) => write!(f, "order #{}", id),
            Self::Table(id) => write!(f, "table {}", id),
        }
    }
}

/// An action the operator may issue right now, with its resolved target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailableAction {
    pub kind: ActionKind,
    pub target: ActionTarget,
}

/// Legal actions for a status / order-state pair
///
/// A pending order always offers Accept/Decline whatever the table is doing,
/// since a new order may land while the previous cycle is still closing.
/// Combinations not covered below offer nothing.
pub fn eligible_actions(status: &TableStatus, order_state: OrderState) -> BTreeSet<ActionKind> {
    let kinds: &[ActionKind] = match (status, order_state) {
        (_, OrderState::Pending) => &[ActionKind::Accept, ActionKind::Decline],
        (TableStatus::Cooking, OrderState::Accepted) => &[ActionKind::MarkPrepared],
        (TableStatus::Prepared, OrderState::Accepted) => &[ActionKind::GenerateBill],
        (TableStatus::Payment, OrderState::Accepted) => &[ActionKind::VerifyPayment],
        _ => &[],
    };
    kinds.iter().copied().collect()
}

/// Legal actions for a snapshot with their targets resolved
pub fn available_actions(snapshot: &TableSnapshot) -> Vec<AvailableAction> {
    eligible_actions(snapshot.status(), snapshot.order_state())
        .into_iter()
        .filter_map(|kind| {
            let target = match kind.target_kind() {
                TargetKind::Order => ActionTarget::Order(snapshot.order_id()?),
                TargetKind::Table => ActionTarget::Table(snapshot.table_id()),
            };
            Some(AvailableAction { kind, target })
        })
        .collect()
}
