//! Status labels and content classification

use crate::table::{OrderState, TableStatus};
use serde::{Deserialize, Serialize};

/// What a table card shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// No order content and no actions ("No active orders")
    Empty,
    /// Running order list with a simple pre-tax total
    Order,
    /// Formal itemized bill with tax and grand total
    Bill,
}

/// Human-readable label for a table status
///
/// Unknown statuses are shown as reported.
pub fn status_label(status: &TableStatus) -> &str {
    match status {
        TableStatus::Idle => "Available",
        TableStatus::Cooking => "Cooking",
        TableStatus::Prepared => "Ready",
        TableStatus::Billing => "Billing",
        TableStatus::Payment => "Payment",
        TableStatus::Other(raw) => raw,
    }
}

/// Pick the rendering mode from status and order state together
///
/// An idle table can already carry a pending order that the kitchen has not
/// accepted yet, so `idle` alone never means empty.
pub fn classify(status: &TableStatus, order_state: OrderState) -> ContentMode {
    match (status, order_state) {
        (TableStatus::Idle, OrderState::None) => ContentMode::Empty,
        (TableStatus::Billing | TableStatus::Payment, _) => ContentMode::Bill,
        _ => ContentMode::Order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUSES: [TableStatus; 5] = [
        TableStatus::Idle,
        TableStatus::Cooking,
        TableStatus::Prepared,
        TableStatus::Billing,
        TableStatus::Payment,
    ];
    const ORDER_STATES: [OrderState; 3] =
        [OrderState::None, OrderState::Pending, OrderState::Accepted];

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(&TableStatus::Idle), "Available");
        assert_eq!(status_label(&TableStatus::Cooking), "Cooking");
        assert_eq!(status_label(&TableStatus::Prepared), "Ready");
        assert_eq!(status_label(&TableStatus::Billing), "Billing");
        assert_eq!(status_label(&TableStatus::Payment), "Payment");
    }

    #[test]
    fn test_unknown_status_label_passes_through() {
        let status = TableStatus::from("reserved");
        assert_eq!(status_label(&status), "reserved");
    }

    #[test]
    fn test_empty_mode_iff_idle_without_order() {
        for status in &STATUSES {
            for order_state in ORDER_STATES {
                let mode = classify(status, order_state);
                let expect_empty =
                    *status == TableStatus::Idle && order_state == OrderState::None;
                assert_eq!(
                    mode == ContentMode::Empty,
                    expect_empty,
                    "status={status} order_state={order_state}"
                );
            }
        }
    }

    #[test]
    fn test_bill_mode_for_billing_stages() {
        for order_state in ORDER_STATES {
            assert_eq!(classify(&TableStatus::Billing, order_state), ContentMode::Bill);
            assert_eq!(classify(&TableStatus::Payment, order_state), ContentMode::Bill);
        }
    }

    #[test]
    fn test_idle_with_pending_order_is_order_mode() {
        assert_eq!(
            classify(&TableStatus::Idle, OrderState::Pending),
            ContentMode::Order
        );
    }

    #[test]
    fn test_unknown_status_is_order_mode() {
        let status = TableStatus::from("cleaning");
        assert_eq!(classify(&status, OrderState::None), ContentMode::Order);
    }
}
