//! Order line amounts and bill figures
//!
//! All arithmetic is done in `Decimal`. Line amounts and the subtotal are
//! exact; only the tax is rounded, once, to a whole currency unit using
//! half-away-from-zero (the same result as `floor(x + 0.5)` for the
//! non-negative amounts a bill can carry).

use crate::table::OrderItem;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// GST rate applied at bill time (18%)
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Bill row label for the tax line
pub const TAX_LABEL: &str = "GST (18%)";

/// One rendered order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub qty: u32,
    /// Unit price
    pub price: Decimal,
    /// `price * qty`, untaxed
    pub amount: Decimal,
}

/// Bill totals shown to a paying customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingFigures {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
}

/// Untaxed amount for one line
pub fn line_amount(item: &OrderItem) -> Decimal {
    item.price() * Decimal::from(item.qty())
}

pub fn order_lines(items: &[OrderItem]) -> Vec<LineItem> {
    items
        .iter()
        .map(|item| LineItem {
            name: item.name().to_string(),
            qty: item.qty(),
            price: item.price(),
            amount: line_amount(item),
        })
        .collect()
}

/// Round a tax amount to the nearest whole unit
pub fn round_tax(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtotal, tax and grand total for a bill
pub fn compute_billing(items: &[OrderItem]) -> BillingFigures {
    let subtotal: Decimal = items.iter().map(line_amount).sum();
    let tax = round_tax(subtotal * TAX_RATE);

    BillingFigures {
        subtotal,
        tax,
        grand_total: subtotal + tax,
    }
}
