//! Plain-text dashboard rendering
//!
//! Draws what the engine derived; never recomputes totals or eligibility.

use super::context::{ConnectionStatus, DashboardContext};
use super::dispatch::command_word;
use chrono::{DateTime, Local};
use rust_decimal::prelude::*;
use shared::lifecycle::{ContentMode, DerivedView, LineItem, TAX_LABEL, TableCard};

pub const CURRENCY: &str = "₹";

const RULE: &str = "────────────────────────────────────────────";

/// Whole-unit amount with the currency glyph, e.g. `₹295`
pub fn format_amount(amount: Decimal) -> String {
    let whole = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    format!("{}{}", CURRENCY, whole)
}

pub fn connection_indicator(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connecting => "○ Connecting",
        ConnectionStatus::Connected => "● Connected",
        ConnectionStatus::Disconnected => "● Disconnected",
    }
}

/// Full dashboard frame
pub fn render_dashboard(ctx: &DashboardContext, now: DateTime<Local>) -> String {
    let mut out = vec![
        format!(
            "AutoDine Dashboard   {}   {}",
            connection_indicator(ctx.connection()),
            now.format("%H:%M:%S")
        ),
        RULE.to_string(),
    ];

    if let Some(error) = ctx.last_error() {
        out.push(format!("! {}", error));
    }

    if ctx.cards().is_empty() {
        out.push(match ctx.connection() {
            ConnectionStatus::Connecting => "Waiting for the host...".to_string(),
            _ => "No tables reported".to_string(),
        });
    }

    for card in ctx.cards() {
        out.push(render_card(card));
        out.push(RULE.to_string());
    }

    if let Some(updated) = ctx.last_updated() {
        out.push(format!("Last update {}", updated.format("%H:%M:%S")));
    }

    out.join("\n")
}

/// One table card
pub fn render_card(card: &TableCard) -> String {
    match card {
        TableCard::Live(view) => render_view(view),
        TableCard::Degraded { table_id, error } => {
            let title = match table_id {
                Some(id) => format!("Table {}", id),
                None => "Unknown table".to_string(),
            };
            format!("{}  [UNAVAILABLE]\n  ⚠ {}", title, error)
        }
    }
}

fn render_view(view: &DerivedView) -> String {
    let mut out = vec![format!("Table {}  [{}]", view.table_id, view.status_label)];

    if view.mode == ContentMode::Empty {
        out.push("  No active orders".to_string());
        return out.join("\n");
    }

    if !view.lines.is_empty() {
        if let Some(order_id) = view.order_id {
            out.push(format!("  Order #{}", order_id));
        }
        match (view.mode, view.billing) {
            (ContentMode::Bill, Some(bill)) => {
                out.push("  ┌ BILL".to_string());
                out.push(format!(
                    "  │ {:<20} {:>4} {:>8} {:>9}",
                    "Item", "Qty", "Price", "Amount"
                ));
                out.extend(view.lines.iter().map(bill_row));
                out.push(total_row("Subtotal", bill.subtotal));
                out.push(total_row(TAX_LABEL, bill.tax));
                out.push(total_row("GRAND TOTAL", bill.grand_total));
            }
            _ => {
                out.extend(view.lines.iter().map(order_row));
                if let Some(total) = view.order_total {
                    out.push(format!("  {:<26}{:>9}", "Total:", format_amount(total)));
                }
            }
        }
    }

    if let Some(method) = &view.payment_method {
        out.push(format!("  Payment Method: {}", method));
    }

    if view.awaiting_payment_method {
        out.push("  Bill generated. Waiting for payment method...".to_string());
    }

    if !view.actions.is_empty() {
        let actions: Vec<String> = view
            .actions
            .iter()
            .map(|a| {
                format!(
                    "[{}] → {} {}",
                    a.kind.label(),
                    command_word(a.kind),
                    a.target.id()
                )
            })
            .collect();
        out.push(format!("  {}", actions.join("   ")));
    }

    out.join("\n")
}

fn order_row(line: &LineItem) -> String {
    let item = format!("{} x{}", line.name, line.qty);
    format!("    {:<24}{:>9}", item, format_amount(line.amount))
}

fn bill_row(line: &LineItem) -> String {
    format!(
        "  │ {:<20} {:>4} {:>8} {:>9}",
        line.name,
        line.qty,
        format_amount(line.price),
        format_amount(line.amount)
    )
}

fn total_row(label: &str, amount: Decimal) -> String {
    format!("  │ {:<34} {:>9}", label, format_amount(amount))
}
