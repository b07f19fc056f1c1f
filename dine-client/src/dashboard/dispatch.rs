//! Action dispatch
//!
//! The engine only says which actions exist. This module turns them into
//! commands keyed by `(ActionKind, entity id)` and parses operator input
//! against that table; nothing outside it reaches the host.

use crate::api::DashboardApi;
use crate::{ClientError, ClientResult};
use shared::TableId;
use shared::lifecycle::{ActionKind, ActionTarget, TableCard, TargetKind};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Operator keyword for an action
pub fn command_word(kind: ActionKind) -> &'static str {
    match kind {
        ActionKind::Accept => "accept",
        ActionKind::Decline => "decline",
        ActionKind::MarkPrepared => "prepared",
        ActionKind::GenerateBill => "bill",
        ActionKind::VerifyPayment => "verify",
    }
}

fn kind_for_word(word: &str) -> Option<ActionKind> {
    ActionKind::ALL
        .into_iter()
        .find(|kind| command_word(*kind) == word)
}

// ============================================================================
// Commands
// ============================================================================

/// A dispatchable action bound to its entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionCommand {
    pub kind: ActionKind,
    pub target: ActionTarget,
    /// Table the action was offered on
    pub table_id: TableId,
}

impl ActionCommand {
    /// Send the command to the host
    pub async fn execute(&self, api: &dyn DashboardApi) -> ClientResult<()> {
        match (self.kind, self.target) {
            (ActionKind::Accept, ActionTarget::Order(id)) => api.accept_order(id).await,
            (ActionKind::Decline, ActionTarget::Order(id)) => api.decline_order(id).await,
            (ActionKind::MarkPrepared, ActionTarget::Order(id)) => {
                api.mark_food_prepared(id).await
            }
            (ActionKind::GenerateBill, ActionTarget::Table(id)) => api.generate_bill(id).await,
            (ActionKind::VerifyPayment, ActionTarget::Table(id)) => api.verify_payment(id).await,
            (kind, target) => Err(ClientError::NotAvailable(format!(
                "{} cannot be sent for {}",
                kind, target
            ))),
        }
    }

    /// Input line that issues this command
    pub fn input_hint(&self) -> String {
        format!("{} {}", command_word(self.kind), self.target.id())
    }
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.target)
    }
}

/// Commands currently offered, keyed by kind and entity id
#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    entries: HashMap<(ActionKind, u32), ActionCommand>,
}

impl DispatchTable {
    /// Build from the cards on screen; degraded cards offer nothing
    pub fn from_cards(cards: &[TableCard]) -> Self {
        let entries = cards
            .iter()
            .filter_map(TableCard::view)
            .flat_map(|view| {
                view.actions.iter().map(move |action| {
                    let command = ActionCommand {
                        kind: action.kind,
                        target: action.target,
                        table_id: view.table_id,
                    };
                    ((action.kind, action.target.id()), command)
                })
            })
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, kind: ActionKind, id: u32) -> ClientResult<ActionCommand> {
        self.entries.get(&(kind, id)).copied().ok_or_else(|| {
            let entity = match kind.target_kind() {
                TargetKind::Order => format!("order #{}", id),
                TargetKind::Table => format!("table {}", id),
            };
            ClientError::NotAvailable(format!("{} is not available for {}", kind, entity))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Operator Input
// ============================================================================

/// One line of operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Action {
        kind: ActionKind,
        id: u32,
        /// Trailing `yes` given for actions that need confirming
        confirmed: bool,
    },
    Refresh,
    Help,
    Quit,
}

impl FromStr for UserCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace().map(str::to_ascii_lowercase);
        let Some(head) = words.next() else {
            return Err("empty command".into());
        };

        match head.as_str() {
            "refresh" | "r" => return Ok(Self::Refresh),
            "help" | "?" => return Ok(Self::Help),
            "quit" | "exit" | "q" => return Ok(Self::Quit),
            _ => {}
        }

        let kind = kind_for_word(&head).ok_or_else(|| format!("unknown command '{}'", head))?;
        let id = words
            .next()
            .ok_or_else(|| format!("usage: {} <id>", head))?
            .trim_start_matches('#')
            .parse::<u32>()
            .map_err(|_| format!("usage: {} <id>", head))?;
        let confirmed = matches!(words.next().as_deref(), Some("yes" | "y" | "confirm"));

        Ok(Self::Action {
            kind,
            id,
            confirmed,
        })
    }
}

/// Operator help text
pub fn help_text() -> String {
    let mut lines = vec!["Commands:".to_string()];
    for kind in ActionKind::ALL {
        let entity = match kind.target_kind() {
            TargetKind::Order => "<order>",
            TargetKind::Table => "<table>",
        };
        let confirm = if kind.requires_confirmation() { " yes" } else { "" };
        let usage = format!("{} {}{}", command_word(kind), entity, confirm);
        lines.push(format!("  {:<20} {}", usage, kind.label()));
    }
    lines.push(format!("  {:<20} {}", "refresh", "Poll the host now"));
    lines.push(format!("  {:<20} {}", "quit", "Exit"));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::lifecycle::interpret_batch;
    use serde_json::json;

    fn cards() -> Vec<TableCard> {
        interpret_batch(vec![
            json!({"table_id": 1, "status": "idle", "order_state": "pending", "order_id": 7}),
            json!({"table_id": 2, "status": "prepared", "order_state": "accepted", "order_id": 8}),
            json!({"table_id": 3, "status": "idle", "order_state": "none"}),
            json!({"table_id": 4, "status": "cooking", "order_state": "pending"}),
        ])
    }

    #[test]
    fn test_table_holds_offered_actions_only() {
        let table = DispatchTable::from_cards(&cards());
        assert_eq!(table.len(), 3);

        let accept = table.lookup(ActionKind::Accept, 7).unwrap();
        assert_eq!(accept.target, ActionTarget::Order(7));
        assert_eq!(accept.table_id, 1);

        let bill = table.lookup(ActionKind::GenerateBill, 2).unwrap();
        assert_eq!(bill.target, ActionTarget::Table(2));
    }

    #[test]
    fn test_lookup_refuses_unoffered_action() {
        let table = DispatchTable::from_cards(&cards());

        // order 8 is accepted, not pending
        let err = table.lookup(ActionKind::Accept, 8).unwrap_err();
        assert!(matches!(err, ClientError::NotAvailable(_)));

        // table 7 does not exist even though order 7 does
        assert!(table.lookup(ActionKind::GenerateBill, 7).is_err());

        // degraded table 4 offers nothing
        assert!(table.lookup(ActionKind::VerifyPayment, 4).is_err());
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            "accept 7".parse::<UserCommand>().unwrap(),
            UserCommand::Action {
                kind: ActionKind::Accept,
                id: 7,
                confirmed: false
            }
        );
        assert_eq!(
            "Decline #12 yes".parse::<UserCommand>().unwrap(),
            UserCommand::Action {
                kind: ActionKind::Decline,
                id: 12,
                confirmed: true
            }
        );
        assert_eq!(
            "prepared 3".parse::<UserCommand>().unwrap(),
            UserCommand::Action {
                kind: ActionKind::MarkPrepared,
                id: 3,
                confirmed: false
            }
        );
        assert_eq!(
            "verify 1 y".parse::<UserCommand>().unwrap(),
            UserCommand::Action {
                kind: ActionKind::VerifyPayment,
                id: 1,
                confirmed: true
            }
        );
    }

    #[test]
    fn test_parse_control_commands() {
        assert_eq!("refresh".parse::<UserCommand>().unwrap(), UserCommand::Refresh);
        assert_eq!(" q ".parse::<UserCommand>().unwrap(), UserCommand::Quit);
        assert_eq!("help".parse::<UserCommand>().unwrap(), UserCommand::Help);
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<UserCommand>().is_err());
        assert!("dance 1".parse::<UserCommand>().is_err());
        assert!("accept".parse::<UserCommand>().is_err());
        assert!("bill two".parse::<UserCommand>().is_err());
        assert!("bill -1".parse::<UserCommand>().is_err());
    }

    #[test]
    fn test_input_hint_round_trips() {
        let table = DispatchTable::from_cards(&cards());
        let command = table.lookup(ActionKind::GenerateBill, 2).unwrap();
        assert_eq!(command.input_hint(), "bill 2");
        assert!(matches!(
            command.input_hint().parse::<UserCommand>(),
            Ok(UserCommand::Action {
                kind: ActionKind::GenerateBill,
                id: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_help_lists_every_action() {
        let help = help_text();
        for kind in ActionKind::ALL {
            assert!(help.contains(command_word(kind)));
        }
    }
}
