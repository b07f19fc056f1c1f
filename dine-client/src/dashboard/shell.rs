//! Dashboard shell - poll loop and operator command handling
//!
//! One owner task holds the [`DashboardContext`]. Polls and actions run as
//! their own tasks and report back over a channel, so overlapping polls may
//! resolve in any order; the context's sequence guard decides what is shown.

use super::context::{DashboardContext, PollOutcome, PollTicket};
use super::dispatch::{ActionCommand, DispatchTable, UserCommand, help_text};
use crate::ClientResult;
use crate::api::DashboardApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Shortest poll period; `interval` panics on zero
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Where the shell draws
pub trait DashboardView: Send {
    /// Redraw after the displayed state changed
    fn refresh(&mut self, ctx: &DashboardContext);

    /// One-line message for the operator
    fn notify(&mut self, message: &str);
}

/// Completion reports from spawned requests
#[derive(Debug)]
enum ShellEvent {
    PollDone(PollTicket, ClientResult<Vec<serde_json::Value>>),
    ActionDone(ActionCommand, ClientResult<()>),
}

/// What the shell does with a line of operator input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Dispatched(ActionCommand),
    /// Needs a trailing `yes` before it is sent
    NeedsConfirmation(ActionCommand),
    Refused,
    Refresh,
    Help,
    Quit,
}

pub struct DashboardShell<V: DashboardView> {
    api: Arc<dyn DashboardApi>,
    ctx: DashboardContext,
    poll_interval: Duration,
    view: V,
    events_tx: mpsc::UnboundedSender<ShellEvent>,
    events_rx: mpsc::UnboundedReceiver<ShellEvent>,
}

impl<V: DashboardView> DashboardShell<V> {
    pub fn new(api: Arc<dyn DashboardApi>, poll_interval: Duration, view: V) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        if poll_interval < MIN_POLL_INTERVAL {
            tracing::warn!(
                requested_ms = poll_interval.as_millis() as u64,
                "Poll interval too short, using {}ms",
                MIN_POLL_INTERVAL.as_millis()
            );
        }
        Self {
            api,
            ctx: DashboardContext::new(),
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            view,
            events_tx,
            events_rx,
        }
    }

    pub fn context(&self) -> &DashboardContext {
        &self.ctx
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Run until `shutdown` is cancelled or the operator quits
    ///
    /// Closing the command channel does not stop polling.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<String>, shutdown: CancellationToken) {
        tracing::info!(
            interval_ms = self.poll_interval.as_millis() as u64,
            "Dashboard poll loop started"
        );

        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut commands_open = true;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Dashboard poll loop received shutdown signal");
                    break;
                }
                _ = ticker.tick() => {
                    self.spawn_poll();
                }
                Some(event) = self.events_rx.recv() => {
                    self.handle_event(event);
                }
                line = commands.recv(), if commands_open => {
                    match line {
                        Some(line) => {
                            if self.handle_line(&line) == LineOutcome::Quit {
                                break;
                            }
                        }
                        None => {
                            tracing::debug!("Command input closed");
                            commands_open = false;
                        }
                    }
                }
            }
        }

        tracing::info!("Dashboard poll loop stopped");
    }

    /// Fetch once and apply the result, bypassing the loop
    pub async fn poll_once(&mut self) -> PollOutcome {
        let ticket = self.ctx.begin_poll();
        let result = self.api.fetch_tables().await;
        let outcome = self.ctx.complete_poll(ticket, result);
        if !matches!(outcome, PollOutcome::Stale { .. }) {
            self.view.refresh(&self.ctx);
        }
        outcome
    }

    /// Parse one line of operator input and act on it
    pub fn handle_line(&mut self, line: &str) -> LineOutcome {
        if line.trim().is_empty() {
            return LineOutcome::Refused;
        }

        let command = match line.parse::<UserCommand>() {
            Ok(command) => command,
            Err(e) => {
                self.view.notify(&format!("{} (type 'help')", e));
                return LineOutcome::Refused;
            }
        };

        match command {
            UserCommand::Refresh => {
                self.spawn_poll();
                LineOutcome::Refresh
            }
            UserCommand::Help => {
                self.view.notify(&help_text());
                LineOutcome::Help
            }
            UserCommand::Quit => LineOutcome::Quit,
            UserCommand::Action {
                kind,
                id,
                confirmed,
            } => {
                let table = DispatchTable::from_cards(self.ctx.cards());
                let action = match table.lookup(kind, id) {
                    Ok(action) => action,
                    Err(e) => {
                        tracing::debug!(%kind, id, "Refused action not on offer");
                        self.view.notify(&e.to_string());
                        return LineOutcome::Refused;
                    }
                };

                if kind.requires_confirmation() && !confirmed {
                    self.view.notify(&format!(
                        "{} Type '{} yes' to confirm.",
                        kind.confirmation_prompt().unwrap_or_default(),
                        action.input_hint()
                    ));
                    return LineOutcome::NeedsConfirmation(action);
                }

                self.spawn_action(action);
                LineOutcome::Dispatched(action)
            }
        }
    }

    fn spawn_poll(&mut self) {
        let ticket = self.ctx.begin_poll();
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_tables().await;
            let _ = tx.send(ShellEvent::PollDone(ticket, result));
        });
    }

    fn spawn_action(&mut self, action: ActionCommand) {
        tracing::info!(
            action = %action.kind,
            target = %action.target,
            table_id = action.table_id,
            "Dispatching action"
        );
        let api = self.api.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = action.execute(api.as_ref()).await;
            let _ = tx.send(ShellEvent::ActionDone(action, result));
        });
    }

    fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::PollDone(ticket, result) => {
                let outcome = self.ctx.complete_poll(ticket, result);
                if !matches!(outcome, PollOutcome::Stale { .. }) {
                    self.view.refresh(&self.ctx);
                }
            }
            ShellEvent::ActionDone(action, result) => {
                match result {
                    Ok(()) => {
                        tracing::info!(action = %action.kind, target = %action.target, "Action accepted by host");
                        self.view.notify(&format!("{} done", action));
                    }
                    Err(e) => {
                        tracing::warn!(action = %action.kind, target = %action.target, error = %e, "Action failed");
                        self.view.notify(&format!("{} failed: {}", action, e));
                    }
                }
                // host state is the only truth; fetch it whatever happened
                self.spawn_poll();
            }
        }
    }
}
