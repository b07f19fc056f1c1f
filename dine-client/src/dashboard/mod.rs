//! Dashboard shell: context, dispatch, rendering and the poll loop

pub mod context;
pub mod dispatch;
pub mod render;
pub mod shell;
pub mod terminal;

pub use context::{ConnectionStatus, DashboardContext, PollOutcome, PollTicket};
pub use dispatch::{ActionCommand, DispatchTable, UserCommand, command_word, help_text};
pub use render::{format_amount, render_card, render_dashboard};
pub use shell::{DashboardShell, DashboardView, LineOutcome, MIN_POLL_INTERVAL};
pub use terminal::{KeyOutcome, SharedScreen, TerminalScreen, TerminalView, read_keys};
