//! Dine Client - dashboard shell for the AutoDine host
//!
//! Polls the host's table list, feeds it through the lifecycle engine in
//! `shared`, renders the result and dispatches operator actions.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod logger;

pub use api::DashboardApi;
pub use config::ClientConfig;
pub use dashboard::{DashboardContext, DashboardShell, DashboardView, TerminalScreen, TerminalView};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
