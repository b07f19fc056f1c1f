//! Logging Infrastructure
//!
//! The dashboard owns the terminal, so logs go to a daily-rolling file.

use std::path::Path;

/// Initialize the logger writing to `log_dir`
///
/// Falls back to stderr when the directory cannot be created.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: &str) {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let log_path = Path::new(log_dir);
    if std::fs::create_dir_all(log_path).is_ok()
        && let Some(dir_str) = log_path.to_str()
    {
        let file_appender = tracing_appender::rolling::daily(dir_str, "dine-dashboard");
        subscriber
            .with_ansi(false)
            .with_writer(file_appender)
            .init();
        return;
    }

    subscriber.with_writer(std::io::stderr).init();
}
