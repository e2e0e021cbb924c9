use tracing::Level;

/// Logging capability handed to the poll loop.
pub trait EventSink: Send + Sync {
    fn record(&self, level: Level, message: &str);
}

/// Forwards records to the process-wide `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!(target: "review_watchdog", "{message}"),
            Level::WARN => tracing::warn!(target: "review_watchdog", "{message}"),
            Level::INFO => tracing::info!(target: "review_watchdog", "{message}"),
            Level::DEBUG => tracing::debug!(target: "review_watchdog", "{message}"),
            _ => tracing::trace!(target: "review_watchdog", "{message}"),
        }
    }
}
