use std::future::Future;
use std::time::Duration;

use tracing::Level;

use crate::api::types::WorkItemRecord;
use crate::api::StatusSource;
use crate::notify::Notifier;

use super::classifier::{classify, Classified, Failure};
use super::dedup::NotificationDeduplicator;
use super::interpreter::interpret;
use super::sink::EventSink;
use super::validator::validate;

/// Pause between the end of one cycle and the start of the next.
pub const RETRY_INTERVAL: Duration = Duration::from_secs(600);

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A status change was delivered and the cursor moved to `cursor`.
    Reported { message: String, cursor: i64 },
    /// The cycle took an error branch; the cursor is unchanged.
    Failed(Classified),
}

/// Drives fetch, validate, interpret, notify, sleep.
///
/// Owns the poll cursor and the dedup state for the life of the process.
pub struct PollLoop<S, N, L> {
    source: S,
    notifier: N,
    sink: L,
    chat_id: String,
    cursor: i64,
    dedup: NotificationDeduplicator,
}

impl<S, N, L> PollLoop<S, N, L>
where
    S: StatusSource,
    N: Notifier,
    L: EventSink,
{
    pub fn new(source: S, notifier: N, sink: L, chat_id: impl Into<String>, cursor: i64) -> Self {
        Self {
            source,
            notifier,
            sink,
            chat_id: chat_id.into(),
            cursor,
            dedup: NotificationDeduplicator::new(),
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn last_notified(&self) -> Option<&str> {
        self.dedup.last_notified()
    }

    /// Run cycles until `shutdown` resolves.
    ///
    /// Shutdown is observed between cycles; a cycle already started always
    /// completes.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.sink.record(
            Level::INFO,
            &format!("Polling started from cursor {}", self.cursor),
        );

        loop {
            self.run_cycle().await;

            tokio::select! {
                _ = &mut shutdown => {
                    self.sink.record(Level::INFO, "Shutdown requested, stopping poll loop");
                    break;
                }
                _ = tokio::time::sleep(RETRY_INTERVAL) => {}
            }
        }
    }

    /// One full pass. Never fails: every error is classified and reported.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let (message, next_cursor) = match self.poll().await {
            Ok(found) => found,
            Err(failure) => return CycleOutcome::Failed(self.report(failure).await),
        };

        // Status changes are always delivered, never deduplicated
        match self.notifier.send(&self.chat_id, &message).await {
            Ok(()) => {
                self.sink.record(Level::INFO, "Message delivered");
                self.cursor = next_cursor;
                CycleOutcome::Reported {
                    message,
                    cursor: next_cursor,
                }
            }
            Err(e) => CycleOutcome::Failed(self.report(e.into()).await),
        }
    }

    /// Fetch and decode the latest status; returns the message and the next cursor.
    async fn poll(&self) -> Result<(String, i64), Failure> {
        let raw = self.source.fetch(self.cursor).await?;
        let response = validate(&raw)?;

        // The API lists the most recent change first
        let latest = response.homeworks.first().ok_or(Failure::NoNewStatuses)?;
        let record: WorkItemRecord = serde_json::from_value(latest.clone())
            .map_err(|e| Failure::Other(format!("malformed homework record: {e}")))?;
        let message = interpret(&record)?;

        let next_cursor = response.current_date.as_i64().ok_or_else(|| {
            Failure::Other(format!(
                "current_date is not an integer timestamp: {}",
                response.current_date
            ))
        })?;

        Ok((message, next_cursor))
    }

    /// Log a failure and alert the operator when its severity calls for it.
    async fn report(&mut self, failure: Failure) -> Classified {
        let classified = classify(&failure);
        self.sink.record(classified.severity.log_level(), &classified.message);

        if !classified.severity.notifies() {
            return classified;
        }

        if !self.dedup.should_send(classified.severity, &classified.message) {
            self.sink.record(Level::DEBUG, "Repeated alert suppressed");
            return classified;
        }

        match self.notifier.send(&self.chat_id, &classified.message).await {
            Ok(()) => {
                self.sink.record(Level::INFO, "Message delivered");
                self.dedup.record_sent(classified.severity, &classified.message);
            }
            Err(e) => {
                // Delivery failures classify as Logged and stop here
                let delivery = classify(&e.into());
                self.sink.record(delivery.severity.log_level(), &delivery.message);
            }
        }

        classified
    }
}
