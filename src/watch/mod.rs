//! The poll, validate, classify, notify core.

pub mod classifier;
pub mod dedup;
pub mod interpreter;
pub mod poll;
pub mod sink;
pub mod validator;

pub use classifier::{classify, Classified, Failure, Severity};
pub use dedup::NotificationDeduplicator;
pub use poll::{CycleOutcome, PollLoop, RETRY_INTERVAL};
pub use sink::{EventSink, TracingSink};
