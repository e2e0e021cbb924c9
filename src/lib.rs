pub mod api;
pub mod config;
pub mod error;
pub mod notify;
pub mod shutdown;
pub mod watch;
