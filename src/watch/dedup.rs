use super::classifier::Severity;

/// Suppresses an operator alert identical to the last one delivered.
#[derive(Debug, Default)]
pub struct NotificationDeduplicator {
    last_notified: Option<String>,
}

impl NotificationDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `message` should go to the channel.
    ///
    /// Only `Notified` messages ever reach the channel.
    pub fn should_send(&self, severity: Severity, message: &str) -> bool {
        match severity {
            Severity::Notified => self.last_notified.as_deref() != Some(message),
            Severity::Silent | Severity::Logged => false,
        }
    }

    /// Remember a delivered alert. Replaces whatever was stored before.
    pub fn record_sent(&mut self, severity: Severity, message: &str) {
        if severity == Severity::Notified {
            self.last_notified = Some(message.to_string());
        }
    }

    pub fn last_notified(&self) -> Option<&str> {
        self.last_notified.as_deref()
    }
}
