use tracing::info;

/// Write-only sink for human-readable migration status messages.
/// Implementations must not block the caller.
pub trait ProgressSink {
    fn report(&mut self, message: &str);
}

/// Collects messages in emission order
impl ProgressSink for Vec<String> {
    fn report(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Forwards every message to the `tracing` log at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, message: &str) {
        info!(target: "project_upgrade::progress", "{}", message);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&mut self, _message: &str) {}
}
