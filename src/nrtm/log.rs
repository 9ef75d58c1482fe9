/// Logging capability handed to the operation applier
///
/// Logging is observational only: nothing the applier decides depends on it.
pub trait OperationLog: Send + Sync {
    fn info(&self, message: &str);

    /// Inconsistencies that were recorded against a source
    fn critical(&self, message: &str);
}

/// Forwards applier logs to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl OperationLog for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!(target: "nrtm_mirror::nrtm", "{}", message);
    }

    fn critical(&self, message: &str) {
        tracing::error!(target: "nrtm_mirror::nrtm", "{}", message);
    }
}
