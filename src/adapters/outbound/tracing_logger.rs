use crate::domains::logger::DomainLogger;
use std::sync::Arc;

struct TracingBridge;

impl DomainLogger for TracingBridge {
    fn info(&self, msg: &str) {
        tracing::info!(target: "robogrid::domain", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "robogrid::domain", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "robogrid::domain", "{}", msg);
    }
}

/// Domain logger that forwards to the installed `tracing` subscriber (useful as a fallback)
pub fn init_tracing_logger() -> Arc<dyn DomainLogger> {
    Arc::new(TracingBridge {})
}
