use crate::config::LoggingConfig;
use crate::domains::logger::DomainLogger;
use std::sync::Arc;

/// Forwards every message to all attached loggers, in order.
pub struct MultiLogger {
    sinks: Vec<Arc<dyn DomainLogger>>,
}

impl MultiLogger {
    pub fn new(sinks: Vec<Arc<dyn DomainLogger>>) -> Self {
        Self { sinks }
    }
}

impl DomainLogger for MultiLogger {
    fn info(&self, msg: &str) {
        self.sinks.iter().for_each(|sink| sink.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.sinks.iter().for_each(|sink| sink.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.sinks.iter().for_each(|sink| sink.error(msg));
    }
}

/// File logger plus the tracing bridge; tracing alone when the log file cannot be opened.
pub fn init_combined_logger(config: &LoggingConfig) -> Arc<dyn DomainLogger> {
    let tracing_logger = super::init_tracing_logger();
    match super::file_logger::init_file_logger(config) {
        Ok(file_logger) => Arc::new(MultiLogger::new(vec![file_logger, tracing_logger])),
        Err(e) => {
            tracing_logger.warn(&e);
            tracing_logger
        }
    }
}
