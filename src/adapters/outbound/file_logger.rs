use crate::config::LoggingConfig;
use crate::domains::logger::{parse_level, DomainLogger, FileLogger};
use std::sync::Arc;

/// Initialize the fast_log file logger from config and return the domain logger to inject.
pub fn init_file_logger(config: &LoggingConfig) -> Result<Arc<dyn DomainLogger>, String> {
    FileLogger::init(&config.file, parse_level(&config.level), false)
        .map_err(|e| format!("Failed to initialize fast_log at {}: {}", config.file, e))?;
    Ok(Arc::new(FileLogger))
}
