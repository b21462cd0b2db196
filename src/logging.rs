use crate::config::LoggingConfig;
use simple_logger::SimpleLogger;

/// Installs the process-wide logger. Records go to stdout, one per line.
pub fn init(config: &LoggingConfig) -> Result<(), log::SetLoggerError> {
    SimpleLogger::new().with_level(config.level).init()
}
