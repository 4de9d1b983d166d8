use log::LevelFilter;
use log4rs::Config;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::RunnerError;

// ISO 8601 UTC timestamp and color coded level tag
const DEFAULT_LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)(utc)} {h({l})} {t} - {m}{n}";

// Stdout carries CSV output when no output directory is configured
pub fn init_logging(level: LevelFilter) -> Result<(), RunnerError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| RunnerError::Logging(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| RunnerError::Logging(e.to_string()))?;
    Ok(())
}
