use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "anylist-rest.log";

/// Initialize the logging system with the specified log level.
///
/// Logs always go to stdout. When `log_dir` is given they are also written
/// to daily rotating files in that directory.
///
/// # Arguments
///
/// * `log_level` - The desired log level or filter directive (e.g. "info", "anylist_rest=debug")
/// * `log_dir` - Optional directory for the rotating log file
///
/// # Example
///
/// ```no_run
/// anylist_rest::utils::init_logging("info", Some("logs"));
/// ```
pub fn init_logging(log_level: &str, log_dir: Option<&str>) {
    let filter = match EnvFilter::try_new(log_level) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", log_level);
            EnvFilter::new("info")
        }
    };

    let stdout_layer = fmt::layer().with_line_number(true);

    match log_dir {
        Some(dir) => {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_NAME);

            let file_layer = fmt::layer()
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .init();
        }
    }
}
