use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global subscriber. ANSI colours and targets are off since
/// output lands in CloudWatch.
pub fn init_logging(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Text => builder.try_init(),
    }
}
