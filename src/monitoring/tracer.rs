/*!
 * Structured Tracing
 * Subscriber setup for scheduler logs using the tracing crate
 */

use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Enables JSON log lines when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "SCHED_TRACE_JSON";

/// Output encoding for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceFormat {
    #[default]
    Compact,
    Json,
}

impl TraceFormat {
    /// Read the format from `SCHED_TRACE_JSON`
    pub fn from_env() -> Self {
        Self::from_flag(std::env::var(ENV_TRACE_JSON).ok().as_deref())
    }

    fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("1") | Some("true") => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - SCHED_TRACE_JSON: Enable JSON output (default: false)
///
/// Installing twice is a no-op, so tests and binaries may both call it.
pub fn init_tracing() {
    init_tracing_with(TraceFormat::from_env());
}

pub fn init_tracing_with(format: TraceFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        TraceFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_line_number(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
        TraceFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init(),
    };

    if installed.is_ok() {
        info!(?format, "structured tracing initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_flag() {
        assert_eq!(TraceFormat::from_flag(None), TraceFormat::Compact);
        assert_eq!(TraceFormat::from_flag(Some("true")), TraceFormat::Json);
        assert_eq!(TraceFormat::from_flag(Some("1")), TraceFormat::Json);
        assert_eq!(TraceFormat::from_flag(Some("yes")), TraceFormat::Compact);
    }

    #[test]
    fn test_init_twice() {
        init_tracing_with(TraceFormat::Compact);
        init_tracing_with(TraceFormat::Json);
    }
}
