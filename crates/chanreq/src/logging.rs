use clap::ValueEnum;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter directives used when `--log-level` is not given,
/// e.g. `warn,chanreq_proto=trace`.
pub const LOG_ENV: &str = "CHANREQ_LOG";

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the stderr subscriber. Stdout stays reserved for command output.
pub fn init_logging(format: LogFormat, level: Option<LogLevel>) {
    let env = std::env::var(LOG_ENV).ok();
    let (filter, rejected) = build_filter(level, env.as_deref());

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }

    if let Some(directives) = rejected {
        tracing::warn!(env = LOG_ENV, directives, "ignoring invalid log filter");
    }
}

/// An explicit level wins, then `CHANREQ_LOG`, then `info`.
///
/// Also returns the environment value when it failed to parse.
fn build_filter(level: Option<LogLevel>, env: Option<&str>) -> (EnvFilter, Option<String>) {
    if let Some(level) = level {
        return (EnvFilter::new(level.as_filter().to_string()), None);
    }

    match env.filter(|value| !value.trim().is_empty()) {
        None => (EnvFilter::new(LevelFilter::INFO.to_string()), None),
        Some(value) => match EnvFilter::try_new(value) {
            Ok(filter) => (filter, None),
            Err(_) => (
                EnvFilter::new(LevelFilter::INFO.to_string()),
                Some(value.to_string()),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_environment() {
        let (filter, rejected) = build_filter(Some(LogLevel::Warn), Some("trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
        assert!(rejected.is_none());
    }

    #[test]
    fn environment_accepts_directives() {
        let (filter, _) = build_filter(None, Some("error,chanreq_proto=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn defaults_to_info() {
        let (filter, rejected) = build_filter(None, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert!(rejected.is_none());
    }

    #[test]
    fn invalid_environment_falls_back_to_info() {
        let (filter, rejected) = build_filter(None, Some("chanreq=loud"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(rejected.as_deref(), Some("chanreq=loud"));
    }
}
