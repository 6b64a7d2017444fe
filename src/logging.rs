//! Logger bootstrap for the command-line tool.
//!
//! Progress lines are logged at `info` and printed bare, one per size, so
//! the output reads like a tool transcript. Warnings and errors carry a
//! level prefix; `debug` and `trace` also name their module.

use std::io::Write;
use std::sync::Once;

use log::Level;

/// Level used when neither `--log` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "info";

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter in `env_logger` syntax (e.g. "warn", "appicon_renderer=debug").
    /// Takes precedence over `RUST_LOG`.
    pub filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Picks the filter to install: explicit first, then the environment,
/// then [`DEFAULT_FILTER`]. Blank values count as unset.
fn effective_filter(explicit: Option<&str>, env: Option<&str>) -> String {
    explicit
        .into_iter()
        .chain(env)
        .map(str::trim)
        .find(|f| !f.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

fn prefix(level: Level) -> Option<&'static str> {
    match level {
        Level::Info => None,
        Level::Error => Some("error"),
        Level::Warn => Some("warning"),
        Level::Debug => Some("debug"),
        Level::Trace => Some("trace"),
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = effective_filter(config.filter.as_deref(), env.as_deref());

        let mut builder = env_logger::Builder::new();
        builder
            .parse_filters(&filter)
            .write_style(config.write_style)
            .format(|buf, record| match prefix(record.level()) {
                None => writeln!(buf, "{}", record.args()),
                Some(p) if record.level() >= Level::Debug => {
                    writeln!(buf, "{p} [{}]: {}", record.target(), record.args())
                }
                Some(p) => writeln!(buf, "{p}: {}", record.args()),
            });

        // A logger installed elsewhere (e.g. by an embedding tool) wins.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter {filter:?}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_beats_environment() {
        assert_eq!(effective_filter(Some("warn"), Some("debug")), "warn");
        assert_eq!(effective_filter(None, Some("appicon_renderer=debug")), "appicon_renderer=debug");
    }

    #[test]
    fn blank_filters_fall_through_to_info() {
        assert_eq!(effective_filter(Some("  "), None), "info");
        assert_eq!(effective_filter(None, Some("")), "info");
        assert_eq!(effective_filter(None, None), DEFAULT_FILTER);
    }

    #[test]
    fn progress_lines_are_unprefixed() {
        assert_eq!(prefix(Level::Info), None);
        assert_eq!(prefix(Level::Warn), Some("warning"));
        assert_eq!(prefix(Level::Error), Some("error"));
    }
}
