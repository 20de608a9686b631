//! Log subscriber setup.
//!
//! Logs go to stderr so they never mix with table or JSON output on stdout.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Notifications are rendered by the CLI itself, so their log mirror and the
/// session's failure warnings are muted unless asked for.
const QUIET: &str = "warn,dynaprice_core=error,dynaprice::toast=off";
const VERBOSE: &str = "debug,hyper_util=info,rustls=info";

fn directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE
    } else {
        QUIET
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the defaults.
pub fn init(verbose: bool, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("failed to install log subscriber: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        for verbose in [false, true] {
            assert!(EnvFilter::try_new(directives(verbose)).is_ok());
        }
    }
}
