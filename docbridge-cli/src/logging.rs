//! Diagnostics setup. Logs go to stderr, stdout only carries converted documents.

use tracing_subscriber::EnvFilter;

/// Filter directives read from the environment, e.g. `DOCBRIDGE_LOG=docbridge_babel=trace`
pub const LOG_ENV: &str = "DOCBRIDGE_LOG";

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `DOCBRIDGE_LOG` wins over the `-v` count.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
