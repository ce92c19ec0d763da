use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Debug log appended to when `RECAP_DEBUG` is set.
const DEBUG_LOG_NAME: &str = "recap-hook-debug.log";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env("RECAP_LOG").unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
///
/// stdout belongs to the notifier and stderr to the single `ERROR:` line, so
/// logging is off unless `RECAP_LOG` asks for it. With `RECAP_DEBUG` set,
/// records go to `<temp dir>/recap-hook-debug.log` at `debug` instead.
pub fn init() {
    if std::env::var_os("RECAP_DEBUG").is_some() {
        let path = std::env::temp_dir().join(DEBUG_LOG_NAME);
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter("debug"))
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
            return;
        }
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("off"))
        .with_writer(std::io::stderr)
        .try_init();
}
