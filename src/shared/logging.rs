//! Logging context: console plus an append-only log file.
//!
//! Built once at start-up and held by `main`. Events go to both sinks while the
//! context is alive; dropping it flushes the file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::dispatcher::DefaultGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt};

pub struct LoggingContext {
    file: Arc<File>,
    _guard: DefaultGuard,
}

/// Open (or create) `log_path` for appending and install the subscriber.
/// Level comes from RUST_LOG, `info` otherwise.
pub fn init(log_path: impl AsRef<Path>) -> anyhow::Result<LoggingContext> {
    let log_path = log_path.as_ref();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|e| anyhow::anyhow!("open log file {}: {}", log_path.display(), e))?;
    let file = Arc::new(file);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::clone(&file)),
        );
    let guard = tracing::subscriber::set_default(subscriber);

    Ok(LoggingContext {
        file,
        _guard: guard,
    })
}

impl Drop for LoggingContext {
    fn drop(&mut self) {
        let _ = (&*self.file).flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        {
            let _ctx = init(&path).unwrap();
            tracing::info!("first line");
            tracing::error!(code = 7, "second line");
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("INFO"));
        assert!(text.contains("first line"));
        assert!(text.contains("ERROR"));
        assert!(text.contains("code=7"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_log_file_is_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        for msg in ["run one", "run two"] {
            let _ctx = init(&path).unwrap();
            tracing::info!("{}", msg);
        }
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("run one"));
        assert!(text.contains("run two"));
    }

    #[test]
    fn test_unopenable_log_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(init(dir.path().join("missing").join("run.log")).is_err());
    }
}
