use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::core::config::AppPaths;

/// Used when `RUST_LOG` is unset or unparsable. sqlx logs every statement at
/// `info`, which drowns out request traces.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

const LOG_FILE_PREFIX: &str = "faqbot.log";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Installs the global subscriber: console output plus a daily-rolling log
/// file in `paths.log_dir`.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init(paths: &AppPaths) {
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(
            &paths.log_dir,
            LOG_FILE_PREFIX,
        ));
    if FILE_GUARD.set(guard).is_err() {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let console = tracing_subscriber::fmt::layer().with_target(false);
    let file = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer);

    if tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .is_err()
    {
        eprintln!("A tracing subscriber is already installed; keeping it");
    }
}
