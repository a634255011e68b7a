#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    let _log_guard = init_logging();
    app::run()
}

/// Logs go to a daily-rolling file under the config directory. If that
/// directory is unavailable the app still runs, just without file logs.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = match ee_storage::config_dir() {
        Ok(dir) => dir,
        Err(error) => {
            eprintln!("ElementEye: file logging disabled: {error}");
            return None;
        }
    };

    let appender = tracing_appender::rolling::daily(dir.join("logs"), "elementeye.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
