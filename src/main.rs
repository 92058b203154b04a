use clap::Parser;

mod cli;
mod notify;
mod timer;
mod tui;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Keep the worker alive for the lifetime of the process so buffered
    // log lines are flushed on exit.
    let _log_guard = init_logging();

    tui::run_tui(cli.test, cli.show_test).expect("Failed to run TUI");
}

/// Log to a rolling file under the platform data directory; stderr would
/// scribble over the alternate screen while the TUI is up.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dirs = directories::ProjectDirs::from("", "", "pomo")?;
    let log_dir = dirs.data_local_dir().join("logs");
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("could not create log directory {}: {}", log_dir.display(), e);
        return None;
    }

    let appender = tracing_appender::rolling::daily(log_dir, "pomo.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .with_writer(writer)
        .init();
    Some(guard)
}
