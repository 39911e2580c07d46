//! Backend probe entry point

use backend_probe::cli::run::{self, RunOutcome};
use backend_probe::cli::Cli;
use backend_probe::logging;
use clap::Parser;
use tracing::warn;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let log_guard = match logging::init(cli.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {}", e);
            None
        }
    };

    // Ctrl+C aborts the whole run; only what was already printed remains.
    let outcome = tokio::select! {
        result = run::execute(&cli, std::io::stdout()) => RunOutcome::from(result),
        _ = wait_for_interrupt() => RunOutcome::Interrupted,
    };
    let exit_code = outcome.finish(std::io::stdout());

    drop(log_guard);
    std::process::exit(exit_code);
}

/// Ctrl+C を待機（ハンドラ登録に失敗した場合は永久に待つ）
async fn wait_for_interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
