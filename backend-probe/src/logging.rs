//! ロギング初期化
//!
//! tracing-subscriber を標準エラーに出力する。`BACKEND_PROBE_LOG_DIR` が設定されて
//! いれば、日次ローテーションのログファイルにも書き出す。
//! コンソールのプローブ結果（標準出力）とは別チャネル。

use crate::config::{get_log_dir, get_log_level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log file name prefix used by the rolling appender
pub const LOG_FILE_PREFIX: &str = "backend-probe.log";

/// Build the env filter for the given verbosity.
///
/// An unparsable directive falls back to the default level.
pub fn build_filter(verbose: bool) -> EnvFilter {
    let level = get_log_level(verbose);
    EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

/// Install the global subscriber.
///
/// The returned guard must be held until exit so buffered file logs are flushed.
pub fn init(verbose: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = build_filter(verbose);
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match get_log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
