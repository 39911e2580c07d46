//! Backend probe
//!
//! リモートHTTPバックエンド（チャット・TTS・STT・画像分類・ヘルスチェック）に
//! 固定のサンプルリクエストを順番に送り、結果をターミナルに表示する。

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// 環境変数ベースの設定
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;

/// プローブ定義・結果・カウンター
pub mod types;

/// プローブ実行と応答分類
pub mod runner;

/// コンソール出力
pub mod report;

/// プローブ群の実行ドライバー
pub mod harness;

/// 固定テストスイート
pub mod suites;

/// CLI
pub mod cli;

pub use harness::Harness;
pub use runner::ProbeRunner;
