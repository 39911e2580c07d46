//! 型定義モジュール
//!
//! プローブ定義・実行結果・カウンターの型定義を提供

/// プローブ定義
pub mod probe;

/// プローブ実行結果
pub mod result;

/// 実行カウンターとサマリー
pub mod counters;

/// バックエンドAPIのリクエストボディ
pub mod payloads;

pub use counters::{RunCounters, Summary, Verdict};
pub use probe::{HttpMethod, ProbeDefinition, Upload};
pub use result::{Payload, ProbeResult};
