//! Common types shared across the harness

/// エラー型定義
pub mod error;

pub use error::ProbeError;
