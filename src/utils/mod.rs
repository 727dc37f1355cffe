//! ユーティリティモジュール

pub mod log_trace;
pub mod storage;
pub mod timers;

/// ログのカテゴリ
pub const LOG_CATEGORY: &str = "autosave";
