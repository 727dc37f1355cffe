//! エラー型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DraftError {
    #[error("localStorageが利用できません")]
    StorageUnavailable,

    #[error("localStorageの容量制限を超えました")]
    QuotaExceeded,

    #[error("書き込み失敗: {0}")]
    Write(String),

    #[error("読み込み失敗: {0}")]
    Read(String),

    #[error("削除失敗: {0}")]
    Remove(String),

    #[error("JSON変換失敗: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("JSON解析失敗: {0}")]
    Decode(#[source] serde_json::Error),
}
