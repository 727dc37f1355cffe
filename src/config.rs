//! 自動保存の設定

use serde::Deserialize;

use crate::utils::log_trace::log_warn;
use crate::utils::LOG_CATEGORY;

pub const STORAGE_PREFIX: &str = "questionario_";
/// 最後の変更から保存までの待機時間
pub const AUTOSAVE_DELAY_MS: u32 = 1000;
/// 送信後、下書きを削除するまでの猶予
pub const SUBMIT_GRACE_MS: u32 = 500;
pub const EXPIRY_DAYS: i64 = 7;
pub const SAVED_NOTICE_MS: u32 = 2000;
pub const RESTORED_NOTICE_MS: u32 = 5000;

/// `init_with_options` に渡すJSオブジェクトからも読み込める（キーはすべて省略可）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoSaveConfig {
    pub storage_prefix: String,
    pub autosave_delay_ms: u32,
    pub submit_grace_ms: u32,
    pub expiry_days: i64,
    pub show_notifications: bool,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            storage_prefix: STORAGE_PREFIX.to_string(),
            autosave_delay_ms: AUTOSAVE_DELAY_MS,
            submit_grace_ms: SUBMIT_GRACE_MS,
            expiry_days: EXPIRY_DAYS,
            show_notifications: true,
        }
    }
}

impl AutoSaveConfig {
    pub fn storage_key(&self, logical_name: &str) -> String {
        format!("{}{}", self.storage_prefix, logical_name)
    }

    /// 0以下の保存期間は既定値に戻す
    pub fn normalized(mut self) -> Self {
        if self.expiry_days <= 0 {
            log_warn(
                LOG_CATEGORY,
                &format!("保存期間が不正なため既定値を使います: {}", self.expiry_days),
            );
            self.expiry_days = EXPIRY_DAYS;
        }
        self
    }
}
