//! フォーム下書き自動保存
//!
//! 長いフォームの入力途中の内容をlocalStorageに保存し、ページの再読み込みや
//! ブラウザ終了後に復元する。送信すると下書きは削除される。
//!
//! JSからは `init(formId, logicalName)` を呼ぶだけで使える。

pub mod autosave;
pub mod components;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;
pub mod views;

#[cfg(test)]
mod test_support;

pub use autosave::dom::{init, init_with_options, AutoSaveHandle};
pub use autosave::{AutoSaveEnv, AutoSaveSession};
pub use config::AutoSaveConfig;
pub use error::DraftError;
pub use models::{FieldValue, FormSnapshot};
