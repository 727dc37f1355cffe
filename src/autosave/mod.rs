//! 下書き自動保存モジュール
//!
//! 長いフォームの入力途中の内容をlocalStorageに保存し、再読み込み時に復元する。

pub mod accessor;
pub mod debounce;
pub mod dom;
pub mod restore;
pub mod serializer;
pub mod session;

pub use accessor::{FormAccessor, FormField};
pub use session::{init_session, AutoSaveEnv, AutoSaveSession, CaptureOutcome, RestoreOutcome};
