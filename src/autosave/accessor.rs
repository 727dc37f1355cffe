//! フォーム要素へのアクセス
//!
//! 自動保存エンジンはDOMを直接触らず、このトレイト経由で要素を読み書きする。

use crate::models::{FieldEvent, FieldKind};

pub trait FormField {
    fn name(&self) -> String;
    fn kind(&self) -> FieldKind;
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn is_checked(&self) -> bool;
    fn set_checked(&self, checked: bool);
    /// バブリングする `input` / `change` イベントを発火
    fn notify(&self, event: FieldEvent);
}

pub trait FormAccessor {
    /// フォーム内の全要素（文書順）
    fn fields(&self) -> Vec<Box<dyn FormField>>;

    fn fields_named(&self, name: &str) -> Vec<Box<dyn FormField>> {
        self.fields()
            .into_iter()
            .filter(|field| field.name() == name)
            .collect()
    }
}
