//! フォームの入力内容を name→値 のマップに変換

use std::collections::BTreeMap;

use super::accessor::FormAccessor;
use crate::models::{FieldKind, FieldValue};

/// 現在の入力内容を読み取る（フォームは変更しない）
///
/// - ラジオ: チェックされた要素の値のみ。未選択のグループはキー自体を含めない
/// - チェックボックス: 同名の要素をまとめ、チェック済みの値を文書順に並べる。
///   すべて未チェックなら空配列
/// - その他: 現在値。空文字は保存せず、同名の既存エントリにも触れない
pub fn capture_fields(form: &dyn FormAccessor) -> BTreeMap<String, FieldValue> {
    let mut data = BTreeMap::new();

    for field in form.fields() {
        let name = field.name();
        if name.is_empty() {
            continue;
        }

        match field.kind() {
            kind if !kind.is_persisted() => {}
            FieldKind::Radio => {
                if field.is_checked() {
                    data.insert(name, FieldValue::Single(field.value()));
                }
            }
            FieldKind::Checkbox => {
                let entry = data
                    .entry(name)
                    .or_insert_with(|| FieldValue::Multiple(Vec::new()));
                if !matches!(entry, FieldValue::Multiple(_)) {
                    *entry = FieldValue::Multiple(Vec::new());
                }
                if let FieldValue::Multiple(values) = entry {
                    if field.is_checked() {
                        values.push(field.value());
                    }
                }
            }
            _ => {
                let value = field.value();
                if !value.is_empty() {
                    data.insert(name, FieldValue::Single(value));
                }
            }
        }
    }

    data
}
