//! 保存済みスナップショットをフォームに書き戻す

use chrono::{DateTime, Duration, Utc};

use super::accessor::FormAccessor;
use crate::models::{FieldEvent, FieldKind, FieldValue, FormSnapshot};
use crate::utils::log_trace::log_warn;
use crate::utils::LOG_CATEGORY;

/// 保存から `expiry_days` 日を超えたら期限切れ（ちょうどは有効）
///
/// 表現できないほど大きい日数は期限なしとして扱う。
pub fn is_expired(saved_at: DateTime<Utc>, now: DateTime<Utc>, expiry_days: i64) -> bool {
    match Duration::try_days(expiry_days) {
        Some(limit) => now.signed_duration_since(saved_at) > limit,
        None => false,
    }
}

/// スナップショットを適用し、書き換えた要素数を返す
///
/// 数えるのは値を書き込んだ要素、選択したラジオ、チェック状態が変わったチェックボックス。
///
/// 同じスナップショットを何度適用しても結果のフォーム状態は変わらない。
/// 依存するUI（ラベル、条件付き表示など）が反応するよう input / change を発火する。
pub fn apply_snapshot(form: &dyn FormAccessor, snapshot: &FormSnapshot) -> usize {
    let mut touched = 0;

    for (name, stored) in &snapshot.data {
        let fields = form.fields_named(name);
        if fields.is_empty() {
            log_warn(LOG_CATEGORY, &format!("復元先の項目が見つかりません: {}", name));
            continue;
        }

        for field in fields {
            match field.kind() {
                kind if !kind.is_persisted() => {}
                FieldKind::Radio => {
                    let Some(selected) = stored.as_single() else {
                        continue;
                    };
                    let should_check = field.value() == selected;
                    let was_checked = field.is_checked();
                    field.set_checked(should_check);
                    if should_check {
                        touched += 1;
                        if !was_checked {
                            field.notify(FieldEvent::Change);
                        }
                    }
                }
                FieldKind::Checkbox => {
                    let should_check = stored.contains(&field.value());
                    if field.is_checked() != should_check {
                        field.set_checked(should_check);
                        field.notify(FieldEvent::Change);
                        touched += 1;
                    }
                }
                _ => match stored {
                    FieldValue::Single(value) if value.is_empty() => {}
                    FieldValue::Single(value) => {
                        field.set_value(value);
                        field.notify(FieldEvent::Input);
                        touched += 1;
                    }
                    FieldValue::Multiple(_) => {
                        log_warn(LOG_CATEGORY, &format!("値の形式が一致しません: {}", name));
                    }
                },
            }
        }
    }

    touched
}
