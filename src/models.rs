//! データ構造体モジュール

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::DraftError;

// ============================================
// 下書きスナップショット
// ============================================

/// フィールド値（単一値 or チェックボックス群の複数値）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(s) => Some(s),
            FieldValue::Multiple(_) => None,
        }
    }

    /// チェックボックス判定用。単一値は1要素の集合として扱う
    pub fn contains(&self, value: &str) -> bool {
        match self {
            FieldValue::Single(s) => s == value,
            FieldValue::Multiple(values) => values.iter().any(|v| v == value),
        }
    }
}

/// 保存単位: フィールド名→値 と保存日時
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub data: BTreeMap<String, FieldValue>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl FormSnapshot {
    pub fn new(data: BTreeMap<String, FieldValue>, timestamp: DateTime<Utc>) -> Self {
        Self { data, timestamp }
    }

    pub fn to_json(&self) -> Result<String, DraftError> {
        serde_json::to_string(self).map_err(DraftError::Encode)
    }

    pub fn from_json(json: &str) -> Result<Self, DraftError> {
        serde_json::from_str(json).map_err(DraftError::Decode)
    }
}

/// `Date.prototype.toISOString` と同じ形式 (ミリ秒 + Z) で読み書きする
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }
}

// ============================================
// フォーム要素の分類
// ============================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Textarea,
    Select,
    Range,
    Radio,
    Checkbox,
    /// submit / button / reset / image
    Button,
    File,
    Other(String),
}

impl FieldKind {
    /// DOMの `type` 属性から判定
    pub fn from_type_attr(type_attr: &str) -> Self {
        match type_attr.to_ascii_lowercase().as_str() {
            "" | "text" => FieldKind::Text,
            "number" => FieldKind::Number,
            "email" => FieldKind::Email,
            "textarea" => FieldKind::Textarea,
            "select-one" | "select-multiple" | "select" => FieldKind::Select,
            "range" => FieldKind::Range,
            "radio" => FieldKind::Radio,
            "checkbox" => FieldKind::Checkbox,
            "submit" | "button" | "reset" | "image" => FieldKind::Button,
            "file" => FieldKind::File,
            other => FieldKind::Other(other.to_string()),
        }
    }

    /// 下書きに含めるかどうか
    pub fn is_persisted(&self) -> bool {
        !matches!(self, FieldKind::Button | FieldKind::File)
    }

    /// この種類の要素でこのイベントを監視するか
    pub fn tracks(&self, event: FieldEvent) -> bool {
        match self {
            FieldKind::Text
            | FieldKind::Number
            | FieldKind::Email
            | FieldKind::Textarea
            | FieldKind::Select => true,
            FieldKind::Radio | FieldKind::Checkbox => event == FieldEvent::Change,
            FieldKind::Range => event == FieldEvent::Input,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEvent {
    Input,
    Change,
}

impl FieldEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldEvent::Input => "input",
            FieldEvent::Change => "change",
        }
    }
}

// ============================================
// 通知
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotifyKind {
    pub fn color(&self) -> &'static str {
        match self {
            NotifyKind::Success => "#28a745",
            NotifyKind::Error => "#dc3545",
            NotifyKind::Info => "#17a2b8",
            NotifyKind::Warning => "#ffc107",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decodes_script_era_record() {
        let json = r#"{"data":{"name":"Ana","interests":["music","travel"],"empty":[]},"timestamp":"2026-10-11T08:15:30.250Z"}"#;
        let snapshot = FormSnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.data.get("name"), Some(&FieldValue::Single("Ana".to_string())));
        assert_eq!(
            snapshot.data.get("interests"),
            Some(&FieldValue::Multiple(vec!["music".to_string(), "travel".to_string()]))
        );
        assert_eq!(snapshot.data.get("empty"), Some(&FieldValue::Multiple(vec![])));
        assert_eq!(snapshot.timestamp.timestamp_millis() % 1000, 250);
    }

    #[test]
    fn test_timestamp_written_with_millis() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let json = FormSnapshot::new(BTreeMap::new(), ts).to_json().unwrap();
        assert!(json.contains(r#""timestamp":"2026-10-18T09:30:00.000Z""#));
    }

    #[test]
    fn test_corrupt_json_is_decode_error() {
        assert!(matches!(FormSnapshot::from_json("{not json"), Err(DraftError::Decode(_))));
        assert!(matches!(
            FormSnapshot::from_json(r#"{"data":{},"timestamp":"yesterday"}"#),
            Err(DraftError::Decode(_))
        ));
    }

    #[test]
    fn test_field_kind_taxonomy() {
        assert_eq!(FieldKind::from_type_attr("select-one"), FieldKind::Select);
        assert_eq!(FieldKind::from_type_attr("CHECKBOX"), FieldKind::Checkbox);
        assert_eq!(FieldKind::from_type_attr("date"), FieldKind::Other("date".to_string()));
        assert!(!FieldKind::Button.is_persisted());
        assert!(!FieldKind::File.is_persisted());
        assert!(FieldKind::Other("tel".to_string()).is_persisted());

        assert!(FieldKind::Text.tracks(FieldEvent::Input));
        assert!(FieldKind::Select.tracks(FieldEvent::Change));
        assert!(!FieldKind::Radio.tracks(FieldEvent::Input));
        assert!(FieldKind::Checkbox.tracks(FieldEvent::Change));
        assert!(FieldKind::Range.tracks(FieldEvent::Input));
        assert!(!FieldKind::Range.tracks(FieldEvent::Change));
        assert!(!FieldKind::Other("date".to_string()).tracks(FieldEvent::Change));
    }
}
