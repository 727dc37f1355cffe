//! テスト用のフェイク実装（ブラウザなしで動かす）

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::autosave::accessor::{FormAccessor, FormField};
use crate::components::indicator::Notifier;
use crate::error::DraftError;
use crate::models::{FieldEvent, FieldKind, NotifyKind};
use crate::utils::storage::StorageBackend;
use crate::utils::timers::{Clock, TimerDriver, TimerHandle};

// ============================================
// フォーム
// ============================================

#[derive(Debug, Clone)]
struct FakeElement {
    name: String,
    kind: FieldKind,
    value: String,
    checked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FakeForm {
    elements: Rc<RefCell<Vec<FakeElement>>>,
    events: Rc<RefCell<Vec<(String, String, FieldEvent)>>>,
}

impl FakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, type_attr: &str, name: &str, value: &str) -> Self {
        self.elements.borrow_mut().push(FakeElement {
            name: name.to_string(),
            kind: FieldKind::from_type_attr(type_attr),
            value: value.to_string(),
            checked: false,
        });
        self
    }

    fn position(&self, name: &str, value: Option<&str>) -> usize {
        self.elements
            .borrow()
            .iter()
            .position(|e| e.name == name && value.map_or(true, |v| e.value == v))
            .unwrap_or_else(|| panic!("no element {} {:?}", name, value))
    }

    /// ユーザー入力を模擬（イベントは記録しない）
    pub fn type_into(&self, name: &str, value: &str) {
        let index = self.position(name, None);
        self.elements.borrow_mut()[index].value = value.to_string();
    }

    pub fn check(&self, name: &str, value: &str, checked: bool) {
        let index = self.position(name, Some(value));
        set_checked_at(&self.elements, index, checked);
    }

    pub fn value_of(&self, name: &str) -> String {
        let index = self.position(name, None);
        self.elements.borrow()[index].value.clone()
    }

    pub fn is_checked(&self, name: &str, value: &str) -> bool {
        let index = self.position(name, Some(value));
        self.elements.borrow()[index].checked
    }

    pub fn reset(&self) {
        for element in self.elements.borrow_mut().iter_mut() {
            match element.kind {
                FieldKind::Radio | FieldKind::Checkbox => element.checked = false,
                FieldKind::Button => {}
                _ => element.value.clear(),
            }
        }
    }

    /// 要素の状態（比較用）
    pub fn state(&self) -> Vec<(String, String, bool)> {
        self.elements
            .borrow()
            .iter()
            .map(|e| (e.name.clone(), e.value.clone(), e.checked))
            .collect()
    }

    /// 発火された (name, value, event) の記録
    pub fn events(&self) -> Vec<(String, String, FieldEvent)> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }
}

// ラジオは同名グループ内で排他
fn set_checked_at(elements: &Rc<RefCell<Vec<FakeElement>>>, index: usize, checked: bool) {
    let mut elements = elements.borrow_mut();
    if checked && elements[index].kind == FieldKind::Radio {
        let name = elements[index].name.clone();
        for e in elements.iter_mut().filter(|e| e.kind == FieldKind::Radio && e.name == name) {
            e.checked = false;
        }
    }
    elements[index].checked = checked;
}

struct FakeField {
    elements: Rc<RefCell<Vec<FakeElement>>>,
    events: Rc<RefCell<Vec<(String, String, FieldEvent)>>>,
    index: usize,
}

impl FormField for FakeField {
    fn name(&self) -> String {
        self.elements.borrow()[self.index].name.clone()
    }

    fn kind(&self) -> FieldKind {
        self.elements.borrow()[self.index].kind.clone()
    }

    fn value(&self) -> String {
        self.elements.borrow()[self.index].value.clone()
    }

    fn set_value(&self, value: &str) {
        self.elements.borrow_mut()[self.index].value = value.to_string();
    }

    fn is_checked(&self) -> bool {
        self.elements.borrow()[self.index].checked
    }

    fn set_checked(&self, checked: bool) {
        set_checked_at(&self.elements, self.index, checked);
    }

    fn notify(&self, event: FieldEvent) {
        let (name, value) = {
            let elements = self.elements.borrow();
            (elements[self.index].name.clone(), elements[self.index].value.clone())
        };
        self.events.borrow_mut().push((name, value, event));
    }
}

impl FormAccessor for FakeForm {
    fn fields(&self) -> Vec<Box<dyn FormField>> {
        let count = self.elements.borrow().len();
        (0..count)
            .map(|index| {
                Box::new(FakeField {
                    elements: Rc::clone(&self.elements),
                    events: Rc::clone(&self.events),
                    index,
                }) as Box<dyn FormField>
            })
            .collect()
    }
}

/// テキスト・数値・メール・セレクト・テキストエリア・レンジ・ラジオ・チェックボックス・送信ボタン
pub fn questionnaire_form() -> FakeForm {
    FakeForm::new()
        .with("text", "name", "")
        .with("number", "age", "")
        .with("email", "email", "")
        .with("select-one", "prefecture", "")
        .with("textarea", "notes", "")
        .with("range", "satisfaction", "")
        .with("radio", "plan", "basic")
        .with("radio", "plan", "x")
        .with("radio", "plan", "premium")
        .with("checkbox", "interests", "A")
        .with("checkbox", "interests", "B")
        .with("checkbox", "interests", "C")
        .with("submit", "submit", "送信")
}

// ============================================
// ストレージ
// ============================================

/// メモリ上のストレージ。読み・書き・削除それぞれに失敗を仕込める
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
    fail_removes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// 書き込みを容量超過で失敗させる
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn set_fail_removes(&self, fail: bool) {
        self.fail_removes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftError> {
        if self.fail_reads.get() {
            return Err(DraftError::Read("SecurityError".to_string()));
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), DraftError> {
        if self.fail_writes.get() {
            return Err(DraftError::QuotaExceeded);
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), DraftError> {
        if self.fail_removes.get() {
            return Err(DraftError::Remove("SecurityError".to_string()));
        }
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

// ============================================
// タイマー（仮想時間）
// ============================================

struct PendingTimer {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct TimerQueue {
    now: u64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

#[derive(Clone, Default)]
pub struct ManualTimers {
    queue: Rc<RefCell<TimerQueue>>,
}

struct ManualHandle {
    id: u64,
    queue: Weak<RefCell<TimerQueue>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        if let Some(queue) = self.queue.upgrade() {
            if let Ok(mut queue) = queue.try_borrow_mut() {
                queue.pending.retain(|t| t.id != self.id);
            }
        }
    }
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// 仮想時間を進め、期限が来たタイマーを順に実行
    pub fn advance(&self, ms: u64) {
        let target = self.queue.borrow().now + ms;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let earliest = queue
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                earliest.map(|i| {
                    let timer = queue.pending.remove(i);
                    queue.now = timer.due;
                    timer.callback
                })
            };
            match next {
                Some(callback) => callback(),
                None => break,
            }
        }
        self.queue.borrow_mut().now = target;
    }
}

impl TimerDriver for ManualTimers {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        let mut queue = self.queue.borrow_mut();
        let id = queue.next_id;
        queue.next_id += 1;
        let due = queue.now + u64::from(delay_ms);
        queue.pending.push(PendingTimer { id, due, callback });
        Box::new(ManualHandle {
            id,
            queue: Rc::downgrade(&self.queue),
        })
    }
}

// ============================================
// 時計・通知
// ============================================

#[derive(Clone)]
pub struct FixedClock {
    now: Rc<RefCell<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(RefCell::new(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap())),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.now.borrow_mut() = at;
    }

    pub fn advance(&self, by: Duration) {
        let next = *self.now.borrow() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.borrow()
    }

    fn format_local(&self, at: DateTime<Utc>) -> String {
        at.format("%Y/%m/%d %H:%M:%S").to_string()
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    shown: Rc<RefCell<Vec<(String, NotifyKind, u32)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<(String, NotifyKind, u32)> {
        self.shown.borrow().clone()
    }

    pub fn kinds(&self) -> Vec<NotifyKind> {
        self.shown.borrow().iter().map(|(_, kind, _)| *kind).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, kind: NotifyKind, duration_ms: u32) {
        self.shown.borrow_mut().push((message.to_string(), kind, duration_ms));
    }
}
