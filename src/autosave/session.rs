//! 自動保存セッション
//!
//! フォーム1つにつき1セッション。復元 → 入力監視 → デバウンス保存 → 送信時削除
//! の流れを管理する。ストレージのエラーはここで止め、ページ側には伝えない。

use std::rc::Rc;

use chrono::{DateTime, Utc};

use super::accessor::FormAccessor;
use super::debounce::Debouncer;
use super::restore::{apply_snapshot, is_expired};
use super::serializer::capture_fields;
use crate::components::indicator::{shared_indicator, Notifier};
use crate::config::{AutoSaveConfig, RESTORED_NOTICE_MS, SAVED_NOTICE_MS};
use crate::error::DraftError;
use crate::models::{FieldEvent, FieldKind, FormSnapshot, NotifyKind};
use crate::utils::log_trace::{log_error_with_data, log_info, log_info_with_data, log_warn};
use crate::utils::storage::{DraftStorage, StorageBackend, WebLocalStorage};
use crate::utils::timers::{BrowserClock, BrowserTimers, Clock, TimerDriver, TimerHandle};
use crate::utils::LOG_CATEGORY;

/// セッションが使う外部機能
#[derive(Clone)]
pub struct AutoSaveEnv {
    pub storage: Rc<dyn StorageBackend>,
    pub timers: Rc<dyn TimerDriver>,
    pub notifier: Rc<dyn Notifier>,
    pub clock: Rc<dyn Clock>,
}

impl AutoSaveEnv {
    pub fn browser() -> Self {
        Self {
            storage: Rc::new(WebLocalStorage),
            timers: Rc::new(BrowserTimers),
            notifier: shared_indicator(),
            clock: Rc::new(BrowserClock),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    Restored { saved_at: DateTime<Utc>, fields: usize },
    Missing,
    Expired,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Saved(FormSnapshot),
    Failed,
}

struct SessionInner {
    logical_name: String,
    config: AutoSaveConfig,
    form: Rc<dyn FormAccessor>,
    drafts: DraftStorage,
    debouncer: Debouncer,
    env: AutoSaveEnv,
    submit_timer: std::cell::RefCell<Option<TimerHandle>>,
}

#[derive(Clone)]
pub struct AutoSaveSession {
    inner: Rc<SessionInner>,
}

/// フォームが見つからなければ警告を残して None
pub fn init_session(
    form: Option<Rc<dyn FormAccessor>>,
    form_id: &str,
    logical_name: &str,
    config: AutoSaveConfig,
    env: AutoSaveEnv,
) -> Option<AutoSaveSession> {
    let Some(form) = form else {
        log_warn(LOG_CATEGORY, &format!("フォームが見つかりません: {}", form_id));
        return None;
    };
    Some(AutoSaveSession::start(form, logical_name, config, env))
}

impl AutoSaveSession {
    /// セッションを作成し、保存済みの下書きを復元する
    ///
    /// 入力の監視はこの後で登録すること（復元前に保存が走らないように）。
    pub fn start(
        form: Rc<dyn FormAccessor>,
        logical_name: &str,
        config: AutoSaveConfig,
        env: AutoSaveEnv,
    ) -> Self {
        let session = Self::new(form, logical_name, config, env);
        session.restore();
        log_info(
            LOG_CATEGORY,
            &format!("自動保存を開始しました: {}", session.inner.logical_name),
        );
        session
    }

    fn new(
        form: Rc<dyn FormAccessor>,
        logical_name: &str,
        config: AutoSaveConfig,
        env: AutoSaveEnv,
    ) -> Self {
        let config = config.normalized();
        let drafts = DraftStorage::new(Rc::clone(&env.storage), config.storage_key(logical_name));
        let debouncer = Debouncer::new(Rc::clone(&env.timers), config.autosave_delay_ms);
        Self {
            inner: Rc::new(SessionInner {
                logical_name: logical_name.to_string(),
                config,
                form,
                drafts,
                debouncer,
                env,
                submit_timer: std::cell::RefCell::new(None),
            }),
        }
    }

    pub fn storage_key(&self) -> &str {
        self.inner.drafts.key()
    }

    fn notify(&self, message: &str, kind: NotifyKind, duration_ms: u32) {
        if self.inner.config.show_notifications {
            self.inner.env.notifier.show(message, kind, duration_ms);
        }
    }

    fn report_error(&self, action: &str, err: &DraftError, notice: &str) {
        log_error_with_data(
            LOG_CATEGORY,
            &format!("{}: {}", action, err),
            serde_json::json!({ "key": self.storage_key() }),
        );
        self.notify(notice, NotifyKind::Error, SAVED_NOTICE_MS);
    }

    // ============================================
    // 保存
    // ============================================

    /// 入力イベントを受けて保存を予約（監視対象外の組み合わせは無視）
    pub fn on_field_event(&self, kind: &FieldKind, event: FieldEvent) {
        if kind.tracks(event) {
            self.schedule_save();
        }
    }

    pub fn schedule_save(&self) {
        let session = self.clone();
        self.inner.debouncer.schedule(move || {
            session.capture();
        });
    }

    pub fn has_pending_save(&self) -> bool {
        self.inner.debouncer.is_pending()
    }

    /// 予約中の保存を即座に実行
    pub fn save_now(&self) -> bool {
        self.inner.debouncer.flush()
    }

    /// 現在の入力内容を保存する。失敗してもエラーは呼び出し元に返さない
    pub fn capture(&self) -> CaptureOutcome {
        let snapshot = FormSnapshot::new(
            capture_fields(self.inner.form.as_ref()),
            self.inner.env.clock.now(),
        );

        match self.inner.drafts.save(&snapshot) {
            Ok(()) => {
                log_info(LOG_CATEGORY, &format!("下書きを保存しました: {}", self.storage_key()));
                self.notify("下書きを保存しました", NotifyKind::Success, SAVED_NOTICE_MS);
                CaptureOutcome::Saved(snapshot)
            }
            Err(e) => {
                self.report_error("下書きの保存に失敗", &e, "下書きの保存に失敗しました");
                CaptureOutcome::Failed
            }
        }
    }

    // ============================================
    // 復元
    // ============================================

    pub fn restore(&self) -> RestoreOutcome {
        let snapshot = match self.inner.drafts.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return RestoreOutcome::Missing,
            Err(e) => {
                self.report_error("下書きの復元に失敗", &e, "下書きの復元に失敗しました");
                return RestoreOutcome::Failed;
            }
        };

        let now = self.inner.env.clock.now();
        if is_expired(snapshot.timestamp, now, self.inner.config.expiry_days) {
            log_info(LOG_CATEGORY, "下書きが古いため破棄しました");
            self.clear();
            return RestoreOutcome::Expired;
        }

        let fields = apply_snapshot(self.inner.form.as_ref(), &snapshot);
        let saved_at = self.inner.env.clock.format_local(snapshot.timestamp);
        log_info_with_data(
            LOG_CATEGORY,
            &format!("下書きを復元しました: {}", self.storage_key()),
            serde_json::json!({ "fields": fields, "savedAt": saved_at }),
        );
        self.notify(
            &format!("下書きを復元しました ({})", saved_at),
            NotifyKind::Info,
            RESTORED_NOTICE_MS,
        );
        RestoreOutcome::Restored {
            saved_at: snapshot.timestamp,
            fields,
        }
    }

    // ============================================
    // 送信・削除
    // ============================================

    /// 送信時: 予約中の保存を取り消し、猶予時間後に下書きを削除する
    /// （サーバーの応答は待たない）
    pub fn on_submit(&self) {
        self.inner.debouncer.cancel();
        let session = self.clone();
        let handle = self.inner.env.timers.set_timeout(
            self.inner.config.submit_grace_ms,
            Box::new(move || {
                let taken = session.inner.submit_timer.borrow_mut().take();
                drop(taken);
                session.clear();
            }),
        );
        *self.inner.submit_timer.borrow_mut() = Some(handle);
    }

    /// 下書きを即座に削除
    pub fn clear(&self) -> bool {
        match self.inner.drafts.remove() {
            Ok(()) => {
                log_info(LOG_CATEGORY, &format!("下書きを削除しました: {}", self.storage_key()));
                true
            }
            Err(e) => {
                self.report_error("下書きの削除に失敗", &e, "下書きの削除に失敗しました");
                false
            }
        }
    }

    pub fn has_draft(&self) -> bool {
        match self.inner.drafts.exists() {
            Ok(exists) => exists,
            Err(e) => {
                log_warn(LOG_CATEGORY, &format!("下書きの確認に失敗: {}", e));
                false
            }
        }
    }
}
