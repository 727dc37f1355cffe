//! 自動保存インジケーター
//!
//! 画面右下に固定表示される通知。最初の表示時に1つだけ生成し、
//! 新しいメッセージは前のフェードアウトを中断して上書きする。

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::models::NotifyKind;
use crate::utils::timers::{BrowserTimers, TimerDriver, TimerHandle};

pub const INDICATOR_ID: &str = "autosave-indicator";

const INDICATOR_STYLE: &str = "position: fixed; bottom: 20px; right: 20px; padding: 12px 20px; \
    background: #28a745; color: white; border-radius: 4px; box-shadow: 0 2px 8px rgba(0,0,0,0.2); \
    font-size: 14px; font-weight: 500; z-index: 9999; opacity: 0; transition: opacity 0.3s ease; \
    pointer-events: none;";

pub trait Notifier {
    fn show(&self, message: &str, kind: NotifyKind, duration_ms: u32);
}

/// 通知の表示先
pub trait NoticeSurface {
    fn display(&self, message: &str, kind: NotifyKind);
    fn hide(&self);
}

/// 表示してから `duration_ms` 後にフェードアウトする通知
pub struct Indicator {
    surface: Rc<dyn NoticeSurface>,
    timers: Rc<dyn TimerDriver>,
    // フェードアウト待ちのタイマー（差し替えでキャンセル）
    fade: RefCell<Option<TimerHandle>>,
}

impl Indicator {
    pub fn new(surface: Rc<dyn NoticeSurface>, timers: Rc<dyn TimerDriver>) -> Self {
        Self {
            surface,
            timers,
            fade: RefCell::new(None),
        }
    }
}

impl Notifier for Indicator {
    fn show(&self, message: &str, kind: NotifyKind, duration_ms: u32) {
        self.surface.display(message, kind);

        let surface = Rc::clone(&self.surface);
        let fade = self
            .timers
            .set_timeout(duration_ms, Box::new(move || surface.hide()));
        let previous = self.fade.borrow_mut().replace(fade);
        drop(previous);
    }
}

thread_local! {
    // ページ内のセッションは1つのインジケーターを共有する
    static SHARED_INDICATOR: Rc<Indicator> =
        Rc::new(Indicator::new(Rc::new(DomSurface), Rc::new(BrowserTimers)));
}

pub fn shared_indicator() -> Rc<dyn Notifier> {
    SHARED_INDICATOR.with(|indicator| Rc::clone(indicator) as Rc<dyn Notifier>)
}

// ============================================
// DOM
// ============================================

#[derive(Debug, Clone, Copy, Default)]
pub struct DomSurface;

impl DomSurface {
    fn element() -> Option<HtmlElement> {
        let document = web_sys::window()?.document()?;
        if let Some(existing) = document.get_element_by_id(INDICATOR_ID) {
            return existing.dyn_into::<HtmlElement>().ok();
        }

        let indicator = document.create_element("div").ok()?;
        indicator.set_id(INDICATOR_ID);
        let _ = indicator.set_attribute("style", INDICATOR_STYLE);
        let _ = indicator.set_attribute("role", "status");
        document.body()?.append_child(&indicator).ok()?;
        indicator.dyn_into::<HtmlElement>().ok()
    }
}

impl NoticeSurface for DomSurface {
    fn display(&self, message: &str, kind: NotifyKind) {
        let Some(indicator) = Self::element() else {
            return;
        };
        indicator.set_text_content(Some(message));
        let style = indicator.style();
        let _ = style.set_property("background", kind.color());
        let _ = style.set_property("opacity", "1");
    }

    fn hide(&self) {
        if let Some(indicator) = Self::element() {
            let _ = indicator.style().set_property("opacity", "0");
        }
    }
}
