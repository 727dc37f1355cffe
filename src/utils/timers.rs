//! タイマーと時計

use chrono::{DateTime, Utc};
use std::any::Any;

/// 予約済みタイマー。dropするとキャンセルされる
pub type TimerHandle = Box<dyn Any>;

pub trait TimerDriver {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle;
}

/// `setTimeout` ベースのタイマー
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimers;

impl TimerDriver for BrowserTimers {
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerHandle {
        Box::new(gloo::timers::callback::Timeout::new(delay_ms, callback))
    }
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    /// 通知表示用のローカル日時文字列
    fn format_local(&self, at: DateTime<Utc>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn format_local(&self, at: DateTime<Utc>) -> String {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(at.timestamp_millis() as f64));
        date.to_locale_string("ja-JP", &wasm_bindgen::JsValue::UNDEFINED)
            .as_string()
            .unwrap_or_else(|| at.format("%Y/%m/%d %H:%M:%S").to_string())
    }
}
