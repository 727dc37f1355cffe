//! 時系列トレースログ
//! 自動保存の操作とイベントを記録し、後から確認できるようにする
//!
//! 下書き用の名前空間以外のキーには書き込まないため、ログはメモリ上にのみ保持する

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String, // "info", "warn", "error"
    pub category: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
}

impl LogTrace {
    pub fn new() -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        }
    }

    pub fn log(&mut self, level: &str, category: &str, message: &str, data: Option<serde_json::Value>) {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

        let entry = LogEntry {
            timestamp,
            level: level.to_string(),
            category: category.to_string(),
            message: message.to_string(),
            data,
        };

        write_console(level, category, message);

        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn info(&mut self, category: &str, message: &str) {
        self.log("info", category, message, None);
    }

    pub fn info_with_data(&mut self, category: &str, message: &str, data: serde_json::Value) {
        self.log("info", category, message, Some(data));
    }

    pub fn warn(&mut self, category: &str, message: &str) {
        self.log("warn", category, message, None);
    }

    pub fn error_with_data(&mut self, category: &str, message: &str, data: serde_json::Value) {
        self.log("error", category, message, Some(data));
    }

    pub fn get_logs(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn get_logs_json(&self) -> String {
        let logs: Vec<&LogEntry> = self.logs.iter().collect();
        serde_json::to_string_pretty(&logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
    }
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new()
    }
}

// コンソールにも出力（ネイティブのテスト実行時は何もしない）
#[cfg(target_arch = "wasm32")]
fn write_console(level: &str, category: &str, message: &str) {
    let line = wasm_bindgen::JsValue::from_str(&format!("[{}] {}", category, message));
    match level {
        "error" => web_sys::console::error_1(&line),
        "warn" => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(_level: &str, _category: &str, _message: &str) {}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().info(category, message);
    });
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().info_with_data(category, message, data);
    });
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().warn(category, message);
    });
}

pub fn log_error_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().error_with_data(category, message, data);
    });
}

pub fn get_logs() -> Vec<LogEntry> {
    LOG_TRACE.with(|trace| trace.borrow().get_logs())
}

pub fn get_logs_json() -> String {
    LOG_TRACE.with(|trace| {
        trace.borrow().get_logs_json()
    })
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| {
        trace.borrow_mut().clear();
    });
}
