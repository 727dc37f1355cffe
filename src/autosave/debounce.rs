//! 保存のデバウンス
//!
//! 連続した入力イベントを、一定時間入力が止まった後の1回の保存にまとめる。
//! 予約は1セッションにつき1つだけで、新しい予約は前の予約をキャンセルする。

use std::cell::RefCell;
use std::rc::Rc;

use crate::utils::timers::{TimerDriver, TimerHandle};

type Pending = Rc<RefCell<Option<(TimerHandle, Rc<dyn Fn()>)>>>;

#[derive(Clone)]
pub struct Debouncer {
    timers: Rc<dyn TimerDriver>,
    pending: Pending,
    delay_ms: u32,
}

impl Debouncer {
    pub fn new(timers: Rc<dyn TimerDriver>, delay_ms: u32) -> Self {
        Self {
            timers,
            pending: Rc::new(RefCell::new(None)),
            delay_ms,
        }
    }

    /// 遅延後にコールバックを実行。期限前に再度呼ばれると前の予約は破棄される
    pub fn schedule<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        // 既存タイマーをキャンセル
        self.cancel();

        let callback: Rc<dyn Fn()> = Rc::new(callback);
        let pending = Rc::clone(&self.pending);
        let fire = Rc::clone(&callback);
        let handle = self.timers.set_timeout(
            self.delay_ms,
            Box::new(move || {
                // 先に枠を空けてから実行（コールバック内での再予約に備える）
                let taken = pending.borrow_mut().take();
                drop(taken);
                fire();
            }),
        );
        *self.pending.borrow_mut() = Some((handle, callback));
    }

    pub fn cancel(&self) {
        let taken = self.pending.borrow_mut().take();
        drop(taken);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// 予約中なら即座に実行する。実行したら true
    pub fn flush(&self) -> bool {
        let taken = self.pending.borrow_mut().take();
        match taken {
            Some((handle, callback)) => {
                drop(handle);
                callback();
                true
            }
            None => false,
        }
    }
}
