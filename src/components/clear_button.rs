//! 下書き削除ボタン

use leptos::*;

use crate::autosave::dom::{confirm_and_clear, CLEAR_BUTTON_LABEL};
use crate::autosave::AutoSaveSession;

/// 確認後に下書きを削除してページを再読み込みする
/// セッション開始前は押せない
#[component]
pub fn ClearDraftButton(session: ReadSignal<Option<AutoSaveSession>>) -> impl IntoView {
    let on_click = move |_| {
        if let Some(s) = session.get_untracked() {
            confirm_and_clear(&s);
        }
    };

    view! {
        <button
            type="button"
            class="btn btn-sm btn-outline-secondary clear-draft-btn"
            disabled=move || session.with(|s| s.is_none())
            on:click=on_click
        >
            {CLEAR_BUTTON_LABEL}
        </button>
    }
}
