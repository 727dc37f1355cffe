use leptos::*;

use draft_autosave::views::QuestionnaireForm;

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    view! {
        <div class="app">
            <header class="app-header">
                <h1>"下書き自動保存デモ"</h1>
                <p class="app-lead">"入力内容は自動で保存され、再読み込みしても復元されます（7日間）。"</p>
            </header>

            <main class="container">
                <QuestionnaireForm />
            </main>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
