//! プロフィールアンケート（自動保存デモ）
//!
//! 下書きの復元時に発火される input / change でラベルや条件付き項目が
//! 更新されることを確認できる。

use leptos::*;

use crate::autosave::dom::init_with_config;
use crate::autosave::AutoSaveSession;
use crate::components::ClearDraftButton;
use crate::config::AutoSaveConfig;

pub const FORM_ID: &str = "questionnaire-profile";
pub const LOGICAL_NAME: &str = "profile";

const PREFECTURES: &[&str] = &["東京都", "神奈川県", "大阪府", "愛知県", "福岡県"];

const INTERESTS: &[(&str, &str)] = &[
    ("music", "音楽"),
    ("travel", "旅行"),
    ("sports", "スポーツ"),
    ("reading", "読書"),
];

#[component]
pub fn QuestionnaireForm() -> impl IntoView {
    let (session, set_session) = create_signal(None::<AutoSaveSession>);
    let (satisfaction, set_satisfaction) = create_signal("5".to_string());
    let (plan, set_plan) = create_signal(String::new());
    let (submitted, set_submitted) = create_signal(false);

    // フォームがDOMに挿入された後で自動保存を開始
    request_animation_frame(move || {
        set_session.set(init_with_config(FORM_ID, LOGICAL_NAME, AutoSaveConfig::default()));
    });

    view! {
        <div class="questionnaire">
            <div class="questionnaire-header">
                <h2>"プロフィールアンケート"</h2>
                <div id="draft-actions">
                    <ClearDraftButton session=session />
                </div>
            </div>

            // デモでは送信先がないため画面遷移を止める（下書きの削除は自動保存側で行われる）
            <form id=FORM_ID method="post" class="questionnaire-form"
                on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    set_submitted.set(true);
                }
            >
                <label class="field">
                    <span>"お名前"</span>
                    <input type="text" name="name" required />
                </label>

                <label class="field">
                    <span>"年齢"</span>
                    <input type="number" name="age" min="0" max="120" />
                </label>

                <label class="field">
                    <span>"メールアドレス"</span>
                    <input type="email" name="email" />
                </label>

                <label class="field">
                    <span>"都道府県"</span>
                    <select name="prefecture">
                        <option value="">"選択してください"</option>
                        {PREFECTURES.iter().map(|p| view! {
                            <option value=*p>{*p}</option>
                        }).collect_view()}
                    </select>
                </label>

                <label class="field">
                    <span>"満足度: " {move || satisfaction.get()}</span>
                    <input type="range" name="satisfaction" min="0" max="10" value="5"
                        on:input=move |ev| set_satisfaction.set(event_target_value(&ev)) />
                </label>

                <fieldset class="field">
                    <legend>"ご希望のプラン"</legend>
                    {["basic", "standard", "premium"].into_iter().map(|value| view! {
                        <label class="radio-label">
                            <input type="radio" name="plan" value=value
                                on:change=move |ev| set_plan.set(event_target_value(&ev)) />
                            {value}
                        </label>
                    }).collect_view()}
                </fieldset>

                // プレミアム選択時のみ表示（復元先として要素は常に残す）
                <label class="field" style:display=move || if plan.get() == "premium" { "block" } else { "none" }>
                    <span>"会社名"</span>
                    <input type="text" name="company" />
                </label>

                <fieldset class="field">
                    <legend>"興味のある分野"</legend>
                    {INTERESTS.iter().map(|(value, label)| view! {
                        <label class="checkbox-label">
                            <input type="checkbox" name="interests" value=*value />
                            {*label}
                        </label>
                    }).collect_view()}
                </fieldset>

                <label class="field">
                    <span>"その他ご意見"</span>
                    <textarea name="notes" rows="4"></textarea>
                </label>

                <button type="submit" class="submit-btn">"送信"</button>
            </form>

            {move || submitted.get().then(|| view! {
                <p class="status success">"送信しました。下書きは削除されます。"</p>
            })}
        </div>
    }
}
