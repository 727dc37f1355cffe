//! ブラウザDOMとの接続
//!
//! `HtmlFormElement` を `FormAccessor` として扱い、入力・送信イベントを
//! セッションに中継する。JSから呼ぶ入口 (`init` など) もここで公開する。

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::accessor::{FormAccessor, FormField};
use super::session::{init_session, AutoSaveEnv, AutoSaveSession};
use crate::config::AutoSaveConfig;
use crate::models::{FieldEvent, FieldKind};
use crate::utils::log_trace::{get_logs_json, log_warn};
use crate::utils::LOG_CATEGORY;

pub const CLEAR_CONFIRM_MESSAGE: &str = "保存された下書きを削除してもよろしいですか？";
pub const CLEAR_BUTTON_LABEL: &str = "下書きを削除";

// ============================================
// FormAccessor 実装
// ============================================

pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    pub fn find(form_id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let form = document
            .get_element_by_id(form_id)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(Self::new(form))
    }

    fn elements(&self) -> Vec<Element> {
        let collection = self.form.elements();
        (0..collection.length())
            .filter_map(|i| collection.item(i))
            .collect()
    }
}

impl FormAccessor for DomForm {
    fn fields(&self) -> Vec<Box<dyn FormField>> {
        self.elements()
            .into_iter()
            .map(|element| Box::new(DomField { element }) as Box<dyn FormField>)
            .collect()
    }
}

pub struct DomField {
    element: Element,
}

impl DomField {
    fn input(&self) -> Option<&HtmlInputElement> {
        self.element.dyn_ref::<HtmlInputElement>()
    }
}

impl FormField for DomField {
    fn name(&self) -> String {
        self.element.get_attribute("name").unwrap_or_default()
    }

    fn kind(&self) -> FieldKind {
        if let Some(input) = self.input() {
            FieldKind::from_type_attr(&input.type_())
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            FieldKind::from_type_attr(&select.type_())
        } else if self.element.dyn_ref::<HtmlTextAreaElement>().is_some() {
            FieldKind::Textarea
        } else if self.element.tag_name().eq_ignore_ascii_case("button") {
            FieldKind::Button
        } else {
            FieldKind::Other(self.element.tag_name().to_ascii_lowercase())
        }
    }

    fn value(&self) -> String {
        if let Some(input) = self.input() {
            input.value()
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(textarea) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.input() {
            input.set_value(value);
        } else if let Some(select) = self.element.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(textarea) = self.element.dyn_ref::<HtmlTextAreaElement>() {
            textarea.set_value(value);
        }
    }

    fn is_checked(&self) -> bool {
        self.input().map(|input| input.checked()).unwrap_or(false)
    }

    fn set_checked(&self, checked: bool) {
        if let Some(input) = self.input() {
            input.set_checked(checked);
        }
    }

    fn notify(&self, event: FieldEvent) {
        let init = web_sys::EventInit::new();
        init.set_bubbles(true);
        if let Ok(ev) = web_sys::Event::new_with_event_init_dict(event.as_str(), &init) {
            let _ = self.element.dispatch_event(&ev);
        }
    }
}

// ============================================
// イベント登録
// ============================================

/// 入力・送信イベントをセッションに接続（復元の後に呼ぶこと）
pub fn attach_listeners(session: &AutoSaveSession, form: &DomForm) {
    for element in form.elements() {
        let kind = DomField { element: element.clone() }.kind();
        for event in [FieldEvent::Input, FieldEvent::Change] {
            if !kind.tracks(event) {
                continue;
            }
            let session = session.clone();
            let kind = kind.clone();
            let handler = Closure::wrap(Box::new(move |_: web_sys::Event| {
                session.on_field_event(&kind, event);
            }) as Box<dyn FnMut(_)>);
            let _ = element.add_event_listener_with_callback(event.as_str(), handler.as_ref().unchecked_ref());
            handler.forget();
        }
    }

    let session = session.clone();
    let on_submit = Closure::wrap(Box::new(move |_: web_sys::Event| {
        session.on_submit();
    }) as Box<dyn FnMut(_)>);
    let _ = form
        .form
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref());
    on_submit.forget();
}


pub fn init_with_config(form_id: &str, logical_name: &str, config: AutoSaveConfig) -> Option<AutoSaveSession> {
    let form = DomForm::find(form_id).map(Rc::new);
    let accessor = form.clone().map(|f| f as Rc<dyn FormAccessor>);
    let session = init_session(accessor, form_id, logical_name, config, AutoSaveEnv::browser())?;
    if let Some(form) = form {
        attach_listeners(&session, &form);
    }
    Some(session)
}

// ============================================
// 下書き削除ボタン
// ============================================

/// 確認ダイアログの後、下書きを削除してページを再読み込み
///
/// 削除に失敗した場合はエラー通知を残すため再読み込みしない。
pub fn confirm_and_clear(session: &AutoSaveSession) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    if !window.confirm_with_message(CLEAR_CONFIRM_MESSAGE).unwrap_or(false) {
        return false;
    }
    clear_then_reload(session, || {
        let _ = window.location().reload();
    })
}

fn clear_then_reload(session: &AutoSaveSession, reload: impl FnOnce()) -> bool {
    let cleared = session.clear();
    if cleared {
        reload();
    }
    cleared
}

fn append_clear_button(session: &AutoSaveSession, container_id: &str) -> Option<()> {
    let document = web_sys::window()?.document()?;
    let container = document.get_element_by_id(container_id)?;

    let button = document.create_element("button").ok()?;
    let _ = button.set_attribute("type", "button");
    let _ = button.set_attribute("class", "btn btn-sm btn-outline-secondary");
    let _ = button.set_attribute("style", "margin-left: 10px;");
    button.set_text_content(Some(CLEAR_BUTTON_LABEL));

    let session = session.clone();
    let on_click = Closure::wrap(Box::new(move |_: web_sys::Event| {
        confirm_and_clear(&session);
    }) as Box<dyn FnMut(_)>);
    let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();

    container.append_child(&button).ok()?;
    Some(())
}

// ============================================
// JS向けの公開API
// ============================================

#[wasm_bindgen]
pub struct AutoSaveHandle {
    session: AutoSaveSession,
}

#[wasm_bindgen]
impl AutoSaveHandle {
    pub fn clear(&self) -> bool {
        self.session.clear()
    }

    #[wasm_bindgen(js_name = saveNow)]
    pub fn save_now(&self) -> bool {
        self.session.save_now()
    }

    #[wasm_bindgen(js_name = hasDraft)]
    pub fn has_draft(&self) -> bool {
        self.session.has_draft()
    }

    #[wasm_bindgen(js_name = addClearButton)]
    pub fn add_clear_button(&self, container_id: &str) -> bool {
        let added = append_clear_button(&self.session, container_id).is_some();
        if !added {
            log_warn(LOG_CATEGORY, &format!("ボタンの配置先が見つかりません: {}", container_id));
        }
        added
    }
}

/// フォームIDと論理名で自動保存を開始。フォームがなければ undefined
#[wasm_bindgen]
pub fn init(form_id: &str, logical_name: &str) -> Option<AutoSaveHandle> {
    init_with_config(form_id, logical_name, AutoSaveConfig::default())
        .map(|session| AutoSaveHandle { session })
}

#[wasm_bindgen(js_name = initWithOptions)]
pub fn init_with_options(form_id: &str, logical_name: &str, options: JsValue) -> Option<AutoSaveHandle> {
    let config = if options.is_undefined() || options.is_null() {
        AutoSaveConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<AutoSaveConfig>(options).unwrap_or_else(|e| {
            log_warn(LOG_CATEGORY, &format!("オプションを読み込めません: {:?}", e));
            AutoSaveConfig::default()
        })
    };
    init_with_config(form_id, logical_name, config).map(|session| AutoSaveHandle { session })
}

#[wasm_bindgen(js_name = autosaveLogs)]
pub fn autosave_logs() -> String {
    get_logs_json()
}
