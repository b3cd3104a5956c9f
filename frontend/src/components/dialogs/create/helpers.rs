//! DOM helpers for the create dialog: keyed toasts, reading picked files,
//! resetting file inputs and the browser confirm box.

use gloo_file::futures::read_as_bytes;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::NodeRef;

use common::form::InputValue;
use common::model::attachment::Attachment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Loading,
    Success,
    Error,
}

impl ToastLevel {
    fn background(self) -> &'static str {
        match self {
            ToastLevel::Loading => "rgba(0, 0, 0, 0.8)",
            ToastLevel::Success => "rgba(46, 125, 50, 0.95)",
            ToastLevel::Error => "rgba(198, 40, 40, 0.95)",
        }
    }
}

/// Shows a toast at the bottom of the screen, replacing any toast with the same `id`.
///
/// Loading toasts stay until replaced; the others remove themselves after three
/// seconds unless they were replaced in the meantime.
pub fn show_toast(message: &str, id: &str, level: ToastLevel) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let element_id = format!("toast-{id}");

    let toast: HtmlElement = match document.get_element_by_id(&element_id) {
        Some(existing) => existing.unchecked_into(),
        None => {
            let (Ok(created), Some(body)) = (document.create_element("div"), document.body())
            else {
                return;
            };
            created.set_id(&element_id);
            if body.append_child(&created).is_err() {
                return;
            }
            created.unchecked_into()
        }
    };

    toast.set_text_content(Some(message));
    let style = toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", level.background()).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "monospace").ok();

    if level == ToastLevel::Loading {
        return;
    }
    let shown = message.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(3000).await;
        if toast.text_content().as_deref() == Some(shown.as_str()) {
            if let Some(parent) = toast.parent_node() {
                parent.remove_child(&toast).ok();
            }
        }
    });
}

/// Reads a picked file fully into memory.
pub async fn read_attachment(file: web_sys::File) -> Result<Attachment, String> {
    let file = gloo_file::File::from(file);
    let bytes = read_as_bytes(&file).await.map_err(|e| e.to_string())?;
    Ok(Attachment::new(file.name(), file.raw_mime_type(), bytes))
}

/// Name and value of the form control an event came from.
pub fn control_value(target: &EventTarget) -> Option<(String, InputValue)> {
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        let value = if input.type_() == "checkbox" {
            InputValue::Checked(input.checked())
        } else {
            InputValue::Text(input.value())
        };
        return Some((input.name(), value));
    }
    if let Some(textarea) = target.dyn_ref::<HtmlTextAreaElement>() {
        return Some((textarea.name(), InputValue::Text(textarea.value())));
    }
    target
        .dyn_ref::<HtmlSelectElement>()
        .map(|select| (select.name(), InputValue::Text(select.value())))
}

/// The first file of a file input's selection.
pub fn picked_file(target: &EventTarget) -> Option<web_sys::File> {
    target
        .dyn_ref::<HtmlInputElement>()
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

pub fn reset_file_input(input_ref: &NodeRef) {
    if let Some(input) = input_ref.cast::<HtmlInputElement>() {
        input.set_value("");
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// CSS class flagging a required field left empty, once a submit was attempted.
pub fn missing_class(submitted_once: bool, value: &str) -> Option<&'static str> {
    (submitted_once && value.trim().is_empty()).then_some("invalid")
}
