//! Browser implementations of the form controller's ports.

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use log::warn;
use web_sys::{Element, ScrollBehavior, ScrollToOptions, Storage, Url};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::NodeRef;

use common::form::{DialogSurface, NotificationChannel, PreviewUrls, TransientStore};
use common::model::attachment::Attachment;

use super::helpers::{show_toast, ToastLevel};
use super::messages::Msg;
use super::state::CreateDialog;

pub struct ToastNotifications;

impl NotificationChannel for ToastNotifications {
    fn loading(&self, message: &str, id: &str) {
        show_toast(message, id, ToastLevel::Loading);
    }

    fn success(&self, message: &str, id: &str) {
        show_toast(message, id, ToastLevel::Success);
    }

    fn error(&self, message: &str, id: &str) {
        show_toast(message, id, ToastLevel::Error);
    }
}

/// `window.localStorage`; silently absent in private modes that block it.
pub struct LocalStorage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TransientStore for LocalStorage {
    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if let Err(err) = storage.set_item(key, value) {
                warn!("could not store {key}: {err:?}");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            storage.remove_item(key).ok();
        }
    }
}

pub struct DomSurface {
    panel: NodeRef,
    link: Scope<CreateDialog>,
}

impl DomSurface {
    pub fn new(panel: NodeRef, link: Scope<CreateDialog>) -> Self {
        Self { panel, link }
    }
}

fn set_body_overflow(value: Option<&str>) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let style = body.style();
    match value {
        Some(value) => style.set_property("overflow", value).ok(),
        None => style.remove_property("overflow").ok().map(|_| ()),
    };
}

impl DialogSurface for DomSurface {
    fn scroll_to_top(&self) {
        if let Some(panel) = self.panel.cast::<Element>() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            panel.scroll_to_with_scroll_to_options(&options);
        }
    }

    fn lock_page_scroll(&self) {
        set_body_overflow(Some("hidden"));
    }

    fn release_page_scroll(&self) {
        set_body_overflow(None);
    }

    fn schedule_shake_end(&self, token: u64, after: Duration) {
        let link = self.link.clone();
        let millis = u32::try_from(after.as_millis()).unwrap_or(u32::MAX);
        spawn_local(async move {
            TimeoutFuture::new(millis).await;
            link.send_message(Msg::ShakeEnded(token));
        });
    }
}

/// Object URLs backed by in-memory blobs.
pub struct ObjectUrls;

impl PreviewUrls for ObjectUrls {
    fn create(&self, image: &Attachment) -> Option<String> {
        let mime = (!image.mime.is_empty()).then_some(image.mime.as_str());
        let blob = web_sys::Blob::from(gloo_file::Blob::new_with_options(
            image.bytes.as_slice(),
            mime,
        ));
        match Url::create_object_url_with_blob(&blob) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!("could not create a preview url for {}: {err:?}", image.name);
                None
            }
        }
    }

    fn revoke(&self, url: &str) {
        Url::revoke_object_url(url).ok();
    }
}
