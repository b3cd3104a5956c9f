//! Component state for the create dialog.
//!
//! The draft and every lifecycle flag live in the `FormController`; the
//! component only adds the DOM refs its browser adapters need.

use std::rc::Rc;

use yew::platform::spawn_local;
use yew::prelude::*;

use common::config::DialogConfig;
use common::form::{CategoryDirectory, DialogPorts, FormController};

use super::messages::Msg;
use super::ports::{DomSurface, LocalStorage, ObjectUrls, ToastNotifications};
use crate::services::api::HttpCategoryDirectory;

pub struct CreateDialog {
    pub form: FormController,

    /// The scrollable dialog panel; errors are scrolled into view here.
    pub panel_ref: NodeRef,

    /// Hidden cover image input, cleared when the cover is removed.
    pub cover_input_ref: NodeRef,

    /// Word import input, cleared after each import so the same file can be picked again.
    pub word_input_ref: NodeRef,
}

impl CreateDialog {
    pub fn new(ctx: &Context<Self>) -> Self {
        let panel_ref = NodeRef::default();
        let ports = DialogPorts::default()
            .with_notifications(Rc::new(ToastNotifications))
            .with_transient(Rc::new(LocalStorage))
            .with_surface(Rc::new(DomSurface::new(
                panel_ref.clone(),
                ctx.link().clone(),
            )))
            .with_previews(Rc::new(ObjectUrls));

        Self {
            form: FormController::new(ports, DialogConfig::default()),
            panel_ref,
            cover_input_ref: NodeRef::default(),
            word_input_ref: NodeRef::default(),
        }
    }

    /// Starts a fresh draft of the requested kind and fetches categories when needed.
    pub fn open(&mut self, ctx: &Context<Self>) {
        let props = ctx.props();
        let Some(request) = self.form.open(props.kind) else {
            return;
        };

        let directory = HttpCategoryDirectory::new(props.api_base.to_string());
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = directory.list_all().await;
            link.send_message(Msg::CategoriesLoaded(request, result));
        });
    }
}
