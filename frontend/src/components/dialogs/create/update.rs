//! Update function for the create dialog.
//!
//! Every message becomes one `FormController` call; file reads and the save
//! request run in `spawn_local` and come back as messages.

use log::{debug, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use common::error::ImportError;
use common::form::{FieldChange, RecordStore, SubmitOutcome, SubmitStep};
use common::import::DocxExtractor;

use super::helpers::{confirm, read_attachment, reset_file_input};
use super::messages::Msg;
use super::state::CreateDialog;
use crate::services::api::HttpRecordStore;

/// Returns `true` to re-render.
pub fn update(dialog: &mut CreateDialog, ctx: &Context<CreateDialog>, msg: Msg) -> bool {
    match msg {
        Msg::Field(change) => dialog.form.set_field(change),
        Msg::CoverPicked(file) => {
            let Some(ticket) = dialog.form.begin_read() else {
                return false;
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::CoverRead(ticket, read_attachment(file).await));
            });
            false
        }
        Msg::CoverRead(ticket, _) if !dialog.form.accepts_read(ticket) => false,
        Msg::CoverRead(_, Ok(image)) => dialog.form.set_field(FieldChange::CoverImage(image)),
        Msg::CoverRead(_, Err(reason)) => {
            warn!("could not read the cover image: {reason}");
            false
        }
        Msg::WordPicked(file) => {
            let Some(ticket) = dialog.form.begin_read() else {
                return false;
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::WordRead(ticket, read_attachment(file).await));
            });
            false
        }
        Msg::WordRead(ticket, _) if !dialog.form.accepts_read(ticket) => false,
        Msg::WordRead(_, read) => {
            match read {
                Ok(document) => {
                    if let Err(err) = dialog.form.import_document(&DocxExtractor, document) {
                        debug!("word import left the draft unchanged: {err}");
                    }
                }
                Err(reason) => dialog.form.reject_import(&ImportError::Extraction(reason)),
            }
            reset_file_input(&dialog.word_input_ref);
            true
        }
        Msg::RemoveCover => {
            dialog.form.remove_cover_image();
            reset_file_input(&dialog.cover_input_ref);
            true
        }
        Msg::RemoveWordFile => {
            let Some(name) = dialog.form.source_document_name().map(str::to_owned) else {
                return false;
            };
            if !confirm(&format!("Wilt u het document \"{name}\" verwijderen?")) {
                return false;
            }
            dialog.form.remove_source_document();
            reset_file_input(&dialog.word_input_ref);
            true
        }
        Msg::TogglePublished => {
            dialog.form.toggle_published();
            true
        }
        Msg::TogglePreview => {
            dialog.form.toggle_preview();
            true
        }
        Msg::CategoriesLoaded(request, result) => dialog.form.finish_category_fetch(request, result),
        Msg::Submit => match dialog.form.begin_submit() {
            SubmitStep::Ignored => false,
            SubmitStep::Rejected(_) => true,
            SubmitStep::Dispatch(ticket) => {
                let (handle, payload) = ticket.into_parts();
                let store = HttpRecordStore::new(ctx.props().api_base.to_string());
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = store.save(&payload).await;
                    link.send_message(Msg::SaveFinished(handle, result));
                });
                true
            }
        },
        Msg::SaveFinished(handle, result) => match dialog.form.finish_submit(handle, result) {
            SubmitOutcome::Saved => {
                let props = ctx.props();
                props.on_saved.emit(props.kind);
                props.on_close.emit(());
                true
            }
            SubmitOutcome::Stale | SubmitOutcome::Ignored => false,
            SubmitOutcome::Invalid(_) | SubmitOutcome::Failed(_) => true,
        },
        Msg::ShakeEnded(token) => dialog.form.end_shake(token),
        Msg::Cancel => {
            dialog.form.close();
            ctx.props().on_close.emit(());
            true
        }
    }
}
