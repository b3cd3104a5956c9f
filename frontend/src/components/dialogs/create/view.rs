//! View rendering for the create dialog.
//!
//! One form per record kind, both inside the shared `Modal`. All labels and
//! messages are Dutch. Required fields get a red marker and border once a
//! submit was attempted.

use yew::html::Scope;
use yew::prelude::*;

use common::form::{CategoryDraft, Draft, FieldChange, StoryDraft};
use common::model::kind::RecordKind;

use super::helpers::{control_value, missing_class, picked_file};
use super::messages::Msg;
use super::preview::render_markup;
use super::state::CreateDialog;
use crate::components::modal::Modal;

pub fn view(dialog: &CreateDialog, ctx: &Context<CreateDialog>) -> Html {
    let form = &dialog.form;
    let Some(draft) = form.draft() else {
        return html! {};
    };
    let link = ctx.link();
    let onsubmit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Submit
    });

    html! {
        <Modal
            on_close={link.callback(|_| Msg::Cancel)}
            node_ref={dialog.panel_ref.clone()}
            shaking={form.is_shaking()}
            class="create-dialog"
        >
            <div class="dialog-body">
                <h2 class="dialog-title">{ form.dialog_title() }</h2>
                if !form.errors().is_empty() {
                    <div class="error-box" style="white-space: pre-line;">{ form.error_text() }</div>
                }
                <form {onsubmit}>
                    {
                        match draft {
                            Draft::Story(story) => story_fields(dialog, story, link),
                            Draft::Category(category) => category_fields(dialog, category, link),
                        }
                    }
                    { word_import(dialog, link) }
                    { actions(dialog, link) }
                </form>
            </div>
            { preview_overlay(dialog, draft, link) }
        </Modal>
    }
}

/// Change handler shared by every text, select and checkbox control; the
/// control's `name` picks the draft field.
fn on_control<E>(link: &Scope<CreateDialog>, kind: RecordKind) -> Callback<E>
where
    E: AsRef<web_sys::Event> + 'static,
{
    link.batch_callback(move |e: E| {
        let target = e.as_ref().target()?;
        let (name, value) = control_value(&target)?;
        FieldChange::from_input(kind, &name, value).map(Msg::Field)
    })
}

fn required_label(text: &str, submitted_once: bool) -> Html {
    let marker = if submitted_once { "required flagged" } else { "required" };
    html! {
        <label class="field-label">
            { text }{ " " }<span class={marker}>{ "*" }</span>
        </label>
    }
}

fn story_fields(dialog: &CreateDialog, story: &StoryDraft, link: &Scope<CreateDialog>) -> Html {
    let form = &dialog.form;
    let submitted = form.is_submitted_once();
    let kind = RecordKind::Story;
    let selected = story.category_id();
    let category_missing = (submitted && selected.is_none()).then_some("invalid");
    let body_blank = story.body.trim().is_empty();

    html! {
        <div class="story-fields">
            <div class="field-row">
                <div class="field-column">
                    <div>
                        { required_label("Titel", submitted) }
                        <input
                            type="text"
                            name="title"
                            class={classes!("field", missing_class(submitted, &story.title))}
                            value={story.title.clone()}
                            oninput={on_control::<InputEvent>(link, kind)}
                        />
                    </div>
                    <div>
                        { required_label("Categorie", submitted) }
                        <select
                            name="category"
                            class={classes!("field", category_missing)}
                            onchange={on_control::<Event>(link, kind)}
                        >
                            <option value="" selected={selected.is_none()}>
                                { "Selecteer een categorie" }
                            </option>
                            { for form.categories().iter().map(|category| html! {
                                <option
                                    key={category.id}
                                    value={category.id.to_string()}
                                    selected={selected == Some(category.id)}
                                >
                                    { category.name.clone() }
                                </option>
                            }) }
                        </select>
                    </div>
                    <div>
                        <label class="field-label">{ "Datum" }</label>
                        <input
                            type="date"
                            name="date"
                            class="field"
                            value={story.date.clone()}
                            onchange={on_control::<Event>(link, kind)}
                        />
                    </div>
                    <div class="flags">
                        { checkbox("is_uitgelicht", "Uitgelicht", story.featured, link, kind) }
                        { checkbox("is_spotlighted", "Spotlight", story.spotlighted, link, kind) }
                        { checkbox("is_downloadable", "Download als pdf", story.downloadable, link, kind) }
                    </div>
                </div>
                <div class="field-column">
                    { cover_picker(dialog, link) }
                    <button
                        type="button"
                        class="publish-toggle"
                        aria-pressed={story.published.to_string()}
                        title={if story.published { "Verhaal verbergen" } else { "Verhaal publiceren" }}
                        onclick={link.callback(|_| Msg::TogglePublished)}
                    >
                        <i class="material-icons">
                            { if story.published { "visibility" } else { "visibility_off" } }
                        </i>
                        { "Publiceer" }
                    </button>
                </div>
            </div>
            <div>
                <label class="field-label">{ "Korte beschrijving" }</label>
                <textarea
                    name="description"
                    rows="2"
                    class="field"
                    value={story.summary.clone()}
                    oninput={on_control::<InputEvent>(link, kind)}
                />
            </div>
            <div>
                <div class="label-row">
                    { required_label("Verhaal", submitted) }
                    <button
                        type="button"
                        class="preview-toggle"
                        disabled={body_blank}
                        title={if body_blank { "Geen preview beschikbaar" } else { "Preview verhaal" }}
                        onclick={link.callback(|_| Msg::TogglePreview)}
                    >
                        <i class="material-icons">{ "article" }</i>
                    </button>
                </div>
                <textarea
                    name="text"
                    rows="10"
                    class={classes!("field", missing_class(submitted, &story.body))}
                    value={story.body.clone()}
                    oninput={on_control::<InputEvent>(link, kind)}
                />
            </div>
            <div>
                <label class="field-label">{ "URL" }</label>
                <input
                    type="url"
                    name="url"
                    class="field"
                    placeholder="https://example.com"
                    value={story.external_url.clone()}
                    oninput={on_control::<InputEvent>(link, kind)}
                />
            </div>
        </div>
    }
}

fn category_fields(
    dialog: &CreateDialog,
    category: &CategoryDraft,
    link: &Scope<CreateDialog>,
) -> Html {
    let submitted = dialog.form.is_submitted_once();
    let kind = RecordKind::Category;

    html! {
        <div class="category-fields">
            <div>
                { required_label("Naam", submitted) }
                <input
                    type="text"
                    name="naam"
                    class={classes!("field", missing_class(submitted, &category.name))}
                    value={category.name.clone()}
                    oninput={on_control::<InputEvent>(link, kind)}
                />
            </div>
            <div>
                <label class="field-label">{ "Beschrijving" }</label>
                <textarea
                    name="beschrijving"
                    rows="3"
                    class="field"
                    value={category.description.clone()}
                    oninput={on_control::<InputEvent>(link, kind)}
                />
            </div>
            { checkbox("is_uitgelicht", "Uitgelicht", category.featured, link, kind) }
            <div>
                <label class="field-label">{ "Cover Afbeelding" }</label>
                { cover_picker(dialog, link) }
            </div>
        </div>
    }
}

fn checkbox(
    name: &'static str,
    text: &'static str,
    checked: bool,
    link: &Scope<CreateDialog>,
    kind: RecordKind,
) -> Html {
    html! {
        <label class="checkbox">
            <input type="checkbox" {name} {checked} onchange={on_control::<Event>(link, kind)} />
            { text }
        </label>
    }
}

fn cover_picker(dialog: &CreateDialog, link: &Scope<CreateDialog>) -> Html {
    let onchange = link.batch_callback(|e: Event| {
        e.target().and_then(|t| picked_file(&t)).map(Msg::CoverPicked)
    });
    let remove = link.callback(|e: MouseEvent| {
        e.stop_propagation();
        Msg::RemoveCover
    });

    html! {
        <div class="cover-picker">
            <input
                type="file"
                name="cover_image"
                accept="image/*"
                tabindex="-1"
                ref={dialog.cover_input_ref.clone()}
                {onchange}
            />
            if let Some(url) = dialog.form.cover_preview_url() {
                <img src={url.to_string()} alt="Preview omslag" />
                <span class="replace-hint">{ "Klik om te vervangen" }</span>
                <button type="button" class="remove-cover" title="Verwijder omslagfoto" onclick={remove}>
                    { "✕" }
                </button>
            } else {
                <span class="cover-hint">{ "Klik om omslagfoto toe te voegen" }</span>
            }
        </div>
    }
}

fn word_import(dialog: &CreateDialog, link: &Scope<CreateDialog>) -> Html {
    let content = match dialog.form.source_document_name() {
        Some(name) => html! {
            <div class="word-file loaded">
                <i class="material-icons">{ "check_circle" }</i>
                <span class="file-name">{ name.to_string() }</span>
                if dialog.form.kind() == Some(RecordKind::Category) {
                    <button type="button" title="Preview tekst" onclick={link.callback(|_| Msg::TogglePreview)}>
                        <i class="material-icons">{ "article" }</i>
                    </button>
                }
                <button type="button" title="Verwijder document" onclick={link.callback(|_| Msg::RemoveWordFile)}>
                    { "✕" }
                </button>
            </div>
        },
        None => {
            let onchange = link.batch_callback(|e: Event| {
                e.target().and_then(|t| picked_file(&t)).map(Msg::WordPicked)
            });
            html! {
                <label class="word-file">
                    <i class="material-icons">{ "description" }</i>
                    <span>{ "Word document importeren" }</span>
                    <input
                        type="file"
                        accept=".docx"
                        class="sr-only"
                        ref={dialog.word_input_ref.clone()}
                        {onchange}
                    />
                </label>
            }
        }
    };

    html! {
        <div class="word-import">
            <label class="field-label">{ "Word Document" }</label>
            { content }
        </div>
    }
}

fn actions(dialog: &CreateDialog, link: &Scope<CreateDialog>) -> Html {
    let form = &dialog.form;
    let publishing = form.draft().is_some_and(|draft| {
        draft.kind() == RecordKind::Story && draft.is_published()
    });

    html! {
        <div class="dialog-actions">
            <button type="button" class="cancel" onclick={link.callback(|_| Msg::Cancel)}>
                { "Annuleren" }
            </button>
            <button
                type="submit"
                class={classes!("submit", if publishing { "publish" } else { "save" })}
                disabled={form.is_saving()}
            >
                { form.submit_label() }
            </button>
        </div>
    }
}

fn preview_overlay(dialog: &CreateDialog, draft: &Draft, link: &Scope<CreateDialog>) -> Html {
    if !dialog.form.is_preview_visible() {
        return html! {};
    }
    let rendered = AttrValue::from(render_markup(draft.body()));

    html! {
        <div class="preview-overlay">
            <div class="preview-panel">
                <div class="preview-header">
                    <h3>{ "Preview" }</h3>
                    <button type="button" onclick={link.callback(|_| Msg::TogglePreview)}>
                        { "✕" }
                    </button>
                </div>
                <div class="prose">{ Html::from_html_unchecked(rendered) }</div>
            </div>
        </div>
    }
}
