use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use common::config::DialogConfig;
use common::error::{CategoryFetchError, ImportError, SaveError};
use common::form::{
    CategoryDirectory, DialogPorts, DialogSurface, Draft, FieldChange, FormController,
    NotificationChannel, Phase, PreviewUrls, RecordStore, SubmitOutcome, SubmitStep,
    TransientStore,
};
use common::import::DocxExtractor;
use common::model::attachment::Attachment;
use common::model::category::Category;
use common::model::kind::RecordKind;
use common::model::payload::CreatePayload;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

#[derive(Default)]
struct Notifications(RefCell<Vec<(&'static str, String, String)>>);

impl NotificationChannel for Notifications {
    fn loading(&self, message: &str, id: &str) {
        self.0
            .borrow_mut()
            .push(("loading", message.to_string(), id.to_string()));
    }
    fn success(&self, message: &str, id: &str) {
        self.0
            .borrow_mut()
            .push(("success", message.to_string(), id.to_string()));
    }
    fn error(&self, message: &str, id: &str) {
        self.0
            .borrow_mut()
            .push(("error", message.to_string(), id.to_string()));
    }
}

#[derive(Default)]
struct Transient(RefCell<HashMap<String, String>>);

impl TransientStore for Transient {
    fn set(&self, key: &str, value: &str) {
        self.0.borrow_mut().insert(key.to_string(), value.to_string());
    }
    fn remove(&self, key: &str) {
        self.0.borrow_mut().remove(key);
    }
}

#[derive(Default)]
struct Surface {
    locks: Cell<u32>,
    releases: Cell<u32>,
    scrolls: Cell<u32>,
    shakes: RefCell<Vec<(u64, Duration)>>,
}

impl DialogSurface for Surface {
    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
    fn lock_page_scroll(&self) {
        self.locks.set(self.locks.get() + 1);
    }
    fn release_page_scroll(&self) {
        self.releases.set(self.releases.get() + 1);
    }
    fn schedule_shake_end(&self, token: u64, after: Duration) {
        self.shakes.borrow_mut().push((token, after));
    }
}

#[derive(Default)]
struct Previews {
    created: Cell<u32>,
    revoked: RefCell<Vec<String>>,
}

impl PreviewUrls for Previews {
    fn create(&self, _image: &Attachment) -> Option<String> {
        self.created.set(self.created.get() + 1);
        Some(format!("blob:preview-{}", self.created.get()))
    }
    fn revoke(&self, url: &str) {
        self.revoked.borrow_mut().push(url.to_string());
    }
}

struct Store {
    saved: RefCell<Vec<CreatePayload>>,
    result: Result<(), SaveError>,
}

impl Store {
    fn answering(result: Result<(), SaveError>) -> Self {
        Self {
            saved: RefCell::new(Vec::new()),
            result,
        }
    }
}

#[async_trait(?Send)]
impl RecordStore for Store {
    async fn save(&self, payload: &CreatePayload) -> Result<(), SaveError> {
        self.saved.borrow_mut().push(payload.clone());
        self.result.clone()
    }
}

struct Directory(Result<Vec<Category>, CategoryFetchError>);

#[async_trait(?Send)]
impl CategoryDirectory for Directory {
    async fn list_all(&self) -> Result<Vec<Category>, CategoryFetchError> {
        self.0.clone()
    }
}

struct Harness {
    form: FormController,
    notifications: Rc<Notifications>,
    transient: Rc<Transient>,
    surface: Rc<Surface>,
    previews: Rc<Previews>,
}

impl Harness {
    fn new() -> Self {
        init_logging();
        let notifications = Rc::new(Notifications::default());
        let transient = Rc::new(Transient::default());
        let surface = Rc::new(Surface::default());
        let previews = Rc::new(Previews::default());
        let ports = DialogPorts::default()
            .with_notifications(notifications.clone())
            .with_transient(transient.clone())
            .with_surface(surface.clone())
            .with_previews(previews.clone());
        let form = FormController::new(ports, DialogConfig::default()).with_clock(today);
        Self {
            form,
            notifications,
            transient,
            surface,
            previews,
        }
    }

    fn fill_story(&mut self) {
        self.form.set_field(FieldChange::Title("De draak".into()));
        self.form
            .set_field(FieldChange::Body("Er was eens een draak.".into()));
        self.form.set_field(FieldChange::Category("4".into()));
    }

    fn remembered_filename(&self) -> Option<String> {
        self.transient.0.borrow().get("temp_word_filename").cloned()
    }
}

fn image(name: &str) -> Attachment {
    Attachment::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
}

fn word_file(name: &str) -> Attachment {
    Attachment::new(
        name,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        vec![1, 2, 3],
    )
}

fn hello_world(_: &[u8]) -> Result<String, ImportError> {
    Ok("<p>Hello <strong>world</strong></p>".to_string())
}

fn unreadable(_: &[u8]) -> Result<String, ImportError> {
    Err(ImportError::Archive("invalid Zip archive".into()))
}

#[tokio::test]
async fn empty_story_submit_reports_violations_without_saving() {
    let mut h = Harness::new();
    let store = Store::answering(Ok(()));
    h.form.open(RecordKind::Story);

    let outcome = h.form.submit(&store).await;

    let expected = vec![
        "Titel is verplicht".to_string(),
        "Verhaal is verplicht".to_string(),
        "Categorie is verplicht".to_string(),
    ];
    assert_eq!(outcome, SubmitOutcome::Invalid(expected.clone()));
    assert_eq!(h.form.errors(), expected.as_slice());
    assert!(store.saved.borrow().is_empty());
    assert!(h.form.is_submitted_once());
    assert!(h.form.is_shaking());
    assert_eq!(h.surface.scrolls.get(), 1);
    assert_eq!(
        *h.surface.shakes.borrow(),
        vec![(1, Duration::from_millis(500))]
    );
    assert_eq!(h.form.phase(), Phase::Editing);
}

#[test]
fn second_submit_while_saving_is_ignored() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Story);
    h.fill_story();

    let SubmitStep::Dispatch(ticket) = h.form.begin_submit() else {
        panic!("expected a dispatch");
    };
    assert!(h.form.is_saving());
    assert_eq!(h.form.submit_label(), "Bezig...");
    assert_eq!(h.form.begin_submit(), SubmitStep::Ignored);

    let (handle, _) = ticket.into_parts();
    assert_eq!(h.form.finish_submit(handle, Ok(())), SubmitOutcome::Saved);
    assert!(!h.form.is_open());
}

#[tokio::test]
async fn reopening_always_yields_the_empty_draft() {
    let mut h = Harness::new();
    let store = Store::answering(Err(SaveError::Unknown));
    h.form.open(RecordKind::Story);
    h.fill_story();
    h.form.set_field(FieldChange::CoverImage(image("kaft.png")));
    h.form.submit(&store).await;
    assert!(!h.form.errors().is_empty());

    h.form.open(RecordKind::Story);

    assert_eq!(h.form.draft(), Some(&Draft::empty(RecordKind::Story, today())));
    assert!(h.form.errors().is_empty());
    assert!(!h.form.is_submitted_once());
    assert!(!h.form.is_shaking());
    assert_eq!(h.form.cover_preview_url(), None);

    h.form.open(RecordKind::Category);
    assert_eq!(
        h.form.draft(),
        Some(&Draft::empty(RecordKind::Category, today()))
    );
}

#[test]
fn import_replaces_the_body_and_remembers_the_file() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Story);
    h.form.set_field(FieldChange::Body("oud".into()));

    h.form
        .import_document(&hello_world, word_file("verhaal.docx"))
        .unwrap();

    let draft = h.form.draft().unwrap();
    assert_eq!(draft.body(), "Hello **world**");
    assert_eq!(
        draft.source_document().map(|d| d.name.as_str()),
        Some("verhaal.docx")
    );
    assert_eq!(h.form.source_document_name(), Some("verhaal.docx"));
    assert_eq!(h.remembered_filename().as_deref(), Some("verhaal.docx"));
}

#[test]
fn failed_import_keeps_the_body() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Story);
    h.form.set_field(FieldChange::Body("Mijn eigen tekst".into()));

    let err = h
        .form
        .import_document(&unreadable, word_file("kapot.docx"))
        .unwrap_err();

    assert!(matches!(err, ImportError::Archive(_)));
    assert_eq!(h.form.draft().unwrap().body(), "Mijn eigen tekst");
    assert_eq!(
        h.form.errors(),
        ["Er is een fout opgetreden bij het importeren van het Word document"]
    );
    assert!(h.form.is_shaking());
    assert_eq!(h.form.source_document_name(), None);
    assert_eq!(h.remembered_filename(), None);
}

#[test]
fn real_docx_imports_through_the_controller() {
    let document = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t xml:space="preserve">Hallo </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>wereld</w:t></w:r></w:p>
</w:body></w:document>"#;
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(document).unwrap();
    let bytes = zip.finish().unwrap().into_inner();

    let mut h = Harness::new();
    h.form.open(RecordKind::Category);
    h.form
        .import_document(&DocxExtractor, Attachment::new("intro.docx", "", bytes))
        .unwrap();

    assert_eq!(h.form.draft().unwrap().body(), "Hallo *wereld*");
}

#[tokio::test]
async fn downloadable_story_resolves_its_processing_notification() {
    let mut h = Harness::new();
    let store = Store::answering(Ok(()));
    h.form.open(RecordKind::Story);
    h.fill_story();
    h.form.set_field(FieldChange::Downloadable(true));

    let outcome = h.form.submit(&store).await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(h.form.phase(), Phase::Closed);
    let notes = h.notifications.0.borrow();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].0, "loading");
    assert_eq!(notes[0].1, "Word document wordt verwerkt naar PDF...");
    assert_eq!(notes[1].0, "success");
    assert_eq!(notes[1].1, "PDF succesvol gegenereerd!");
    assert_eq!(notes[0].2, notes[1].2);

    let saved = store.saved.borrow();
    let [CreatePayload::Story(story)] = saved.as_slice() else {
        panic!("expected one saved story");
    };
    assert_eq!(story.titel, "De draak");
    assert_eq!(story.categorie, 4);
    assert_eq!(story.datum, Some(today()));
    assert!(!story.is_onzichtbaar);
    assert!(story.is_downloadable);
}

#[tokio::test]
async fn failed_save_surfaces_the_message_and_allows_retry() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Story);
    h.fill_story();
    h.form.set_field(FieldChange::Downloadable(true));

    let rejected = Store::answering(Err(SaveError::Rejected {
        status: 409,
        message: "Titel bestaat al".into(),
    }));
    let outcome = h.form.submit(&rejected).await;

    assert_eq!(outcome, SubmitOutcome::Failed("Titel bestaat al".into()));
    assert_eq!(h.form.phase(), Phase::Editing);
    assert_eq!(h.form.error_text(), "Titel bestaat al");
    assert!(h.form.is_shaking());
    {
        let notes = h.notifications.0.borrow();
        assert_eq!(notes.last().map(|n| n.0), Some("error"));
        assert_eq!(notes[0].2, notes[1].2);
    }

    let accepted = Store::answering(Ok(()));
    assert_eq!(h.form.submit(&accepted).await, SubmitOutcome::Saved);
    assert_eq!(accepted.saved.borrow().len(), 1);
}

#[tokio::test]
async fn save_failure_without_message_uses_the_generic_text() {
    let mut h = Harness::new();
    let store = Store::answering(Err(SaveError::Unknown));
    h.form.open(RecordKind::Category);
    h.form.set_field(FieldChange::Name("Reizen".into()));

    let outcome = h.form.submit(&store).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Failed("Er is iets misgegaan bij het opslaan".into())
    );
    assert!(h.notifications.0.borrow().is_empty());
}

#[test]
fn response_after_close_is_stale_but_still_resolves_the_notification() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Story);
    h.fill_story();
    h.form.set_field(FieldChange::Downloadable(true));
    let SubmitStep::Dispatch(ticket) = h.form.begin_submit() else {
        panic!("expected a dispatch");
    };

    h.form.close();
    h.form.open(RecordKind::Story);
    let (handle, _) = ticket.into_parts();
    let outcome = h.form.finish_submit(handle, Err(SaveError::Transport("offline".into())));

    assert_eq!(outcome, SubmitOutcome::Stale);
    assert!(h.form.errors().is_empty());
    assert_eq!(h.form.phase(), Phase::Editing);
    assert_eq!(
        h.notifications.0.borrow().last().map(|n| n.0),
        Some("error")
    );
}

#[test]
fn preview_urls_and_scroll_lock_are_released() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Story);
    assert_eq!(h.surface.locks.get(), 1);

    h.form.set_field(FieldChange::CoverImage(image("een.png")));
    h.form.set_field(FieldChange::CoverImage(image("twee.png")));
    assert_eq!(h.form.cover_preview_url(), Some("blob:preview-2"));
    assert_eq!(*h.previews.revoked.borrow(), vec!["blob:preview-1"]);

    h.form.close();
    assert_eq!(
        *h.previews.revoked.borrow(),
        vec!["blob:preview-1", "blob:preview-2"]
    );
    assert_eq!(h.surface.releases.get(), 1);

    h.form.open(RecordKind::Category);
    h.form.open(RecordKind::Story);
    assert_eq!(h.surface.locks.get(), 3);
    assert_eq!(h.surface.releases.get(), 2);
}

#[tokio::test]
async fn removing_the_cover_is_sent_as_an_explicit_intent() {
    let mut h = Harness::new();
    let store = Store::answering(Ok(()));
    h.form.open(RecordKind::Story);
    h.fill_story();
    h.form.set_field(FieldChange::CoverImage(image("kaft.png")));

    h.form.remove_cover_image();
    assert!(h.form.is_cover_removal_requested());
    assert_eq!(h.form.cover_preview_url(), None);
    assert_eq!(*h.previews.revoked.borrow(), vec!["blob:preview-1"]);

    h.form.submit(&store).await;
    let saved = store.saved.borrow();
    let [CreatePayload::Story(story)] = saved.as_slice() else {
        panic!("expected one saved story");
    };
    assert!(story.verwijder_omslagfoto);
    assert_eq!(story.cover_image, None);
}

#[test]
fn picking_a_new_cover_cancels_the_removal() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Category);
    h.form.remove_cover_image();
    h.form.set_field(FieldChange::CoverImage(image("nieuw.png")));

    assert!(!h.form.is_cover_removal_requested());
    assert!(h.form.cover_preview_url().is_some());
}

#[tokio::test]
async fn category_fetch_failure_degrades_to_an_empty_select() {
    let mut h = Harness::new();
    let request = h.form.open(RecordKind::Story).unwrap();
    let directory = Directory(Err(CategoryFetchError("503".into())));

    assert!(h.form.load_categories(request, &directory).await);

    assert!(h.form.categories().is_empty());
    assert_eq!(h.form.errors(), ["Kon categorieën niet ophalen"]);
    h.fill_story();
    h.form.set_field(FieldChange::Title("Nog steeds bewerkbaar".into()));
    assert!(h.form.validate().is_empty());
}

#[tokio::test]
async fn categories_fill_the_select() {
    let mut h = Harness::new();
    let request = h.form.open(RecordKind::Story).unwrap();
    let directory = Directory(Ok(vec![
        Category {
            id: 1,
            name: "Jeugd".into(),
        },
        Category {
            id: 2,
            name: "Reizen".into(),
        },
    ]));

    h.form.load_categories(request, &directory).await;

    let names: Vec<_> = h.form.categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Jeugd", "Reizen"]);
    assert!(h.form.errors().is_empty());
}

#[test]
fn removing_the_source_document_clears_its_text() {
    let mut h = Harness::new();
    h.form.open(RecordKind::Story);
    h.form
        .import_document(&hello_world, word_file("verhaal.docx"))
        .unwrap();
    assert!(h.form.toggle_preview());

    h.form.remove_source_document();

    let draft = h.form.draft().unwrap();
    assert_eq!(draft.body(), "");
    assert!(draft.source_document().is_none());
    assert_eq!(h.form.source_document_name(), None);
    assert!(!h.form.is_preview_visible());
    assert_eq!(h.remembered_filename(), None);
}

#[test]
fn opening_forgets_the_previous_import() {
    let mut h = Harness::new();
    h.transient
        .set("temp_word_filename", "van-vorige-keer.docx");

    h.form.open(RecordKind::Category);

    assert_eq!(h.remembered_filename(), None);
}
