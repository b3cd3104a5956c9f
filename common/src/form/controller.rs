use chrono::{Local, NaiveDate};
use log::{debug, info, warn};
use uuid::Uuid;

use super::draft::{Draft, FieldChange};
use super::messages;
use super::ports::{CategoryDirectory, DialogPorts, RecordStore};
use super::resources::{PreviewSlot, ScrollLock};
use crate::config::DialogConfig;
use crate::error::{CategoryFetchError, ImportError, SaveError, ValidationError};
use crate::import::{DocumentExtractor, normalize};
use crate::model::attachment::Attachment;
use crate::model::category::Category;
use crate::model::kind::RecordKind;
use crate::model::payload::CreatePayload;

/// Coarse lifecycle state, as the view needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Editing,
    Submitting,
}

/// Issued by [`FormController::open`] for story dialogs; hand the directory's
/// answer back through [`FormController::finish_category_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRequest {
    session: u64,
}

/// Issued when a picked file starts loading. A read finishing after the dialog
/// closed or reopened is checked against it with [`FormController::accepts_read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket {
    session: u64,
}

/// Identifies one dispatched save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitHandle {
    generation: u64,
    notification: Option<String>,
}

impl SubmitHandle {
    /// Correlation id of the "processing" notification, when one was shown.
    pub fn notification_id(&self) -> Option<&str> {
        self.notification.as_deref()
    }
}

/// A validated payload ready to be handed to the record store.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    handle: SubmitHandle,
    payload: CreatePayload,
}

impl SubmitTicket {
    pub fn payload(&self) -> &CreatePayload {
        &self.payload
    }

    pub fn into_parts(self) -> (SubmitHandle, CreatePayload) {
        (self.handle, self.payload)
    }
}

/// What [`FormController::begin_submit`] decided.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitStep {
    /// Closed, or a save is already in flight.
    Ignored,
    /// Required fields are missing; the violations are now the dialog's errors.
    Rejected(Vec<String>),
    /// Save the ticket's payload, then call [`FormController::finish_submit`].
    Dispatch(SubmitTicket),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Ignored,
    Invalid(Vec<String>),
    Saved,
    /// The store failed; carries the message now shown to the user.
    Failed(String),
    /// The response belonged to a submit the dialog no longer waits for.
    Stale,
}

enum DialogState {
    Closed,
    Open(Box<OpenDialog>),
}

struct OpenDialog {
    session: u64,
    draft: Draft,
    errors: Vec<String>,
    submitted_once: bool,
    in_flight: Option<u64>,
    shaking: bool,
    preview_visible: bool,
    remove_cover_requested: bool,
    source_document_name: Option<String>,
    categories: Vec<Category>,
    cover_preview: Option<PreviewSlot>,
    _scroll_lock: ScrollLock,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Owns the draft and every piece of ephemeral dialog state between `open` and
/// `close`.
///
/// All I/O goes through ports: synchronous effects through [`DialogPorts`], the
/// save and the category listing through the caller, who reports results back.
/// Each open and each submit takes a new generation number; results carrying an
/// older one are dropped.
pub struct FormController {
    state: DialogState,
    ports: DialogPorts,
    config: DialogConfig,
    clock: fn() -> NaiveDate,
    generation: u64,
    shake_token: u64,
}

impl FormController {
    pub fn new(ports: DialogPorts, config: DialogConfig) -> Self {
        Self {
            state: DialogState::Closed,
            ports,
            config,
            clock: today,
            generation: 0,
            shake_token: 0,
        }
    }

    /// Replaces the source of "today" used for a new story's date.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// Starts a fresh draft of `kind`, discarding whatever was open before.
    ///
    /// Returns a request for the category listing when the draft needs one.
    pub fn open(&mut self, kind: RecordKind) -> Option<CategoryRequest> {
        // Release the previous dialog's guards before acquiring new ones.
        self.state = DialogState::Closed;
        self.generation += 1;
        let session = self.generation;

        self.ports
            .transient
            .remove(&self.config.transient_filename_key);
        let scroll_lock = ScrollLock::acquire(self.ports.surface.clone());

        self.state = DialogState::Open(Box::new(OpenDialog {
            session,
            draft: Draft::empty(kind, (self.clock)()),
            errors: Vec::new(),
            submitted_once: false,
            in_flight: None,
            shaking: false,
            preview_visible: false,
            remove_cover_requested: false,
            source_document_name: None,
            categories: Vec::new(),
            cover_preview: None,
            _scroll_lock: scroll_lock,
        }));
        debug!("opened {kind} dialog (session {session})");

        (kind == RecordKind::Story).then_some(CategoryRequest { session })
    }

    /// Discards the draft. Any save still in flight will come back as stale.
    pub fn close(&mut self) {
        if let DialogState::Open(open) = &self.state {
            debug!("closing {} dialog (session {})", open.draft.kind(), open.session);
        }
        self.generation += 1;
        self.state = DialogState::Closed;
    }

    pub fn finish_category_fetch(
        &mut self,
        request: CategoryRequest,
        result: Result<Vec<Category>, CategoryFetchError>,
    ) -> bool {
        let Some(open) = self
            .open_mut()
            .filter(|open| open.session == request.session)
        else {
            debug!("dropping category listing for session {}", request.session);
            return false;
        };

        match result {
            Ok(categories) => {
                debug!("loaded {} categories", categories.len());
                open.categories = categories;
            }
            Err(err) => {
                warn!("{err}");
                open.categories.clear();
                open.errors.push(messages::CATEGORIES_UNAVAILABLE.to_string());
            }
        }
        true
    }

    pub async fn load_categories(
        &mut self,
        request: CategoryRequest,
        directory: &dyn CategoryDirectory,
    ) -> bool {
        let result = directory.list_all().await;
        self.finish_category_fetch(request, result)
    }

    /// Applies one field edit. A new cover image gets a fresh preview URL and
    /// cancels a pending removal.
    pub fn set_field(&mut self, change: FieldChange) -> bool {
        let previews = self.ports.previews.clone();
        let Some(open) = self.open_mut() else {
            return false;
        };

        if let FieldChange::CoverImage(image) = &change {
            open.cover_preview = PreviewSlot::create(previews, image);
            open.remove_cover_requested = false;
        }
        open.draft.apply(change)
    }

    /// Drops the cover image and asks the store to delete any existing one.
    pub fn remove_cover_image(&mut self) {
        if let Some(open) = self.open_mut() {
            open.draft.set_cover_image(None);
            open.cover_preview = None;
            open.remove_cover_requested = true;
        }
    }

    pub fn toggle_published(&mut self) -> bool {
        let Some(open) = self.open_mut() else {
            return false;
        };
        match &mut open.draft {
            Draft::Story(story) => {
                story.published = !story.published;
                story.published
            }
            Draft::Category(_) => true,
        }
    }

    /// Shows or hides the rendered body. Stays hidden while the body is blank.
    pub fn toggle_preview(&mut self) -> bool {
        let Some(open) = self.open_mut() else {
            return false;
        };
        if open.preview_visible {
            open.preview_visible = false;
        } else if !open.draft.body().trim().is_empty() {
            open.preview_visible = true;
        }
        open.preview_visible
    }

    /// Replaces the body with the normalized text of `document`.
    ///
    /// On failure the draft is left as it was and the dialog shows an import error.
    pub fn import_document(
        &mut self,
        extractor: &dyn DocumentExtractor,
        document: Attachment,
    ) -> Result<(), ImportError> {
        if !self.is_open() {
            debug!("ignoring import of {} into a closed dialog", document.name);
            return Ok(());
        }

        match normalize(extractor, &document.bytes) {
            Ok(text) => {
                info!(
                    "imported {} ({} bytes) as {} chars of body text",
                    document.name,
                    document.len(),
                    text.as_str().len()
                );
                self.ports
                    .transient
                    .set(&self.config.transient_filename_key, &document.name);
                if let Some(open) = self.open_mut() {
                    open.source_document_name = Some(document.name.clone());
                    open.draft.set_body(text.into_string());
                    open.draft.set_source_document(Some(document));
                }
                Ok(())
            }
            Err(err) => {
                warn!("import of {} failed", document.name);
                self.reject_import(&err);
                Err(err)
            }
        }
    }

    /// Shows the import error without touching the draft, e.g. when the picked
    /// file could not even be read.
    pub fn reject_import(&mut self, err: &ImportError) {
        warn!("document import rejected: {err}");
        self.report(vec![messages::IMPORT_FAILED.to_string()]);
    }

    /// Forgets the imported document together with the text it produced.
    pub fn remove_source_document(&mut self) {
        let Some(open) = self.open_mut() else {
            return;
        };
        open.source_document_name = None;
        open.preview_visible = false;
        open.draft.set_body(String::new());
        open.draft.set_source_document(None);
        self.ports
            .transient
            .remove(&self.config.transient_filename_key);
    }

    /// Ticket for a file read started now, or `None` while closed.
    pub fn begin_read(&self) -> Option<ReadTicket> {
        self.open_dialog().map(|open| ReadTicket {
            session: open.session,
        })
    }

    /// Whether a read started under `ticket` still belongs to the open dialog.
    pub fn accepts_read(&self, ticket: ReadTicket) -> bool {
        let current = self
            .open_dialog()
            .is_some_and(|open| open.session == ticket.session);
        if !current {
            debug!("dropping file read of session {}", ticket.session);
        }
        current
    }

    pub fn validate(&self) -> Vec<String> {
        self.draft().map(Draft::validate).unwrap_or_default()
    }

    /// First half of a submit: validate, map, and hand out the payload to save.
    pub fn begin_submit(&mut self) -> SubmitStep {
        let Some(open) = self.open_mut() else {
            return SubmitStep::Ignored;
        };
        if open.in_flight.is_some() {
            debug!("submit ignored: a save is already in flight");
            return SubmitStep::Ignored;
        }

        open.submitted_once = true;
        open.errors.clear();
        let payload = match open.draft.to_payload(open.remove_cover_requested) {
            Ok(payload) => payload,
            Err(ValidationError { violations }) => {
                warn!("submit rejected with {} violation(s)", violations.len());
                self.report(violations.clone());
                return SubmitStep::Rejected(violations);
            }
        };

        self.generation += 1;
        let generation = self.generation;
        if let Some(open) = self.open_mut() {
            open.in_flight = Some(generation);
        }

        let notification = payload
            .is_downloadable()
            .then(|| Uuid::new_v4().to_string());
        if let Some(id) = &notification {
            self.ports
                .notifications
                .loading(messages::PDF_PROCESSING, id);
        }
        self.ports.surface.scroll_to_top();
        debug!("dispatching {} save (generation {generation})", payload.kind());

        SubmitStep::Dispatch(SubmitTicket {
            handle: SubmitHandle {
                generation,
                notification,
            },
            payload,
        })
    }

    /// Second half of a submit: apply the store's answer.
    ///
    /// The "processing" notification is resolved even when the answer is stale.
    pub fn finish_submit(
        &mut self,
        handle: SubmitHandle,
        result: Result<(), SaveError>,
    ) -> SubmitOutcome {
        if let Some(id) = handle.notification_id() {
            match &result {
                Ok(()) => self.ports.notifications.success(messages::PDF_READY, id),
                Err(_) => self.ports.notifications.error(messages::PDF_FAILED, id),
            }
        }

        let awaited = matches!(
            &self.state,
            DialogState::Open(open) if open.in_flight == Some(handle.generation)
        );
        if !awaited {
            debug!("dropping save response of superseded submit {}", handle.generation);
            return SubmitOutcome::Stale;
        }

        match result {
            Ok(()) => {
                info!("saved new record (generation {})", handle.generation);
                self.close();
                SubmitOutcome::Saved
            }
            Err(err) => {
                warn!("save failed: {err}");
                let message = err
                    .user_message()
                    .unwrap_or(messages::SAVE_FAILED)
                    .to_string();
                if let Some(open) = self.open_mut() {
                    open.in_flight = None;
                }
                self.report(vec![message.clone()]);
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Runs a whole submit against `store`.
    pub async fn submit(&mut self, store: &dyn RecordStore) -> SubmitOutcome {
        match self.begin_submit() {
            SubmitStep::Ignored => SubmitOutcome::Ignored,
            SubmitStep::Rejected(violations) => SubmitOutcome::Invalid(violations),
            SubmitStep::Dispatch(ticket) => {
                let (handle, payload) = ticket.into_parts();
                let result = store.save(&payload).await;
                self.finish_submit(handle, result)
            }
        }
    }

    /// Ends the shake started with `token`; older tokens are ignored.
    pub fn end_shake(&mut self, token: u64) -> bool {
        if token != self.shake_token {
            return false;
        }
        match self.open_mut() {
            Some(open) if open.shaking => {
                open.shaking = false;
                true
            }
            _ => false,
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.state {
            DialogState::Closed => Phase::Closed,
            DialogState::Open(open) if open.in_flight.is_some() => Phase::Submitting,
            DialogState::Open(_) => Phase::Editing,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DialogState::Open(_))
    }

    pub fn is_saving(&self) -> bool {
        self.phase() == Phase::Submitting
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.open_dialog().map(|open| &open.draft)
    }

    pub fn kind(&self) -> Option<RecordKind> {
        self.draft().map(Draft::kind)
    }

    pub fn errors(&self) -> &[String] {
        self.open_dialog()
            .map(|open| open.errors.as_slice())
            .unwrap_or_default()
    }

    pub fn error_text(&self) -> String {
        self.errors().join("\n")
    }

    pub fn is_submitted_once(&self) -> bool {
        self.open_dialog().is_some_and(|open| open.submitted_once)
    }

    pub fn is_shaking(&self) -> bool {
        self.open_dialog().is_some_and(|open| open.shaking)
    }

    pub fn is_preview_visible(&self) -> bool {
        self.open_dialog().is_some_and(|open| open.preview_visible)
    }

    pub fn is_cover_removal_requested(&self) -> bool {
        self.open_dialog().is_some_and(|open| open.remove_cover_requested)
    }

    pub fn cover_preview_url(&self) -> Option<&str> {
        self.open_dialog()
            .and_then(|open| open.cover_preview.as_ref())
            .map(PreviewSlot::url)
    }

    pub fn source_document_name(&self) -> Option<&str> {
        self.open_dialog()
            .and_then(|open| open.source_document_name.as_deref())
    }

    pub fn categories(&self) -> &[Category] {
        self.open_dialog()
            .map(|open| open.categories.as_slice())
            .unwrap_or_default()
    }

    pub fn dialog_title(&self) -> &'static str {
        self.kind().unwrap_or(RecordKind::Story).dialog_title()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_saving() {
            return messages::SUBMIT_BUSY;
        }
        match self.draft() {
            Some(Draft::Story(story)) if story.published => messages::SUBMIT_PUBLISH_STORY,
            Some(Draft::Story(_)) => messages::SUBMIT_SAVE_STORY,
            _ => messages::SUBMIT_SAVE,
        }
    }

    pub fn config(&self) -> &DialogConfig {
        &self.config
    }

    fn open_dialog(&self) -> Option<&OpenDialog> {
        match &self.state {
            DialogState::Open(open) => Some(open),
            DialogState::Closed => None,
        }
    }

    fn open_mut(&mut self) -> Option<&mut OpenDialog> {
        match &mut self.state {
            DialogState::Open(open) => Some(open),
            DialogState::Closed => None,
        }
    }

    /// Shows `errors`, shakes the dialog and scrolls them into view.
    fn report(&mut self, errors: Vec<String>) {
        let Some(open) = self.open_mut() else {
            return;
        };
        open.errors = errors;
        open.shaking = true;

        self.shake_token += 1;
        self.ports
            .surface
            .schedule_shake_end(self.shake_token, self.config.shake_duration);
        self.ports.surface.scroll_to_top();
    }
}
