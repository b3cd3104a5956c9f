//! Collaborators the dialog talks to. The browser implementations live in the
//! frontend; tests supply recording fakes.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CategoryFetchError, SaveError};
use crate::model::attachment::Attachment;
use crate::model::category::Category;
use crate::model::payload::CreatePayload;

/// Persists a new record. A save that reports failure without an error body
/// should come back as [`SaveError::Unknown`].
#[async_trait(?Send)]
pub trait RecordStore {
    async fn save(&self, payload: &CreatePayload) -> Result<(), SaveError>;
}

/// Lists the categories a story can be filed under.
#[async_trait(?Send)]
pub trait CategoryDirectory {
    async fn list_all(&self) -> Result<Vec<Category>, CategoryFetchError>;
}

/// Toast-style notifications correlated by `id`: a later call with the same id
/// replaces the earlier one.
pub trait NotificationChannel {
    /// Stays visible until replaced.
    fn loading(&self, message: &str, id: &str);
    fn success(&self, message: &str, id: &str);
    fn error(&self, message: &str, id: &str);
}

/// Small string store that outlives the dialog (browser local storage).
pub trait TransientStore {
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Page-level effects of the open dialog.
pub trait DialogSurface {
    /// Brings the top of the dialog, where errors are listed, into view.
    fn scroll_to_top(&self);
    fn lock_page_scroll(&self);
    fn release_page_scroll(&self);
    /// Arranges for `FormController::end_shake(token)` to be called after `after`.
    fn schedule_shake_end(&self, token: u64, after: Duration);
}

/// Displayable URLs for in-memory images.
pub trait PreviewUrls {
    fn create(&self, image: &Attachment) -> Option<String>;
    fn revoke(&self, url: &str);
}

/// Does nothing. Default for every synchronous port.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NotificationChannel for Silent {
    fn loading(&self, _message: &str, _id: &str) {}
    fn success(&self, _message: &str, _id: &str) {}
    fn error(&self, _message: &str, _id: &str) {}
}

impl TransientStore for Silent {
    fn set(&self, _key: &str, _value: &str) {}
    fn remove(&self, _key: &str) {}
}

impl DialogSurface for Silent {
    fn scroll_to_top(&self) {}
    fn lock_page_scroll(&self) {}
    fn release_page_scroll(&self) {}
    fn schedule_shake_end(&self, _token: u64, _after: Duration) {}
}

impl PreviewUrls for Silent {
    fn create(&self, _image: &Attachment) -> Option<String> {
        None
    }
    fn revoke(&self, _url: &str) {}
}

/// The synchronous collaborators a [`FormController`](super::FormController) holds
/// for its whole life. The async store and directory are passed per call.
#[derive(Clone)]
pub struct DialogPorts {
    pub notifications: Rc<dyn NotificationChannel>,
    pub transient: Rc<dyn TransientStore>,
    pub surface: Rc<dyn DialogSurface>,
    pub previews: Rc<dyn PreviewUrls>,
}

impl Default for DialogPorts {
    fn default() -> Self {
        Self {
            notifications: Rc::new(Silent),
            transient: Rc::new(Silent),
            surface: Rc::new(Silent),
            previews: Rc::new(Silent),
        }
    }
}

impl DialogPorts {
    pub fn with_notifications(mut self, notifications: Rc<dyn NotificationChannel>) -> Self {
        self.notifications = notifications;
        self
    }

    pub fn with_transient(mut self, transient: Rc<dyn TransientStore>) -> Self {
        self.transient = transient;
        self
    }

    pub fn with_surface(mut self, surface: Rc<dyn DialogSurface>) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_previews(mut self, previews: Rc<dyn PreviewUrls>) -> Self {
        self.previews = previews;
        self
    }
}
