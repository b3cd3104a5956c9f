use std::rc::Rc;

use log::debug;

use super::ports::{DialogSurface, PreviewUrls};
use crate::model::attachment::Attachment;

/// Holds the page scroll lock while alive.
pub struct ScrollLock {
    surface: Rc<dyn DialogSurface>,
}

impl ScrollLock {
    pub fn acquire(surface: Rc<dyn DialogSurface>) -> Self {
        surface.lock_page_scroll();
        Self { surface }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.surface.release_page_scroll();
    }
}

/// A preview URL for one image; revoked when dropped or replaced.
pub struct PreviewSlot {
    urls: Rc<dyn PreviewUrls>,
    url: String,
}

impl PreviewSlot {
    /// `None` when the platform could not produce a URL for `image`.
    pub fn create(urls: Rc<dyn PreviewUrls>, image: &Attachment) -> Option<Self> {
        let url = urls.create(image)?;
        debug!("created preview url for {}", image.name);
        Some(Self { urls, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewSlot {
    fn drop(&mut self) {
        self.urls.revoke(&self.url);
    }
}
