//! The create dialog's form: draft shapes, validation, collaborator ports and the
//! lifecycle controller tying them together.

mod controller;
mod draft;
pub mod messages;
mod ports;
mod resources;

pub use controller::{
    CategoryRequest, FormController, Phase, ReadTicket, SubmitHandle, SubmitOutcome, SubmitStep,
    SubmitTicket,
};
pub use draft::{CategoryDraft, Draft, FieldChange, InputValue, StoryDraft};
pub use ports::{
    CategoryDirectory, DialogPorts, DialogSurface, NotificationChannel, PreviewUrls, RecordStore,
    Silent, TransientStore,
};
pub use resources::{PreviewSlot, ScrollLock};
