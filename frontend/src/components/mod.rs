pub mod dialogs;
pub mod header;
pub mod modal;
