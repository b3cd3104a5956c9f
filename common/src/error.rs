//! Error taxonomy of the create dialog.
//!
//! None of these are fatal: each one returns the dialog to editing with feedback.

use thiserror::Error;

/// The picked file could not be turned into markup text. The draft is left untouched.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("not a readable document archive: {0}")]
    Archive(String),
    #[error("document archive has no `{0}` part")]
    MissingPart(&'static str),
    #[error("malformed document xml: {0}")]
    Xml(String),
    #[error("document extraction failed: {0}")]
    Extraction(String),
}

/// The record store refused or failed the save. The user may retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("save rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("save request failed: {0}")]
    Transport(String),
    #[error("save failed")]
    Unknown,
}

impl SaveError {
    /// The collaborator's own message, when it gave a usable one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            SaveError::Rejected { message, .. } | SaveError::Transport(message)
                if !message.trim().is_empty() =>
            {
                Some(message.trim())
            }
            _ => None,
        }
    }
}

/// The category directory could not be listed; the form degrades to an empty select.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not fetch categories: {0}")]
pub struct CategoryFetchError(pub String);

/// One or more required fields are missing, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .violations.join("\n"))]
pub struct ValidationError {
    pub violations: Vec<String>,
}
