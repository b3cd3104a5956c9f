use serde::Serialize;

use crate::model::category::NewCategory;
use crate::model::kind::RecordKind;
use crate::model::story::NewStory;

/// The mapped draft handed to the record store on a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CreatePayload {
    Story(NewStory),
    Category(NewCategory),
}

impl CreatePayload {
    pub fn kind(&self) -> RecordKind {
        match self {
            CreatePayload::Story(_) => RecordKind::Story,
            CreatePayload::Category(_) => RecordKind::Category,
        }
    }

    /// Whether the save also triggers PDF generation on the API side.
    pub fn is_downloadable(&self) -> bool {
        matches!(self, CreatePayload::Story(story) if story.is_downloadable)
    }
}
