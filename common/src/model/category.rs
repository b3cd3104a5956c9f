use serde::{Deserialize, Serialize};

use crate::model::attachment::Attachment;

/// Identifier of a category as issued by the admin API.
pub type CategoryId = i64;

/// One entry of the category directory, as offered in the story form's select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    #[serde(rename = "naam")]
    pub name: String,
}

/// Create-contract for a new category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub naam: String,
    pub beschrijving: String,
    pub is_uitgelicht: bool,
    pub cover_image: Option<Attachment>,
    pub word_file: Option<Attachment>,
    /// Set when the user explicitly removed the cover, as opposed to never picking one.
    pub verwijder_omslagfoto: bool,
}
