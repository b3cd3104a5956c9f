use chrono::NaiveDate;
use serde::Serialize;

use crate::model::attachment::Attachment;
use crate::model::category::CategoryId;

/// Create-contract for a new story.
///
/// Field names follow the admin API. Text fields arrive trimmed; `tekst` is trimmed
/// only at its ends so the author's interior whitespace survives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStory {
    pub titel: String,
    pub tekst: String,
    pub beschrijving: String,
    /// Inverse of the dialog's "published" toggle.
    pub is_onzichtbaar: bool,
    pub categorie: CategoryId,
    /// Serialized as `YYYY-MM-DD`.
    pub datum: Option<NaiveDate>,
    pub is_uitgelicht: bool,
    pub is_spotlighted: bool,
    /// Asks the API to render the imported Word document to PDF.
    pub is_downloadable: bool,
    pub url: String,
    pub cover_image: Option<Attachment>,
    pub word_file: Option<Attachment>,
    pub verwijder_omslagfoto: bool,
}
