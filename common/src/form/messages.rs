//! User-facing texts of the create dialog.

pub const TITLE_REQUIRED: &str = "Titel is verplicht";
pub const BODY_REQUIRED: &str = "Verhaal is verplicht";
pub const CATEGORY_REQUIRED: &str = "Categorie is verplicht";
pub const NAME_REQUIRED: &str = "Naam is verplicht";
pub const DATE_INVALID: &str = "Datum is ongeldig";

pub const CATEGORIES_UNAVAILABLE: &str = "Kon categorieën niet ophalen";
pub const IMPORT_FAILED: &str =
    "Er is een fout opgetreden bij het importeren van het Word document";
pub const SAVE_FAILED: &str = "Er is iets misgegaan bij het opslaan";

pub const PDF_PROCESSING: &str = "Word document wordt verwerkt naar PDF...";
pub const PDF_READY: &str = "PDF succesvol gegenereerd!";
pub const PDF_FAILED: &str = "Er is een fout opgetreden bij het genereren van de PDF";

pub const SUBMIT_BUSY: &str = "Bezig...";
pub const SUBMIT_PUBLISH_STORY: &str = "Verhaal Publiceren";
pub const SUBMIT_SAVE_STORY: &str = "Verhaal Opslaan";
pub const SUBMIT_SAVE: &str = "Opslaan";
