use chrono::NaiveDate;
use log::{debug, warn};

use super::messages;
use crate::error::ValidationError;
use crate::model::attachment::Attachment;
use crate::model::category::{CategoryId, NewCategory};
use crate::model::kind::RecordKind;
use crate::model::payload::CreatePayload;
use crate::model::story::NewStory;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields of a story being created.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryDraft {
    pub title: String,
    /// Kept exactly as typed or imported; trimmed only when mapped to the payload.
    pub body: String,
    pub summary: String,
    pub published: bool,
    /// Raw value of the category select; empty means "none selected".
    pub category: String,
    pub cover_image: Option<Attachment>,
    /// Raw value of the date input, `YYYY-MM-DD` or empty.
    pub date: String,
    pub spotlighted: bool,
    pub featured: bool,
    pub downloadable: bool,
    pub external_url: String,
    pub source_document: Option<Attachment>,
}

impl StoryDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            summary: String::new(),
            published: true,
            category: String::new(),
            cover_image: None,
            date: today.format(DATE_FORMAT).to_string(),
            spotlighted: false,
            featured: false,
            downloadable: false,
            external_url: String::new(),
            source_document: None,
        }
    }

    /// The selected category, when the select holds a numeric id.
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.trim().parse().ok()
    }

    /// The date input as a calendar date. Empty is `Ok(None)`.
    pub fn parsed_date(&self) -> Result<Option<NaiveDate>, chrono::ParseError> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Some)
    }
}

/// Fields of a category being created.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub featured: bool,
    pub cover_image: Option<Attachment>,
    pub source_document: Option<Attachment>,
    /// Imported text shown for preview only; not part of the payload.
    pub body: String,
}

/// The record being edited, one shape per [`RecordKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Story(StoryDraft),
    Category(CategoryDraft),
}

/// One edit coming from the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Title(String),
    Body(String),
    Summary(String),
    /// Raw value of the category select; empty means "none selected".
    Category(String),
    /// Raw value of the date input, `YYYY-MM-DD` or empty.
    Date(String),
    ExternalUrl(String),
    Published(bool),
    Spotlighted(bool),
    Featured(bool),
    Downloadable(bool),
    Name(String),
    Description(String),
    CoverImage(Attachment),
}

/// Value delivered by a form control's change event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Text(String),
    Checked(bool),
    File(Attachment),
}

impl FieldChange {
    /// Name of the edited field, for logs that must not carry its contents.
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldChange::Title(_) => "title",
            FieldChange::Body(_) => "body",
            FieldChange::Summary(_) => "summary",
            FieldChange::Category(_) => "category",
            FieldChange::Date(_) => "date",
            FieldChange::ExternalUrl(_) => "external_url",
            FieldChange::Published(_) => "published",
            FieldChange::Spotlighted(_) => "spotlighted",
            FieldChange::Featured(_) => "featured",
            FieldChange::Downloadable(_) => "downloadable",
            FieldChange::Name(_) => "name",
            FieldChange::Description(_) => "description",
            FieldChange::CoverImage(_) => "cover_image",
        }
    }

    /// Maps a named form control to the change it stands for.
    ///
    /// `description` is the story summary on a story form and the category
    /// description otherwise. Unknown names and mismatched value types give `None`.
    pub fn from_input(kind: RecordKind, name: &str, value: InputValue) -> Option<Self> {
        let change = match (name, value) {
            ("title", InputValue::Text(v)) => FieldChange::Title(v),
            ("text", InputValue::Text(v)) => FieldChange::Body(v),
            ("description", InputValue::Text(v)) if kind == RecordKind::Story => {
                FieldChange::Summary(v)
            }
            ("description" | "beschrijving", InputValue::Text(v)) => FieldChange::Description(v),
            ("category", InputValue::Text(v)) => FieldChange::Category(v),
            ("date", InputValue::Text(v)) => FieldChange::Date(v),
            ("url", InputValue::Text(v)) => FieldChange::ExternalUrl(v),
            ("naam", InputValue::Text(v)) => FieldChange::Name(v),
            ("published", InputValue::Checked(v)) => FieldChange::Published(v),
            ("is_spotlighted", InputValue::Checked(v)) => FieldChange::Spotlighted(v),
            ("is_uitgelicht", InputValue::Checked(v)) => FieldChange::Featured(v),
            ("is_downloadable", InputValue::Checked(v)) => FieldChange::Downloadable(v),
            ("cover_image", InputValue::File(v)) => FieldChange::CoverImage(v),
            _ => return None,
        };
        Some(change)
    }
}

impl Draft {
    /// The canonical empty draft for `kind`.
    pub fn empty(kind: RecordKind, today: NaiveDate) -> Self {
        match kind {
            RecordKind::Story => Draft::Story(StoryDraft::new(today)),
            RecordKind::Category => Draft::Category(CategoryDraft::default()),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Draft::Story(_) => RecordKind::Story,
            Draft::Category(_) => RecordKind::Category,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Draft::Story(story) => &story.body,
            Draft::Category(category) => &category.body,
        }
    }

    pub(crate) fn set_body(&mut self, body: String) {
        match self {
            Draft::Story(story) => story.body = body,
            Draft::Category(category) => category.body = body,
        }
    }

    pub fn cover_image(&self) -> Option<&Attachment> {
        match self {
            Draft::Story(story) => story.cover_image.as_ref(),
            Draft::Category(category) => category.cover_image.as_ref(),
        }
    }

    pub(crate) fn set_cover_image(&mut self, image: Option<Attachment>) {
        match self {
            Draft::Story(story) => story.cover_image = image,
            Draft::Category(category) => category.cover_image = image,
        }
    }

    pub fn source_document(&self) -> Option<&Attachment> {
        match self {
            Draft::Story(story) => story.source_document.as_ref(),
            Draft::Category(category) => category.source_document.as_ref(),
        }
    }

    pub(crate) fn set_source_document(&mut self, document: Option<Attachment>) {
        match self {
            Draft::Story(story) => story.source_document = document,
            Draft::Category(category) => category.source_document = document,
        }
    }

    /// Categories have no visibility toggle and always count as published.
    pub fn is_published(&self) -> bool {
        match self {
            Draft::Story(story) => story.published,
            Draft::Category(_) => true,
        }
    }

    /// Applies `change` when it belongs to this draft's shape. Returns whether it did.
    ///
    /// Values are stored raw: no trimming, no coercion. The category and the date
    /// are converted when the draft is mapped.
    pub fn apply(&mut self, change: FieldChange) -> bool {
        match (self, change) {
            (Draft::Story(story), FieldChange::Title(v)) => story.title = v,
            (Draft::Story(story), FieldChange::Body(v)) => story.body = v,
            (Draft::Story(story), FieldChange::Summary(v)) => story.summary = v,
            (Draft::Story(story), FieldChange::Category(v)) => story.category = v,
            (Draft::Story(story), FieldChange::Date(v)) => story.date = v,
            (Draft::Story(story), FieldChange::ExternalUrl(v)) => story.external_url = v,
            (Draft::Story(story), FieldChange::Published(v)) => story.published = v,
            (Draft::Story(story), FieldChange::Spotlighted(v)) => story.spotlighted = v,
            (Draft::Story(story), FieldChange::Featured(v)) => story.featured = v,
            (Draft::Story(story), FieldChange::Downloadable(v)) => story.downloadable = v,
            (Draft::Story(story), FieldChange::CoverImage(v)) => story.cover_image = Some(v),
            (Draft::Category(category), FieldChange::Name(v)) => category.name = v,
            (Draft::Category(category), FieldChange::Description(v)) => category.description = v,
            (Draft::Category(category), FieldChange::Featured(v)) => category.featured = v,
            (Draft::Category(category), FieldChange::Body(v)) => category.body = v,
            (Draft::Category(category), FieldChange::CoverImage(v)) => {
                category.cover_image = Some(v)
            }
            (draft, change) => {
                debug!("ignoring {} on a {} draft", change.field_name(), draft.kind());
                return false;
            }
        }
        true
    }

    /// Required-field violations in form order: title, body, category for stories;
    /// name for categories.
    pub fn validate(&self) -> Vec<String> {
        let mut violations = Vec::new();
        match self {
            Draft::Story(story) => {
                if story.title.trim().is_empty() {
                    violations.push(messages::TITLE_REQUIRED.to_string());
                }
                if story.body.trim().is_empty() {
                    violations.push(messages::BODY_REQUIRED.to_string());
                }
                if story.category_id().is_none() {
                    violations.push(messages::CATEGORY_REQUIRED.to_string());
                }
            }
            Draft::Category(category) => {
                if category.name.trim().is_empty() {
                    violations.push(messages::NAME_REQUIRED.to_string());
                }
            }
        }
        violations
    }

    /// Validates and maps the draft onto the create contract.
    ///
    /// `remove_cover` records an explicit removal of the cover image so the store
    /// can tell it apart from "no change".
    pub fn to_payload(&self, remove_cover: bool) -> Result<CreatePayload, ValidationError> {
        let violations = self.validate();
        if !violations.is_empty() {
            return Err(ValidationError { violations });
        }

        let payload = match self {
            Draft::Story(story) => {
                let Some(categorie) = story.category_id() else {
                    return Err(ValidationError {
                        violations: vec![messages::CATEGORY_REQUIRED.to_string()],
                    });
                };
                let datum = story.parsed_date().map_err(|e| {
                    warn!("story date does not parse: {e}");
                    ValidationError {
                        violations: vec![messages::DATE_INVALID.to_string()],
                    }
                })?;
                CreatePayload::Story(NewStory {
                    titel: story.title.trim().to_string(),
                    tekst: story.body.trim().to_string(),
                    beschrijving: story.summary.trim().to_string(),
                    is_onzichtbaar: !story.published,
                    categorie,
                    datum,
                    is_uitgelicht: story.featured,
                    is_spotlighted: story.spotlighted,
                    is_downloadable: story.downloadable,
                    url: story.external_url.trim().to_string(),
                    cover_image: story.cover_image.clone(),
                    word_file: story.source_document.clone(),
                    verwijder_omslagfoto: remove_cover,
                })
            }
            Draft::Category(category) => CreatePayload::Category(NewCategory {
                naam: category.name.trim().to_string(),
                beschrijving: category.description.trim().to_string(),
                is_uitgelicht: category.featured,
                cover_image: category.cover_image.clone(),
                word_file: category.source_document.clone(),
                verwijder_omslagfoto: remove_cover,
            }),
        };
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 17).unwrap()
    }

    fn story() -> Draft {
        Draft::empty(RecordKind::Story, today())
    }

    fn filled_story() -> Draft {
        let mut draft = story();
        draft.apply(FieldChange::Title("  De vos  ".into()));
        draft.apply(FieldChange::Body("\n  Er was eens\n\n   een vos.  \n".into()));
        draft.apply(FieldChange::Category("7".into()));
        draft
    }

    #[test]
    fn empty_story_reports_all_violations_in_form_order() {
        assert_eq!(
            story().validate(),
            vec![
                "Titel is verplicht",
                "Verhaal is verplicht",
                "Categorie is verplicht"
            ]
        );
    }

    #[test]
    fn whitespace_only_text_counts_as_missing() {
        let mut draft = story();
        draft.apply(FieldChange::Title("   ".into()));
        draft.apply(FieldChange::Body("\n\t\n".into()));
        draft.apply(FieldChange::Category("3".into()));
        assert_eq!(
            draft.validate(),
            vec!["Titel is verplicht", "Verhaal is verplicht"]
        );
    }

    #[test]
    fn story_is_valid_exactly_with_title_body_and_category() {
        assert!(filled_story().validate().is_empty());

        let mut without_category = filled_story();
        without_category.apply(FieldChange::Category(String::new()));
        assert_eq!(without_category.validate(), vec!["Categorie is verplicht"]);
    }

    #[test]
    fn category_only_requires_a_name() {
        let mut draft = Draft::empty(RecordKind::Category, today());
        assert_eq!(draft.validate(), vec!["Naam is verplicht"]);

        draft.apply(FieldChange::Name("Reizen".into()));
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn text_is_stored_without_trimming() {
        let draft = filled_story();
        assert_eq!(draft.body(), "\n  Er was eens\n\n   een vos.  \n");
    }

    #[test]
    fn fields_of_the_other_shape_are_ignored() {
        let mut draft = story();
        assert!(!draft.apply(FieldChange::Name("Reizen".into())));
        assert_eq!(draft, story());
    }

    #[test]
    fn non_numeric_category_leaves_nothing_selected() {
        let mut draft = filled_story();
        draft.apply(FieldChange::Category("abc".into()));
        assert_eq!(draft.validate(), vec!["Categorie is verplicht"]);
    }

    #[test]
    fn story_payload_maps_and_trims_at_the_boundary() {
        let mut draft = filled_story();
        draft.apply(FieldChange::Summary("  kort  ".into()));
        draft.apply(FieldChange::Published(false));
        draft.apply(FieldChange::Featured(true));
        draft.apply(FieldChange::ExternalUrl(" https://example.com ".into()));
        draft.apply(FieldChange::Date("2023-12-01".into()));

        let CreatePayload::Story(payload) = draft.to_payload(true).unwrap() else {
            panic!("expected a story payload");
        };
        assert_eq!(payload.titel, "De vos");
        assert_eq!(payload.tekst, "Er was eens\n\n   een vos.");
        assert_eq!(payload.beschrijving, "kort");
        assert!(payload.is_onzichtbaar);
        assert_eq!(payload.categorie, 7);
        assert_eq!(payload.datum, NaiveDate::from_ymd_opt(2023, 12, 1));
        assert!(payload.is_uitgelicht);
        assert!(!payload.is_spotlighted);
        assert_eq!(payload.url, "https://example.com");
        assert!(payload.verwijder_omslagfoto);
    }

    #[test]
    fn new_story_defaults_to_published_today() {
        let Draft::Story(draft) = story() else {
            panic!("expected a story draft");
        };
        assert!(draft.published);
        assert_eq!(draft.date, "2024-05-17");
        assert_eq!(draft.parsed_date(), Ok(Some(today())));
    }

    #[test]
    fn category_and_date_are_stored_as_typed() {
        let mut draft = filled_story();
        draft.apply(FieldChange::Category(" 12 ".into()));
        draft.apply(FieldChange::Date("17-05-2024".into()));

        let Draft::Story(story) = &draft else {
            panic!("expected a story draft");
        };
        assert_eq!(story.category, " 12 ");
        assert_eq!(story.date, "17-05-2024");
        assert_eq!(story.category_id(), Some(12));
    }

    #[test]
    fn mistyped_date_blocks_mapping_instead_of_becoming_null() {
        let mut draft = filled_story();
        draft.apply(FieldChange::Date("17-05-2024".into()));
        assert!(draft.validate().is_empty());

        let err = draft.to_payload(false).unwrap_err();
        assert_eq!(err.violations, vec!["Datum is ongeldig"]);
    }

    #[test]
    fn cleared_date_maps_to_no_date() {
        let mut draft = filled_story();
        draft.apply(FieldChange::Date(String::new()));

        let CreatePayload::Story(payload) = draft.to_payload(false).unwrap() else {
            panic!("expected a story payload");
        };
        assert_eq!(payload.datum, None);
    }

    #[test]
    fn ignored_changes_are_named_without_their_contents() {
        let change = FieldChange::Body("geheime tekst".into());
        assert_eq!(change.field_name(), "body");
    }

    #[test]
    fn invalid_draft_does_not_map() {
        let err = story().to_payload(false).unwrap_err();
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn category_payload() {
        let mut draft = Draft::empty(RecordKind::Category, today());
        draft.apply(FieldChange::Name(" Reizen ".into()));
        draft.apply(FieldChange::Description("Verre landen".into()));
        draft.apply(FieldChange::Featured(true));

        assert_eq!(
            draft.to_payload(false).unwrap(),
            CreatePayload::Category(NewCategory {
                naam: "Reizen".into(),
                beschrijving: "Verre landen".into(),
                is_uitgelicht: true,
                cover_image: None,
                word_file: None,
                verwijder_omslagfoto: false,
            })
        );
    }

    #[test]
    fn named_inputs_map_to_changes() {
        let story = RecordKind::Story;
        let category = RecordKind::Category;

        assert_eq!(
            FieldChange::from_input(story, "text", InputValue::Text("x".into())),
            Some(FieldChange::Body("x".into()))
        );
        assert_eq!(
            FieldChange::from_input(story, "description", InputValue::Text("s".into())),
            Some(FieldChange::Summary("s".into()))
        );
        assert_eq!(
            FieldChange::from_input(category, "beschrijving", InputValue::Text("d".into())),
            Some(FieldChange::Description("d".into()))
        );
        assert_eq!(
            FieldChange::from_input(story, "is_uitgelicht", InputValue::Checked(true)),
            Some(FieldChange::Featured(true))
        );
        assert_eq!(
            FieldChange::from_input(story, "title", InputValue::Checked(true)),
            None
        );
        assert_eq!(
            FieldChange::from_input(story, "onbekend", InputValue::Text("x".into())),
            None
        );
    }
}
