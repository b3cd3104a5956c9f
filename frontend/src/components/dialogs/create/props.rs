use yew::prelude::*;

use common::model::kind::RecordKind;

/// Properties for the `CreateDialog`.
///
/// The parent owns visibility: the dialog starts a fresh draft whenever
/// `is_open` turns true or `kind` changes while open, and asks to be closed
/// through `on_close`.
#[derive(Properties, PartialEq, Clone)]
pub struct CreateDialogProps {
    pub is_open: bool,
    pub kind: RecordKind,
    pub on_close: Callback<()>,
    /// Fired after the record store accepted the new record, before `on_close`.
    #[prop_or_default]
    pub on_saved: Callback<RecordKind>,
    /// Prefix of the admin API routes.
    pub api_base: AttrValue,
}
