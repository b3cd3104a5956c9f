use std::fmt;

use serde::{Deserialize, Serialize};

/// The two record shapes the create dialog can produce.
///
/// The kind is chosen by the caller when the dialog opens and stays fixed until
/// the dialog is closed or reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Story,
    Category,
}

impl RecordKind {
    /// Heading shown at the top of the dialog.
    pub fn dialog_title(self) -> &'static str {
        match self {
            RecordKind::Story => "Nieuw Verhaal",
            RecordKind::Category => "Nieuwe Categorie",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Story => f.write_str("story"),
            RecordKind::Category => f.write_str("category"),
        }
    }
}
