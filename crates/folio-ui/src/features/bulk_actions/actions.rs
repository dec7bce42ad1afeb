//! Bulk action kinds and their display copy.

use crate::i18n::TranslationBundle;
use std::fmt;

/// Bulk operations offered for the current selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulkActionKind {
    /// Publish every selected draft.
    Publish,
    /// Revert every selected entry to draft.
    Unpublish,
    /// Delete every selected entry.
    Delete,
}

impl BulkActionKind {
    /// Toolbar order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Publish, Self::Unpublish, Self::Delete]
    }

    /// Stable lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Unpublish => "unpublish",
            Self::Delete => "delete",
        }
    }

    /// Whether confirming goes through a review modal listing the selected rows.
    ///
    /// Only publish does; its removal animation plays inside that modal.
    #[must_use]
    pub const fn has_review_modal(self) -> bool {
        matches!(self, Self::Publish)
    }

    /// Translation key for the toolbar button.
    #[must_use]
    pub const fn button_key(self) -> &'static str {
        match self {
            Self::Publish => "bulk.publish",
            Self::Unpublish => "bulk.unpublish",
            Self::Delete => "bulk.delete",
        }
    }

    /// Translation key for the confirmation body.
    #[must_use]
    pub const fn confirm_body_key(self) -> &'static str {
        match self {
            Self::Publish => "confirm.body.publish",
            Self::Unpublish => "confirm.body.unpublish",
            Self::Delete => "confirm.body.delete",
        }
    }

    /// Translation key for the confirm button inside the dialog.
    #[must_use]
    pub const fn confirm_cta_key(self) -> &'static str {
        match self {
            Self::Publish => "bulk.publish",
            Self::Unpublish => "bulk.unpublish",
            Self::Delete => "confirm.confirm",
        }
    }

    /// Whether the confirm button uses the destructive tone.
    #[must_use]
    pub const fn is_destructive(self) -> bool {
        matches!(self, Self::Delete)
    }
}

impl fmt::Display for BulkActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pluralised "N entries selected" line for the publish review modal.
#[must_use]
pub fn selected_count_label(bundle: &TranslationBundle, count: usize) -> String {
    let noun = if count == 1 {
        bundle.text("publish_modal.selected_one", "entry selected")
    } else {
        bundle.text("publish_modal.selected_other", "entries selected")
    };
    format!("{count} {noun}")
}
