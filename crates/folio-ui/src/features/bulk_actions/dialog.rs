//! Confirmation dialog state and copy.
//!
//! # Design
//! - The dialog knows nothing about what confirming does; flows own that.
//! - A loading dialog refuses further confirm clicks.

use crate::features::bulk_actions::actions::BulkActionKind;
use crate::i18n::TranslationBundle;

/// Open/loading flags for one confirmation dialog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DialogState {
    /// Dialog is shown.
    pub is_open: bool,
    /// Confirm handler is in flight (or, for publish, rows are still being removed).
    pub is_confirm_loading: bool,
}

impl DialogState {
    /// Closed, idle dialog.
    #[must_use]
    pub const fn closed() -> Self {
        Self {
            is_open: false,
            is_confirm_loading: false,
        }
    }

    /// Whether the confirm button accepts a click.
    #[must_use]
    pub const fn confirm_enabled(&self) -> bool {
        self.is_open && !self.is_confirm_loading
    }
}

/// Localised copy rendered by a confirmation dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogCopy {
    /// Header text.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Confirm button label.
    pub confirm: String,
    /// Cancel button label.
    pub cancel: String,
    /// Confirm button uses the destructive tone.
    pub destructive: bool,
}

impl DialogCopy {
    /// Copy for the confirmation step of `kind`.
    #[must_use]
    pub fn for_kind(bundle: &TranslationBundle, kind: BulkActionKind) -> Self {
        Self {
            title: bundle.text("confirm.title", "Confirmation"),
            body: bundle.text(kind.confirm_body_key(), ""),
            confirm: bundle.text(kind.confirm_cta_key(), "Confirm"),
            cancel: bundle.text("confirm.cancel", "Cancel"),
            destructive: kind.is_destructive(),
        }
    }
}
