//! Shared UI atoms used by the list view and bulk-action surfaces.

pub(crate) mod bulk_action_bar;
pub(crate) mod modal;

pub(crate) use bulk_action_bar::BulkActionBar;
pub(crate) use modal::Modal;
