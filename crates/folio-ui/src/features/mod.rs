//! Feature slices for the list view.

pub mod bulk_actions;
