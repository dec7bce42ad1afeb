//! Bulk publish, unpublish, and delete for the list view.
//!
//! # Design
//! - `actions`, `visibility`, `dialog`, `removal`, and `state` are DOM-free and tested natively.
//! - `controller` wires a flow to a scheduler and the caller's handlers.
//! - `view` renders the buttons, confirm dialog, and publish review modal on wasm only.

pub mod actions;
pub mod controller;
pub mod dialog;
pub mod handler;
pub mod removal;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
pub mod visibility;
