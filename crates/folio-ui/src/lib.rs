#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Folio list-view bulk actions.
//! Selection-driven publish, unpublish, and delete with a confirm dialog and an
//! incremental removal animation for published rows.

pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod i18n;

#[cfg(not(target_arch = "wasm32"))]
pub mod demo;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
