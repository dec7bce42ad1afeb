//! Core, DOM-free primitives shared by the bulk-action surface.
pub mod schedule;
pub mod selection;
pub mod store;
