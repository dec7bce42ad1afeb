//! Incremental removal of rows from the publish modal's display list.
//!
//! # Design
//! - The display list is a modal-local copy; the selection provider never changes.
//! - Membership only shrinks: there is no way to add a row back.
//! - Ids are removed in the order captured at confirm time, one per tick.

use crate::core::selection::{EntryId, RowRecord, SelectionSource};
use std::collections::VecDeque;

/// Rows shown in the publish review modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayRowList {
    rows: Vec<RowRecord>,
}

impl DisplayRowList {
    /// Seed from the rows matching the current selection.
    #[must_use]
    pub fn seeded<S: SelectionSource + ?Sized>(source: &S) -> Self {
        Self {
            rows: source.selected_rows().into_iter().cloned().collect(),
        }
    }

    /// Rows still displayed, in display order.
    #[must_use]
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    /// Number of rows still displayed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether every row has been removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `id` is still displayed.
    #[must_use]
    pub fn contains(&self, id: EntryId) -> bool {
        self.rows.iter().any(|row| row.id == id)
    }

    /// Drop `id`; returns whether a row was removed.
    pub fn remove(&mut self, id: EntryId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }
}

/// Outcome of one animation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalStep {
    /// `id` was processed and more ids remain.
    Removed {
        /// Id processed by this tick.
        id: EntryId,
        /// Ids still queued.
        remaining: usize,
    },
    /// The last queued id was processed; the timer must stop.
    Finished {
        /// Id processed by this tick, if any was queued.
        id: Option<EntryId>,
    },
}

/// Queue of ids to strike from a [`DisplayRowList`], one per tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovalAnimation {
    queue: VecDeque<EntryId>,
    total: usize,
}

impl RemovalAnimation {
    /// Queue `ids` in order.
    #[must_use]
    pub fn new(ids: &[EntryId]) -> Self {
        Self {
            queue: ids.iter().copied().collect(),
            total: ids.len(),
        }
    }

    /// Ids still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Ids queued when the animation started.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Whether nothing is left to remove. True immediately for an empty queue.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }

    /// Process the next queued id against `display`.
    pub fn tick(&mut self, display: &mut DisplayRowList) -> RemovalStep {
        let Some(id) = self.queue.pop_front() else {
            return RemovalStep::Finished { id: None };
        };
        display.remove(id);
        if self.queue.is_empty() {
            RemovalStep::Finished { id: Some(id) }
        } else {
            RemovalStep::Removed {
                id,
                remaining: self.queue.len(),
            }
        }
    }
}
