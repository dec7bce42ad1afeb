//! List-view yewdux store acting as the selection provider.
//!
//! # Design
//! - Rows and the checked set live in one slice so reducers stay predictable.
//! - Bulk handlers mutate the store; bulk-action flows only read snapshots of it.

use crate::core::selection::{EntryId, RowRecord, SelectionSnapshot, SelectionSource};
use chrono::{DateTime, Utc};
use yewdux::store::Store;

/// Rows and checked ids for the content-manager list view.
#[derive(Clone, Debug, PartialEq, Store, Default)]
pub struct ListViewStore {
    /// Rows currently loaded, in display order.
    pub rows: Vec<RowRecord>,
    /// Checked ids in the order they were checked.
    pub selected: Vec<EntryId>,
}

impl SelectionSource for ListViewStore {
    fn selected_entries(&self) -> &[EntryId] {
        &self.selected
    }

    fn rows(&self) -> &[RowRecord] {
        &self.rows
    }
}

impl ListViewStore {
    /// Value snapshot for the bulk-action surface.
    #[must_use]
    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot::capture(self)
    }
}

/// Replace loaded rows, dropping checked ids that no longer exist.
pub fn set_rows(store: &mut ListViewStore, rows: Vec<RowRecord>) {
    store.rows = rows;
    let rows = &store.rows;
    store
        .selected
        .retain(|id| rows.iter().any(|row| row.id == *id));
}

/// Check or uncheck a single row.
pub fn toggle_selected(store: &mut ListViewStore, id: EntryId) {
    if let Some(index) = store.selected.iter().position(|selected| *selected == id) {
        store.selected.remove(index);
    } else if store.rows.iter().any(|row| row.id == id) {
        store.selected.push(id);
    }
}

/// Check every loaded row, or clear when all are already checked.
pub fn select_all_or_clear(store: &mut ListViewStore) {
    if !store.rows.is_empty() && store.selected.len() == store.rows.len() {
        store.selected.clear();
    } else {
        store.selected = store.rows.iter().map(|row| row.id).collect();
    }
}

/// Stamp `ids` as published at `at`.
pub fn mark_published(store: &mut ListViewStore, ids: &[EntryId], at: DateTime<Utc>) {
    for row in store.rows.iter_mut().filter(|row| ids.contains(&row.id)) {
        row.published_at = Some(at);
    }
}

/// Clear the publication timestamp of `ids`.
pub fn mark_unpublished(store: &mut ListViewStore, ids: &[EntryId]) {
    for row in store.rows.iter_mut().filter(|row| ids.contains(&row.id)) {
        row.published_at = None;
    }
}

/// Remove `ids` from the rows and the selection.
pub fn remove_rows(store: &mut ListViewStore, ids: &[EntryId]) {
    store.rows.retain(|row| !ids.contains(&row.id));
    store.selected.retain(|id| !ids.contains(id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> ListViewStore {
        ListViewStore {
            rows: vec![RowRecord::draft(1), RowRecord::draft(2), RowRecord::draft(3)],
            selected: vec![EntryId(2)],
        }
    }

    #[test]
    fn toggle_adds_known_ids_and_removes_checked_ones() {
        let mut state = store();
        toggle_selected(&mut state, EntryId(3));
        toggle_selected(&mut state, EntryId(2));
        toggle_selected(&mut state, EntryId(42));
        assert_eq!(state.selected, vec![EntryId(3)]);
    }

    #[test]
    fn select_all_toggles_between_all_and_none() {
        let mut state = store();
        select_all_or_clear(&mut state);
        assert_eq!(state.selected, vec![EntryId(1), EntryId(2), EntryId(3)]);
        select_all_or_clear(&mut state);
        assert!(state.selected.is_empty());
    }

    #[test]
    fn set_rows_prunes_stale_selection() {
        let mut state = store();
        state.selected = vec![EntryId(1), EntryId(3)];
        set_rows(&mut state, vec![RowRecord::draft(3)]);
        assert_eq!(state.selected, vec![EntryId(3)]);
    }

    #[test]
    fn publish_state_reducers_touch_only_listed_rows() {
        let mut state = store();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        mark_published(&mut state, &[EntryId(1), EntryId(3)], at);
        assert_eq!(state.rows[0].published_at, Some(at));
        assert_eq!(state.rows[1].published_at, None);
        mark_unpublished(&mut state, &[EntryId(1)]);
        assert!(!state.rows[0].is_published());
        assert!(state.rows[2].is_published());
    }

    #[test]
    fn remove_rows_clears_rows_and_selection() {
        let mut state = store();
        remove_rows(&mut state, &[EntryId(2)]);
        assert_eq!(state.rows.len(), 2);
        assert!(state.selected.is_empty());
        assert_eq!(state.snapshot().selected_rows().len(), 0);
    }
}
