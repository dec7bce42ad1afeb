//! Selection provider seam: entry identifiers, row records, and the read-only view
//! bulk-action flows consume.
//!
//! # Design
//! - The provider owns rows and the checked set; flows only ever read them.
//! - Snapshots are plain values so hosts can hand a fresh one in on every render.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identifier for a content entry row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntryId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Content entry as listed in the admin table.
///
/// `published_at == None` means the entry is a draft.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowRecord {
    /// Entry identifier.
    pub id: EntryId,
    /// Publication timestamp; `None` for drafts.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// Remaining content-type fields keyed by attribute name.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RowRecord {
    /// Draft row with no extra fields.
    #[must_use]
    pub fn draft(id: impl Into<EntryId>) -> Self {
        Self {
            id: id.into(),
            published_at: None,
            fields: Map::new(),
        }
    }

    /// Row published at `at`.
    #[must_use]
    pub fn published(id: impl Into<EntryId>, at: DateTime<Utc>) -> Self {
        Self {
            published_at: Some(at),
            ..Self::draft(id)
        }
    }

    /// Attach a field value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Whether the entry currently has a publication timestamp.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Text rendering of a field for table cells. `id` resolves to the identifier.
    #[must_use]
    pub fn field_text(&self, name: &str) -> Option<String> {
        if name == "id" {
            return Some(self.id.to_string());
        }
        match self.fields.get(name)? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Read-only access to the list view's selection state.
pub trait SelectionSource {
    /// Checked entry ids in selection order.
    fn selected_entries(&self) -> &[EntryId];

    /// Rows currently loaded in the list view.
    fn rows(&self) -> &[RowRecord];

    /// Whether `id` is part of the current selection.
    fn is_selected(&self, id: EntryId) -> bool {
        self.selected_entries().contains(&id)
    }

    /// Loaded rows that are part of the selection, in row order.
    ///
    /// Selected ids without a loaded row are skipped.
    fn selected_rows(&self) -> Vec<&RowRecord> {
        self.rows()
            .iter()
            .filter(|row| self.is_selected(row.id))
            .collect()
    }
}

/// Owned selection state handed to the bulk-action surface.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SelectionSnapshot {
    selected: Vec<EntryId>,
    rows: Vec<RowRecord>,
}

impl SelectionSnapshot {
    /// Build a snapshot; repeated ids in `selected` keep their first position only.
    #[must_use]
    pub fn new(selected: impl IntoIterator<Item = EntryId>, rows: Vec<RowRecord>) -> Self {
        let mut unique = Vec::new();
        for id in selected {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            selected: unique,
            rows,
        }
    }

    /// Capture any selection source by value.
    #[must_use]
    pub fn capture<S: SelectionSource + ?Sized>(source: &S) -> Self {
        Self::new(
            source.selected_entries().iter().copied(),
            source.rows().to_vec(),
        )
    }

    /// Narrow `source` to its selected rows, dropping checked ids with no loaded row.
    #[must_use]
    pub fn of_selected_rows<S: SelectionSource + ?Sized>(source: &S) -> Self {
        let rows: Vec<RowRecord> = source.selected_rows().into_iter().cloned().collect();
        let selected = source
            .selected_entries()
            .iter()
            .copied()
            .filter(|id| rows.iter().any(|row| row.id == *id))
            .collect();
        Self { selected, rows }
    }

    /// Whether nothing is checked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Check or uncheck `id`. Ids without a row are ignored.
    ///
    /// Returns whether `id` is checked afterwards.
    pub fn toggle(&mut self, id: EntryId) -> bool {
        if let Some(position) = self.selected.iter().position(|selected| *selected == id) {
            self.selected.remove(position);
            return false;
        }
        if self.rows.iter().any(|row| row.id == id) {
            self.selected.push(id);
            return true;
        }
        false
    }

    /// Check every row, or clear the selection when every row is already checked.
    pub fn toggle_all(&mut self) {
        if !self.rows.is_empty() && self.selected.len() == self.rows.len() {
            self.selected.clear();
        } else {
            self.selected = self.rows.iter().map(|row| row.id).collect();
        }
    }
}

impl SelectionSource for SelectionSnapshot {
    fn selected_entries(&self) -> &[EntryId] {
        &self.selected
    }

    fn rows(&self) -> &[RowRecord] {
        &self.rows
    }
}
