//! Which bulk controls render, and which accept clicks, for a selection.
//!
//! # Design
//! - Pure functions recomputed on every render; nothing is cached.
//! - An empty selection never shows publish or unpublish.

use crate::config::BulkActionConfig;
use crate::core::selection::{RowRecord, SelectionSource};
use crate::features::bulk_actions::actions::BulkActionKind;

/// Render decision for one toolbar control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Control is rendered.
    pub visible: bool,
    /// Control accepts clicks.
    pub enabled: bool,
}

/// Render decisions for the whole toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionVisibility {
    /// Publish control.
    pub publish: ControlState,
    /// Unpublish control.
    pub unpublish: ControlState,
    /// Delete control.
    pub delete: ControlState,
}

/// Publish renders when some selected row is still a draft.
#[must_use]
pub fn publish_visible(show_publish: bool, selected: &[&RowRecord]) -> bool {
    show_publish && selected.iter().any(|row| !row.is_published())
}

/// Unpublish renders when some selected row is published.
#[must_use]
pub fn unpublish_visible(show_publish: bool, selected: &[&RowRecord]) -> bool {
    show_publish && selected.iter().any(|row| row.is_published())
}

/// Delete renders whenever the host enables it.
#[must_use]
pub const fn delete_visible(show_delete: bool) -> bool {
    show_delete
}

impl ActionVisibility {
    /// Evaluate the toolbar for `source`. `busy` disables every control.
    #[must_use]
    pub fn evaluate<S: SelectionSource + ?Sized>(
        source: &S,
        config: &BulkActionConfig,
        busy: bool,
    ) -> Self {
        let selected = source.selected_rows();
        let actionable = !source.selected_entries().is_empty() && !busy;
        let control = |visible: bool| ControlState {
            visible,
            enabled: visible && actionable,
        };
        Self {
            publish: control(publish_visible(config.show_publish, &selected)),
            unpublish: control(unpublish_visible(config.show_publish, &selected)),
            delete: control(delete_visible(config.show_delete)),
        }
    }

    /// Decision for a single kind.
    #[must_use]
    pub const fn control(&self, kind: BulkActionKind) -> ControlState {
        match kind {
            BulkActionKind::Publish => self.publish,
            BulkActionKind::Unpublish => self.unpublish,
            BulkActionKind::Delete => self.delete,
        }
    }

    /// Rendered kinds in toolbar order.
    #[must_use]
    pub fn visible_kinds(&self) -> Vec<BulkActionKind> {
        BulkActionKind::all()
            .into_iter()
            .filter(|kind| self.control(*kind).visible)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::{EntryId, SelectionSnapshot};
    use chrono::{TimeZone, Utc};

    fn rows() -> Vec<RowRecord> {
        let at = Utc.with_ymd_and_hms(2023, 1, 1, 10, 10, 10).unwrap();
        vec![RowRecord::draft(1), RowRecord::published(2, at)]
    }

    fn evaluate(selected: &[u64], config: &BulkActionConfig) -> ActionVisibility {
        let snapshot = SelectionSnapshot::new(selected.iter().copied().map(EntryId), rows());
        ActionVisibility::evaluate(&snapshot, config, false)
    }

    #[test]
    fn mixed_selection_shows_both_publish_controls() {
        let config = BulkActionConfig::default().with_publish(true);
        let visibility = evaluate(&[1, 2], &config);
        assert_eq!(
            visibility.visible_kinds(),
            vec![BulkActionKind::Publish, BulkActionKind::Unpublish]
        );
        assert!(visibility.publish.enabled);
    }

    #[test]
    fn all_published_hides_publish() {
        let config = BulkActionConfig::default().with_publish(true);
        let visibility = evaluate(&[2], &config);
        assert!(!visibility.publish.visible);
        assert!(visibility.unpublish.visible);
    }

    #[test]
    fn all_drafts_hide_unpublish() {
        let config = BulkActionConfig::default().with_publish(true);
        let visibility = evaluate(&[1], &config);
        assert!(visibility.publish.visible);
        assert!(!visibility.unpublish.visible);
    }

    #[test]
    fn empty_selection_shows_neither_publish_control() {
        let config = BulkActionConfig::default().with_publish(true).with_delete(true);
        let visibility = evaluate(&[], &config);
        assert!(!visibility.publish.visible);
        assert!(!visibility.unpublish.visible);
        assert!(visibility.delete.visible);
        assert!(!visibility.delete.enabled);
    }

    #[test]
    fn flags_gate_controls_regardless_of_selection() {
        let hidden = evaluate(&[1, 2], &BulkActionConfig::default());
        assert!(hidden.visible_kinds().is_empty());
        let delete_only = evaluate(&[1], &BulkActionConfig::default().with_delete(true));
        assert_eq!(delete_only.visible_kinds(), vec![BulkActionKind::Delete]);
    }

    #[test]
    fn busy_flows_disable_visible_controls() {
        let config = BulkActionConfig::default().with_publish(true).with_delete(true);
        let snapshot = SelectionSnapshot::new([EntryId(1)], rows());
        let visibility = ActionVisibility::evaluate(&snapshot, &config, true);
        assert!(visibility.publish.visible);
        assert!(!visibility.publish.enabled);
        assert!(!visibility.delete.enabled);
    }
}
