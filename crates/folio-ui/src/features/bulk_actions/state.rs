//! Bulk-action flow state machine, shared by publish, unpublish, and delete.
//!
//! # Design
//! - One flow type parameterized by [`BulkActionKind`]; only publish reviews rows
//!   and animates their removal.
//! - Handler calls happen outside the machine: `confirm` hands out a ticket and
//!   `settle` applies the handler's result. Tickets from a dismissed session are stale.
//! - The flow owns the removal timer handle and releases it on completion, on
//!   close, and on drop.
//!
//! Phases:
//! - `Closed` -> `open` -> `Reviewing` (publish) or `Confirming` (others)
//! - `Reviewing` -> `request_confirm` -> `Confirming` -> `confirm` -> `Loading`
//! - `Loading` -> `settle(Ok)` -> `Removing` (publish) or `Closed` (others)
//! - `Loading` -> `settle(Err)` -> `Reviewing` (publish) or `Closed` (others)
//! - `Removing` -> last `tick` -> `Reviewing`
//! - any -> `close` -> `Closed`

use crate::config::BulkActionConfig;
use crate::core::schedule::TaskHandle;
use crate::core::selection::{EntryId, RowRecord, SelectionSnapshot, SelectionSource};
use crate::error::{BulkActionError, BulkActionResult};
use crate::features::bulk_actions::actions::BulkActionKind;
use crate::features::bulk_actions::dialog::DialogState;
use crate::features::bulk_actions::removal::{DisplayRowList, RemovalAnimation, RemovalStep};
use std::fmt;
use std::time::Duration;

/// Lifecycle phase of a bulk-action flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowPhase {
    /// Nothing is shown.
    Closed,
    /// Publish review modal is open and idle.
    Reviewing,
    /// Confirmation dialog is open.
    Confirming,
    /// Confirm handler is in flight.
    Loading,
    /// Publish succeeded; rows are being removed from the review modal.
    Removing,
}

impl FlowPhase {
    /// Stable lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Reviewing => "reviewing",
            Self::Confirming => "confirming",
            Self::Loading => "loading",
            Self::Removing => "removing",
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof of a confirm click, carrying the ids captured at that moment.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a ticket must be settled with the handler outcome"]
pub struct ConfirmTicket {
    kind: BulkActionKind,
    session: u64,
    ids: Vec<EntryId>,
}

impl ConfirmTicket {
    /// Flow that issued the ticket.
    #[must_use]
    pub const fn kind(&self) -> BulkActionKind {
        self.kind
    }

    /// Ids to hand to the handler, in selection order.
    #[must_use]
    pub fn ids(&self) -> &[EntryId] {
        &self.ids
    }
}

/// What settling a ticket did to the flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Handler succeeded and nothing else is pending.
    Completed {
        /// Ids the handler processed.
        ids: Vec<EntryId>,
    },
    /// Handler succeeded; the caller must drive [`BulkActionFlow::tick`] every `period`.
    StartRemoval {
        /// Ids queued for removal, in order.
        ids: Vec<EntryId>,
        /// Tick interval.
        period: Duration,
    },
    /// Handler failed; loading was reset and the dialog closed.
    Failed {
        /// The handler failure.
        error: BulkActionError,
    },
    /// The flow was dismissed or reopened while the handler ran; nothing changed.
    Stale,
}

/// Row in the publish review table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRow<'a> {
    /// Underlying row.
    pub record: &'a RowRecord,
    /// Render the processing placeholder instead of field values.
    pub processing: bool,
}

/// State machine for one bulk action.
pub struct BulkActionFlow<H: TaskHandle> {
    kind: BulkActionKind,
    phase: FlowPhase,
    confirm_loading: bool,
    display: Option<DisplayRowList>,
    review: Option<SelectionSnapshot>,
    removal: Option<RemovalAnimation>,
    timer: Option<H>,
    session: u64,
    removal_interval: Duration,
}

impl<H: TaskHandle> fmt::Debug for BulkActionFlow<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkActionFlow")
            .field("kind", &self.kind)
            .field("phase", &self.phase)
            .field("confirm_loading", &self.confirm_loading)
            .field("display", &self.display)
            .field("review", &self.review)
            .field("removal", &self.removal)
            .field("timer_armed", &self.timer.is_some())
            .field("session", &self.session)
            .finish()
    }
}

impl<H: TaskHandle> BulkActionFlow<H> {
    /// Closed flow for `kind`.
    #[must_use]
    pub const fn new(kind: BulkActionKind, removal_interval: Duration) -> Self {
        Self {
            kind,
            phase: FlowPhase::Closed,
            confirm_loading: false,
            display: None,
            review: None,
            removal: None,
            timer: None,
            session: 0,
            removal_interval,
        }
    }

    /// Closed flow using the host's removal interval.
    #[must_use]
    pub const fn from_config(kind: BulkActionKind, config: &BulkActionConfig) -> Self {
        Self::new(kind, config.removal_interval())
    }

    /// Flow kind.
    #[must_use]
    pub const fn kind(&self) -> BulkActionKind {
        self.kind
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// Whether anything (review modal or dialog) is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase != FlowPhase::Closed
    }

    /// Whether the confirm button shows its spinner.
    #[must_use]
    pub const fn is_confirm_loading(&self) -> bool {
        self.confirm_loading
    }

    /// Confirmation dialog flags.
    #[must_use]
    pub fn dialog(&self) -> DialogState {
        DialogState {
            is_open: matches!(self.phase, FlowPhase::Confirming | FlowPhase::Loading),
            is_confirm_loading: self.confirm_loading,
        }
    }

    /// Rows still shown in the publish review modal.
    #[must_use]
    pub const fn display_rows(&self) -> Option<&DisplayRowList> {
        self.display.as_ref()
    }

    /// Ids checked in the publish review table.
    #[must_use]
    pub const fn review_selection(&self) -> Option<&SelectionSnapshot> {
        self.review.as_ref()
    }

    /// Ids a confirm would hand to the handler: the review selection when the
    /// flow has one, otherwise the host selection.
    fn target_ids<'a, S: SelectionSource + ?Sized>(&'a self, source: &'a S) -> &'a [EntryId] {
        self.review
            .as_ref()
            .map_or_else(|| source.selected_entries(), SelectionSource::selected_entries)
    }

    /// Review table rows, flagging the ones to render as processing.
    #[must_use]
    pub fn rendered_rows<'a, S: SelectionSource + ?Sized>(
        &'a self,
        source: &S,
    ) -> Vec<DisplayRow<'a>> {
        let Some(display) = &self.display else {
            return Vec::new();
        };
        let targets = self.target_ids(source);
        display
            .rows()
            .iter()
            .map(|record| DisplayRow {
                record,
                processing: self.confirm_loading && targets.contains(&record.id),
            })
            .collect()
    }

    /// Whether a removal timer handle is held.
    #[must_use]
    pub const fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    fn reject(&self, event: &'static str) -> BulkActionError {
        tracing::warn!(kind = %self.kind, phase = %self.phase, event, "bulk action transition rejected");
        BulkActionError::InvalidTransition {
            kind: self.kind,
            phase: self.phase,
            event,
        }
    }

    fn enter(&mut self, next: FlowPhase) {
        tracing::debug!(kind = %self.kind, from = %self.phase, to = %next, "bulk action transition");
        self.phase = next;
    }

    /// Show the flow: the review modal for publish, the confirm dialog otherwise.
    ///
    /// # Errors
    /// Returns [`BulkActionError::InvalidTransition`] unless the flow is closed.
    pub fn open<S: SelectionSource + ?Sized>(&mut self, source: &S) -> BulkActionResult<()> {
        if self.phase != FlowPhase::Closed {
            return Err(self.reject("open"));
        }
        self.session = self.session.wrapping_add(1);
        if self.kind.has_review_modal() {
            self.display = Some(DisplayRowList::seeded(source));
            self.review = Some(SelectionSnapshot::of_selected_rows(source));
            self.enter(FlowPhase::Reviewing);
        } else {
            self.enter(FlowPhase::Confirming);
        }
        Ok(())
    }

    /// Check or uncheck `id` in the publish review table.
    ///
    /// # Errors
    /// Returns [`BulkActionError::InvalidTransition`] unless the review modal is idle.
    pub fn toggle_review_selection(&mut self, id: EntryId) -> BulkActionResult<()> {
        match (self.phase, self.review.as_mut()) {
            (FlowPhase::Reviewing, Some(review)) => {
                let checked = review.toggle(id);
                tracing::debug!(kind = %self.kind, id = %id, checked, "review selection toggled");
                Ok(())
            }
            _ => Err(self.reject("toggle_review_selection")),
        }
    }

    /// Check every review row, or clear them all when every row is checked.
    ///
    /// # Errors
    /// Returns [`BulkActionError::InvalidTransition`] unless the review modal is idle.
    pub fn toggle_review_all(&mut self) -> BulkActionResult<()> {
        match (self.phase, self.review.as_mut()) {
            (FlowPhase::Reviewing, Some(review)) => {
                review.toggle_all();
                Ok(())
            }
            _ => Err(self.reject("toggle_review_all")),
        }
    }

    /// Open the confirmation dialog from the publish review modal.
    ///
    /// # Errors
    /// Returns [`BulkActionError::InvalidTransition`] unless the review modal is idle
    /// and at least one review row is checked.
    pub fn request_confirm<S: SelectionSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> BulkActionResult<()> {
        if self.phase != FlowPhase::Reviewing || self.target_ids(source).is_empty() {
            return Err(self.reject("request_confirm"));
        }
        self.enter(FlowPhase::Confirming);
        Ok(())
    }

    /// Cancel the confirmation dialog without invoking the handler.
    ///
    /// # Errors
    /// Returns [`BulkActionError::InvalidTransition`] unless the dialog is open and idle.
    pub fn dismiss_confirm(&mut self) -> BulkActionResult<()> {
        if self.phase != FlowPhase::Confirming {
            return Err(self.reject("dismiss_confirm"));
        }
        if self.kind.has_review_modal() {
            self.enter(FlowPhase::Reviewing);
        } else {
            self.close();
        }
        Ok(())
    }

    /// Accept the confirm click, capturing the ids for the handler.
    ///
    /// Publish captures its review selection; the other kinds capture `source`.
    ///
    /// # Errors
    /// Returns [`BulkActionError::InvalidTransition`] unless the dialog is open and idle;
    /// a second click while loading is rejected here.
    pub fn confirm<S: SelectionSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> BulkActionResult<ConfirmTicket> {
        if self.phase != FlowPhase::Confirming {
            return Err(self.reject("confirm"));
        }
        let ids = self.target_ids(source).to_vec();
        self.confirm_loading = true;
        self.enter(FlowPhase::Loading);
        Ok(ConfirmTicket {
            kind: self.kind,
            session: self.session,
            ids,
        })
    }

    /// Apply the handler result for `ticket`.
    pub fn settle(
        &mut self,
        ticket: ConfirmTicket,
        outcome: BulkActionResult<()>,
    ) -> Settlement {
        if ticket.kind != self.kind
            || ticket.session != self.session
            || self.phase != FlowPhase::Loading
        {
            tracing::debug!(kind = %self.kind, phase = %self.phase, "ignoring stale bulk action result");
            return Settlement::Stale;
        }
        let ConfirmTicket { ids, .. } = ticket;
        match outcome {
            Ok(()) => {
                tracing::info!(kind = %self.kind, count = ids.len(), "bulk action completed");
                if !self.kind.has_review_modal() {
                    self.close();
                    return Settlement::Completed { ids };
                }
                if ids.is_empty() {
                    self.confirm_loading = false;
                    self.enter(FlowPhase::Reviewing);
                    return Settlement::Completed { ids };
                }
                self.removal = Some(RemovalAnimation::new(&ids));
                self.enter(FlowPhase::Removing);
                Settlement::StartRemoval {
                    ids,
                    period: self.removal_interval,
                }
            }
            Err(error) => {
                if self.kind.has_review_modal() {
                    self.confirm_loading = false;
                    self.enter(FlowPhase::Reviewing);
                } else {
                    self.close();
                }
                Settlement::Failed { error }
            }
        }
    }

    /// Store the timer driving [`BulkActionFlow::tick`].
    ///
    /// The handle is released right away when no removal is running.
    pub fn arm_timer(&mut self, handle: H) {
        if self.phase != FlowPhase::Removing || self.timer.is_some() {
            tracing::debug!(kind = %self.kind, phase = %self.phase, "releasing unneeded removal timer");
            handle.cancel();
            return;
        }
        self.timer = Some(handle);
    }

    /// Advance the removal animation by one row.
    ///
    /// Returns `None` when no animation is running (a late tick after teardown).
    pub fn tick(&mut self) -> Option<RemovalStep> {
        if self.phase != FlowPhase::Removing {
            return None;
        }
        let (Some(removal), Some(display)) = (self.removal.as_mut(), self.display.as_mut())
        else {
            return None;
        };
        let step = removal.tick(display);
        if let RemovalStep::Finished { .. } = step {
            self.removal = None;
            if let Some(timer) = self.timer.take() {
                timer.cancel();
            }
            self.confirm_loading = false;
            self.enter(FlowPhase::Reviewing);
        }
        Some(step)
    }

    /// Dismiss everything and discard modal-local state.
    ///
    /// Any in-flight ticket becomes stale and a running timer is released.
    pub fn close(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        self.removal = None;
        self.display = None;
        self.review = None;
        self.confirm_loading = false;
        self.session = self.session.wrapping_add(1);
        if self.phase != FlowPhase::Closed {
            self.enter(FlowPhase::Closed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::{ManualScheduler, ManualTaskHandle, Scheduler};
    use crate::error::HandlerError;
    use chrono::{TimeZone, Utc};

    type Flow = BulkActionFlow<ManualTaskHandle>;

    const PERIOD: Duration = Duration::from_millis(1500);

    fn selection(ids: &[u64]) -> SelectionSnapshot {
        let at = Utc.with_ymd_and_hms(2023, 1, 1, 10, 10, 10).unwrap();
        SelectionSnapshot::new(
            ids.iter().copied().map(EntryId),
            vec![RowRecord::draft(1), RowRecord::published(2, at), RowRecord::draft(3)],
        )
    }

    fn failure(kind: BulkActionKind) -> BulkActionResult<()> {
        Err(BulkActionError::Handler {
            kind,
            source: HandlerError::new("nope"),
        })
    }

    fn displayed(flow: &Flow) -> Vec<EntryId> {
        flow.display_rows()
            .map(|list| list.rows().iter().map(|row| row.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn delete_flow_confirms_with_current_selection() {
        let source = selection(&[1, 2]);
        let mut flow = Flow::new(BulkActionKind::Delete, PERIOD);
        flow.open(&source).unwrap();
        assert!(flow.dialog().is_open);
        let ticket = flow.confirm(&source).unwrap();
        assert_eq!(ticket.ids(), &[EntryId(1), EntryId(2)]);
        assert!(flow.dialog().is_confirm_loading);
        assert_eq!(
            flow.settle(ticket, Ok(())),
            Settlement::Completed {
                ids: vec![EntryId(1), EntryId(2)]
            }
        );
        assert_eq!(flow.phase(), FlowPhase::Closed);
        assert_eq!(flow.dialog(), DialogState::closed());
    }

    #[test]
    fn cancelling_a_simple_dialog_closes_it() {
        let source = selection(&[1]);
        let mut flow = Flow::new(BulkActionKind::Unpublish, PERIOD);
        flow.open(&source).unwrap();
        flow.dismiss_confirm().unwrap();
        assert!(!flow.is_open());
    }

    #[test]
    fn unpublish_failure_closes_and_resets_loading() {
        let source = selection(&[2]);
        let mut flow = Flow::new(BulkActionKind::Unpublish, PERIOD);
        flow.open(&source).unwrap();
        let ticket = flow.confirm(&source).unwrap();
        let settlement = flow.settle(ticket, failure(BulkActionKind::Unpublish));
        assert!(matches!(settlement, Settlement::Failed { .. }));
        assert!(!flow.is_open());
        assert!(!flow.is_confirm_loading());
    }

    #[test]
    fn publish_opens_review_modal_with_selected_rows() {
        let source = selection(&[3, 1]);
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        assert_eq!(flow.phase(), FlowPhase::Reviewing);
        assert!(!flow.dialog().is_open);
        assert_eq!(displayed(&flow), vec![EntryId(1), EntryId(3)]);
    }

    #[test]
    fn publish_confirm_requires_a_selection() {
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        let empty = selection(&[]);
        flow.open(&empty).unwrap();
        let err = flow.request_confirm(&empty).unwrap_err();
        assert_eq!(
            err,
            BulkActionError::InvalidTransition {
                kind: BulkActionKind::Publish,
                phase: FlowPhase::Reviewing,
                event: "request_confirm",
            }
        );
    }

    #[test]
    fn double_confirm_is_rejected_while_loading() {
        let source = selection(&[1]);
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.request_confirm(&source).unwrap();
        let _ticket = flow.confirm(&source).unwrap();
        assert!(!flow.dialog().confirm_enabled());
        assert!(matches!(
            flow.confirm(&source),
            Err(BulkActionError::InvalidTransition { event: "confirm", .. })
        ));
        assert!(flow.dismiss_confirm().is_err());
    }

    #[test]
    fn publish_success_removes_rows_one_tick_at_a_time() {
        let source = selection(&[1, 2]);
        let scheduler = ManualScheduler::new();
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.request_confirm(&source).unwrap();
        let ticket = flow.confirm(&source).unwrap();
        let settlement = flow.settle(ticket, Ok(()));
        assert_eq!(
            settlement,
            Settlement::StartRemoval {
                ids: vec![EntryId(1), EntryId(2)],
                period: PERIOD
            }
        );
        assert!(!flow.dialog().is_open);
        assert!(flow.is_confirm_loading());
        flow.arm_timer(scheduler.repeat(PERIOD, Box::new(|| {})));
        assert!(flow.has_timer());

        assert_eq!(displayed(&flow), vec![EntryId(1), EntryId(2)]);
        flow.tick();
        assert_eq!(displayed(&flow), vec![EntryId(2)]);
        assert!(flow.is_confirm_loading());
        flow.tick();
        assert!(displayed(&flow).is_empty());
        assert!(!flow.is_confirm_loading());
        assert!(!flow.has_timer());
        assert_eq!(scheduler.live_tasks(), 0);
        assert_eq!(flow.phase(), FlowPhase::Reviewing);
        assert_eq!(flow.tick(), None);
    }

    #[test]
    fn publish_failure_keeps_every_row() {
        let source = selection(&[1, 2]);
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.request_confirm(&source).unwrap();
        let ticket = flow.confirm(&source).unwrap();
        let settlement = flow.settle(ticket, failure(BulkActionKind::Publish));
        assert!(matches!(settlement, Settlement::Failed { .. }));
        assert_eq!(flow.phase(), FlowPhase::Reviewing);
        assert!(!flow.dialog().is_open);
        assert!(!flow.is_confirm_loading());
        assert_eq!(displayed(&flow), vec![EntryId(1), EntryId(2)]);
        assert_eq!(flow.tick(), None);
    }

    #[test]
    fn closing_mid_flight_makes_the_ticket_stale() {
        let source = selection(&[1]);
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.request_confirm(&source).unwrap();
        let ticket = flow.confirm(&source).unwrap();
        flow.close();
        flow.open(&source).unwrap();
        assert_eq!(flow.settle(ticket, Ok(())), Settlement::Stale);
        assert_eq!(flow.phase(), FlowPhase::Reviewing);
        assert_eq!(displayed(&flow), vec![EntryId(1)]);
    }

    #[test]
    fn closing_mid_animation_releases_the_timer() {
        let source = selection(&[1, 3]);
        let scheduler = ManualScheduler::new();
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.request_confirm(&source).unwrap();
        let ticket = flow.confirm(&source).unwrap();
        flow.settle(ticket, Ok(()));
        flow.arm_timer(scheduler.repeat(PERIOD, Box::new(|| {})));
        flow.tick();
        flow.close();
        assert_eq!(scheduler.live_tasks(), 0);
        assert!(flow.display_rows().is_none());
        assert_eq!(flow.tick(), None);
    }

    #[test]
    fn timers_armed_outside_removal_are_released() {
        let scheduler = ManualScheduler::new();
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.arm_timer(scheduler.repeat(PERIOD, Box::new(|| {})));
        assert!(!flow.has_timer());
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[test]
    fn processing_cells_follow_loading_and_review_selection() {
        let source = selection(&[1, 3]);
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        assert!(flow.rendered_rows(&source).iter().all(|row| !row.processing));
        flow.toggle_review_selection(EntryId(1)).unwrap();
        flow.request_confirm(&source).unwrap();
        let _ticket = flow.confirm(&source).unwrap();
        let flags: Vec<_> = flow
            .rendered_rows(&source)
            .iter()
            .map(|row| (row.record.id, row.processing))
            .collect();
        assert_eq!(flags, vec![(EntryId(1), false), (EntryId(3), true)]);
    }

    #[test]
    fn unchecking_a_review_row_narrows_the_ticket() {
        let source = selection(&[1, 3]);
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.toggle_review_selection(EntryId(3)).unwrap();
        assert_eq!(
            flow.review_selection().map(SelectionSource::selected_entries),
            Some(&[EntryId(1)][..])
        );
        flow.request_confirm(&source).unwrap();
        let ticket = flow.confirm(&source).unwrap();
        assert_eq!(ticket.ids(), &[EntryId(1)]);
        assert_eq!(
            flow.settle(ticket, Ok(())),
            Settlement::StartRemoval {
                ids: vec![EntryId(1)],
                period: PERIOD
            }
        );
        assert_eq!(source.selected_entries(), &[EntryId(1), EntryId(3)]);
    }

    #[test]
    fn unchecking_every_review_row_blocks_confirm() {
        let source = selection(&[1, 3]);
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.toggle_review_all().unwrap();
        assert!(flow.review_selection().is_some_and(SelectionSnapshot::is_empty));
        assert!(flow.request_confirm(&source).is_err());
        flow.toggle_review_all().unwrap();
        flow.request_confirm(&source).unwrap();
    }

    #[test]
    fn review_toggles_are_rejected_outside_review() {
        let source = selection(&[1]);
        let mut publish = Flow::new(BulkActionKind::Publish, PERIOD);
        assert!(publish.toggle_review_selection(EntryId(1)).is_err());
        publish.open(&source).unwrap();
        publish.request_confirm(&source).unwrap();
        assert!(matches!(
            publish.toggle_review_selection(EntryId(1)),
            Err(BulkActionError::InvalidTransition {
                event: "toggle_review_selection",
                ..
            })
        ));
        assert!(publish.toggle_review_all().is_err());

        let mut delete = Flow::new(BulkActionKind::Delete, PERIOD);
        delete.open(&source).unwrap();
        assert!(delete.toggle_review_selection(EntryId(1)).is_err());
        assert!(delete.review_selection().is_none());
    }

    #[test]
    fn publish_success_with_no_ids_returns_to_review_without_a_timer() {
        let source = selection(&[1]);
        let scheduler = ManualScheduler::new();
        let mut flow = Flow::new(BulkActionKind::Publish, PERIOD);
        flow.open(&source).unwrap();
        flow.request_confirm(&source).unwrap();
        let ticket = ConfirmTicket {
            ids: Vec::new(),
            ..flow.confirm(&selection(&[])).unwrap()
        };

        assert_eq!(
            flow.settle(ticket, Ok(())),
            Settlement::Completed { ids: Vec::new() }
        );
        assert_eq!(flow.phase(), FlowPhase::Reviewing);
        assert!(!flow.is_confirm_loading());
        assert!(!flow.has_timer());
        assert_eq!(flow.tick(), None);
        assert_eq!(displayed(&flow), vec![EntryId(1)]);

        flow.arm_timer(scheduler.repeat(PERIOD, Box::new(|| {})));
        assert!(!flow.has_timer());
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[test]
    fn open_twice_is_rejected() {
        let source = selection(&[1]);
        let mut flow = Flow::new(BulkActionKind::Delete, PERIOD);
        flow.open(&source).unwrap();
        assert!(flow.open(&source).is_err());
        assert_eq!(flow.phase(), FlowPhase::Confirming);
    }
}
