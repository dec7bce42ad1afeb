//! Drives a [`BulkActionFlow`] with a scheduler and the caller's handlers.
//!
//! # Design
//! - The flow sits behind `Rc<RefCell<_>>`; no borrow is held across the handler await.
//! - Removal ticks reach the flow through a weak reference, so a torn-down
//!   controller never receives updates.
//! - Observers are notified after every state change so views can re-render.

use crate::config::BulkActionConfig;
use crate::core::schedule::Scheduler;
use crate::core::selection::{EntryId, SelectionSource};
use crate::error::BulkActionResult;
use crate::features::bulk_actions::actions::BulkActionKind;
use crate::features::bulk_actions::handler::{BulkActionHandlers, dispatch};
use crate::features::bulk_actions::state::{BulkActionFlow, Settlement};
use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

type Observer = Rc<dyn Fn()>;

/// Owns one bulk-action flow and the timer that animates it.
pub struct BulkActionController<S: Scheduler> {
    flow: Rc<RefCell<BulkActionFlow<S::Handle>>>,
    scheduler: S,
    observer: Option<Observer>,
}

impl<S: Scheduler> BulkActionController<S> {
    /// Closed controller for `kind`.
    #[must_use]
    pub fn new(kind: BulkActionKind, config: &BulkActionConfig, scheduler: S) -> Self {
        Self {
            flow: Rc::new(RefCell::new(BulkActionFlow::from_config(kind, config))),
            scheduler,
            observer: None,
        }
    }

    /// Call `observer` after every state change, including removal ticks.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn() + 'static) -> Self {
        self.observer = Some(Rc::new(observer));
        self
    }

    /// Read the flow state.
    ///
    /// # Panics
    /// Panics if called from inside an observer while the flow is being mutated.
    #[must_use]
    pub fn flow(&self) -> Ref<'_, BulkActionFlow<S::Handle>> {
        self.flow.borrow()
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer();
        }
    }

    /// Show the flow for the current selection.
    ///
    /// # Errors
    /// Propagates rejected transitions from [`BulkActionFlow::open`].
    pub fn open<Src: SelectionSource + ?Sized>(&self, source: &Src) -> BulkActionResult<()> {
        self.flow.borrow_mut().open(source)?;
        self.notify();
        Ok(())
    }

    /// Check or uncheck a row in the publish review table.
    ///
    /// # Errors
    /// Propagates rejected transitions from [`BulkActionFlow::toggle_review_selection`].
    pub fn toggle_review_selection(&self, id: EntryId) -> BulkActionResult<()> {
        self.flow.borrow_mut().toggle_review_selection(id)?;
        self.notify();
        Ok(())
    }

    /// Check or clear every row in the publish review table.
    ///
    /// # Errors
    /// Propagates rejected transitions from [`BulkActionFlow::toggle_review_all`].
    pub fn toggle_review_all(&self) -> BulkActionResult<()> {
        self.flow.borrow_mut().toggle_review_all()?;
        self.notify();
        Ok(())
    }

    /// Open the confirmation dialog from the review modal.
    ///
    /// # Errors
    /// Propagates rejected transitions from [`BulkActionFlow::request_confirm`].
    pub fn request_confirm<Src: SelectionSource + ?Sized>(
        &self,
        source: &Src,
    ) -> BulkActionResult<()> {
        self.flow.borrow_mut().request_confirm(source)?;
        self.notify();
        Ok(())
    }

    /// Cancel the confirmation dialog.
    ///
    /// # Errors
    /// Propagates rejected transitions from [`BulkActionFlow::dismiss_confirm`].
    pub fn dismiss_confirm(&self) -> BulkActionResult<()> {
        self.flow.borrow_mut().dismiss_confirm()?;
        self.notify();
        Ok(())
    }

    /// Dismiss everything, releasing any running timer.
    pub fn close(&self) {
        self.flow.borrow_mut().close();
        self.notify();
    }

    /// Confirm, await the handler, and apply its result.
    ///
    /// The selection is captured before the await; later selection changes do not
    /// affect the handler call or the removal sequence.
    ///
    /// # Errors
    /// Returns a rejected transition when the dialog is not ready to confirm. Handler
    /// failures are not errors here: they are reported as [`Settlement::Failed`].
    pub async fn confirm<Src, H>(&self, source: &Src, handlers: &H) -> BulkActionResult<Settlement>
    where
        Src: SelectionSource + ?Sized,
        H: BulkActionHandlers + ?Sized,
    {
        let ticket = self.flow.borrow_mut().confirm(source)?;
        self.notify();
        let outcome = dispatch(handlers, ticket.kind(), ticket.ids()).await;
        let settlement = self.flow.borrow_mut().settle(ticket, outcome);
        if let Settlement::StartRemoval { period, .. } = &settlement {
            self.arm_removal(*period);
        }
        self.notify();
        Ok(settlement)
    }

    fn arm_removal(&self, period: Duration) {
        let flow: Weak<RefCell<BulkActionFlow<S::Handle>>> = Rc::downgrade(&self.flow);
        let observer = self.observer.clone();
        let handle = self.scheduler.repeat(
            period,
            Box::new(move || {
                let Some(flow) = flow.upgrade() else {
                    return;
                };
                let step = flow.borrow_mut().tick();
                if let Some(step) = step {
                    tracing::debug!(?step, "removal tick");
                    if let Some(observer) = &observer {
                        observer();
                    }
                }
            }),
        );
        self.flow.borrow_mut().arm_timer(handle);
    }
}

impl<S: Scheduler> Drop for BulkActionController<S> {
    fn drop(&mut self) {
        if let Ok(mut flow) = self.flow.try_borrow_mut() {
            flow.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::ManualScheduler;
    use crate::core::selection::{RowRecord, SelectionSnapshot};
    use crate::error::HandlerError;
    use crate::features::bulk_actions::state::FlowPhase;
    use async_trait::async_trait;
    use std::cell::Cell;

    struct Outcome(Result<(), HandlerError>);

    #[async_trait(?Send)]
    impl BulkActionHandlers for Outcome {
        async fn publish_all(&self, _ids: &[EntryId]) -> Result<(), HandlerError> {
            self.0.clone()
        }

        async fn unpublish_all(&self, _ids: &[EntryId]) -> Result<(), HandlerError> {
            self.0.clone()
        }

        async fn delete_all(&self, _ids: &[EntryId]) -> Result<(), HandlerError> {
            self.0.clone()
        }
    }

    fn source() -> SelectionSnapshot {
        SelectionSnapshot::new(
            [EntryId(1), EntryId(2)],
            vec![RowRecord::draft(1), RowRecord::draft(2)],
        )
    }

    fn controller(scheduler: &ManualScheduler) -> BulkActionController<ManualScheduler> {
        let config = BulkActionConfig::default().with_removal_interval(Duration::from_millis(100));
        BulkActionController::new(BulkActionKind::Publish, &config, scheduler.clone())
    }

    #[tokio::test]
    async fn successful_publish_arms_and_finishes_the_animation() {
        let scheduler = ManualScheduler::new();
        let renders = Rc::new(Cell::new(0));
        let controller = {
            let renders = Rc::clone(&renders);
            controller(&scheduler).with_observer(move || renders.set(renders.get() + 1))
        };
        let source = source();
        controller.open(&source).unwrap();
        controller.request_confirm(&source).unwrap();
        let settlement = controller.confirm(&source, &Outcome(Ok(()))).await.unwrap();
        assert!(matches!(settlement, Settlement::StartRemoval { .. }));
        assert_eq!(scheduler.live_tasks(), 1);

        scheduler.advance(Duration::from_millis(100));
        assert_eq!(controller.flow().display_rows().map(|rows| rows.len()), Some(1));
        scheduler.advance(Duration::from_millis(100));
        assert_eq!(controller.flow().display_rows().map(|rows| rows.len()), Some(0));
        assert!(!controller.flow().is_confirm_loading());
        assert_eq!(scheduler.live_tasks(), 0);
        assert!(renders.get() >= 6);
    }

    #[tokio::test]
    async fn failed_publish_reports_and_resets() {
        let scheduler = ManualScheduler::new();
        let controller = controller(&scheduler);
        let source = source();
        controller.open(&source).unwrap();
        controller.request_confirm(&source).unwrap();
        let settlement = controller
            .confirm(&source, &Outcome(Err(HandlerError::new("offline"))))
            .await
            .unwrap();
        assert!(matches!(settlement, Settlement::Failed { .. }));
        assert_eq!(controller.flow().phase(), FlowPhase::Reviewing);
        assert_eq!(scheduler.live_tasks(), 0);
    }

    struct Captured(RefCell<Vec<EntryId>>);

    #[async_trait(?Send)]
    impl BulkActionHandlers for Captured {
        async fn publish_all(&self, ids: &[EntryId]) -> Result<(), HandlerError> {
            self.0.borrow_mut().extend_from_slice(ids);
            Ok(())
        }

        async fn unpublish_all(&self, _ids: &[EntryId]) -> Result<(), HandlerError> {
            Ok(())
        }

        async fn delete_all(&self, _ids: &[EntryId]) -> Result<(), HandlerError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn review_unchecks_narrow_the_publish_call() {
        let scheduler = ManualScheduler::new();
        let controller = controller(&scheduler);
        let source = source();
        let handler = Captured(RefCell::new(Vec::new()));
        controller.open(&source).unwrap();
        controller.toggle_review_selection(EntryId(2)).unwrap();
        controller.request_confirm(&source).unwrap();
        controller.confirm(&source, &handler).await.unwrap();
        assert_eq!(handler.0.borrow().as_slice(), &[EntryId(1)]);

        scheduler.advance(Duration::from_millis(100));
        assert!(!controller.flow().is_confirm_loading());
        assert_eq!(controller.flow().display_rows().map(|rows| rows.len()), Some(1));
        assert_eq!(scheduler.live_tasks(), 0);
    }

    #[tokio::test]
    async fn dropping_the_controller_stops_the_animation() {
        let scheduler = ManualScheduler::new();
        let controller = controller(&scheduler);
        let source = source();
        controller.open(&source).unwrap();
        controller.request_confirm(&source).unwrap();
        controller.confirm(&source, &Outcome(Ok(()))).await.unwrap();
        drop(controller);
        assert_eq!(scheduler.live_tasks(), 0);
        assert_eq!(scheduler.advance(Duration::from_secs(5)), 0);
    }
}
