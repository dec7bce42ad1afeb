//! Headless publish walkthrough for native runs.
//!
//! Drives the same controller the browser view uses, with tokio timers in place of
//! `setInterval` and an in-memory store in place of the content API.

use crate::config::BulkActionConfig;
use crate::core::schedule::TokioScheduler;
use crate::core::selection::{EntryId, RowRecord};
use crate::core::store::{self, ListViewStore};
use crate::error::{BulkActionResult, HandlerError};
use crate::features::bulk_actions::actions::BulkActionKind;
use crate::features::bulk_actions::controller::BulkActionController;
use crate::features::bulk_actions::handler::BulkActionHandlers;
use crate::features::bulk_actions::removal::DisplayRowList;
use crate::features::bulk_actions::state::Settlement;
use crate::features::bulk_actions::visibility::ActionVisibility;
use async_trait::async_trait;
use chrono::Utc;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tokio::time::Instant;

/// Handlers mutating a shared in-memory list after a fixed latency.
#[derive(Clone, Debug)]
pub struct InMemoryHandlers {
    store: Rc<RefCell<ListViewStore>>,
    latency: Duration,
    failure: Option<String>,
}

impl InMemoryHandlers {
    /// Handlers that succeed after `latency`.
    #[must_use]
    pub const fn new(store: Rc<RefCell<ListViewStore>>, latency: Duration) -> Self {
        Self {
            store,
            latency,
            failure: None,
        }
    }

    /// Make every call fail with `message`.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    async fn settle(&self, apply: impl FnOnce(&mut ListViewStore)) -> Result<(), HandlerError> {
        tokio::time::sleep(self.latency).await;
        if let Some(message) = &self.failure {
            return Err(HandlerError::new(message.clone()));
        }
        apply(&mut self.store.borrow_mut());
        Ok(())
    }
}

#[async_trait(?Send)]
impl BulkActionHandlers for InMemoryHandlers {
    async fn publish_all(&self, ids: &[EntryId]) -> Result<(), HandlerError> {
        self.settle(|list| store::mark_published(list, ids, Utc::now()))
            .await
    }

    async fn unpublish_all(&self, ids: &[EntryId]) -> Result<(), HandlerError> {
        self.settle(|list| store::mark_unpublished(list, ids)).await
    }

    async fn delete_all(&self, ids: &[EntryId]) -> Result<(), HandlerError> {
        self.settle(|list| store::remove_rows(list, ids)).await
    }
}

/// What a publish walkthrough observed.
#[derive(Clone, Debug, PartialEq)]
pub struct WalkthroughReport {
    /// Toolbar state before the flow opened.
    pub visibility: ActionVisibility,
    /// Result of settling the confirm ticket.
    pub settlement: Settlement,
    /// Review table sizes, one entry per observed change.
    pub display_sizes: Vec<usize>,
    /// Rows published in the store afterwards.
    pub published: usize,
    /// Whether the confirm spinner had cleared when the walkthrough ended.
    pub finished: bool,
    /// Wall time from open to the end of the animation.
    pub elapsed: Duration,
}

/// Store preloaded with draft rows `1..=count`, all selected.
#[must_use]
pub fn seeded_store(count: u64) -> Rc<RefCell<ListViewStore>> {
    let mut list = ListViewStore::default();
    store::set_rows(
        &mut list,
        (1..=count)
            .map(|id| RowRecord::draft(id).with_field("title", format!("Entry {id}")))
            .collect(),
    );
    store::select_all_or_clear(&mut list);
    Rc::new(RefCell::new(list))
}

/// Open the publish flow on the current selection, confirm it, and follow the
/// removal animation until the spinner clears.
///
/// # Errors
/// Returns a rejected transition when the flow cannot open or confirm, e.g. for an
/// empty selection. Handler failures are reported through [`WalkthroughReport::settlement`].
///
/// # Panics
/// Panics when called outside a tokio `LocalSet`.
pub async fn run_publish_walkthrough<H: BulkActionHandlers + ?Sized>(
    config: &BulkActionConfig,
    list: &Rc<RefCell<ListViewStore>>,
    handlers: &H,
) -> BulkActionResult<WalkthroughReport> {
    let started = Instant::now();
    let snapshot = list.borrow().snapshot();
    let visibility = ActionVisibility::evaluate(&snapshot, config, false);
    let controller = BulkActionController::new(BulkActionKind::Publish, config, TokioScheduler);

    controller.open(&snapshot)?;
    controller.request_confirm(&snapshot)?;
    let settlement = controller.confirm(&snapshot, handlers).await?;

    let mut display_sizes = Vec::new();
    if let Settlement::StartRemoval { ids, period } = &settlement {
        let poll = *period / 2;
        let mut last = None;
        for _ in 0..ids.len() * 2 + 4 {
            let size = controller.flow().display_rows().map_or(0, DisplayRowList::len);
            if last != Some(size) {
                display_sizes.push(size);
                last = Some(size);
            }
            if !controller.flow().is_confirm_loading() {
                break;
            }
            tokio::time::sleep(poll).await;
        }
    }

    let published = list.borrow().rows.iter().filter(|row| row.is_published()).count();
    let finished = !controller.flow().is_confirm_loading();
    let elapsed = started.elapsed();
    tracing::info!(
        published,
        finished,
        elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        "publish walkthrough complete"
    );
    Ok(WalkthroughReport {
        visibility,
        settlement,
        display_sizes,
        published,
        finished,
        elapsed,
    })
}
