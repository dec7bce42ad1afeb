//! Caller-supplied confirm handlers.
//!
//! # Design
//! - Persistence and network calls live behind this seam; flows never perform them.
//! - Futures are `?Send`: handlers run on the single UI thread.

use crate::core::selection::EntryId;
use crate::error::{BulkActionError, BulkActionResult, HandlerError};
use crate::features::bulk_actions::actions::BulkActionKind;
use async_trait::async_trait;
use std::rc::Rc;

/// Async callbacks invoked once the user confirms a bulk action.
#[async_trait(?Send)]
pub trait BulkActionHandlers {
    /// Publish every id.
    async fn publish_all(&self, ids: &[EntryId]) -> Result<(), HandlerError>;

    /// Unpublish every id.
    async fn unpublish_all(&self, ids: &[EntryId]) -> Result<(), HandlerError>;

    /// Delete every id.
    async fn delete_all(&self, ids: &[EntryId]) -> Result<(), HandlerError>;
}

/// Route a confirmed action to the matching handler.
///
/// # Errors
/// Returns [`BulkActionError::Handler`] when the handler fails.
pub async fn dispatch<H: BulkActionHandlers + ?Sized>(
    handlers: &H,
    kind: BulkActionKind,
    ids: &[EntryId],
) -> BulkActionResult<()> {
    tracing::info!(kind = %kind, count = ids.len(), "dispatching bulk action");
    let outcome = match kind {
        BulkActionKind::Publish => handlers.publish_all(ids).await,
        BulkActionKind::Unpublish => handlers.unpublish_all(ids).await,
        BulkActionKind::Delete => handlers.delete_all(ids).await,
    };
    outcome.map_err(|source| {
        tracing::warn!(kind = %kind, detail = %source.message, "bulk action handler failed");
        BulkActionError::Handler { kind, source }
    })
}

/// Shared handler reference that compares by identity, for component props.
#[derive(Clone)]
pub struct HandlerRef(pub Rc<dyn BulkActionHandlers>);

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<H: BulkActionHandlers + 'static> From<Rc<H>> for HandlerRef {
    fn from(value: Rc<H>) -> Self {
        Self(value)
    }
}
