//! # Design
//!
//! - Provide structured, constant-message errors for bulk-action flows and host config.
//! - Capture the flow kind and phase so rejected transitions are reproducible in tests.
//! - Handler failures carry the collaborator's message without interpolating it.

use crate::features::bulk_actions::actions::BulkActionKind;
use crate::features::bulk_actions::state::FlowPhase;
use thiserror::Error;

/// Result type for bulk-action flow operations.
pub type BulkActionResult<T> = Result<T, BulkActionError>;

/// Result type for host configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure reported by a caller-supplied confirm handler.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("bulk action handler rejected the request")]
pub struct HandlerError {
    /// Collaborator-provided detail for its own error reporting.
    pub message: String,
}

impl HandlerError {
    /// Wrap a collaborator message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors produced by bulk-action flows.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BulkActionError {
    /// An event arrived in a phase that does not accept it; state is unchanged.
    #[error("bulk action transition rejected")]
    InvalidTransition {
        /// Flow that rejected the event.
        kind: BulkActionKind,
        /// Phase the flow was in.
        phase: FlowPhase,
        /// Event name.
        event: &'static str,
    },
    /// The awaited confirm handler failed.
    #[error("bulk action handler failed")]
    Handler {
        /// Flow whose handler failed.
        kind: BulkActionKind,
        /// Underlying handler error.
        #[source]
        source: HandlerError,
    },
}

/// Errors produced while loading host configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field failed validation.
    #[error("bulk action config invalid")]
    Invalid {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// The raw document was not valid JSON for the config shape.
    #[error("bulk action config parse failure")]
    Parse {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
