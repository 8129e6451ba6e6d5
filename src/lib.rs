//! # AnxietyFlow
//!
//! A personal anxiety and panic self-tracking journal.
//!
//! AnxietyFlow records structured journal entries (crisis episodes,
//! anticipatory worries, completed exposures, free-form ideas, voice notes)
//! and derives a 0–100 resilience index plus secondary statistics over
//! rolling time windows. A chat assistant (rule-based or backed by an
//! external LLM API) offers coping guidance that always degrades to
//! actionable canned content on failure.
//!
//! ## Architecture
//!
//! - [`storage::JournalStore`] — the durable, append-only entry sequence plus
//!   the settings and auth records (whole-store JSON persistence)
//! - [`metrics`] — the pure resilience and metrics engine
//! - [`services::JournalService`] — validation and orchestration between the
//!   capture surface and the store
//! - [`chat`] — the chat-assistant collaborator
//! - [`export`] — progress report and raw data dump
//!
//! ## Example
//!
//! ```rust,ignore
//! use anxietyflow::services::JournalService;
//! use anxietyflow::storage::JournalStore;
//!
//! let store = JournalStore::open(data_dir)?;
//! let mut service = JournalService::new(store);
//! let outcome = service.log_success(draft)?;
//! println!("logged {}", outcome.entry.id);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod calendar;
pub mod chat;
pub mod config;
pub mod export;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use chat::{ChatProvider, ChatSession};
pub use config::FlowConfig;
pub use metrics::{MetricsSummary, PeriodWindow, Trend, TrendDirection};
pub use models::{Entry, EntryId, EntryKind, EntryPayload};
pub use services::JournalService;
pub use storage::JournalStore;

/// Error type for anxietyflow operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Out-of-range ratings, empty required text, unknown entry kinds |
/// | `OperationFailed` | Filesystem I/O errors, JSON (de)serialization failures, HTTP failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A rating falls outside its stated range (e.g. intensity > 10)
    /// - Required text fields are empty
    /// - A duration is zero or negative
    /// - An entry kind or provider string is not recognized
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Reading or writing a persisted record fails
    /// - JSON encoding or decoding fails
    /// - A chat or calendar HTTP request fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for anxietyflow operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("intensity out of range".to_string());
        assert_eq!(err.to_string(), "invalid input: intensity out of range");

        let err = Error::OperationFailed {
            operation: "write_entries".to_string(),
            cause: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'write_entries' failed: disk full");
    }
}
