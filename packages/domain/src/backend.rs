//! Seams to the REST service.
//!
//! The UI only talks to these traits. `api::HttpBackend` implements them over HTTP;
//! [`crate::MemoryBackend`] implements them in memory for tests and offline use.

use crate::quest::{MailId, QuestRecord};
use crate::registration::UniqueField;

/// Failure reported by a backend implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("quest {0} not found")]
    NotFound(MailId),
}

/// Async access to quest records.
pub trait QuestBackend {
    /// `GET /mails`
    fn fetch_mails(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<QuestRecord>, BackendError>>;
    /// `GET /mails/:id`
    fn fetch_mail(
        &self,
        id: &MailId,
    ) -> impl std::future::Future<Output = Result<QuestRecord, BackendError>>;
    /// `PATCH /mails/:id` with `{isImportant}`
    fn set_important(
        &self,
        id: &MailId,
        important: bool,
    ) -> impl std::future::Future<Output = Result<(), BackendError>>;
}

/// Uniqueness lookups for registration.
pub trait AccountDirectory {
    /// `Ok(true)` when no account uses `value` for `field`.
    fn is_available(
        &self,
        field: UniqueField,
        value: &str,
    ) -> impl std::future::Future<Output = Result<bool, BackendError>>;
}

/// Best-effort push of a locally toggled importance flag. Errors are logged,
/// never returned; the caller's optimistic state stays as it is.
pub async fn propagate_importance<B: QuestBackend>(backend: &B, id: &MailId, important: bool) {
    match backend.set_important(id, important).await {
        Ok(()) => tracing::debug!(%id, important, "importance synced"),
        Err(e) => tracing::error!(%id, important, "Error updating important status: {}", e),
    }
}
