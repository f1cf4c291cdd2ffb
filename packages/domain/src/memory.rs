use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::{AccountDirectory, BackendError, QuestBackend};
use crate::quest::{MailId, QuestRecord};
use crate::registration::UniqueField;

/// A registered account as far as uniqueness checks care.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountEntry {
    pub id: String,
    pub email: String,
}

/// In-memory backend for testing and running the UI without a server.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    mails: Arc<Mutex<Vec<QuestRecord>>>,
    accounts: Arc<Mutex<Vec<AccountEntry>>>,
    failing: Arc<Mutex<bool>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mails(mails: Vec<QuestRecord>) -> Self {
        let backend = Self::default();
        *lock(&backend.mails) = mails;
        backend
    }

    pub fn add_account(&self, id: &str, email: &str) {
        lock(&self.accounts).push(AccountEntry {
            id: id.to_string(),
            email: email.to_string(),
        });
    }

    /// Make every subsequent call fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        *lock(&self.failing) = failing;
    }

    /// Snapshot of the stored records.
    pub fn mails(&self) -> Vec<QuestRecord> {
        lock(&self.mails).clone()
    }

    fn check(&self) -> Result<(), BackendError> {
        if *lock(&self.failing) {
            Err(BackendError::Transport("backend unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl QuestBackend for MemoryBackend {
    async fn fetch_mails(&self) -> Result<Vec<QuestRecord>, BackendError> {
        self.check()?;
        Ok(self.mails())
    }

    async fn fetch_mail(&self, id: &MailId) -> Result<QuestRecord, BackendError> {
        self.check()?;
        lock(&self.mails)
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.clone()))
    }

    async fn set_important(&self, id: &MailId, important: bool) -> Result<(), BackendError> {
        self.check()?;
        let mut mails = lock(&self.mails);
        let mail = mails
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| BackendError::NotFound(id.clone()))?;
        mail.is_important = important;
        Ok(())
    }
}

impl AccountDirectory for MemoryBackend {
    async fn is_available(&self, field: UniqueField, value: &str) -> Result<bool, BackendError> {
        self.check()?;
        let accounts = lock(&self.accounts);
        let taken = accounts.iter().any(|a| match field {
            UniqueField::Id => a.id == value,
            UniqueField::Email => a.email.eq_ignore_ascii_case(value),
        });
        Ok(!taken)
    }
}
