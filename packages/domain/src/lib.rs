//! Platform-independent logic for QuestBox: the registration form and its
//! validation rules, the quest board listing state, and the backend seams.

pub mod backend;
pub mod config;
pub mod listing;
pub mod quest;
pub mod registration;
pub mod validation;

mod memory;
pub use memory::{AccountEntry, MemoryBackend};

pub use backend::{propagate_importance, AccountDirectory, BackendError, QuestBackend};
pub use config::QuestBoxConfig;
pub use listing::{Counts, MailFilter, MenuEntry, MenuItem, QuestBoard, TimeColumn};
pub use quest::{MailId, QuestRecord, QuestStatus};
pub use registration::{
    derive_visibility, Availability, AvailabilityState, FormField, Gender, LookupOutcome,
    RegistrationForm, UniqueField, Visibility,
};
pub use validation::{FieldErrors, RuleContext, ValidationError};
