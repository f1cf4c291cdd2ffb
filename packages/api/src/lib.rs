//! # API crate — HTTP client for the quest REST service
//!
//! Implements the [`domain::QuestBackend`] and [`domain::AccountDirectory`] seams over
//! HTTP with `reqwest`, so the same UI code runs against the real service in the
//! browser and against [`domain::MemoryBackend`] in tests.
//!
//! ## Endpoints
//!
//! | Method | Path | Used for |
//! |--------|------|----------|
//! | `GET` | `/mails` | initial quest board load |
//! | `GET` | `/mails/:id` | quest detail page |
//! | `PATCH` | `/mails/:id` | `{ "isImportant": bool }` after a star toggle |
//! | `GET` | `/users?<field>=<value>` | id / email uniqueness on blur (empty array = free) |
//!
//! The base URL comes from [`ApiConfig`]: `QUEST_API_URL` if set, otherwise the
//! value from `questbox.toml`.

mod config;
mod error;
mod http;

pub use config::{ApiConfig, API_URL_VAR};
pub use error::ApiError;
pub use http::HttpBackend;
