//! Shared views for the quest box: registration, listing and detail.

use dioxus::prelude::*;

pub mod components;

pub mod notifications;
pub use notifications::{notify, use_notifications, NoticeLevel, NotificationHost};

mod provider;
pub use provider::{make_backend, use_app, AppContext, QuestBoxProvider};

mod status_tag;
pub use status_tag::StatusTag;

mod credentials_input;
pub use credentials_input::CredentialsInput;

mod quest_board;
pub use quest_board::QuestBoardView;

mod quest_detail;
pub use quest_detail::QuestDetailView;

pub const QUESTBOX_CSS: Asset = asset!("/assets/questbox.css");
