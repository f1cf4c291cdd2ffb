use std::time::Duration;

use dioxus::prelude::*;

const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Transient messages shown at the top of the page.
#[derive(Clone, Debug, Default)]
pub struct Notifications {
    pub entries: Vec<Notice>,
    next_id: u64,
}

pub fn use_notifications() -> Signal<Notifications> {
    use_context::<Signal<Notifications>>()
}

/// Show `message` for a few seconds.
pub fn notify(notifications: &mut Signal<Notifications>, level: NoticeLevel, message: &str) {
    let id = {
        let mut state = notifications.write();
        let id = state.next_id;
        state.next_id += 1;
        state.entries.push(Notice {
            id,
            level,
            message: message.to_string(),
        });
        id
    };

    let mut notifications = *notifications;
    spawn(async move {
        sleep(NOTICE_TTL).await;
        notifications.write().entries.retain(|n| n.id != id);
    });
}

#[cfg(target_arch = "wasm32")]
async fn sleep(d: Duration) {
    gloo_timers::future::sleep(d).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(d: Duration) {
    tokio::time::sleep(d).await;
}

/// Provides the notification signal and renders the current notices.
#[component]
pub fn NotificationHost(children: Element) -> Element {
    let notifications = use_context_provider(|| Signal::new(Notifications::default()));
    let entries = notifications().entries.clone();

    rsx! {
        {children}

        div {
            class: "notice-stack",
            for notice in entries {
                div {
                    key: "{notice.id}",
                    class: match notice.level {
                        NoticeLevel::Error => "notice notice--error",
                        NoticeLevel::Success => "notice notice--success",
                        NoticeLevel::Info => "notice notice--info",
                    },
                    "{notice.message}"
                }
            }
        }
    }
}
