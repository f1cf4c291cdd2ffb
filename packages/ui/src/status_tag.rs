use dioxus::prelude::*;
use domain::QuestStatus;

/// Coloured pill for a quest's status.
#[component]
pub fn StatusTag(status: QuestStatus) -> Element {
    let tone = match status {
        QuestStatus::Preparing => "tag tag--blue",
        QuestStatus::Pending => "tag tag--orange",
        QuestStatus::Completed => "tag tag--green",
        QuestStatus::Refuse => "tag tag--red",
        QuestStatus::Trash | QuestStatus::Other(_) => "tag tag--grey",
    };

    rsx! {
        span { class: tone, "{status.label()}" }
    }
}
