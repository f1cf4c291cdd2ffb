use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_regular_icons::FaStar as FaRegStar;
use dioxus_free_icons::icons::fa_solid_icons::FaStar;
use dioxus_free_icons::Icon;
use domain::{MailId, QuestBackend, QuestRecord, TimeColumn};

use crate::provider::use_app;
use crate::StatusTag;

enum DetailState {
    Loading,
    Loaded(QuestRecord),
    Missing,
}

/// Single quest page backed by `GET /mails/:id`.
#[component]
pub fn QuestDetailView(id: ReadOnlySignal<MailId>, on_back: EventHandler<()>) -> Element {
    let app = use_app();
    let backend = use_signal(|| app.backend.clone());

    let mut state = use_signal(|| DetailState::Loading);

    // Reading the prop signal here re-runs the loader when the route param changes.
    let _loader = use_resource(move || {
        let id = id();
        async move {
            state.set(DetailState::Loading);
            let Some(backend) = backend.read().clone() else {
                tracing::error!("Error fetching quest {}: no quest API configured", id);
                state.set(DetailState::Missing);
                return;
            };
            match backend.fetch_mail(&id).await {
                Ok(record) => state.set(DetailState::Loaded(record)),
                Err(e) => {
                    tracing::error!("Error fetching quest {}: {}", id, e);
                    state.set(DetailState::Missing);
                }
            }
        }
    });

    let body = match &*state.read() {
        DetailState::Loading => rsx! {
            p { class: "quest-detail-empty", "불러오는 중..." }
        },
        DetailState::Missing => rsx! {
            p { class: "quest-detail-empty", "의뢰를 찾을 수 없습니다." }
        },
        DetailState::Loaded(record) => {
            let record = record.clone();
            rsx! {
                header {
                    class: "quest-detail-header",
                    if record.is_important {
                        span { class: "star star--on", Icon { icon: FaStar, width: 18, height: 18 } }
                    } else {
                        span { class: "star", Icon { icon: FaRegStar, width: 18, height: 18 } }
                    }
                    StatusTag { status: record.status.clone() }
                    h2 { "{record.title}" }
                }
                dl {
                    class: "quest-detail-fields",
                    dt { "분야" }
                    dd { "{record.category}" }
                    dt { "세부 분야" }
                    dd { "{record.subcategory}" }
                    dt { {TimeColumn::RequestedAt.label()} }
                    dd { "{record.requested_at_display()}" }
                    dt { {TimeColumn::AvailableAt.label()} }
                    dd { "{record.time}" }
                }
            }
        }
    };

    rsx! {
        article {
            class: "quest-detail",
            button {
                r#type: "button",
                class: "btn btn-ghost",
                onclick: move |_| on_back.call(()),
                "목록으로"
            }
            {body}
        }
    }
}
