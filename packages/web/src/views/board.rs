use dioxus::prelude::*;
use domain::{MailFilter, MailId};
use ui::QuestBoardView;

use crate::Route;

/// `/board?status=...`. The query mirrors the last menu selection; the listing
/// itself always opens on "all".
#[component]
pub fn Board(status: String) -> Element {
    let nav = use_navigator();
    tracing::debug!(%status, "board route");

    rsx! {
        QuestBoardView {
            on_open: move |id: MailId| {
                nav.push(Route::Detail { id: id.to_string() });
            },
            on_filter_change: move |filter: MailFilter| {
                nav.push(Route::Board { status: filter.to_string() });
            },
        }
    }
}
