use dioxus::prelude::*;
use domain::MailId;
use ui::QuestDetailView;

use crate::Route;

#[component]
pub fn Detail(id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        QuestDetailView {
            id: MailId::from(id),
            on_back: move |_| {
                nav.push(Route::Board { status: String::new() });
            },
        }
    }
}
