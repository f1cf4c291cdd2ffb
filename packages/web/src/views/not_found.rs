use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    tracing::warn!("no route for /{}", segments.join("/"));

    rsx! {
        div {
            class: "not-found",
            h2 { "페이지를 찾을 수 없습니다." }
            Link { to: Route::Board { status: String::new() }, "의뢰함으로 이동" }
        }
    }
}
