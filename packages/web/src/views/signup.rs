//! Two-step sign-up: credentials, then a summary of what was accepted.

use dioxus::prelude::*;
use domain::RegistrationForm;
use ui::CredentialsInput;

use crate::Route;

#[derive(Clone, Debug, PartialEq)]
enum Step {
    Credentials,
    Done(RegistrationForm),
}

#[component]
pub fn SignUp() -> Element {
    let mut step = use_signal(|| Step::Credentials);
    let mut accepted = use_signal(|| Option::<RegistrationForm>::None);

    let handle_data = move |form: RegistrationForm| {
        tracing::info!(id = %form.id, "sign-up data stored");
        accepted.set(Some(form));
    };

    let handle_next = move |_: ()| {
        if let Some(form) = accepted.take() {
            step.set(Step::Done(form));
        }
    };

    match step() {
        Step::Credentials => rsx! {
            CredentialsInput {
                on_complete: handle_data,
                on_next: handle_next,
            }
        },
        Step::Done(form) => rsx! {
            div {
                class: "signup-done",
                h2 { "인증 요청이 완료되었습니다." }
                dl {
                    dt { "아이디" }
                    dd { "{form.id}" }
                    dt { "이메일" }
                    dd { "{form.email}" }
                    dt { "이름" }
                    dd { "{form.name}" }
                    dt { "생년월일" }
                    dd { "{form.birthday}" }
                }
                Link { to: Route::Board { status: String::new() }, "의뢰함으로 이동" }
            }
        },
    }
}
