//! Basic form controls shared by the views.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

impl ButtonVariant {
    fn class(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn btn-primary",
            ButtonVariant::Secondary => "btn btn-secondary",
            ButtonVariant::Ghost => "btn btn-ghost",
        }
    }
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default = "".to_string())] class: String,
    #[props(default = "button".to_string())] r#type: String,
    #[props(default)] disabled: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    rsx! {
        button {
            class: "{variant.class()} {class}",
            r#type: r#type.clone(),
            disabled: disabled,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            {children}
        }
    }
}

#[component]
pub fn Input(
    #[props(default = "".to_string())] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default = "".to_string())] placeholder: String,
    value: String,
    #[props(default)] disabled: bool,
    maxlength: Option<usize>,
    #[props(default)] invalid: bool,
    oninput: EventHandler<FormEvent>,
    onblur: Option<EventHandler<FocusEvent>>,
) -> Element {
    let state = if invalid { "input input--invalid" } else { "input" };
    rsx! {
        input {
            class: "{state} {class}",
            r#type: r#type.clone(),
            placeholder: "{placeholder}",
            value: "{value}",
            disabled: disabled,
            maxlength: maxlength.map(|m| m.to_string()),
            oninput: move |evt| oninput.call(evt),
            onblur: move |evt| {
                if let Some(handler) = &onblur {
                    handler.call(evt);
                }
            },
        }
    }
}
