//! Credentials step of the sign-up flow.

use chrono::Local;
use dioxus::prelude::*;
use domain::registration::ValidateTrigger;
use domain::validation::{validate, validate_field};
use domain::{
    derive_visibility, AccountDirectory, AvailabilityState, FieldErrors, FormField, Gender,
    LookupOutcome, RegistrationForm, RuleContext,
};

use crate::components::{Button, ButtonVariant, Input};
use crate::notifications::{notify, use_notifications, NoticeLevel};
use crate::provider::use_app;

fn rule_context<'a>(
    form: &'a RegistrationForm,
    availability: &'a AvailabilityState,
    minimum_age: u32,
) -> RuleContext<'a> {
    RuleContext {
        form,
        availability,
        today: Local::now().date_naive(),
        minimum_age,
    }
}

fn input_type(field: FormField) -> &'static str {
    match field {
        FormField::Password | FormField::ConfirmPassword => "password",
        FormField::Email => "email",
        _ => "text",
    }
}

/// Registration form. `on_complete` receives the accepted record, then `on_next`
/// advances the surrounding step flow. Neither is called while any rule fails.
#[component]
pub fn CredentialsInput(
    on_complete: EventHandler<RegistrationForm>,
    on_next: EventHandler<()>,
) -> Element {
    let app = use_app();
    let minimum_age = app.config.registration.minimum_age;
    let directory = use_signal(|| app.backend.clone());
    let mut notifications = use_notifications();

    let mut form = use_signal(RegistrationForm::new);
    let mut errors = use_signal(FieldErrors::new);
    let mut availability = use_signal(AvailabilityState::default);

    let visibility = use_memo(move || derive_visibility(&form.read()));
    let submittable = use_memo(move || {
        let form = form.read();
        let availability = availability.read();
        !availability.is_checking()
            && validate(&rule_context(&form, &availability, minimum_age)).is_ok()
    });

    let mut revalidate = move |field: FormField| {
        let result = {
            let form = form.read();
            let availability = availability.read();
            validate_field(field, &rule_context(&form, &availability, minimum_age))
        };
        let mut errors = errors.write();
        match result {
            Ok(()) => errors.remove(&field),
            Err(e) => errors.insert(field, e),
        };
    };

    let mut on_change = move |field: FormField, value: String| {
        form.write().set(field, value);
        availability.write().edited(field);
        if field.trigger() == ValidateTrigger::Change {
            revalidate(field);
        }
        if !derive_visibility(&form.read()).show_auth_code {
            errors.write().remove(&FormField::AuthenticationCode);
        }
    };

    let mut on_blur = move |field: FormField| {
        if field.trigger() == ValidateTrigger::Blur {
            revalidate(field);
            if field == FormField::Password && !form.read().confirm_password.is_empty() {
                revalidate(FormField::ConfirmPassword);
            }
        }

        let Some(unique) = field.unique() else {
            return;
        };
        let value = form.read().value(field).trim().to_string();
        if value.is_empty() {
            return;
        }
        let Some(directory) = directory.read().clone() else {
            tracing::warn!("No quest API configured; skipping {} check", unique.key());
            return;
        };

        availability.write().begin_lookup(unique);
        spawn(async move {
            let result = directory.is_available(unique, &value).await;
            let outcome = match &result {
                Ok(available) => LookupOutcome::from(*available),
                Err(_) => LookupOutcome::Failed,
            };
            let current = form.read().value(field).to_string();
            if !availability
                .write()
                .finish_lookup(unique, &value, &current, outcome)
            {
                tracing::debug!("Discarding stale {} lookup", unique.key());
                return;
            }
            match result {
                Ok(_) => revalidate(field),
                Err(e) => {
                    tracing::error!("Availability check for {} failed: {}", unique.key(), e);
                    notify(&mut notifications, NoticeLevel::Error, &e.to_string());
                }
            }
        });
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let snapshot = form.read().clone();
        let result = {
            let availability = availability.read();
            validate(&rule_context(&snapshot, &availability, minimum_age))
        };
        match result {
            Ok(()) => {
                tracing::info!(id = %snapshot.id, "registration credentials accepted");
                errors.set(FieldErrors::new());
                on_complete.call(snapshot);
                on_next.call(());
            }
            Err(field_errors) => {
                tracing::debug!("registration rejected: {} field(s)", field_errors.len());
                errors.set(field_errors);
            }
        }
    };

    let checking = availability.read().is_checking();
    let error_for = move |field: FormField| errors.read().get(&field).map(|e| e.to_string());
    let current_gender = form.read().gender;

    rsx! {
        form {
            class: "credentials-form",
            onsubmit: on_submit,

            h2 { "회원가입 페이지" }

            div {
                class: "form-group",
                for field in [FormField::Id, FormField::Password, FormField::ConfirmPassword, FormField::Email] {
                    TextField {
                        key: "{field.key()}",
                        field: field,
                        value: form.read().value(field).to_string(),
                        r#type: "{input_type(field)}",
                        disabled: checking && field.unique().is_some(),
                        error: error_for(field),
                        on_change: move |(f, v): (FormField, String)| on_change(f, v),
                        on_blur: move |f: FormField| on_blur(f),
                    }
                }
            }

            div { class: "form-divider" }

            div {
                class: "form-group",
                TextField {
                    field: FormField::Name,
                    value: form.read().name.clone(),
                    error: error_for(FormField::Name),
                    on_change: move |(f, v): (FormField, String)| on_change(f, v),
                    on_blur: move |f: FormField| on_blur(f),
                }
                TextField {
                    field: FormField::Birthday,
                    value: form.read().birthday.clone(),
                    maxlength: 10,
                    error: error_for(FormField::Birthday),
                    on_change: move |(f, v): (FormField, String)| on_change(f, v),
                    on_blur: move |f: FormField| on_blur(f),
                }

                div {
                    class: "radio-group",
                    for gender in Gender::ALL {
                        button {
                            key: "{gender.key()}",
                            r#type: "button",
                            class: if current_gender == Some(gender) { "radio-button radio-button--checked" } else { "radio-button" },
                            onclick: move |_| on_change(FormField::Gender, gender.key().to_string()),
                            "{gender.label()}"
                        }
                    }
                }

                if visibility().show_auth_code {
                    TextField {
                        field: FormField::AuthenticationCode,
                        value: form.read().authentication_code.clone(),
                        error: error_for(FormField::AuthenticationCode),
                        on_change: move |(f, v): (FormField, String)| on_change(f, v),
                        on_blur: move |f: FormField| on_blur(f),
                    }
                }
            }

            Button {
                variant: ButtonVariant::Primary,
                class: "w-full mt-8",
                r#type: "submit",
                disabled: !submittable(),
                "인증 요청"
            }
        }
    }
}

#[component]
fn TextField(
    field: FormField,
    value: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] disabled: bool,
    maxlength: Option<usize>,
    error: Option<String>,
    on_change: EventHandler<(FormField, String)>,
    on_blur: EventHandler<FormField>,
) -> Element {
    rsx! {
        div {
            class: "form-item",
            Input {
                class: "w-full",
                r#type: r#type,
                placeholder: "{field.placeholder()}",
                value: value,
                disabled: disabled,
                maxlength: maxlength,
                invalid: error.is_some(),
                oninput: move |evt: FormEvent| on_change.call((field, evt.value())),
                onblur: move |_| on_blur.call(field),
            }
            if let Some(message) = error {
                div { class: "form-item-error", "{message}" }
            }
        }
    }
}
