//! # Registration form state
//!
//! [`RegistrationForm`] is the explicit record behind the sign-up credentials step.
//! It is created empty, mutated one field at a time through [`RegistrationForm::set`],
//! and handed to the caller once [`crate::validation::validate`] accepts it.
//!
//! Which inputs are on screen is a pure function of the form: [`derive_visibility`]
//! must be re-run after every change. The authentication-code input appears only
//! while every other registered field holds a value.

use serde::{Deserialize, Serialize};

/// Every input of the credentials step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Id,
    Password,
    ConfirmPassword,
    Email,
    Name,
    Birthday,
    Gender,
    AuthenticationCode,
}

/// When a field's validator runs while the user is typing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidateTrigger {
    Change,
    Blur,
}

impl FormField {
    /// Fields that are always on screen, i.e. everything but the authentication code.
    pub const REGISTERED: [FormField; 7] = [
        FormField::Id,
        FormField::Password,
        FormField::ConfirmPassword,
        FormField::Email,
        FormField::Name,
        FormField::Birthday,
        FormField::Gender,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FormField::Id => "id",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::Email => "email",
            FormField::Name => "name",
            FormField::Birthday => "birthday",
            FormField::Gender => "gender",
            FormField::AuthenticationCode => "authenticationCode",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Id => "아이디",
            FormField::Password => "비밀번호 입력",
            FormField::ConfirmPassword => "비밀번호 재확인",
            FormField::Email => "이메일",
            FormField::Name => "이름",
            FormField::Birthday => "생년월일 8자리",
            FormField::Gender => "성별",
            FormField::AuthenticationCode => "인증번호 입력",
        }
    }

    pub fn trigger(self) -> ValidateTrigger {
        match self {
            FormField::Password | FormField::ConfirmPassword => ValidateTrigger::Blur,
            _ => ValidateTrigger::Change,
        }
    }

    /// The unique-value lookup that runs when this field loses focus, if any.
    pub fn unique(self) -> Option<UniqueField> {
        match self {
            FormField::Id => Some(UniqueField::Id),
            FormField::Email => Some(UniqueField::Email),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Man,
    Woman,
    None,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Man, Gender::Woman, Gender::None];

    pub fn key(self) -> &'static str {
        match self {
            Gender::Man => "man",
            Gender::Woman => "woman",
            Gender::None => "none",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Man => "남자",
            Gender::Woman => "여자",
            Gender::None => "선택안함",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.key() == key)
    }
}

/// The credentials step's field values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub id: String,
    pub password: String,
    pub confirm_password: String,
    pub email: String,
    pub name: String,
    /// Masked as `YYYY.MM.DD`.
    pub birthday: String,
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub authentication_code: String,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Id => &self.id,
            FormField::Password => &self.password,
            FormField::ConfirmPassword => &self.confirm_password,
            FormField::Email => &self.email,
            FormField::Name => &self.name,
            FormField::Birthday => &self.birthday,
            FormField::Gender => self.gender.map(Gender::key).unwrap_or(""),
            FormField::AuthenticationCode => &self.authentication_code,
        }
    }

    /// Store raw input for `field`. The birthday is masked on the way in and an
    /// unrecognised gender key clears the selection.
    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Id => self.id = value,
            FormField::Password => self.password = value,
            FormField::ConfirmPassword => self.confirm_password = value,
            FormField::Email => self.email = value,
            FormField::Name => self.name = value,
            FormField::Birthday => self.birthday = mask_birthday(&value),
            FormField::Gender => self.gender = Gender::from_key(&value),
            FormField::AuthenticationCode => self.authentication_code = value,
        }
    }

    pub fn is_filled(&self, field: FormField) -> bool {
        !self.value(field).is_empty()
    }
}

/// Derived on-screen state of the form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Visibility {
    pub show_auth_code: bool,
}

pub fn derive_visibility(form: &RegistrationForm) -> Visibility {
    Visibility {
        show_auth_code: FormField::REGISTERED.iter().all(|f| form.is_filled(*f)),
    }
}

/// Birthday input mask: keep digits only and insert `.` before the 5th and 7th.
pub fn mask_birthday(input: &str) -> String {
    let mut masked = String::with_capacity(10);
    for (i, c) in input.chars().filter(char::is_ascii_digit).take(8).enumerate() {
        if i == 4 || i == 6 {
            masked.push('.');
        }
        masked.push(c);
    }
    masked
}

/// Fields whose values must be unique across accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniqueField {
    Id,
    Email,
}

impl UniqueField {
    /// Query key used by the account directory.
    pub fn key(self) -> &'static str {
        match self {
            UniqueField::Id => "id",
            UniqueField::Email => "email",
        }
    }
}

/// Outcome of the last uniqueness lookup for one field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Unchecked,
    Checking,
    Available,
    Taken,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AvailabilityState {
    pub id: Availability,
    pub email: Availability,
}

impl AvailabilityState {
    pub fn get(&self, field: UniqueField) -> Availability {
        match field {
            UniqueField::Id => self.id,
            UniqueField::Email => self.email,
        }
    }

    pub fn set(&mut self, field: UniqueField, availability: Availability) {
        match field {
            UniqueField::Id => self.id = availability,
            UniqueField::Email => self.email = availability,
        }
    }

    pub fn is_checking(&self) -> bool {
        self.id == Availability::Checking || self.email == Availability::Checking
    }

    /// Any edit of a unique field invalidates its last lookup.
    pub fn edited(&mut self, field: FormField) {
        if let Some(unique) = field.unique() {
            self.set(unique, Availability::Unchecked);
        }
    }

    pub fn begin_lookup(&mut self, field: UniqueField) {
        self.set(field, Availability::Checking);
    }

    /// Record a finished lookup of `looked_up`. Returns `false` and leaves the
    /// state alone when the field now holds something else (`current`).
    pub fn finish_lookup(
        &mut self,
        field: UniqueField,
        looked_up: &str,
        current: &str,
        outcome: LookupOutcome,
    ) -> bool {
        if current.trim() != looked_up {
            return false;
        }
        let state = match outcome {
            LookupOutcome::Available => Availability::Available,
            LookupOutcome::Taken => Availability::Taken,
            LookupOutcome::Failed => Availability::Unchecked,
        };
        self.set(field, state);
        true
    }
}

/// Result of one uniqueness lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupOutcome {
    Available,
    Taken,
    Failed,
}

impl From<bool> for LookupOutcome {
    fn from(available: bool) -> Self {
        if available {
            LookupOutcome::Available
        } else {
            LookupOutcome::Taken
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set(FormField::Id, "quester".into());
        form.set(FormField::Password, "Secret123".into());
        form.set(FormField::ConfirmPassword, "Secret123".into());
        form.set(FormField::Email, "quester@example.com".into());
        form.set(FormField::Name, "홍길동".into());
        form.set(FormField::Birthday, "19900101".into());
        form.set(FormField::Gender, "woman".into());
        form
    }

    #[test]
    fn test_auth_code_hidden_on_empty_form() {
        assert!(!derive_visibility(&RegistrationForm::new()).show_auth_code);
    }

    #[test]
    fn test_auth_code_shown_once_every_field_is_filled() {
        let form = filled();
        assert!(derive_visibility(&form).show_auth_code);
    }

    #[test]
    fn test_clearing_any_field_hides_auth_code() {
        for field in FormField::REGISTERED {
            let mut form = filled();
            form.set(field, String::new());
            assert!(
                !derive_visibility(&form).show_auth_code,
                "{field:?} cleared but auth code still shown"
            );
        }
    }

    #[test]
    fn test_auth_code_value_does_not_affect_its_own_visibility() {
        let mut form = filled();
        form.set(FormField::AuthenticationCode, String::new());
        assert!(derive_visibility(&form).show_auth_code);
    }

    #[test]
    fn test_mask_birthday() {
        assert_eq!(mask_birthday("19900101"), "1990.01.01");
        assert_eq!(mask_birthday("1990"), "1990");
        assert_eq!(mask_birthday("19901"), "1990.1");
        assert_eq!(mask_birthday("1990.01.0"), "1990.01.0");
        assert_eq!(mask_birthday("1990-01-01 extra 99"), "1990.01.01");
    }

    #[test]
    fn test_gender_set_and_value() {
        let mut form = RegistrationForm::new();
        form.set(FormField::Gender, "man".into());
        assert_eq!(form.gender, Some(Gender::Man));
        assert_eq!(form.value(FormField::Gender), "man");
        form.set(FormField::Gender, "other".into());
        assert_eq!(form.gender, None);
        assert!(!form.is_filled(FormField::Gender));
    }

    #[test]
    fn test_edit_resets_only_unique_fields() {
        let mut state = AvailabilityState {
            id: Availability::Taken,
            email: Availability::Available,
        };
        state.edited(FormField::Name);
        assert_eq!(state.id, Availability::Taken);
        state.edited(FormField::Id);
        assert_eq!(state.id, Availability::Unchecked);
        assert_eq!(state.email, Availability::Available);
        state.edited(FormField::Email);
        assert_eq!(state.email, Availability::Unchecked);
    }

    #[test]
    fn test_lookup_result_applies_when_value_unchanged() {
        let mut state = AvailabilityState::default();
        state.begin_lookup(UniqueField::Id);
        assert!(state.is_checking());

        assert!(state.finish_lookup(UniqueField::Id, "quester", " quester ", false.into()));
        assert_eq!(state.id, Availability::Taken);
        assert!(!state.is_checking());

        state.begin_lookup(UniqueField::Email);
        assert!(state.finish_lookup(
            UniqueField::Email,
            "q@example.com",
            "q@example.com",
            LookupOutcome::Available
        ));
        assert_eq!(state.email, Availability::Available);
    }

    #[test]
    fn test_stale_lookup_result_is_discarded() {
        let mut state = AvailabilityState::default();
        state.begin_lookup(UniqueField::Id);
        state.edited(FormField::Id);

        assert!(!state.finish_lookup(UniqueField::Id, "quester", "quester2", LookupOutcome::Taken));
        assert_eq!(state.id, Availability::Unchecked);
    }

    #[test]
    fn test_failed_lookup_resets_to_unchecked() {
        let mut state = AvailabilityState::default();
        state.begin_lookup(UniqueField::Email);
        assert!(state.finish_lookup(
            UniqueField::Email,
            "q@example.com",
            "q@example.com",
            LookupOutcome::Failed
        ));
        assert_eq!(state.email, Availability::Unchecked);
        assert!(!state.is_checking());
    }

    #[test]
    fn test_serializes_as_field_map() {
        let value = serde_json::to_value(filled()).unwrap();
        assert_eq!(value["confirmPassword"], "Secret123");
        assert_eq!(value["birthday"], "1990.01.01");
        assert_eq!(value["gender"], "woman");
        assert!(value.get("authenticationCode").is_none());
    }
}
