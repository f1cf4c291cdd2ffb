//! Validation rules for the registration form.
//!
//! Each field has one rule in [`RULES`]. Rules are plain functions over a
//! [`RuleContext`] so they can read other fields (confirm password), the
//! uniqueness lookups and today's date without hidden state.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::registration::{
    derive_visibility, Availability, AvailabilityState, FormField, RegistrationForm, UniqueField,
};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 16;
pub const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A failed rule. The message is what the user sees under the field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("아이디를 입력해주세요.")]
    IdRequired,
    #[error("이미 사용중인 아이디입니다.")]
    IdTaken,
    #[error("비밀번호를 입력해주세요")]
    PasswordRequired,
    #[error("비밀번호 취약 : 8~16자의 영문 대/소문자, 숫자, 특수문자 중 2가지 이상을 사용해야 합니다.")]
    PasswordWeak,
    #[error("비밀번호가 일치하지 않습니다.")]
    PasswordMismatch,
    #[error("이메일을 입력해주세요.")]
    EmailRequired,
    #[error("올바른 이메일 형식이 아닙니다.")]
    EmailInvalid,
    #[error("이미 사용중인 이메일입니다.")]
    EmailTaken,
    #[error("이름은 필수로 입력해야 합니다.")]
    NameRequired,
    #[error("생년월일을 입력하세요.")]
    BirthdayRequired,
    #[error("올바른 날짜 형식이 아닙니다.")]
    BirthdayInvalid,
    #[error("{0}세 미만은 가입이 불가능합니다.")]
    Underage(u32),
    #[error("인증번호를 입력하세요.")]
    AuthenticationCodeRequired,
}

pub type FieldErrors = BTreeMap<FormField, ValidationError>;

/// Everything a rule may look at.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub form: &'a RegistrationForm,
    pub availability: &'a AvailabilityState,
    pub today: NaiveDate,
    pub minimum_age: u32,
}

type Rule = fn(&RuleContext<'_>) -> Result<(), ValidationError>;

const RULES: &[(FormField, Rule)] = &[
    (FormField::Id, id_rule),
    (FormField::Password, password_rule),
    (FormField::ConfirmPassword, confirm_rule),
    (FormField::Email, email_rule),
    (FormField::Name, name_rule),
    (FormField::Birthday, birthday_rule),
    (FormField::Gender, gender_rule),
    (FormField::AuthenticationCode, authentication_code_rule),
];

/// Run the rule for a single field.
pub fn validate_field(field: FormField, ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    RULES
        .iter()
        .find(|(f, _)| *f == field)
        .map_or(Ok(()), |(_, rule)| rule(ctx))
}

/// Run every rule; collect all failures keyed by field.
pub fn validate(ctx: &RuleContext<'_>) -> Result<(), FieldErrors> {
    let errors: FieldErrors = RULES
        .iter()
        .filter_map(|(field, rule)| rule(ctx).err().map(|e| (*field, e)))
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn id_rule(ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    if ctx.form.id.trim().is_empty() {
        return Err(ValidationError::IdRequired);
    }
    if ctx.availability.get(UniqueField::Id) == Availability::Taken {
        return Err(ValidationError::IdTaken);
    }
    Ok(())
}

fn password_rule(ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    check_password(&ctx.form.password)
}

fn confirm_rule(ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    check_confirm(&ctx.form.password, &ctx.form.confirm_password)
}

fn email_rule(ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    let email = ctx.form.email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !looks_like_email(email) {
        return Err(ValidationError::EmailInvalid);
    }
    if ctx.availability.get(UniqueField::Email) == Availability::Taken {
        return Err(ValidationError::EmailTaken);
    }
    Ok(())
}

fn name_rule(ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    if ctx.form.name.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

fn birthday_rule(ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    check_birthday(&ctx.form.birthday, ctx.today, ctx.minimum_age)
}

// Gender may be left unselected; it only gates the authentication-code reveal.
fn gender_rule(_: &RuleContext<'_>) -> Result<(), ValidationError> {
    Ok(())
}

fn authentication_code_rule(ctx: &RuleContext<'_>) -> Result<(), ValidationError> {
    if derive_visibility(ctx.form).show_auth_code && ctx.form.authentication_code.trim().is_empty()
    {
        return Err(ValidationError::AuthenticationCodeRequired);
    }
    Ok(())
}

/// Length in [8, 16] and at least two of: uppercase, lowercase, digit, special.
pub fn check_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    let len = password.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(ValidationError::PasswordWeak);
    }
    if character_classes(password) < 2 {
        return Err(ValidationError::PasswordWeak);
    }
    Ok(())
}

/// Number of distinct character classes present in `s`.
pub fn character_classes(s: &str) -> usize {
    let checks: [fn(char) -> bool; 4] = [
        |c| c.is_ascii_uppercase(),
        |c| c.is_ascii_lowercase(),
        |c| c.is_ascii_digit(),
        |c| SPECIAL_CHARS.contains(c),
    ];
    checks.iter().filter(|check| s.chars().any(|c| check(c))).count()
}

pub fn check_confirm(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password == confirm {
        Ok(())
    } else {
        Err(ValidationError::PasswordMismatch)
    }
}

/// Accepts the masked `YYYY.MM.DD` form and the bare eight digits.
pub fn parse_birthday(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y.%m.%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .ok()
}

/// Completed years between `birth` and `today`; negative for future dates.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

pub fn check_birthday(s: &str, today: NaiveDate, minimum_age: u32) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::BirthdayRequired);
    }
    let birth = parse_birthday(s).ok_or(ValidationError::BirthdayInvalid)?;
    let age = age_on(birth, today);
    if age < 0 || (age as u32) < minimum_age {
        return Err(ValidationError::Underage(minimum_age));
    }
    Ok(())
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            id: "quester".into(),
            password: "Secret123".into(),
            confirm_password: "Secret123".into(),
            email: "quester@example.com".into(),
            name: "홍길동".into(),
            birthday: "1990.01.01".into(),
            gender: None,
            authentication_code: String::new(),
        }
    }

    fn ctx<'a>(form: &'a RegistrationForm, availability: &'a AvailabilityState) -> RuleContext<'a> {
        RuleContext {
            form,
            availability,
            today: today(),
            minimum_age: 14,
        }
    }

    #[test]
    fn test_password_length_bounds_ignore_classes() {
        assert_eq!(check_password("Ab1!"), Err(ValidationError::PasswordWeak));
        assert_eq!(check_password("Ab1!Ab1"), Err(ValidationError::PasswordWeak));
        assert_eq!(
            check_password("Ab1!Ab1!Ab1!Ab1!A"),
            Err(ValidationError::PasswordWeak)
        );
        assert_eq!(
            check_password("Abcdefgh12345678!@#$"),
            Err(ValidationError::PasswordWeak)
        );
    }

    #[test]
    fn test_password_two_classes_in_range_pass() {
        for pw in [
            "abcdefg1",
            "ABCDEFGH1",
            "abcdEFGH",
            "abcdefg!",
            "12345678!",
            "Ab1!Ab1!Ab1!Ab1!",
        ] {
            assert_eq!(check_password(pw), Ok(()), "{pw} should pass");
        }
    }

    #[test]
    fn test_password_single_class_fails() {
        assert_eq!(check_password("abcdefgh"), Err(ValidationError::PasswordWeak));
        assert_eq!(check_password("12345678"), Err(ValidationError::PasswordWeak));
        // space and '-' are not in the special set
        assert_eq!(check_password("abc defg-"), Err(ValidationError::PasswordWeak));
    }

    #[test]
    fn test_password_blank_or_whitespace() {
        assert_eq!(check_password(""), Err(ValidationError::PasswordRequired));
        assert_eq!(
            check_password("          "),
            Err(ValidationError::PasswordRequired)
        );
    }

    #[test]
    fn test_password_length_counts_characters() {
        // 8 characters, more than 8 bytes
        assert_eq!(check_password("가나다라마바a1"), Ok(()));
    }

    #[test]
    fn test_confirm_requires_exact_match() {
        assert_eq!(check_confirm("Secret123", "Secret123"), Ok(()));
        assert_eq!(
            check_confirm("Secret123", "secret123"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            check_confirm("Secret123", ""),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            check_confirm("Secret123", "Secret123 "),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn test_birthday_age_boundary() {
        // Exactly 14 today.
        assert_eq!(check_birthday("2010.06.15", today(), 14), Ok(()));
        // Turns 14 tomorrow.
        assert_eq!(
            check_birthday("2010.06.16", today(), 14),
            Err(ValidationError::Underage(14))
        );
        assert_eq!(check_birthday("20100615", today(), 14), Ok(()));
    }

    #[test]
    fn test_birthday_invalid_dates() {
        assert_eq!(
            check_birthday("2023.02.30", today(), 14),
            Err(ValidationError::BirthdayInvalid)
        );
        assert_eq!(
            check_birthday("1990.13.01", today(), 14),
            Err(ValidationError::BirthdayInvalid)
        );
        assert_eq!(
            check_birthday("1990.01", today(), 14),
            Err(ValidationError::BirthdayInvalid)
        );
        assert_eq!(
            check_birthday("", today(), 14),
            Err(ValidationError::BirthdayRequired)
        );
    }

    #[test]
    fn test_birthday_in_future_is_underage() {
        assert_eq!(
            check_birthday("2030.01.01", today(), 14),
            Err(ValidationError::Underage(14))
        );
    }

    #[test]
    fn test_age_on() {
        let birth = NaiveDate::from_ymd_opt(2000, 2, 29).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2014, 2, 28).unwrap()), 13);
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2014, 3, 1).unwrap()), 14);
    }

    #[test]
    fn test_valid_form_passes() {
        let form = valid_form();
        let availability = AvailabilityState::default();
        assert_eq!(validate(&ctx(&form, &availability)), Ok(()));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut form = valid_form();
        form.name = "   ".into();
        let availability = AvailabilityState::default();
        let errors = validate(&ctx(&form, &availability)).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&FormField::Name], ValidationError::NameRequired);
    }

    #[test]
    fn test_collects_every_failure() {
        let mut form = valid_form();
        form.password = "short".into();
        form.confirm_password = "other".into();
        form.birthday = "2015.01.01".into();
        let availability = AvailabilityState::default();
        let errors = validate(&ctx(&form, &availability)).unwrap_err();
        assert_eq!(errors[&FormField::Password], ValidationError::PasswordWeak);
        assert_eq!(
            errors[&FormField::ConfirmPassword],
            ValidationError::PasswordMismatch
        );
        assert_eq!(errors[&FormField::Birthday], ValidationError::Underage(14));
        assert!(!errors.contains_key(&FormField::Name));
    }

    #[test]
    fn test_taken_values_rejected() {
        let form = valid_form();
        let availability = AvailabilityState {
            id: Availability::Taken,
            email: Availability::Taken,
        };
        let context = ctx(&form, &availability);
        assert_eq!(
            validate_field(FormField::Id, &context),
            Err(ValidationError::IdTaken)
        );
        assert_eq!(
            validate_field(FormField::Email, &context),
            Err(ValidationError::EmailTaken)
        );
    }

    #[test]
    fn test_email_format() {
        let availability = AvailabilityState::default();
        for bad in ["quester", "quester@", "@example.com", "a@b", "a b@example.com"] {
            let mut form = valid_form();
            form.email = bad.into();
            assert_eq!(
                validate_field(FormField::Email, &ctx(&form, &availability)),
                Err(ValidationError::EmailInvalid),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_visible_auth_code_is_required() {
        let mut form = valid_form();
        form.gender = Some(crate::registration::Gender::None);
        let availability = AvailabilityState::default();
        assert_eq!(
            validate_field(FormField::AuthenticationCode, &ctx(&form, &availability)),
            Err(ValidationError::AuthenticationCodeRequired)
        );

        form.authentication_code = "123456".into();
        assert_eq!(validate(&ctx(&form, &availability)), Ok(()));
    }

    #[test]
    fn test_underage_message_names_the_limit() {
        assert_eq!(
            ValidationError::Underage(14).to_string(),
            "14세 미만은 가입이 불가능합니다."
        );
    }
}
