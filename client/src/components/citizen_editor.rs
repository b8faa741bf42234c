//! Citizen create/edit form.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form edits a `CitizenDraft` of raw input strings. `validate` turns a
//! draft into the `CitizenForm` payload or a list of per-field messages;
//! the component only renders and forwards a valid payload to its caller.

#[cfg(test)]
#[path = "citizen_editor_test.rs"]
mod citizen_editor_test;

use leptos::prelude::*;

use crate::net::types::{Citizen, CitizenForm};

/// Accepted gender codes with their labels.
pub const GENDERS: [(&str, &str); 3] = [("male", "Male"), ("female", "Female"), ("other", "Other")];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CitizenField {
    IdNumber,
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    Address,
    PhoneNumber,
    Email,
    Nationality,
}

impl CitizenField {
    pub fn label(self) -> &'static str {
        match self {
            CitizenField::IdNumber => "ID number",
            CitizenField::FirstName => "First name",
            CitizenField::LastName => "Last name",
            CitizenField::DateOfBirth => "Date of birth",
            CitizenField::Gender => "Gender",
            CitizenField::Address => "Address",
            CitizenField::PhoneNumber => "Phone number",
            CitizenField::Email => "Email",
            CitizenField::Nationality => "Nationality",
        }
    }

    fn value(self, draft: &CitizenDraft) -> &str {
        match self {
            CitizenField::IdNumber => &draft.id_number,
            CitizenField::FirstName => &draft.first_name,
            CitizenField::LastName => &draft.last_name,
            CitizenField::DateOfBirth => &draft.date_of_birth,
            CitizenField::Gender => &draft.gender,
            CitizenField::Address => &draft.address,
            CitizenField::PhoneNumber => &draft.phone_number,
            CitizenField::Email => &draft.email,
            CitizenField::Nationality => &draft.nationality,
        }
    }

    fn value_mut(self, draft: &mut CitizenDraft) -> &mut String {
        match self {
            CitizenField::IdNumber => &mut draft.id_number,
            CitizenField::FirstName => &mut draft.first_name,
            CitizenField::LastName => &mut draft.last_name,
            CitizenField::DateOfBirth => &mut draft.date_of_birth,
            CitizenField::Gender => &mut draft.gender,
            CitizenField::Address => &mut draft.address,
            CitizenField::PhoneNumber => &mut draft.phone_number,
            CitizenField::Email => &mut draft.email,
            CitizenField::Nationality => &mut draft.nationality,
        }
    }
}

pub type FieldErrors = Vec<(CitizenField, &'static str)>;

/// Raw form input, one string per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CitizenDraft {
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub nationality: String,
}

impl From<&Citizen> for CitizenDraft {
    fn from(citizen: &Citizen) -> Self {
        Self {
            id_number: citizen.id_number.clone(),
            first_name: citizen.first_name.clone(),
            last_name: citizen.last_name.clone(),
            date_of_birth: citizen.date_of_birth.clone(),
            gender: citizen.gender.clone(),
            address: citizen.address.clone(),
            phone_number: citizen.phone_number.clone(),
            email: citizen.email.clone().unwrap_or_default(),
            nationality: citizen.nationality.clone(),
        }
    }
}

impl CitizenDraft {
    /// Check every field and build the payload. Values are trimmed; an
    /// empty email is left out.
    pub fn validate(&self) -> Result<CitizenForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        let field = move |f: CitizenField| f.value(self).trim();

        match field(CitizenField::IdNumber) {
            "" => errors.push((CitizenField::IdNumber, "ID number is required")),
            id if !id.bytes().all(|b| b.is_ascii_digit()) => {
                errors.push((CitizenField::IdNumber, "ID number must contain only digits"));
            }
            _ => {}
        }
        for required in [CitizenField::FirstName, CitizenField::LastName] {
            if field(required).is_empty() {
                errors.push((required, required_message(required)));
            }
        }
        match field(CitizenField::DateOfBirth) {
            "" => errors.push((CitizenField::DateOfBirth, "Date of birth is required")),
            date if !is_calendar_date(date) => errors.push((CitizenField::DateOfBirth, "Enter a valid date")),
            _ => {}
        }
        match field(CitizenField::Gender) {
            "" => errors.push((CitizenField::Gender, "Gender is required")),
            gender if !GENDERS.iter().any(|(code, _)| *code == gender) => {
                errors.push((CitizenField::Gender, "Please select a valid gender"));
            }
            _ => {}
        }
        for required in [CitizenField::Address, CitizenField::PhoneNumber] {
            if field(required).is_empty() {
                errors.push((required, required_message(required)));
            }
        }
        let email = field(CitizenField::Email);
        if !email.is_empty() && !is_email(email) {
            errors.push((CitizenField::Email, "Invalid email format"));
        }
        if field(CitizenField::Nationality).is_empty() {
            errors.push((CitizenField::Nationality, "Nationality is required"));
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        let owned = |f: CitizenField| Some(field(f).to_owned());
        Ok(CitizenForm {
            id_number: owned(CitizenField::IdNumber),
            first_name: owned(CitizenField::FirstName),
            last_name: owned(CitizenField::LastName),
            date_of_birth: owned(CitizenField::DateOfBirth),
            gender: owned(CitizenField::Gender),
            address: owned(CitizenField::Address),
            phone_number: owned(CitizenField::PhoneNumber),
            email: (!email.is_empty()).then(|| email.to_owned()),
            nationality: owned(CitizenField::Nationality),
        })
    }
}

fn required_message(field: CitizenField) -> &'static str {
    match field {
        CitizenField::FirstName => "First name is required",
        CitizenField::LastName => "Last name is required",
        CitizenField::Address => "Address is required",
        CitizenField::PhoneNumber => "Phone number is required",
        _ => "This field is required",
    }
}

/// `YYYY-MM-DD`, as a date input submits it.
fn is_calendar_date(value: &str) -> bool {
    let parts: Vec<&str> = value.split('-').collect();
    let [year, month, day] = parts[..] else {
        return false;
    };
    let digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !(digits(year, 4) && digits(month, 2) && digits(day, 2)) {
        return false;
    }
    matches!((month.parse::<u8>(), day.parse::<u8>()), (Ok(1..=12), Ok(1..=31)))
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !value.chars().any(char::is_whitespace)
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

fn field_error(errors: &FieldErrors, field: CitizenField) -> Option<&'static str> {
    errors.iter().find(|(f, _)| *f == field).map(|(_, message)| *message)
}

#[component]
pub fn CitizenEditor(
    initial: CitizenDraft,
    #[prop(into)] submit_label: String,
    #[prop(into)] busy: Signal<bool>,
    on_submit: Callback<CitizenForm>,
) -> impl IntoView {
    let draft = RwSignal::new(initial);
    let errors = RwSignal::new(FieldErrors::new());

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match draft.with(CitizenDraft::validate) {
            Ok(form) => {
                errors.set(FieldErrors::new());
                on_submit.run(form);
            }
            Err(found) => errors.set(found),
        }
    };

    let input = move |field: CitizenField, kind: &'static str| {
        view! {
            <label class="field">
                <span class="field__label">{field.label()}</span>
                <input
                    type=kind
                    class="field__input"
                    class:field__input--invalid=move || errors.with(|e| field_error(e, field).is_some())
                    prop:value=move || draft.with(|d| field.value(d).to_owned())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|d| *field.value_mut(d) = value);
                    }
                />
                <span class="field__error">{move || errors.with(|e| field_error(e, field))}</span>
            </label>
        }
    };

    view! {
        <form class="citizen-form" on:submit=on_form_submit>
            <div class="citizen-form__grid">
                {input(CitizenField::IdNumber, "text")}
                {input(CitizenField::Nationality, "text")}
                {input(CitizenField::FirstName, "text")}
                {input(CitizenField::LastName, "text")}
                {input(CitizenField::DateOfBirth, "date")}
                <label class="field">
                    <span class="field__label">{CitizenField::Gender.label()}</span>
                    <select
                        class="field__input"
                        prop:value=move || draft.with(|d| d.gender.clone())
                        on:change=move |ev| {
                            let gender = event_target_value(&ev);
                            draft.update(|d| d.gender = gender);
                        }
                    >
                        <option value="">"Select gender"</option>
                        {GENDERS
                            .into_iter()
                            .map(|(code, label)| view! { <option value=code>{label}</option> })
                            .collect_view()}
                    </select>
                    <span class="field__error">{move || errors.with(|e| field_error(e, CitizenField::Gender))}</span>
                </label>
                {input(CitizenField::PhoneNumber, "tel")}
                {input(CitizenField::Email, "email")}
                {input(CitizenField::Address, "text")}
            </div>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {submit_label}
            </button>
        </form>
    }
}
