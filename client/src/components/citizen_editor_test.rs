use super::*;

fn complete() -> CitizenDraft {
    CitizenDraft {
        id_number: "8001015009087".to_owned(),
        first_name: "Sipho".to_owned(),
        last_name: "Dlamini".to_owned(),
        date_of_birth: "1980-01-01".to_owned(),
        gender: "male".to_owned(),
        address: "12 Long St".to_owned(),
        phone_number: "0821234567".to_owned(),
        email: String::new(),
        nationality: "ZA".to_owned(),
    }
}

fn fields(errors: &FieldErrors) -> Vec<CitizenField> {
    errors.iter().map(|(field, _)| *field).collect()
}

#[test]
fn complete_draft_builds_full_payload() {
    let form = complete().validate().unwrap();
    assert_eq!(form.id_number.as_deref(), Some("8001015009087"));
    assert_eq!(form.gender.as_deref(), Some("male"));
    assert_eq!(form.nationality.as_deref(), Some("ZA"));
    assert_eq!(form.email, None);
}

#[test]
fn values_are_trimmed() {
    let draft = CitizenDraft { first_name: "  Sipho ".to_owned(), email: " s@dlca.gov ".to_owned(), ..complete() };
    let form = draft.validate().unwrap();
    assert_eq!(form.first_name.as_deref(), Some("Sipho"));
    assert_eq!(form.email.as_deref(), Some("s@dlca.gov"));
}

#[test]
fn empty_draft_reports_every_required_field() {
    let errors = CitizenDraft::default().validate().unwrap_err();
    assert_eq!(
        fields(&errors),
        [
            CitizenField::IdNumber,
            CitizenField::FirstName,
            CitizenField::LastName,
            CitizenField::DateOfBirth,
            CitizenField::Gender,
            CitizenField::Address,
            CitizenField::PhoneNumber,
            CitizenField::Nationality,
        ]
    );
    assert_eq!(field_error(&errors, CitizenField::IdNumber), Some("ID number is required"));
    assert_eq!(field_error(&errors, CitizenField::Email), None);
}

#[test]
fn id_number_must_be_digits() {
    let draft = CitizenDraft { id_number: "80010A".to_owned(), ..complete() };
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors, [(CitizenField::IdNumber, "ID number must contain only digits")]);
}

#[test]
fn gender_outside_choices_is_rejected() {
    let draft = CitizenDraft { gender: "M".to_owned(), ..complete() };
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors, [(CitizenField::Gender, "Please select a valid gender")]);
    for (code, _) in GENDERS {
        assert!(CitizenDraft { gender: code.to_owned(), ..complete() }.validate().is_ok(), "{code}");
    }
}

#[test]
fn malformed_email_is_rejected() {
    for email in ["sipho", "sipho@", "@dlca.gov", "sipho@dlca", "si pho@dlca.gov", "a@b@c.gov", "a@b..gov"] {
        let draft = CitizenDraft { email: email.to_owned(), ..complete() };
        assert_eq!(draft.validate().unwrap_err(), [(CitizenField::Email, "Invalid email format")], "{email}");
    }
}

#[test]
fn date_of_birth_must_be_a_calendar_date() {
    for date in ["01/01/1980", "1980-13-01", "1980-01-32", "1980-1-1", "yesterday"] {
        let draft = CitizenDraft { date_of_birth: date.to_owned(), ..complete() };
        assert_eq!(fields(&draft.validate().unwrap_err()), [CitizenField::DateOfBirth], "{date}");
    }
}

#[test]
fn draft_from_citizen_round_trips_to_valid_payload() {
    let citizen = Citizen {
        id: "c1".to_owned(),
        id_number: "8001015009087".to_owned(),
        first_name: "Sipho".to_owned(),
        last_name: "Dlamini".to_owned(),
        date_of_birth: "1980-01-01".to_owned(),
        gender: "female".to_owned(),
        address: "12 Long St".to_owned(),
        phone_number: "0821234567".to_owned(),
        email: Some("s@dlca.gov".to_owned()),
        nationality: "ZA".to_owned(),
        created_at: "2024-01-01".to_owned(),
        updated_at: "2024-01-01".to_owned(),
    };
    let draft = CitizenDraft::from(&citizen);
    assert_eq!(draft.email, "s@dlca.gov");
    assert_eq!(draft.validate().unwrap().email.as_deref(), Some("s@dlca.gov"));
}
