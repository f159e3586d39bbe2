//! Tests for draft validation.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn valid_draft() -> UserDraft {
    UserDraft {
        first_name: "Ann".to_owned(),
        last_name: "Lee".to_owned(),
        email: "a@b.com".to_owned(),
        department: "Eng".to_owned(),
    }
}

#[rstest]
fn valid_draft_produces_no_errors(valid_draft: UserDraft) {
    let errors = validate_draft(&valid_draft);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
}

#[rstest]
#[case::first_name(DraftField::FirstName, FIRST_NAME_REQUIRED)]
#[case::last_name(DraftField::LastName, LAST_NAME_REQUIRED)]
#[case::email(DraftField::Email, EMAIL_REQUIRED)]
#[case::department(DraftField::Department, DEPARTMENT_REQUIRED)]
fn missing_field_is_reported(
    mut valid_draft: UserDraft,
    #[case] field: DraftField,
    #[case] expected: &str,
) {
    valid_draft.set(field, "");

    let errors = validate_draft(&valid_draft);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(field), Some(expected));
}

#[rstest]
#[case("a@b.co")]
#[case("first.last+tag@example.org")]
#[case("UPPER_case%1@sub.domain.IO")]
#[case("x-y@host-name.travel")]
fn well_formed_emails_pass(mut valid_draft: UserDraft, #[case] email: &str) {
    valid_draft.email = email.to_owned();

    let errors = validate_draft(&valid_draft);
    assert_eq!(errors.get(DraftField::Email), None);
}

#[rstest]
#[case("bad-email")]
#[case("a@b")]
#[case("a@b.c")]
#[case("@example.com")]
#[case("a b@example.com")]
#[case("a@example.c0m")]
fn malformed_emails_fail(mut valid_draft: UserDraft, #[case] email: &str) {
    valid_draft.email = email.to_owned();

    let errors = validate_draft(&valid_draft);
    assert_eq!(errors.get(DraftField::Email), Some(EMAIL_INVALID));
}

#[rstest]
fn empty_draft_reports_every_field_in_form_order() {
    let errors = validate_draft(&UserDraft::default());
    let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
    assert_eq!(fields, DraftField::ALL.to_vec());
}

#[rstest]
fn whitespace_is_not_treated_as_empty(mut valid_draft: UserDraft) {
    valid_draft.first_name = " ".to_owned();

    assert!(validate_draft(&valid_draft).is_empty());
}

#[rstest]
fn set_and_get_touch_exactly_one_field(mut valid_draft: UserDraft) {
    valid_draft.set(DraftField::Department, "Ops");

    assert_eq!(valid_draft.get(DraftField::Department), "Ops");
    assert_eq!(valid_draft.get(DraftField::FirstName), "Ann");
    assert_eq!(valid_draft.get(DraftField::Email), "a@b.com");
}

#[rstest]
fn field_wire_names_match_api_payload() {
    let names: Vec<_> = DraftField::ALL.iter().map(|f| f.as_str()).collect();
    assert_eq!(names, ["firstName", "lastName", "email", "department"]);
}
