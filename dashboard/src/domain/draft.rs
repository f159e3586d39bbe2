//! Editable user drafts and their validation.
//!
//! A draft is the uncommitted state behind the create/edit form. Validation is
//! a pure function over the draft and produces one message per failing field.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Editable fields of a user record.
///
/// Drafts never carry the record identifier: in create mode none exists yet
/// and in edit mode it is held by the form mode, out of reach of field edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Department name.
    pub department: String,
}

impl UserDraft {
    /// Read one field.
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::FirstName => self.first_name.as_str(),
            DraftField::LastName => self.last_name.as_str(),
            DraftField::Email => self.email.as_str(),
            DraftField::Department => self.department.as_str(),
        }
    }

    /// Replace one field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::FirstName => &mut self.first_name,
            DraftField::LastName => &mut self.last_name,
            DraftField::Email => &mut self.email,
            DraftField::Department => &mut self.department,
        };
        *slot = value.into();
    }
}

/// Names of the editable draft fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DraftField {
    /// `firstName`
    FirstName,
    /// `lastName`
    LastName,
    /// `email`
    Email,
    /// `department`
    Department,
}

impl DraftField {
    /// Every field, in form order.
    pub const ALL: [Self; 4] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Department,
    ];

    /// Wire name of the field as used by the API payloads.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Department => "department",
        }
    }

    /// Label shown next to the field in the form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Department => "Department Name",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation messages keyed by field.
///
/// An empty mapping means the draft is ready to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<DraftField, String>);

impl FieldErrors {
    /// Whether no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for a field, if any.
    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Iterate failing fields in form order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: DraftField, message: &str) {
        self.0.insert(field, message.to_owned());
    }
}

/// Message for a missing first name.
pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
/// Message for a missing last name.
pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
/// Message for a missing email.
pub const EMAIL_REQUIRED: &str = "Email is required";
/// Message for an email that does not look like `local@domain.tld`.
pub const EMAIL_INVALID: &str = "Invalid email format";
/// Message for a missing department.
pub const DEPARTMENT_REQUIRED: &str = "Department is required";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Whether `email` matches the accepted `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate a draft, returning one message per failing field.
///
/// # Examples
/// ```
/// use dashboard::domain::{DraftField, UserDraft, validate_draft};
///
/// let errors = validate_draft(&UserDraft::default());
/// assert_eq!(errors.get(DraftField::Email), Some("Email is required"));
/// assert_eq!(errors.len(), 4);
/// ```
#[must_use]
pub fn validate_draft(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.first_name.is_empty() {
        errors.insert(DraftField::FirstName, FIRST_NAME_REQUIRED);
    }
    if draft.last_name.is_empty() {
        errors.insert(DraftField::LastName, LAST_NAME_REQUIRED);
    }
    if draft.email.is_empty() {
        errors.insert(DraftField::Email, EMAIL_REQUIRED);
    } else if !is_valid_email(&draft.email) {
        errors.insert(DraftField::Email, EMAIL_INVALID);
    }
    if draft.department.is_empty() {
        errors.insert(DraftField::Department, DEPARTMENT_REQUIRED);
    }

    errors
}

#[cfg(test)]
mod tests;
