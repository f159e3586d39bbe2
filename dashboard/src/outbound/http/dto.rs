//! DTOs for the user API JSON payloads.
//!
//! Responses decode into these transport DTOs first and are mapped into
//! domain records in one pass. Request bodies are serialised from borrowed
//! drafts so no copy of the payload is made.

use serde::{Deserialize, Serialize};

use crate::domain::{User, UserDraft, UserId};

/// Identifier as the API encodes it: mock backends hand out strings, others
/// numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum UserIdDto {
    Text(String),
    Number(u64),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    pub(super) id: UserIdDto,
    #[serde(default)]
    pub(super) first_name: String,
    #[serde(default)]
    pub(super) last_name: String,
    #[serde(default)]
    pub(super) email: String,
    #[serde(default)]
    pub(super) department: String,
}

impl UserDto {
    pub(super) fn into_domain(self) -> Result<User, String> {
        let raw_id = match self.id {
            UserIdDto::Text(text) => text,
            UserIdDto::Number(number) => number.to_string(),
        };
        let id = UserId::new(raw_id).map_err(|err| format!("invalid user id: {err}"))?;
        Ok(User::new(
            id,
            UserDraft {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
                department: self.department,
            },
        ))
    }
}

/// `POST /users` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewUserBody<'a> {
    pub(super) first_name: &'a str,
    pub(super) last_name: &'a str,
    pub(super) email: &'a str,
    pub(super) department: &'a str,
}

impl<'a> From<&'a UserDraft> for NewUserBody<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            email: &draft.email,
            department: &draft.department,
        }
    }
}

/// `PUT /users/{id}` body: the full record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserBody<'a> {
    pub(super) id: &'a str,
    #[serde(flatten)]
    pub(super) fields: NewUserBody<'a>,
}

impl<'a> UserBody<'a> {
    pub(super) fn new(id: &'a UserId, draft: &'a UserDraft) -> Self {
        Self {
            id: id.as_ref(),
            fields: NewUserBody::from(draft),
        }
    }
}
