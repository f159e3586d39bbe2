//! Success notifications returned by list controller operations.

use std::fmt;

use super::{FetchError, User};

/// A confirmed mutation the user should be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// `POST /users` returned 201.
    UserCreated,
    /// `PUT /users/{id}` returned 200.
    UserUpdated,
    /// `DELETE /users/{id}` returned 200.
    UserDeleted,
}

impl Notice {
    /// Message shown to the user.
    pub const fn message(self) -> &'static str {
        match self {
            Self::UserCreated => "New User created successfully!",
            Self::UserUpdated => "User details updated successfully!",
            Self::UserDeleted => "User deleted successfully!",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a confirmed mutation and the refresh it triggered.
///
/// The mutation itself succeeded; `refresh` reports whether the list could be
/// reloaded afterwards. A failed refresh leaves the previously held records in
/// place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationReport {
    /// What to tell the user.
    pub notice: Notice,
    /// Record returned by the API for create and update.
    pub user: Option<User>,
    /// Result of the follow-up list reload.
    pub refresh: Result<(), FetchError>,
}
